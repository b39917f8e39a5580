//! Routes component and action intents to the view manager.

use std::sync::{Arc, Weak};

use serde_json::{Map, Value};
use tokio::runtime::Handle;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, error, warn};

use crate::application::services::ViewManager;
use crate::domain::dom::{Document, Event, ListenerId};
use crate::domain::entities::ModalId;
use crate::domain::errors::ViewError;

use super::actions::{Action, ActionRegistry};

/// Custom event carrying `{ view }`, emitted by navigation components.
pub const NAVIGATE_EVENT: &str = "navigate";
/// Custom event carrying `{ action }`, emitted by the status bar.
pub const STATUS_ACTION_EVENT: &str = "status-action";

struct Request {
    action: Action,
    params: Map<String, Value>,
    done: oneshot::Sender<()>,
}

/// Queues navigation intents and performs them one at a time, in order.
///
/// Holds the manager weakly; the document's listeners must not keep it alive.
#[derive(Debug, Clone)]
pub struct NavigationDispatcher {
    views: Weak<ViewManager>,
    queue: mpsc::UnboundedSender<Request>,
}

impl NavigationDispatcher {
    /// Creates a dispatcher whose worker runs on `runtime`.
    #[must_use]
    pub fn new(views: &Arc<ViewManager>, runtime: Handle) -> Self {
        let (queue, requests) = mpsc::unbounded_channel();
        let weak = Arc::downgrade(views);
        runtime.spawn(run_queue(Weak::clone(&weak), requests));
        Self { views: weak, queue }
    }

    /// Queues a transition to the view called `view`.
    pub fn navigate(&self, view: &str) -> Option<oneshot::Receiver<()>> {
        let mut params = Map::new();
        params.insert("view".to_string(), Value::String(view.to_string()));
        self.dispatch(Action::ShowView, params)
    }

    /// Queues `action`. The receiver resolves once it has been performed.
    ///
    /// Returns `None` when the view manager is gone.
    pub fn dispatch(&self, action: Action, params: Map<String, Value>) -> Option<oneshot::Receiver<()>> {
        if self.views.strong_count() == 0 {
            debug!(action = %action, "View manager gone, dropping action");
            return None;
        }
        let (done, completed) = oneshot::channel();
        if self.queue.send(Request { action, params, done }).is_err() {
            debug!(action = %action, "Navigation queue closed, dropping action");
            return None;
        }
        Some(completed)
    }

    /// Registers handlers for every action on `registry`.
    pub fn register_actions(&self, registry: &ActionRegistry) {
        for action in Action::ALL {
            let dispatcher = self.clone();
            registry.register(action, move |context| {
                dispatcher.dispatch(context.action, context.params.clone());
            });
        }
    }

    /// Listens at the document root for `navigate` and `status-action` events.
    pub fn install(&self, document: &Document) -> Vec<ListenerId> {
        let root = document.root();
        let navigate = self.clone();
        let status = self.clone();

        let listeners = [
            document.add_listener(
                root,
                NAVIGATE_EVENT,
                Arc::new(move |event: &Event| match event.detail()["view"].as_str() {
                    Some(view) => {
                        navigate.navigate(view);
                    }
                    None => warn!("Navigate event without view"),
                }),
            ),
            document.add_listener(
                root,
                STATUS_ACTION_EVENT,
                Arc::new(move |event: &Event| {
                    let name = event.detail()["action"].as_str().unwrap_or_default();
                    match name.parse::<Action>() {
                        Ok(action) => {
                            let params = event.detail().as_object().cloned().unwrap_or_default();
                            status.dispatch(action, params);
                        }
                        Err(e) => warn!(error = %e, "Unhandled status action"),
                    }
                }),
            ),
        ];
        listeners.into_iter().flatten().collect()
    }
}

async fn run_queue(views: Weak<ViewManager>, mut requests: mpsc::UnboundedReceiver<Request>) {
    while let Some(Request { action, params, done }) = requests.recv().await {
        let Some(manager) = views.upgrade() else {
            debug!("View manager gone, stopping navigation queue");
            break;
        };
        if let Err(e) = perform(&manager, action, &params).await {
            error!(action = %action, error = %e, "Action failed");
        }
        drop(manager);
        let _ = done.send(());
    }
}

/// Performs one action against the view manager.
///
/// # Errors
/// Returns error if a view or modal template could not be loaded.
pub async fn perform(
    views: &ViewManager,
    action: Action,
    params: &Map<String, Value>,
) -> Result<(), ViewError> {
    match action {
        Action::ShowView => {
            let Some(view) = params.get("view").and_then(Value::as_str) else {
                warn!("showView without a view parameter");
                return Ok(());
            };
            views.show_view(view).await.map(drop)
        }
        Action::ShowAllLights => views.ensure_modal(ModalId::AllLights.as_str()).await,
        Action::OpenRoom => {
            let Some(room) = ["room", "roomId"]
                .iter()
                .find_map(|key| params.get(*key).and_then(Value::as_str))
            else {
                warn!("openRoom without a room parameter");
                return Ok(());
            };
            views.ensure_modal(ModalId::Room.as_str()).await?;
            views.ui_state().set_open_room(Some(room.to_string()));
            Ok(())
        }
        Action::CloseModal => {
            views.ui_state().set_open_room(None);
            Ok(())
        }
        Action::ShowHome
        | Action::ShowSecurity
        | Action::ShowEnergy
        | Action::ShowWeather
        | Action::ShowCameras
        | Action::ShowCalendar => match action.target_view() {
            Some(view) => views.show_view(view.as_str()).await.map(drop),
            None => Ok(()),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::{UiEvent, UiState};
    use crate::domain::entities::ViewId;
    use crate::domain::ports::mocks::{MockControllerLoader, MockTemplateLoader};
    use crate::domain::ports::{ControllerLoaderPort, TemplateLoaderPort};
    use crate::domain::view_registry::ViewRegistry;
    use serde_json::json;

    fn setup() -> (Arc<ViewManager>, Arc<MockTemplateLoader>, Document) {
        let document = Document::new();
        document.append_html(
            document.body(),
            r#"<main id="views-container"></main><div id="modals-container"></div>"#,
        );
        let loader = Arc::new(MockTemplateLoader::new(document.clone()));
        let manager = ViewManager::new(
            Arc::new(ViewRegistry::builtin()),
            document.clone(),
            Arc::new(MockControllerLoader::new()) as Arc<dyn ControllerLoaderPort>,
            Arc::new(UiState::default()),
        )
        .with_template_loader(Arc::clone(&loader) as Arc<dyn TemplateLoaderPort>);
        (Arc::new(manager), loader, document)
    }

    #[tokio::test]
    async fn test_navigate_event_shows_view() {
        let (manager, _, document) = setup();
        let mut events = manager.ui_state().subscribe();
        let dispatcher = NavigationDispatcher::new(&manager, Handle::current());
        assert_eq!(dispatcher.install(&document).len(), 2);

        document.dispatch_event(document.body(), &Event::custom(NAVIGATE_EVENT, json!({ "view": "security" })));

        let event = events.recv().await.unwrap();
        assert_eq!(
            event,
            UiEvent::ViewChanged {
                old: ViewId::Home,
                new: ViewId::Security
            }
        );
    }

    #[tokio::test]
    async fn test_status_action_routes_to_view() {
        let (manager, _, document) = setup();
        let mut events = manager.ui_state().subscribe();
        NavigationDispatcher::new(&manager, Handle::current()).install(&document);

        document.dispatch_event(
            document.body(),
            &Event::custom(STATUS_ACTION_EVENT, json!({ "action": "showEnergy" })),
        );

        assert!(matches!(
            events.recv().await.unwrap(),
            UiEvent::ViewChanged { new: ViewId::Energy, .. }
        ));
    }

    #[tokio::test]
    async fn test_open_room_loads_modal_then_publishes() {
        let (manager, loader, _) = setup();
        let dispatcher = NavigationDispatcher::new(&manager, Handle::current());
        let mut params = Map::new();
        params.insert("room".to_string(), json!("kitchen"));

        dispatcher.dispatch(Action::OpenRoom, params).unwrap().await.unwrap();

        assert_eq!(loader.modal_calls(), vec![ModalId::Room]);
        assert_eq!(manager.ui_state().open_room().as_deref(), Some("kitchen"));

        dispatcher.dispatch(Action::CloseModal, Map::new()).unwrap().await.unwrap();
        assert_eq!(manager.ui_state().open_room(), None);
    }

    #[tokio::test]
    async fn test_registered_action_click_shows_view() {
        let (manager, _, document) = setup();
        document.append_html(
            document.body(),
            r#"<button id="go" data-action="showView" data-view="garage">Garage</button>"#,
        );
        let registry = Arc::new(ActionRegistry::new());
        NavigationDispatcher::new(&manager, Handle::current()).register_actions(&registry);
        registry.install(&document).unwrap();
        let mut events = manager.ui_state().subscribe();

        document.dispatch_event(document.get_element_by_id("go").unwrap(), &Event::click());

        assert!(matches!(
            events.recv().await.unwrap(),
            UiEvent::ViewChanged { new: ViewId::Garage, .. }
        ));
    }

    #[tokio::test]
    async fn test_show_view_without_parameter_is_noop() {
        let (manager, loader, _) = setup();

        perform(&manager, Action::ShowView, &Map::new()).await.unwrap();

        assert!(loader.view_calls().is_empty());
        assert_eq!(manager.current_view(), None);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_rapid_navigation_applies_last_request_last() {
        let (manager, _, _) = setup();
        let dispatcher = NavigationDispatcher::new(&manager, Handle::current());

        for _ in 0..200 {
            let first = dispatcher.navigate("garage").unwrap();
            let second = dispatcher.navigate("media").unwrap();
            first.await.unwrap();
            second.await.unwrap();

            assert_eq!(manager.current_view(), Some(ViewId::Media));
            assert_eq!(manager.ui_state().current_view(), ViewId::Media);
        }
    }

    #[tokio::test]
    async fn test_dropped_manager_drops_actions() {
        let (manager, _, _) = setup();
        let dispatcher = NavigationDispatcher::new(&manager, Handle::current());
        drop(manager);

        assert!(dispatcher.navigate("home").is_none());
    }
}
