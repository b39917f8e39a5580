//! View switching state machine.
//!
//! A [`ViewManager`] owns the controller module cache and the pointer to the
//! previously shown view. Transitions are serialized: a `show_view` call runs
//! teardown, template loading, visibility toggling and setup to completion
//! before the next queued call starts.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, error, info, warn};

use super::UiState;
use crate::domain::dom::Document;
use crate::domain::entities::{ControllerRef, ViewDescriptor, ViewId};
use crate::domain::errors::ViewError;
use crate::domain::ports::{ControllerLoaderPort, ControllerModule, HookContext, TemplateLoaderPort};
use crate::domain::view_registry::ViewRegistry;

/// Result of a [`ViewManager::show_view`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShowOutcome {
    /// The view is now the single visible view.
    Shown,
    /// The name did not resolve to a view; nothing changed.
    Ignored,
}

/// Orchestrates view activation.
pub struct ViewManager {
    registry: Arc<ViewRegistry>,
    document: Document,
    templates: Option<Arc<dyn TemplateLoaderPort>>,
    controllers: Arc<dyn ControllerLoaderPort>,
    ui_state: Arc<UiState>,
    modules: Mutex<HashMap<ControllerRef, Arc<ControllerModule>>>,
    active: Mutex<Option<ViewId>>,
    transition: tokio::sync::Mutex<()>,
}

impl std::fmt::Debug for ViewManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ViewManager")
            .field("active", &*self.active.lock())
            .field("cached_modules", &self.modules.lock().keys().collect::<Vec<_>>())
            .field("has_template_loader", &self.templates.is_some())
            .finish_non_exhaustive()
    }
}

impl ViewManager {
    /// Creates a manager with an empty module cache and no active view.
    #[must_use]
    pub fn new(
        registry: Arc<ViewRegistry>,
        document: Document,
        controllers: Arc<dyn ControllerLoaderPort>,
        ui_state: Arc<UiState>,
    ) -> Self {
        Self {
            registry,
            document,
            templates: None,
            controllers,
            ui_state,
            modules: Mutex::new(HashMap::new()),
            active: Mutex::new(None),
            transition: tokio::sync::Mutex::new(()),
        }
    }

    /// Attaches the template loader. Without one, views must already be in the document.
    #[must_use]
    pub fn with_template_loader(mut self, loader: Arc<dyn TemplateLoaderPort>) -> Self {
        self.templates = Some(loader);
        self
    }

    /// Returns the registry backing this manager.
    #[must_use]
    pub fn registry(&self) -> &ViewRegistry {
        &self.registry
    }

    /// Returns the document views are toggled in.
    #[must_use]
    pub const fn document(&self) -> &Document {
        &self.document
    }

    /// Returns the shared UI state.
    #[must_use]
    pub fn ui_state(&self) -> &Arc<UiState> {
        &self.ui_state
    }

    /// Returns the last view a transition was started for.
    #[must_use]
    pub fn current_view(&self) -> Option<ViewId> {
        *self.active.lock()
    }

    /// Returns the cached controller module, if it was ever loaded.
    #[must_use]
    pub fn cached_module(&self, module: ControllerRef) -> Option<Arc<ControllerModule>> {
        self.modules.lock().get(&module).cloned()
    }

    /// Shows the view called `name`, hiding every other view.
    ///
    /// Unknown names are logged and ignored. Teardown, controller and hook
    /// failures are logged and never abort the transition.
    ///
    /// The view is recorded as current before its template loads. After a
    /// failed load, [`Self::current_view`] and the UI state name the failed
    /// view while the previous one is still the visible one.
    ///
    /// # Errors
    /// Returns error if the view's template could not be loaded. The
    /// previously visible view stays visible in that case.
    pub async fn show_view(&self, name: &str) -> Result<ShowOutcome, ViewError> {
        let Some(config) = self.registry.view_config(name).cloned() else {
            warn!(view = name, "Unknown view");
            return Ok(ShowOutcome::Ignored);
        };
        let view = config.id();

        let _guard = self.transition.lock().await;
        debug!(view = %view, "Showing view");

        let previous = self.active.lock().replace(view);
        match previous {
            Some(prev) if prev != view => self.teardown(prev).await,
            _ => {}
        }

        self.ui_state.set_current_view(view);

        if let Some(loader) = &self.templates
            && self.document.get_element_by_id(&view.container_id()).is_none()
        {
            loader.load_view(view).await.map_err(|e| {
                error!(view = %view, error = %e, "Failed to load view template");
                e
            })?;
        }

        self.toggle_visibility(view);

        if let (Some(module), Some(hook)) = (config.controller(), config.on_show_hook()) {
            self.setup(&config, module, hook).await;
        }

        info!(view = %view, "View shown");
        Ok(ShowOutcome::Shown)
    }

    /// Loads the modal called `name` unless it is already present.
    ///
    /// # Errors
    /// Returns error if the modal template could not be loaded.
    pub async fn ensure_modal(&self, name: &str) -> Result<(), ViewError> {
        let Some(modal) = self.registry.modal_config(name) else {
            warn!(modal = name, "Unknown modal");
            return Ok(());
        };
        let Some(loader) = &self.templates else {
            debug!(modal = name, "No template loader, assuming inline modal");
            return Ok(());
        };
        if loader.is_modal_loaded(modal.id()) {
            return Ok(());
        }
        loader.load_modal(modal.id()).await.map_err(|e| {
            error!(modal = name, error = %e, "Failed to load modal template");
            e
        })
    }

    fn toggle_visibility(&self, view: ViewId) {
        for id in self.registry.view_ids() {
            if let Some(node) = self.document.get_element_by_id(&id.container_id()) {
                self.document.toggle_class(node, "hidden", id != view);
            }
        }
    }

    async fn setup(&self, config: &ViewDescriptor, module: ControllerRef, hook: &str) {
        let loaded = match self.module(module).await {
            Ok(loaded) => loaded,
            Err(e) => {
                warn!(view = %config.id(), module = %module, error = %e, "Failed to init view module");
                return;
            }
        };

        let Some(hook_fn) = loaded.hook(hook) else {
            warn!(
                view = %config.id(),
                module = %module,
                hook,
                exported = ?loaded.hook_names(),
                "Setup hook not exported"
            );
            return;
        };

        let cx = HookContext {
            view: config.id(),
            document: self.document.clone(),
        };
        if let Err(e) = hook_fn(cx).await {
            warn!(view = %config.id(), module = %module, hook, error = %e, "Setup hook failed");
        }
    }

    async fn teardown(&self, view: ViewId) {
        let Some(config) = self.registry.view(view) else {
            return;
        };
        let (Some(module), Some(hook)) = (config.controller(), config.on_hide_hook()) else {
            return;
        };
        // Only a module that was set up can be torn down.
        let Some(loaded) = self.cached_module(module) else {
            debug!(view = %view, module = %module, "Skipping teardown of unloaded module");
            return;
        };
        let Some(hook_fn) = loaded.hook(hook) else {
            debug!(
                view = %view,
                module = %module,
                hook,
                exported = ?loaded.hook_names(),
                "Teardown hook not exported"
            );
            return;
        };

        let cx = HookContext {
            view,
            document: self.document.clone(),
        };
        if let Err(e) = hook_fn(cx).await {
            warn!(view = %view, module = %module, hook, error = %e, "Teardown hook failed, ignoring");
        }
    }

    async fn module(&self, module: ControllerRef) -> Result<Arc<ControllerModule>, ViewError> {
        if let Some(cached) = self.cached_module(module) {
            return Ok(cached);
        }
        debug!(module = %module, "Loading controller module");
        let loaded = Arc::new(self.controllers.load(module).await?);
        Ok(self
            .modules
            .lock()
            .entry(module)
            .or_insert(loaded)
            .clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{ModalDescriptor, ModalId};
    use crate::domain::ports::mocks::{MockControllerLoader, MockTemplateLoader};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    type Log = Arc<Mutex<Vec<&'static str>>>;

    fn document_with_container() -> Document {
        let document = Document::new();
        document.append_html(document.body(), r#"<main id="views-container"></main>"#);
        document
    }

    fn visible_views(manager: &ViewManager) -> Vec<ViewId> {
        let document = manager.document();
        manager
            .registry()
            .view_ids()
            .filter(|id| {
                document
                    .get_element_by_id(&id.container_id())
                    .is_some_and(|node| !document.has_class(node, "hidden"))
            })
            .collect()
    }

    fn logging_module(id: ControllerRef, log: &Log, hooks: &[&'static str]) -> ControllerModule {
        hooks.iter().fold(ControllerModule::new(id), |module, &hook| {
            let log = Arc::clone(log);
            module.with_hook(hook, move |_| {
                let log = Arc::clone(&log);
                async move {
                    log.lock().push(hook);
                    Ok(())
                }
            })
        })
    }

    fn manager(
        registry: ViewRegistry,
        controllers: MockControllerLoader,
    ) -> (ViewManager, Arc<MockTemplateLoader>, Arc<MockControllerLoader>) {
        let document = document_with_container();
        let loader = Arc::new(MockTemplateLoader::new(document.clone()));
        let controllers = Arc::new(controllers);
        let manager = ViewManager::new(
            Arc::new(registry),
            document,
            Arc::clone(&controllers) as Arc<dyn ControllerLoaderPort>,
            Arc::new(UiState::default()),
        )
        .with_template_loader(Arc::clone(&loader) as Arc<dyn TemplateLoaderPort>);
        (manager, loader, controllers)
    }

    #[tokio::test]
    async fn test_sequence_leaves_single_visible_view() {
        let (manager, _, _) = manager(ViewRegistry::builtin(), MockControllerLoader::new());

        manager.show_view("home").await.unwrap();
        manager.show_view("garage").await.unwrap();
        manager.show_view("energy").await.unwrap();

        assert_eq!(visible_views(&manager), vec![ViewId::Energy]);
        assert_eq!(manager.current_view(), Some(ViewId::Energy));
        assert_eq!(manager.ui_state().current_view(), ViewId::Energy);
    }

    #[tokio::test]
    async fn test_async_teardown_runs_before_setup() {
        let log: Log = Arc::new(Mutex::new(Vec::new()));
        let registry = ViewRegistry::new(
            vec![
                ViewDescriptor::new(ViewId::Home, "home.html")
                    .with_controller(ControllerRef::AccessController)
                    .on_show("sA")
                    .on_hide("hA"),
                ViewDescriptor::new(ViewId::Security, "security.html")
                    .with_controller(ControllerRef::SecurityController)
                    .on_show("sB"),
            ],
            Vec::new(),
        );
        let slow_log = Arc::clone(&log);
        let fast_log = Arc::clone(&log);
        let controllers = MockControllerLoader::new()
            .with_module(ControllerRef::AccessController, move || {
                let teardown_log = Arc::clone(&slow_log);
                logging_module(ControllerRef::AccessController, &slow_log, &["sA"]).with_hook(
                    "hA",
                    move |_| {
                        let log = Arc::clone(&teardown_log);
                        async move {
                            tokio::time::sleep(Duration::from_millis(20)).await;
                            log.lock().push("hA");
                            Ok(())
                        }
                    },
                )
            })
            .with_module(ControllerRef::SecurityController, move || {
                logging_module(ControllerRef::SecurityController, &fast_log, &["sB"])
            });
        let (manager, _, _) = manager(registry, controllers);

        manager.show_view("home").await.unwrap();
        log.lock().clear();
        manager.show_view("security").await.unwrap();

        assert_eq!(*log.lock(), vec!["hA", "sB"]);
    }

    #[tokio::test]
    async fn test_unknown_view_keeps_current() {
        let (manager, loader, _) = manager(ViewRegistry::builtin(), MockControllerLoader::new());
        manager.show_view("home").await.unwrap();

        let outcome = manager.show_view("nonexistent").await.unwrap();

        assert_eq!(outcome, ShowOutcome::Ignored);
        assert_eq!(manager.current_view(), Some(ViewId::Home));
        assert_eq!(visible_views(&manager), vec![ViewId::Home]);
        assert_eq!(loader.view_calls(), vec![ViewId::Home]);
    }

    #[tokio::test]
    async fn test_controller_module_cached_across_activations() {
        let log: Log = Arc::new(Mutex::new(Vec::new()));
        let module_log = Arc::clone(&log);
        let controllers = MockControllerLoader::new().with_module(
            ControllerRef::SecurityController,
            move || {
                logging_module(
                    ControllerRef::SecurityController,
                    &module_log,
                    &["initializeZoneTimeline"],
                )
            },
        );
        let (manager, _, controllers) = manager(ViewRegistry::builtin(), controllers);

        manager.show_view("security").await.unwrap();
        let first = manager
            .cached_module(ControllerRef::SecurityController)
            .unwrap();
        manager.show_view("home").await.unwrap();
        manager.show_view("security").await.unwrap();
        let second = manager
            .cached_module(ControllerRef::SecurityController)
            .unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(controllers.load_count(ControllerRef::SecurityController), 1);
        assert_eq!(log.lock().len(), 2);
    }

    #[tokio::test]
    async fn test_show_security_loads_template_and_runs_setup_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let hook_calls = Arc::clone(&calls);
        let registry = ViewRegistry::new(
            vec![
                ViewDescriptor::new(ViewId::Home, "home.html"),
                ViewDescriptor::new(ViewId::Security, "security.html")
                    .with_controller(ControllerRef::SecurityController)
                    .on_show("initializeZoneTimeline"),
            ],
            Vec::new(),
        );
        let controllers = MockControllerLoader::new().with_module(
            ControllerRef::SecurityController,
            move || {
                let calls = Arc::clone(&hook_calls);
                ControllerModule::new(ControllerRef::SecurityController).with_hook(
                    "initializeZoneTimeline",
                    move |_| {
                        calls.fetch_add(1, Ordering::SeqCst);
                        async { Ok(()) }
                    },
                )
            },
        );
        let (manager, loader, _) = manager(registry, controllers);
        let document = manager.document().clone();
        let container = document.get_element_by_id("views-container").unwrap();
        document.append_html(container, r#"<section id="view-home" class="view"></section>"#);

        manager.show_view("security").await.unwrap();

        assert_eq!(loader.view_calls(), vec![ViewId::Security]);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        let home = document.get_element_by_id("view-home").unwrap();
        let security = document.get_element_by_id("view-security").unwrap();
        assert!(document.has_class(home, "hidden"));
        assert!(!document.has_class(security, "hidden"));
    }

    #[tokio::test]
    async fn test_template_failure_keeps_previous_visible() {
        let (manager, loader, _) = manager(ViewRegistry::builtin(), MockControllerLoader::new());
        manager.show_view("home").await.unwrap();
        loader.set_should_fail(true);

        let result = manager.show_view("garage").await;

        assert!(matches!(result, Err(ViewError::TemplateFetch { .. })));
        assert_eq!(visible_views(&manager), vec![ViewId::Home]);
        assert_eq!(manager.current_view(), Some(ViewId::Garage));
        assert_eq!(manager.ui_state().current_view(), ViewId::Garage);
    }

    #[tokio::test]
    async fn test_controller_failure_still_shows_view() {
        let (manager, _, _) = manager(ViewRegistry::builtin(), MockControllerLoader::new());

        let outcome = manager.show_view("calendar").await.unwrap();

        assert_eq!(outcome, ShowOutcome::Shown);
        assert_eq!(visible_views(&manager), vec![ViewId::Calendar]);
        assert!(manager.cached_module(ControllerRef::Calendar).is_none());
    }

    #[tokio::test]
    async fn test_failing_hooks_do_not_block_transition() {
        let controllers = MockControllerLoader::new().with_module(ControllerRef::PcMetrics, || {
            ControllerModule::new(ControllerRef::PcMetrics)
                .with_hook("startPCMetrics", |_| async {
                    Err::<(), _>(ViewError::hook("startPCMetrics", "boom"))
                })
                .with_hook("stopPCMetrics", |_| async {
                    Err::<(), _>(ViewError::hook("stopPCMetrics", "boom"))
                })
        });
        let (manager, _, _) = manager(ViewRegistry::builtin(), controllers);

        manager.show_view("system").await.unwrap();
        let outcome = manager.show_view("home").await.unwrap();

        assert_eq!(outcome, ShowOutcome::Shown);
        assert_eq!(visible_views(&manager), vec![ViewId::Home]);
    }

    #[tokio::test]
    async fn test_missing_setup_hook_is_skipped() {
        let controllers = MockControllerLoader::new().with_module(ControllerRef::Weather, || {
            ControllerModule::new(ControllerRef::Weather)
        });
        let (manager, _, controllers) = manager(ViewRegistry::builtin(), controllers);

        assert_eq!(manager.show_view("weather").await.unwrap(), ShowOutcome::Shown);
        assert_eq!(controllers.load_count(ControllerRef::Weather), 1);
    }

    #[tokio::test]
    async fn test_overlapping_calls_are_serialized() {
        let document = document_with_container();
        let loader = Arc::new(
            MockTemplateLoader::new(document.clone()).with_delay(Duration::from_millis(10)),
        );
        let manager = ViewManager::new(
            Arc::new(ViewRegistry::builtin()),
            document,
            Arc::new(MockControllerLoader::new()),
            Arc::new(UiState::default()),
        )
        .with_template_loader(loader);

        let (first, second) = tokio::join!(manager.show_view("garage"), manager.show_view("media"));

        assert_eq!(first.unwrap(), ShowOutcome::Shown);
        assert_eq!(second.unwrap(), ShowOutcome::Shown);
        assert_eq!(visible_views(&manager), vec![ViewId::Media]);
    }

    #[tokio::test]
    async fn test_reshow_same_view_skips_teardown() {
        let log: Log = Arc::new(Mutex::new(Vec::new()));
        let module_log = Arc::clone(&log);
        let controllers = MockControllerLoader::new().with_module(
            ControllerRef::AccessController,
            move || {
                logging_module(
                    ControllerRef::AccessController,
                    &module_log,
                    &["startCameraRefresh", "stopCameraRefresh"],
                )
            },
        );
        let (manager, loader, _) = manager(ViewRegistry::builtin(), controllers);

        manager.show_view("cameras").await.unwrap();
        manager.show_view("cameras").await.unwrap();

        assert_eq!(*log.lock(), vec!["startCameraRefresh", "startCameraRefresh"]);
        assert_eq!(loader.view_calls(), vec![ViewId::Cameras]);
    }

    #[tokio::test]
    async fn test_ensure_modal_loads_once() {
        let registry = ViewRegistry::new(
            Vec::new(),
            vec![ModalDescriptor::new(ModalId::Room, "room-modal.html")],
        );
        let (manager, loader, _) = manager(registry, MockControllerLoader::new());

        manager.ensure_modal("room").await.unwrap();
        manager.ensure_modal("room").await.unwrap();
        manager.ensure_modal("missing").await.unwrap();

        assert_eq!(loader.modal_calls(), vec![ModalId::Room]);
    }
}
