//! Template loader inserting fetched markup into the document.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use futures_util::future::join_all;
use parking_lot::Mutex;
use serde_json::json;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::domain::dom::{Document, Event};
use crate::domain::entities::{ModalId, ViewId};
use crate::domain::errors::ViewError;
use crate::domain::ports::{TemplateLoaderPort, TemplateSource};
use crate::domain::view_registry::ViewRegistry;

/// Id of the element receiving view markup.
pub const VIEWS_CONTAINER_ID: &str = "views-container";
/// Id of the element receiving modal markup.
pub const MODALS_CONTAINER_ID: &str = "modals-container";

const BACKGROUND_VIEWS: [ViewId; 3] = [ViewId::Cameras, ViewId::Security, ViewId::Energy];

/// Loads view and modal templates through a [`TemplateSource`].
///
/// Fetched text is cached by path. Each view and modal is inserted at most once.
pub struct TemplateLoader {
    registry: Arc<ViewRegistry>,
    document: Document,
    source: Arc<dyn TemplateSource>,
    views_path: String,
    modals_path: String,
    cache: Mutex<HashMap<String, String>>,
    loaded_views: Mutex<HashSet<ViewId>>,
    loaded_modals: Mutex<HashSet<ModalId>>,
}

impl TemplateLoader {
    /// Creates a loader using the `views` and `modals` directories.
    #[must_use]
    pub fn new(registry: Arc<ViewRegistry>, document: Document, source: Arc<dyn TemplateSource>) -> Self {
        Self {
            registry,
            document,
            source,
            views_path: "views".to_string(),
            modals_path: "modals".to_string(),
            cache: Mutex::new(HashMap::new()),
            loaded_views: Mutex::new(HashSet::new()),
            loaded_modals: Mutex::new(HashSet::new()),
        }
    }

    /// Overrides the view and modal directories.
    #[must_use]
    pub fn with_paths(mut self, views_path: impl Into<String>, modals_path: impl Into<String>) -> Self {
        self.views_path = views_path.into().trim_end_matches('/').to_string();
        self.modals_path = modals_path.into().trim_end_matches('/').to_string();
        self
    }

    /// Returns the number of cached template texts.
    #[must_use]
    pub fn cached_templates(&self) -> usize {
        self.cache.lock().len()
    }

    /// Loads the preloaded views now and the frequently used ones after `delay`.
    ///
    /// The returned handle completes when the background loads finish; their
    /// failures are only logged.
    ///
    /// # Errors
    /// Returns error if an immediate view fails to load.
    pub async fn preload_essential_views(
        self: &Arc<Self>,
        delay: Duration,
    ) -> Result<JoinHandle<()>, ViewError> {
        let immediate: Vec<ViewId> = self.registry.preloaded_views().map(|v| v.id()).collect();
        for view in immediate {
            self.load_view(view).await?;
        }

        let loader = Arc::clone(self);
        Ok(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let loads = BACKGROUND_VIEWS
                .into_iter()
                .filter(|view| loader.registry.view(*view).is_some())
                .map(|view| {
                    let loader = Arc::clone(&loader);
                    async move { (view, loader.load_view(view).await) }
                });
            for (view, result) in join_all(loads).await {
                if let Err(e) = result {
                    warn!(view = %view, error = %e, "Background preload failed");
                }
            }
        }))
    }

    /// Loads every registered modal in parallel, returning how many are loaded.
    pub async fn preload_modals(&self) -> usize {
        let modals: Vec<ModalId> = self.registry.modal_names().iter().filter_map(|n| n.parse().ok()).collect();
        let results = join_all(modals.iter().map(|modal| self.load_modal(*modal))).await;

        let mut loaded = 0;
        for (modal, result) in modals.iter().zip(results) {
            match result {
                Ok(()) => loaded += 1,
                Err(e) => warn!(modal = %modal, error = %e, "Modal preload failed"),
            }
        }
        debug!(loaded, total = modals.len(), "Modals preloaded");
        loaded
    }

    async fn fetch_template(&self, path: &str) -> Result<String, ViewError> {
        if let Some(cached) = self.cache.lock().get(path) {
            return Ok(cached.clone());
        }

        let html = self.source.fetch(path).await.map_err(|e| {
            warn!(path, error = %e, "Template load error");
            e
        })?;
        self.cache.lock().insert(path.to_string(), html.clone());
        Ok(html)
    }

    fn container(&self, id: &str) -> Result<crate::domain::dom::NodeId, ViewError> {
        self.document.get_element_by_id(id).ok_or_else(|| {
            warn!(container = id, "Template container not found");
            ViewError::container_missing(id)
        })
    }
}

#[async_trait]
impl TemplateLoaderPort for TemplateLoader {
    async fn load_view(&self, view: ViewId) -> Result<(), ViewError> {
        let Some(config) = self.registry.view(view) else {
            warn!(view = %view, "Unknown view");
            return Err(ViewError::UnknownView {
                name: view.to_string(),
            });
        };
        if self.is_view_loaded(view) {
            return Ok(());
        }

        let path = format!("{}/{}", self.views_path, config.template_ref());
        let html = self.fetch_template(&path).await?;
        let container = self.container(VIEWS_CONTAINER_ID)?;

        // A concurrent load of the same view may have won while fetching.
        if !self.loaded_views.lock().insert(view) {
            return Ok(());
        }
        self.document.append_html(container, &html);
        info!(view = %view, "View loaded");

        self.document.dispatch_event(
            self.document.root(),
            &Event::custom("viewLoaded", json!({ "viewName": view.as_str() })),
        );
        Ok(())
    }

    async fn load_modal(&self, modal: ModalId) -> Result<(), ViewError> {
        let Some(config) = self.registry.modal(modal) else {
            warn!(modal = %modal, "Unknown modal");
            return Err(ViewError::UnknownModal {
                name: modal.to_string(),
            });
        };
        if self.is_modal_loaded(modal) {
            return Ok(());
        }

        let path = format!("{}/{}", self.modals_path, config.template_ref());
        let html = self.fetch_template(&path).await?;
        let container = self.container(MODALS_CONTAINER_ID)?;

        if !self.loaded_modals.lock().insert(modal) {
            return Ok(());
        }
        self.document.append_html(container, &html);
        info!(modal = %modal, "Modal loaded");

        self.document.dispatch_event(
            self.document.root(),
            &Event::custom("modalLoaded", json!({ "modalName": modal.as_str() })),
        );
        Ok(())
    }

    fn is_view_loaded(&self, view: ViewId) -> bool {
        self.loaded_views.lock().contains(&view)
    }

    fn is_modal_loaded(&self, modal: ModalId) -> bool {
        self.loaded_modals.lock().contains(&modal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::mocks::MockTemplateSource;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn shell() -> Document {
        let document = Document::new();
        document.append_html(
            document.body(),
            r#"<main id="views-container"></main><div id="modals-container"></div>"#,
        );
        document
    }

    fn view_markup(path: &str) -> String {
        let name = path
            .rsplit('/')
            .next()
            .and_then(|file| file.strip_suffix(".html"))
            .unwrap_or(path);
        format!(r#"<section id="view-{name}" class="view"></section>"#)
    }

    fn loader_with(source: MockTemplateSource, document: Document) -> Arc<TemplateLoader> {
        Arc::new(TemplateLoader::new(
            Arc::new(ViewRegistry::builtin()),
            document,
            Arc::new(source),
        ))
    }

    #[tokio::test]
    async fn test_load_view_inserts_once_and_fires_event() {
        let mut source = MockTemplateSource::new();
        source
            .expect_fetch()
            .withf(|path| path == "views/security.html")
            .times(1)
            .returning(|path| Ok(view_markup(path)));
        let document = shell();
        let events = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&events);
        document.add_listener(
            document.root(),
            "viewLoaded",
            Arc::new(move |event: &Event| {
                assert_eq!(event.detail()["viewName"], "security");
                counter.fetch_add(1, Ordering::SeqCst);
            }),
        );
        let loader = loader_with(source, document.clone());

        loader.load_view(ViewId::Security).await.unwrap();
        loader.load_view(ViewId::Security).await.unwrap();

        assert!(loader.is_view_loaded(ViewId::Security));
        assert_eq!(events.load(Ordering::SeqCst), 1);
        let container = document.get_element_by_id(VIEWS_CONTAINER_ID).unwrap();
        assert_eq!(document.children(container).len(), 1);
        assert!(document.get_element_by_id("view-security").is_some());
    }

    #[tokio::test]
    async fn test_missing_container_is_error() {
        let mut source = MockTemplateSource::new();
        source
            .expect_fetch()
            .returning(|path| Ok(view_markup(path)));
        let loader = loader_with(source, Document::new());

        let err = loader.load_view(ViewId::Home).await.unwrap_err();

        assert_eq!(err, ViewError::container_missing(VIEWS_CONTAINER_ID));
        assert!(!loader.is_view_loaded(ViewId::Home));
    }

    #[tokio::test]
    async fn test_fetch_failure_leaves_view_unloaded() {
        let mut source = MockTemplateSource::new();
        source
            .expect_fetch()
            .returning(|path| Err(ViewError::fetch(path, "HTTP 404 Not Found")));
        let loader = loader_with(source, shell());

        let err = loader.load_view(ViewId::Garage).await.unwrap_err();

        assert!(err.is_loader_error());
        assert!(!loader.is_view_loaded(ViewId::Garage));
        assert_eq!(loader.cached_templates(), 0);
    }

    #[tokio::test]
    async fn test_preload_modals_loads_every_modal() {
        let mut source = MockTemplateSource::new();
        source
            .expect_fetch()
            .times(6)
            .returning(|path| Ok(format!(r#"<div class="modal" data-src="{path}"></div>"#)));
        let document = shell();
        let loader = loader_with(source, document.clone());

        assert_eq!(loader.preload_modals().await, 6);
        assert!(loader.is_modal_loaded(ModalId::DelayedExit));
        let container = document.get_element_by_id(MODALS_CONTAINER_ID).unwrap();
        assert!(
            document
                .query_selector(container, r#"[data-src="modals/../views/delayed-exit.html"]"#)
                .unwrap()
                .is_some()
        );
    }

    #[tokio::test]
    async fn test_preload_essential_views() {
        let mut source = MockTemplateSource::new();
        source
            .expect_fetch()
            .times(4)
            .returning(|path| Ok(view_markup(path)));
        let loader = loader_with(source, shell());

        let background = loader.preload_essential_views(Duration::ZERO).await.unwrap();
        assert!(loader.is_view_loaded(ViewId::Home));
        background.await.unwrap();

        for view in [ViewId::Cameras, ViewId::Security, ViewId::Energy] {
            assert!(loader.is_view_loaded(view));
        }
        assert!(!loader.is_view_loaded(ViewId::Garage));
    }

    #[tokio::test]
    async fn test_custom_paths() {
        let mut source = MockTemplateSource::new();
        source
            .expect_fetch()
            .withf(|path| path == "/local/dashboard/views/home.html")
            .times(1)
            .returning(|path| Ok(view_markup(path)));
        let loader = TemplateLoader::new(Arc::new(ViewRegistry::builtin()), shell(), Arc::new(source))
            .with_paths("/local/dashboard/views/", "/local/dashboard/modals");

        loader.load_view(ViewId::Home).await.unwrap();
    }
}
