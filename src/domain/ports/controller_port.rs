//! Controller module port definition.
//!
//! A controller module is a table of named lifecycle hooks. Modules are
//! resolved through a [`ControllerLoaderPort`] keyed by the closed
//! [`ControllerRef`] enum, so there is no runtime lookup by module path.

use std::collections::BTreeMap;
use std::fmt;
use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use futures_util::future::BoxFuture;

use crate::domain::dom::Document;
use crate::domain::entities::{ControllerRef, ViewId};
use crate::domain::errors::ViewError;

/// Future returned by a lifecycle hook.
pub type HookFuture = BoxFuture<'static, Result<(), ViewError>>;

/// Lifecycle hook exported by a controller module.
pub type Hook = Arc<dyn Fn(HookContext) -> HookFuture + Send + Sync>;

/// Context handed to every hook invocation.
#[derive(Debug, Clone)]
pub struct HookContext {
    /// View the hook runs for.
    pub view: ViewId,
    /// Document the view lives in.
    pub document: Document,
}

/// Loaded controller module: its identity and exported hooks.
#[derive(Clone)]
pub struct ControllerModule {
    id: ControllerRef,
    hooks: BTreeMap<&'static str, Hook>,
}

impl fmt::Debug for ControllerModule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ControllerModule")
            .field("id", &self.id)
            .field("hooks", &self.hooks.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl ControllerModule {
    /// Creates a module without hooks.
    #[must_use]
    pub fn new(id: ControllerRef) -> Self {
        Self {
            id,
            hooks: BTreeMap::new(),
        }
    }

    /// Exports an async hook under `name`.
    #[must_use]
    pub fn with_hook<F, Fut>(mut self, name: &'static str, hook: F) -> Self
    where
        F: Fn(HookContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<(), ViewError>> + Send + 'static,
    {
        self.hooks
            .insert(name, Arc::new(move |cx| Box::pin(hook(cx)) as HookFuture));
        self
    }

    /// Returns the module identifier.
    #[must_use]
    pub const fn id(&self) -> ControllerRef {
        self.id
    }

    /// Returns the hook exported under `name`.
    #[must_use]
    pub fn hook(&self, name: &str) -> Option<&Hook> {
        self.hooks.get(name)
    }

    /// Returns the exported hook names.
    #[must_use]
    pub fn hook_names(&self) -> Vec<&'static str> {
        self.hooks.keys().copied().collect()
    }
}

/// Port resolving controller modules.
#[async_trait]
pub trait ControllerLoaderPort: Send + Sync {
    /// Loads (links) a controller module. Called at most once per module by the view manager.
    async fn load(&self, module: ControllerRef) -> Result<ControllerModule, ViewError>;
}
