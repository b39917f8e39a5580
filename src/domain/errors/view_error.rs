//! View lifecycle error types.

use thiserror::Error;

/// View, template and controller error variants.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[allow(missing_docs)]
pub enum ViewError {
    #[error("unknown view `{name}`")]
    UnknownView { name: String },

    #[error("unknown modal `{name}`")]
    UnknownModal { name: String },

    #[error("failed to load template {path}: {message}")]
    TemplateFetch { path: String, message: String },

    #[error("container #{id} not found")]
    ContainerMissing { id: String },

    #[error("failed to load controller module {module}: {message}")]
    ControllerLoad { module: String, message: String },

    #[error("hook `{hook}` failed: {message}")]
    Hook { hook: String, message: String },
}

impl ViewError {
    /// Creates template fetch error.
    #[must_use]
    pub fn fetch(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::TemplateFetch {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Creates missing container error.
    #[must_use]
    pub fn container_missing(id: impl Into<String>) -> Self {
        Self::ContainerMissing { id: id.into() }
    }

    /// Creates controller load error.
    #[must_use]
    pub fn controller_load(module: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ControllerLoad {
            module: module.into(),
            message: message.into(),
        }
    }

    /// Creates hook failure error.
    #[must_use]
    pub fn hook(hook: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Hook {
            hook: hook.into(),
            message: message.into(),
        }
    }

    /// Returns whether the error came from the template loader.
    #[must_use]
    pub const fn is_loader_error(&self) -> bool {
        matches!(
            self,
            Self::TemplateFetch { .. } | Self::ContainerMissing { .. }
        )
    }
}
