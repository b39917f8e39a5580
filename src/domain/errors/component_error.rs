//! Component lifecycle error types.

use thiserror::Error;

use super::DomError;

/// Component lifecycle error variants.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum ComponentError {
    #[error("cannot mount {component}: parent `{target}` not found")]
    ParentNotFound { component: String, target: String },

    #[error("{component} is already mounted")]
    AlreadyMounted { component: String },

    #[error("component `{name}` is not registered")]
    UnknownComponent { name: String },

    #[error("{component}.{hook} failed: {message}")]
    Hook {
        component: String,
        hook: &'static str,
        message: String,
    },

    #[error("document error: {0}")]
    Dom(#[from] DomError),
}

impl ComponentError {
    /// Creates parent not found error.
    #[must_use]
    pub fn parent_not_found(component: impl Into<String>, target: impl Into<String>) -> Self {
        Self::ParentNotFound {
            component: component.into(),
            target: target.into(),
        }
    }

    /// Creates hook failure error.
    #[must_use]
    pub fn hook(component: impl Into<String>, hook: &'static str, message: impl Into<String>) -> Self {
        Self::Hook {
            component: component.into(),
            hook,
            message: message.into(),
        }
    }

    /// Returns whether the owning code can fall back, e.g. by choosing another parent.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::ParentNotFound { .. } | Self::AlreadyMounted { .. } | Self::Hook { .. }
        )
    }
}
