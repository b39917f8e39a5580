//! Action delegation error types.

use thiserror::Error;

/// Errors raised when wiring `data-action` handlers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[allow(missing_docs)]
pub enum ActionError {
    #[error("unknown action `{name}`")]
    UnknownAction { name: String },
}

impl ActionError {
    /// Creates unknown action error.
    #[must_use]
    pub fn unknown(name: impl Into<String>) -> Self {
        Self::UnknownAction { name: name.into() }
    }
}
