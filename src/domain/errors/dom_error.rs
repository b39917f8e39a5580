//! Document model error types.

use thiserror::Error;

use crate::domain::dom::NodeId;

/// Errors raised by document tree operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[allow(missing_docs)]
pub enum DomError {
    #[error("invalid selector `{selector}`: {reason}")]
    InvalidSelector { selector: String, reason: String },

    #[error("node {0} does not exist")]
    NodeNotFound(NodeId),

    #[error("cannot insert node {child} under {parent}: would create a cycle")]
    HierarchyRequest { parent: NodeId, child: NodeId },
}

impl DomError {
    /// Creates invalid selector error.
    #[must_use]
    pub fn invalid_selector(selector: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidSelector {
            selector: selector.into(),
            reason: reason.into(),
        }
    }
}
