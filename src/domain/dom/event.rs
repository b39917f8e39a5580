//! Document events.

use std::cell::Cell;

use serde_json::Value;

use super::NodeId;

/// Event dispatched through the document tree.
#[derive(Debug)]
pub struct Event {
    event_type: String,
    detail: Value,
    bubbles: bool,
    composed: bool,
    target: Cell<Option<NodeId>>,
    current_target: Cell<Option<NodeId>>,
    propagation_stopped: Cell<bool>,
    default_prevented: Cell<bool>,
}

impl Event {
    /// Creates a non-bubbling event.
    #[must_use]
    pub fn new(event_type: impl Into<String>) -> Self {
        Self {
            event_type: event_type.into(),
            detail: Value::Null,
            bubbles: false,
            composed: false,
            target: Cell::new(None),
            current_target: Cell::new(None),
            propagation_stopped: Cell::new(false),
            default_prevented: Cell::new(false),
        }
    }

    /// Creates a bubbling click event.
    #[must_use]
    pub fn click() -> Self {
        Self::new("click").with_bubbles(true)
    }

    /// Creates a bubbling, composed custom event carrying `detail`.
    #[must_use]
    pub fn custom(event_type: impl Into<String>, detail: Value) -> Self {
        Self {
            detail,
            composed: true,
            ..Self::new(event_type).with_bubbles(true)
        }
    }

    /// Sets bubbling behavior.
    #[must_use]
    pub fn with_bubbles(mut self, bubbles: bool) -> Self {
        self.bubbles = bubbles;
        self
    }

    /// Returns the event type.
    #[must_use]
    pub fn event_type(&self) -> &str {
        &self.event_type
    }

    /// Returns the event payload.
    #[must_use]
    pub const fn detail(&self) -> &Value {
        &self.detail
    }

    /// Returns whether the event propagates to ancestors.
    #[must_use]
    pub const fn bubbles(&self) -> bool {
        self.bubbles
    }

    /// Returns whether the event crosses component boundaries.
    #[must_use]
    pub const fn composed(&self) -> bool {
        self.composed
    }

    /// Returns the node the event was dispatched on.
    #[must_use]
    pub fn target(&self) -> Option<NodeId> {
        self.target.get()
    }

    /// Returns the node whose listeners are currently running.
    #[must_use]
    pub fn current_target(&self) -> Option<NodeId> {
        self.current_target.get()
    }

    /// Stops propagation to further ancestors.
    pub fn stop_propagation(&self) {
        self.propagation_stopped.set(true);
    }

    /// Returns whether propagation was stopped.
    #[must_use]
    pub fn is_propagation_stopped(&self) -> bool {
        self.propagation_stopped.get()
    }

    /// Marks the default action as cancelled.
    pub fn prevent_default(&self) {
        self.default_prevented.set(true);
    }

    /// Returns whether the default action was cancelled.
    #[must_use]
    pub fn default_prevented(&self) -> bool {
        self.default_prevented.get()
    }

    pub(crate) fn set_target(&self, node: NodeId) {
        self.target.set(Some(node));
    }

    pub(crate) fn set_current_target(&self, node: Option<NodeId>) {
        self.current_target.set(node);
    }
}
