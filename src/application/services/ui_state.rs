//! Shared UI state observed by views and components.

use parking_lot::RwLock;
use tokio::sync::broadcast;
use tracing::debug;

use crate::domain::entities::ViewId;

const EVENT_CAPACITY: usize = 64;

/// Change notification published by [`UiState`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum UiEvent {
    ViewChanged { old: ViewId, new: ViewId },
    RoomModalChanged(Option<String>),
}

#[derive(Debug)]
struct Snapshot {
    current_view: ViewId,
    open_room: Option<String>,
}

/// Process-wide UI state: current view and the open room dialog.
#[derive(Debug)]
pub struct UiState {
    inner: RwLock<Snapshot>,
    events: broadcast::Sender<UiEvent>,
}

impl Default for UiState {
    fn default() -> Self {
        Self::new(ViewId::Home)
    }
}

impl UiState {
    /// Creates state starting at `initial_view`.
    #[must_use]
    pub fn new(initial_view: ViewId) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            inner: RwLock::new(Snapshot {
                current_view: initial_view,
                open_room: None,
            }),
            events,
        }
    }

    /// Returns the current view.
    #[must_use]
    pub fn current_view(&self) -> ViewId {
        self.inner.read().current_view
    }

    /// Records `view` as current and returns the previous one.
    ///
    /// Always publishes [`UiEvent::ViewChanged`], even when the view is unchanged.
    pub fn set_current_view(&self, view: ViewId) -> ViewId {
        let old = std::mem::replace(&mut self.inner.write().current_view, view);
        debug!(old = %old, new = %view, "Current view changed");
        self.publish(UiEvent::ViewChanged { old, new: view });
        old
    }

    /// Returns the room whose dialog is open.
    #[must_use]
    pub fn open_room(&self) -> Option<String> {
        self.inner.read().open_room.clone()
    }

    /// Opens or closes (`None`) the room dialog.
    pub fn set_open_room(&self, room: Option<String>) {
        self.inner.write().open_room.clone_from(&room);
        self.publish(UiEvent::RoomModalChanged(room));
    }

    /// Subscribes to state changes.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<UiEvent> {
        self.events.subscribe()
    }

    fn publish(&self, event: UiEvent) {
        // No receivers is fine.
        let _ = self.events.send(event);
    }
}
