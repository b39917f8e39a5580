//! Self-contained dashboard sections.
//!
//! Organisms re-render often, so they attach one listener to their root
//! element and resolve the clicked part with `closest`.

mod bottom_nav;
mod room_card;
mod status_bar;

pub use bottom_nav::{BottomNav, NavEntry};
pub use room_card::RoomCard;
pub use status_bar::StatusBar;
