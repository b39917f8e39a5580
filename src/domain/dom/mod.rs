//! In-process document model standing in for the browser DOM.
//!
//! Views, modals and components all render into a [`Document`]. The tree is
//! shared behind a cheap handle, listeners run with the tree unlocked, and
//! markup is parsed by a tolerant fragment parser.

mod document;
mod event;
mod parser;
mod selector;

pub use document::{Document, Listener, ListenerId, NodeId, WeakDocument};
pub use event::Event;
pub use parser::{Fragment, parse_fragment};
pub use selector::Selector;
