//! Presentation layer with UI components and event routing.

/// Components and their registry.
pub mod components;
/// Action delegation and navigation.
pub mod events;

pub use components::{ComponentHandle, ComponentRegistry, Props, init_components};
pub use events::{ActionRegistry, NavigationDispatcher};
