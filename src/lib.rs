//! Homeboard - view lifecycle and component layer for a smart-home dashboard.
//!
//! Views and modals are loaded on demand into an in-process document,
//! switched by a view manager, and populated with composable components.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

/// Application layer containing the view manager and UI state.
pub mod application;
/// Domain layer containing the document model, entities, errors and ports.
pub mod domain;
/// Infrastructure layer containing configuration, template sources and controllers.
pub mod infrastructure;
/// Presentation layer containing components and event routing.
pub mod presentation;

/// Current version of the application.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name.
pub const NAME: &str = "homeboard";
