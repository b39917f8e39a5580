//! Application layer with the view lifecycle services.

/// Application services.
pub mod services;

pub use services::{ShowOutcome, UiEvent, UiState, ViewManager};
