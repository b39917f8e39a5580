//! Document-level event routing.

mod actions;
mod navigation;

pub use actions::{Action, ActionContext, ActionHandler, ActionRegistry, parse_params, parse_value};
pub use navigation::{NAVIGATE_EVENT, NavigationDispatcher, STATUS_ACTION_EVENT, perform};
