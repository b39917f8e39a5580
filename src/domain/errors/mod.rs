//! Domain error types.

mod action_error;
mod component_error;
mod dom_error;
mod view_error;

pub use action_error::ActionError;
pub use component_error::ComponentError;
pub use dom_error::DomError;
pub use view_error::ViewError;
