mod ui_state;
mod view_manager;

pub use ui_state::{UiEvent, UiState};
pub use view_manager::{ShowOutcome, ViewManager};
