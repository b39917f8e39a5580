//! Smallest building blocks.

mod badge;
mod button;
mod icon;
mod indicator;

pub use badge::Badge;
pub use button::Button;
pub use icon::Icon;
pub use indicator::{ConnectionIndicator, Indicator};
