//! Small groups of atoms.

mod light_control;
mod nav_item;
mod status_pill;
mod weather_badge;

pub use light_control::LightControl;
pub use nav_item::NavItem;
pub use status_pill::StatusPill;
pub use weather_badge::WeatherBadge;
