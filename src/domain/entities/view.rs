//! View, modal and controller identifiers and descriptors.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::errors::ViewError;

/// Top-level, mutually exclusive dashboard screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[allow(missing_docs)]
pub enum ViewId {
    Home,
    Cameras,
    Security,
    Energy,
    EnergyDisplay,
    Garage,
    Calendar,
    Media,
    System,
    Surveillance,
    GuestPass,
    Weather,
    Alexa,
}

impl ViewId {
    /// All views in registry order.
    pub const ALL: [Self; 13] = [
        Self::Home,
        Self::Cameras,
        Self::Security,
        Self::Energy,
        Self::EnergyDisplay,
        Self::Garage,
        Self::Calendar,
        Self::Media,
        Self::System,
        Self::Surveillance,
        Self::GuestPass,
        Self::Weather,
        Self::Alexa,
    ];

    /// Returns the view name used in markup and configuration.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::Cameras => "cameras",
            Self::Security => "security",
            Self::Energy => "energy",
            Self::EnergyDisplay => "energy-display",
            Self::Garage => "garage",
            Self::Calendar => "calendar",
            Self::Media => "media",
            Self::System => "system",
            Self::Surveillance => "surveillance",
            Self::GuestPass => "guest-pass",
            Self::Weather => "weather",
            Self::Alexa => "alexa",
        }
    }

    /// Returns the id of the element holding this view's markup.
    #[must_use]
    pub fn container_id(self) -> String {
        format!("view-{}", self.as_str())
    }
}

impl fmt::Display for ViewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ViewId {
    type Err = ViewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|view| view.as_str() == s)
            .ok_or_else(|| ViewError::UnknownView { name: s.to_string() })
    }
}

/// Overlay dialog, independent of view exclusivity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub enum ModalId {
    Room,
    AllLights,
    EventDetail,
    EventCreate,
    CalendarAuth,
    DelayedExit,
}

impl ModalId {
    /// All modals in registry order.
    pub const ALL: [Self; 6] = [
        Self::Room,
        Self::AllLights,
        Self::EventDetail,
        Self::EventCreate,
        Self::CalendarAuth,
        Self::DelayedExit,
    ];

    /// Returns the modal name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Room => "room",
            Self::AllLights => "allLights",
            Self::EventDetail => "eventDetail",
            Self::EventCreate => "eventCreate",
            Self::CalendarAuth => "calendarAuth",
            Self::DelayedExit => "delayedExit",
        }
    }
}

impl fmt::Display for ModalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModalId {
    type Err = ViewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|modal| modal.as_str() == s)
            .ok_or_else(|| ViewError::UnknownModal { name: s.to_string() })
    }
}

/// Statically linked controller module backing one or more views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[allow(missing_docs)]
pub enum ControllerRef {
    AccessController,
    SecurityController,
    EnergyChart,
    EnergyDisplay,
    Calendar,
    Media,
    PcMetrics,
    Surveillance,
    GuestPass,
    Weather,
    Alexa,
}

impl ControllerRef {
    /// Returns the module name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AccessController => "access-controller",
            Self::SecurityController => "security-controller",
            Self::EnergyChart => "energy-chart",
            Self::EnergyDisplay => "energy-display",
            Self::Calendar => "calendar",
            Self::Media => "media",
            Self::PcMetrics => "pc-metrics",
            Self::Surveillance => "surveillance",
            Self::GuestPass => "guest-pass",
            Self::Weather => "weather",
            Self::Alexa => "alexa",
        }
    }
}

impl fmt::Display for ControllerRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Declarative description of one view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewDescriptor {
    id: ViewId,
    template: &'static str,
    controller: Option<ControllerRef>,
    on_show: Option<&'static str>,
    on_hide: Option<&'static str>,
    preload: bool,
}

impl ViewDescriptor {
    /// Creates a template-only view.
    #[must_use]
    pub const fn new(id: ViewId, template: &'static str) -> Self {
        Self {
            id,
            template,
            controller: None,
            on_show: None,
            on_hide: None,
            preload: false,
        }
    }

    /// Attaches a controller module.
    #[must_use]
    pub const fn with_controller(mut self, controller: ControllerRef) -> Self {
        self.controller = Some(controller);
        self
    }

    /// Names the setup hook run when the view is shown.
    #[must_use]
    pub const fn on_show(mut self, hook: &'static str) -> Self {
        self.on_show = Some(hook);
        self
    }

    /// Names the teardown hook run when the view is left.
    #[must_use]
    pub const fn on_hide(mut self, hook: &'static str) -> Self {
        self.on_hide = Some(hook);
        self
    }

    /// Marks the view for eager template loading.
    #[must_use]
    pub const fn preloaded(mut self) -> Self {
        self.preload = true;
        self
    }

    /// Returns the view identifier.
    #[must_use]
    pub const fn id(&self) -> ViewId {
        self.id
    }

    /// Returns the view name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.id.as_str()
    }

    /// Returns the template file name.
    #[must_use]
    pub const fn template_ref(&self) -> &'static str {
        self.template
    }

    /// Returns the controller module, if any.
    #[must_use]
    pub const fn controller(&self) -> Option<ControllerRef> {
        self.controller
    }

    /// Returns the setup hook name.
    #[must_use]
    pub const fn on_show_hook(&self) -> Option<&'static str> {
        self.on_show
    }

    /// Returns the teardown hook name.
    #[must_use]
    pub const fn on_hide_hook(&self) -> Option<&'static str> {
        self.on_hide
    }

    /// Returns whether the template is loaded eagerly.
    #[must_use]
    pub const fn is_preloaded(&self) -> bool {
        self.preload
    }
}

/// Declarative description of one modal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModalDescriptor {
    id: ModalId,
    template: &'static str,
}

impl ModalDescriptor {
    /// Creates a modal descriptor.
    #[must_use]
    pub const fn new(id: ModalId, template: &'static str) -> Self {
        Self { id, template }
    }

    /// Returns the modal identifier.
    #[must_use]
    pub const fn id(&self) -> ModalId {
        self.id
    }

    /// Returns the modal name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.id.as_str()
    }

    /// Returns the template file name, relative to the modals directory.
    #[must_use]
    pub const fn template_ref(&self) -> &'static str {
        self.template
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("home", ViewId::Home ; "home")]
    #[test_case("energy-display", ViewId::EnergyDisplay ; "kebab_case")]
    #[test_case("guest-pass", ViewId::GuestPass ; "guest_pass")]
    fn test_view_id_parsing(name: &str, expected: ViewId) {
        assert_eq!(name.parse::<ViewId>().unwrap(), expected);
        assert_eq!(expected.as_str(), name);
    }

    #[test]
    fn test_unknown_view_name() {
        assert_eq!(
            "nonexistent".parse::<ViewId>(),
            Err(ViewError::UnknownView {
                name: "nonexistent".to_string()
            })
        );
    }

    #[test]
    fn test_modal_id_parsing() {
        assert_eq!("allLights".parse::<ModalId>().unwrap(), ModalId::AllLights);
        assert!("all-lights".parse::<ModalId>().is_err());
    }

    #[test]
    fn test_view_id_serde_matches_names() {
        for view in ViewId::ALL {
            let json = serde_json::to_string(&view).unwrap();
            assert_eq!(json, format!("\"{view}\""));
        }
    }

    #[test]
    fn test_container_id() {
        assert_eq!(ViewId::Security.container_id(), "view-security");
    }
}
