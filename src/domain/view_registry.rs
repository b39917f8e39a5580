//! Static table of views and modals.

use super::entities::{ControllerRef, ModalDescriptor, ModalId, ViewDescriptor, ViewId};

const BUILTIN_VIEWS: [ViewDescriptor; 13] = [
    ViewDescriptor::new(ViewId::Home, "home.html").preloaded(),
    ViewDescriptor::new(ViewId::Cameras, "cameras.html")
        .with_controller(ControllerRef::AccessController)
        .on_show("startCameraRefresh")
        .on_hide("stopCameraRefresh"),
    ViewDescriptor::new(ViewId::Security, "security.html")
        .with_controller(ControllerRef::SecurityController)
        .on_show("initializeZoneTimeline"),
    ViewDescriptor::new(ViewId::Energy, "energy.html")
        .with_controller(ControllerRef::EnergyChart)
        .on_show("onEnergyViewShow"),
    ViewDescriptor::new(ViewId::EnergyDisplay, "energy-display.html")
        .with_controller(ControllerRef::EnergyDisplay)
        .on_show("initEnergyDisplay"),
    ViewDescriptor::new(ViewId::Garage, "garage.html"),
    ViewDescriptor::new(ViewId::Calendar, "calendar.html")
        .with_controller(ControllerRef::Calendar)
        .on_show("initCalendar")
        .on_hide("destroyCalendar"),
    ViewDescriptor::new(ViewId::Media, "media.html")
        .with_controller(ControllerRef::Media)
        .on_show("initMediaPortal"),
    ViewDescriptor::new(ViewId::System, "system.html")
        .with_controller(ControllerRef::PcMetrics)
        .on_show("startPCMetrics")
        .on_hide("stopPCMetrics"),
    ViewDescriptor::new(ViewId::Surveillance, "surveillance.html")
        .with_controller(ControllerRef::Surveillance)
        .on_show("onViewShow")
        .on_hide("onViewHide"),
    ViewDescriptor::new(ViewId::GuestPass, "guest-pass.html")
        .with_controller(ControllerRef::GuestPass),
    ViewDescriptor::new(ViewId::Weather, "weather.html")
        .with_controller(ControllerRef::Weather)
        .on_show("init"),
    ViewDescriptor::new(ViewId::Alexa, "alexa.html")
        .with_controller(ControllerRef::Alexa)
        .on_show("initAlexa"),
];

const BUILTIN_MODALS: [ModalDescriptor; 6] = [
    ModalDescriptor::new(ModalId::Room, "room-modal.html"),
    ModalDescriptor::new(ModalId::AllLights, "all-lights-modal.html"),
    ModalDescriptor::new(ModalId::EventDetail, "event-detail-modal.html"),
    ModalDescriptor::new(ModalId::EventCreate, "event-create-modal.html"),
    ModalDescriptor::new(ModalId::CalendarAuth, "calendar-auth-modal.html"),
    ModalDescriptor::new(ModalId::DelayedExit, "../views/delayed-exit.html"),
];

/// Lookup table mapping view and modal names to their descriptors.
#[derive(Debug, Clone)]
pub struct ViewRegistry {
    views: Vec<ViewDescriptor>,
    modals: Vec<ModalDescriptor>,
}

impl Default for ViewRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl ViewRegistry {
    /// Returns the dashboard's built-in table.
    #[must_use]
    pub fn builtin() -> Self {
        Self::new(BUILTIN_VIEWS.to_vec(), BUILTIN_MODALS.to_vec())
    }

    /// Creates a registry from explicit tables. Later duplicates are ignored.
    #[must_use]
    pub fn new(views: Vec<ViewDescriptor>, modals: Vec<ModalDescriptor>) -> Self {
        let mut unique_views: Vec<ViewDescriptor> = Vec::with_capacity(views.len());
        for view in views {
            if !unique_views.iter().any(|v| v.id() == view.id()) {
                unique_views.push(view);
            }
        }
        let mut unique_modals: Vec<ModalDescriptor> = Vec::with_capacity(modals.len());
        for modal in modals {
            if !unique_modals.iter().any(|m| m.id() == modal.id()) {
                unique_modals.push(modal);
            }
        }
        Self {
            views: unique_views,
            modals: unique_modals,
        }
    }

    /// Returns every view name in registry order.
    #[must_use]
    pub fn view_names(&self) -> Vec<&'static str> {
        self.views.iter().map(ViewDescriptor::name).collect()
    }

    /// Returns every view identifier in registry order.
    pub fn view_ids(&self) -> impl Iterator<Item = ViewId> + '_ {
        self.views.iter().map(ViewDescriptor::id)
    }

    /// Looks up a view by name.
    #[must_use]
    pub fn view_config(&self, name: &str) -> Option<&ViewDescriptor> {
        self.views.iter().find(|view| view.name() == name)
    }

    /// Looks up a view by identifier.
    #[must_use]
    pub fn view(&self, id: ViewId) -> Option<&ViewDescriptor> {
        self.views.iter().find(|view| view.id() == id)
    }

    /// Returns the views marked for eager loading.
    pub fn preloaded_views(&self) -> impl Iterator<Item = &ViewDescriptor> {
        self.views.iter().filter(|view| view.is_preloaded())
    }

    /// Returns every modal name in registry order.
    #[must_use]
    pub fn modal_names(&self) -> Vec<&'static str> {
        self.modals.iter().map(ModalDescriptor::name).collect()
    }

    /// Looks up a modal by name.
    #[must_use]
    pub fn modal_config(&self, name: &str) -> Option<&ModalDescriptor> {
        self.modals.iter().find(|modal| modal.name() == name)
    }

    /// Looks up a modal by identifier.
    #[must_use]
    pub fn modal(&self, id: ModalId) -> Option<&ModalDescriptor> {
        self.modals.iter().find(|modal| modal.id() == id)
    }
}
