//! Name-indexed component factory with aggregated stylesheet.

use indexmap::IndexMap;
use tracing::{debug, error, info, warn};

use crate::domain::dom::{Document, NodeId};
use crate::domain::errors::ComponentError;

use super::atoms::{Badge, Button, ConnectionIndicator, Icon, Indicator};
use super::component::{ComponentClass, ComponentDef, ComponentHandle, ComponentKind, Target};
use super::molecules::{LightControl, NavItem, StatusPill, WeatherBadge};
use super::organisms::{BottomNav, RoomCard, StatusBar};
use super::props::Props;

/// Id of the shared `<style>` element in `head`.
pub const STYLE_ELEMENT_ID: &str = "component-styles";

/// Registered component classes and their styles, in registration order.
///
/// Style blocks are joined in registration order, so a later registration
/// wins for identical selectors. Re-registering a name keeps its position.
#[derive(Debug)]
pub struct ComponentRegistry {
    document: Document,
    classes: IndexMap<String, ComponentClass>,
    styles: IndexMap<String, String>,
    style_element: Option<NodeId>,
}

impl ComponentRegistry {
    /// Creates an empty registry rendering into `document`.
    #[must_use]
    pub fn new(document: Document) -> Self {
        Self {
            document,
            classes: IndexMap::new(),
            styles: IndexMap::new(),
            style_element: None,
        }
    }

    /// Returns the document instances render into.
    #[must_use]
    pub const fn document(&self) -> &Document {
        &self.document
    }

    /// Registers a class under `name`. Re-registration warns and replaces.
    pub fn register(&mut self, name: impl Into<String>, class: ComponentClass) -> &mut Self {
        let name = name.into();
        if self.classes.contains_key(&name) {
            warn!(component = %name, "Component is being re-registered");
        }

        let styles = class.styles().trim();
        let has_styles = !styles.is_empty();
        if has_styles {
            self.styles.insert(name.clone(), styles.to_string());
        }
        debug!(component = %name, kind = %class.kind(), "Component registered");
        self.classes.insert(name, class);

        if has_styles {
            self.update_styles();
        }
        self
    }

    /// Registers `T` under its own name.
    pub fn register_class<T: ComponentDef>(&mut self) -> &mut Self {
        self.register(T::NAME, ComponentClass::of::<T>())
    }

    /// Registers every entry, in order.
    pub fn register_all<I, N>(&mut self, classes: I) -> &mut Self
    where
        I: IntoIterator<Item = (N, ComponentClass)>,
        N: Into<String>,
    {
        for (name, class) in classes {
            self.register(name, class);
        }
        self
    }

    /// Returns the class registered under `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ComponentClass> {
        self.classes.get(name)
    }

    /// Returns whether `name` is registered.
    #[must_use]
    pub fn has(&self, name: &str) -> bool {
        self.classes.contains_key(name)
    }

    /// Returns registered names in registration order.
    #[must_use]
    pub fn list(&self) -> Vec<&str> {
        self.classes.keys().map(String::as_str).collect()
    }

    /// Returns the classes of one composition level.
    #[must_use]
    pub fn get_by_type(&self, kind: ComponentKind) -> IndexMap<&str, &ComponentClass> {
        self.classes
            .iter()
            .filter(|(_, class)| class.kind() == kind)
            .map(|(name, class)| (name.as_str(), class))
            .collect()
    }

    /// Creates an unmounted instance. Unknown names are logged and yield `None`.
    #[must_use]
    pub fn create(&self, name: &str, props: Props) -> Option<ComponentHandle> {
        let Some(class) = self.classes.get(name) else {
            error!(component = name, "Component not found");
            return None;
        };
        Some(class.instantiate(&self.document, props))
    }

    /// Creates an instance and mounts it under `parent`.
    ///
    /// # Errors
    /// Returns error if the name is unknown or mounting fails.
    pub fn mount(
        &self,
        name: &str,
        props: Props,
        parent: impl Into<Target>,
    ) -> Result<ComponentHandle, ComponentError> {
        let handle = self.create(name, props).ok_or_else(|| ComponentError::UnknownComponent {
            name: name.to_string(),
        })?;
        handle.mount(parent)?;
        Ok(handle)
    }

    /// Removes a class and its styles.
    pub fn unregister(&mut self, name: &str) -> bool {
        let removed = self.classes.shift_remove(name).is_some();
        self.styles.shift_remove(name);
        self.update_styles();
        removed
    }

    /// Removes every class and empties the stylesheet.
    pub fn clear(&mut self) {
        self.classes.clear();
        self.styles.clear();
        self.update_styles();
    }

    /// Returns all style blocks joined in registration order.
    #[must_use]
    pub fn all_styles(&self) -> String {
        self.styles.values().map(String::as_str).collect::<Vec<_>>().join("\n\n")
    }

    /// Rewrites the shared stylesheet element, creating it on first use.
    pub fn update_styles(&mut self) {
        let element = match self.style_element {
            Some(element) if self.document.contains(element) => element,
            _ => {
                let element = self.document.create_element("style");
                self.document.set_attribute(element, "id", STYLE_ELEMENT_ID);
                if let Err(e) = self.document.append_child(self.document.head(), element) {
                    warn!(error = %e, "Failed to attach component stylesheet");
                }
                self.style_element = Some(element);
                element
            }
        };
        self.document.set_text_content(element, &self.all_styles());
    }

    /// Logs registered components grouped by composition level.
    pub fn debug(&self) {
        info!(count = self.classes.len(), "Component registry");
        for kind in [
            ComponentKind::Atom,
            ComponentKind::Molecule,
            ComponentKind::Organism,
            ComponentKind::Template,
        ] {
            let names: Vec<&str> = self.get_by_type(kind).into_keys().collect();
            if !names.is_empty() {
                info!(kind = %kind, components = ?names, "Registered components");
            }
        }
    }
}

/// Creates a registry with every built-in component registered.
#[must_use]
pub fn init_components(document: Document) -> ComponentRegistry {
    let mut registry = ComponentRegistry::new(document);
    registry
        .register_class::<Icon>()
        .register_class::<Button>()
        .register_class::<Badge>()
        .register_class::<Indicator>()
        .register_class::<ConnectionIndicator>()
        .register_class::<StatusPill>()
        .register_class::<LightControl>()
        .register_class::<NavItem>()
        .register_class::<WeatherBadge>()
        .register_class::<RoomCard>()
        .register_class::<StatusBar>()
        .register_class::<BottomNav>();
    info!(count = registry.list().len(), "Registered components");
    registry
}
