//! Config-driven view composition.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use super::component::{ComponentHandle, Target};
use super::props::Props;
use super::registry::ComponentRegistry;

/// One component in a view layout.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ComponentConfig {
    /// Registered component name.
    #[serde(rename = "type")]
    pub component_type: String,
    /// Element id given to the instance.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Props passed to the instance.
    #[serde(default)]
    pub props: Value,
}

/// Ordered components of a view.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ViewLayout {
    /// Components in mount order.
    #[serde(default)]
    pub components: Vec<ComponentConfig>,
}

impl ComponentRegistry {
    /// Creates an instance from a layout entry. Unknown types warn and yield `None`.
    #[must_use]
    pub fn create_from_config(&self, config: &ComponentConfig) -> Option<ComponentHandle> {
        if !self.has(&config.component_type) {
            warn!(component = %config.component_type, "Unknown component type");
            return None;
        }

        let mut props = Props::from_value(config.props.clone());
        if let Some(id) = &config.id {
            props.insert("id", id.clone());
        }
        self.create(&config.component_type, props)
    }

    /// Mounts every layout entry under `container`, in order.
    ///
    /// Entries that cannot be created or mounted are skipped.
    pub fn render_view(&self, layout: &ViewLayout, container: impl Into<Target>) -> Vec<ComponentHandle> {
        if layout.components.is_empty() {
            warn!("Empty view layout");
            return Vec::new();
        }

        let container = container.into();
        let mut mounted = Vec::with_capacity(layout.components.len());
        for config in &layout.components {
            let Some(component) = self.create_from_config(config) else {
                continue;
            };
            match component.mount(container.clone()) {
                Ok(_) => mounted.push(component),
                Err(e) => warn!(component = %config.component_type, error = %e, "Failed to mount component"),
            }
        }
        debug!(mounted = mounted.len(), total = layout.components.len(), "View layout rendered");
        mounted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::dom::Document;
    use crate::presentation::components::init_components;
    use serde_json::json;

    fn layout() -> ViewLayout {
        serde_json::from_value(json!({
            "components": [
                { "type": "StatusBar", "id": "status", "props": { "lightsOn": 2 } },
                { "type": "Sparkline", "props": {} },
                { "type": "RoomCard", "id": "room-kitchen", "props": { "roomId": "kitchen", "name": "Kitchen" } },
                { "type": "BottomNav" },
            ]
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn test_render_view_skips_unknown_types() {
        let document = Document::new();
        let registry = init_components(document.clone());
        let container = document.create_element("main");
        document.append_child(document.body(), container).unwrap();

        let mounted = registry.render_view(&layout(), container);

        let names: Vec<&str> = mounted.iter().map(ComponentHandle::name).collect();
        assert_eq!(names, vec!["StatusBar", "RoomCard", "BottomNav"]);
        assert_eq!(document.children(container).len(), 3);
        assert!(document.get_element_by_id("room-kitchen").is_some());
        for component in &mounted {
            component.unmount();
        }
        assert!(document.children(container).is_empty());
    }

    #[test]
    fn test_missing_container_mounts_nothing() {
        let document = Document::new();
        let registry = init_components(document.clone());

        let mounted = registry.render_view(&layout(), "#nowhere");

        assert!(mounted.is_empty());
        assert_eq!(document.total_listeners(), 0);
    }

    #[test]
    fn test_create_from_config_injects_id() {
        let registry = init_components(Document::new());
        let config = ComponentConfig {
            component_type: "Badge".to_string(),
            id: Some("alarm-badge".to_string()),
            props: json!({ "text": "armed" }),
        };

        let badge = registry.create_from_config(&config).unwrap();

        assert_eq!(badge.props().str("id"), Some("alarm-badge"));
        assert!(registry.render_view(&ViewLayout::default(), "body").is_empty());
    }
}
