use serde_json::Value;

use crate::domain::errors::ComponentError;
use crate::presentation::components::component::{
    Component, ComponentDef, ComponentKind, Lifecycle, Target,
};
use crate::presentation::components::icons::icon_or;
use crate::presentation::components::markup::{ClassList, escape, svg_icon};
use crate::presentation::components::props::{Props, State};

/// Compact status readout used in the status bar.
///
/// Props: `type`, `icon`, `value`, `label`, `active`, `armed`,
/// `entityId` and `action` (mirrored to `data-*` attributes for delegated
/// handling) and the `onClick` callback.
#[derive(Debug, Default)]
pub struct StatusPill;

impl Component for StatusPill {
    fn class_name(&self, props: &Props, _state: &State) -> Option<String> {
        Some(
            ClassList::new("status-pill")
                .with(format!("status-pill--{}", props.str_or("type", "default")))
                .with_if(props.flag("active"), "status-pill--active")
                .with(if props.flag("armed") {
                    "status-pill--armed"
                } else {
                    "status-pill--disarmed"
                })
                .with_opt(props.str("className"))
                .build(),
        )
    }

    fn template(&self, props: &Props, _state: &State) -> String {
        let value = match props.get("value") {
            None | Some(Value::Null) => "--".to_string(),
            Some(Value::String(s)) => escape(s),
            Some(other) => other.to_string(),
        };
        format!(
            r#"{}<span class="status-pill__value">{value}</span><span class="status-pill__label">{}</span>"#,
            svg_icon("status-pill__icon", icon_or(props.str("icon"), "info")),
            escape(props.str("label").unwrap_or_default()),
        )
    }

    fn on_mount(&mut self, cx: &mut Lifecycle<'_>) -> Result<(), ComponentError> {
        if cx.props().callback("onClick").is_some() {
            cx.on(Target::Root, "click", |this, _| {
                if let Some(on_click) = this.callback("onClick") {
                    on_click(&Value::Null);
                }
            });
        }

        let entity_id = cx.props().str("entityId").map(str::to_string);
        if let Some(entity_id) = entity_id {
            cx.set_attribute("data-entity-id", &entity_id);
        }
        let action = cx.props().str("action").map(str::to_string);
        if let Some(action) = action {
            cx.set_attribute("data-action", &action);
        }
        Ok(())
    }
}

impl ComponentDef for StatusPill {
    const NAME: &'static str = "StatusPill";
    const KIND: ComponentKind = ComponentKind::Molecule;

    fn styles() -> String {
        r"
.status-pill {
    display: flex;
    align-items: center;
    gap: var(--spacing-xs);
    padding: var(--spacing-xs) var(--spacing-sm);
    background: var(--glass-bg);
    border: 1px solid var(--glass-border);
    border-radius: var(--radius-full);
    cursor: pointer;
}
.status-pill__icon { width: 14px; height: 14px; }
.status-pill__value { font-weight: var(--font-semibold); }
.status-pill__label { color: var(--color-text-tertiary); font-size: var(--text-xs); }
.status-pill--active { border-color: var(--color-amber); color: var(--color-amber); }
.status-pill--armed { border-color: var(--color-red); color: var(--color-red); }
.status-pill--lights.status-pill--active .status-pill__icon { filter: drop-shadow(0 0 4px var(--color-amber)); }
"
        .to_string()
    }

    fn create(_props: &Props) -> Self {
        Self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::dom::{Document, Event};
    use crate::presentation::components::ComponentHandle;
    use serde_json::json;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_class_always_carries_arm_state() {
        let class = StatusPill
            .class_name(&Props::new().with("type", "security"), &State::new())
            .unwrap();
        assert_eq!(class, "status-pill status-pill--security status-pill--disarmed");

        let class = StatusPill
            .class_name(
                &Props::new().with("active", true).with("armed", true),
                &State::new(),
            )
            .unwrap();
        assert_eq!(class, "status-pill status-pill--default status-pill--active status-pill--armed");
    }

    #[test]
    fn test_value_rendering() {
        assert!(StatusPill.template(&Props::new(), &State::new()).contains(">--<"));
        let html = StatusPill.template(&Props::from_value(json!({ "value": 3, "label": "on" })), &State::new());
        assert!(html.contains(r#"<span class="status-pill__value">3</span>"#));
        assert!(html.contains(r#"<span class="status-pill__label">on</span>"#));
    }

    #[test]
    fn test_mount_sets_data_attributes_and_click() {
        let document = Document::new();
        let clicks = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&clicks);
        let pill = ComponentHandle::new::<StatusPill>(
            &document,
            Props::new()
                .with("entityId", "alarm_control_panel.home")
                .with("action", "showSecurity")
                .with_callback("onClick", move |_| {
                    counter.fetch_add(1, Ordering::SeqCst);
                }),
        );
        let element = pill.mount(document.body()).unwrap();

        document.dispatch_event(element, &Event::click());

        assert_eq!(clicks.load(Ordering::SeqCst), 1);
        assert_eq!(
            document.attribute(element, "data-entity-id").as_deref(),
            Some("alarm_control_panel.home")
        );
        assert_eq!(document.attribute(element, "data-action").as_deref(), Some("showSecurity"));
    }
}
