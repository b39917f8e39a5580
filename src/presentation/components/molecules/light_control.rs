use serde_json::{Value, json};

use crate::domain::errors::ComponentError;
use crate::presentation::components::component::{
    Component, ComponentDef, ComponentKind, Lifecycle, Target,
};
use crate::presentation::components::icons::icon_or;
use crate::presentation::components::markup::{ClassList, escape, svg_icon};
use crate::presentation::components::props::{Props, State};

/// Toggleable light row.
///
/// Clicking calls `onToggle` with the entity id and emits `toggle {entityId}`.
#[derive(Debug, Default)]
pub struct LightControl;

impl Component for LightControl {
    fn class_name(&self, props: &Props, _state: &State) -> Option<String> {
        Some(
            ClassList::new("light-control")
                .with_if(props.flag("isOn"), "light-control--on")
                .with_if(props.flag("showSlider"), "light-control--slider")
                .with_opt(props.str("className"))
                .build(),
        )
    }

    fn template(&self, props: &Props, _state: &State) -> String {
        let is_on = props.flag("isOn");
        let brightness = props.i64("brightness").unwrap_or(100);
        let state_text = if is_on {
            format!("{brightness}%")
        } else {
            "Off".to_string()
        };
        let bar = if is_on && props.flag("showSlider") {
            format!(
                r#"<div class="light-control__brightness"><div class="light-control__brightness-fill" style="width: {brightness}%"></div></div>"#
            )
        } else {
            String::new()
        };

        format!(
            r#"<div class="light-control__slider-row"><div class="light-control__icon">{}</div><div class="light-control__info"><div class="light-control__name">{}</div><div class="light-control__state">{state_text}</div></div><div class="light-control__toggle"></div></div>{bar}"#,
            svg_icon("", icon_or(Some("lightbulb"), "home")),
            escape(props.str("name").unwrap_or_default()),
        )
    }

    fn on_mount(&mut self, cx: &mut Lifecycle<'_>) -> Result<(), ComponentError> {
        cx.on(Target::Root, "click", |this, _| {
            let props = this.props();
            let entity_id = props.get("entityId").cloned().unwrap_or(Value::Null);
            if let Some(on_toggle) = props.callback("onToggle") {
                on_toggle(&entity_id);
            }
            this.emit("toggle", json!({ "entityId": entity_id }));
        });

        let entity_id = cx.props().str("entityId").map(str::to_string);
        if let Some(entity_id) = entity_id {
            cx.set_attribute("data-entity-id", &entity_id);
        }
        Ok(())
    }
}

impl ComponentDef for LightControl {
    const NAME: &'static str = "LightControl";
    const KIND: ComponentKind = ComponentKind::Molecule;

    fn styles() -> String {
        r"
.light-control {
    display: flex;
    flex-direction: column;
    gap: var(--spacing-sm);
    padding: var(--spacing-md);
    background: var(--glass-bg);
    border: 1px solid var(--glass-border);
    border-radius: var(--radius-lg);
    cursor: pointer;
}
.light-control__slider-row { display: flex; align-items: center; gap: var(--spacing-md); }
.light-control__icon { width: 36px; height: 36px; color: var(--color-text-tertiary); }
.light-control--on .light-control__icon { color: var(--color-amber); }
.light-control__info { flex: 1; min-width: 0; }
.light-control__name { font-weight: var(--font-medium); }
.light-control__state { font-size: var(--text-xs); color: var(--color-text-tertiary); }
.light-control__toggle { width: 40px; height: 22px; border-radius: var(--radius-full); background: var(--glass-bg-hover); }
.light-control--on .light-control__toggle { background: var(--color-amber); }
.light-control__brightness { height: 4px; border-radius: 2px; background: var(--glass-bg-hover); overflow: hidden; }
.light-control__brightness-fill { height: 100%; background: var(--color-amber); }
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
    use parking_lot::Mutex;
    use std::sync::Arc;

    #[test]
    fn test_state_text() {
        let off = LightControl.template(&Props::new().with("name", "Desk"), &State::new());
        assert!(off.contains(r#"<div class="light-control__state">Off</div>"#));

        let on = LightControl.template(
            &Props::new().with("isOn", true).with("brightness", 40).with("showSlider", true),
            &State::new(),
        );
        assert!(on.contains(">40%<"));
        assert!(on.contains(r#"style="width: 40%""#));
    }

    #[test]
    fn test_click_toggles_and_emits() {
        let document = Document::new();
        let toggled = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&toggled);
        let emitted = Arc::new(Mutex::new(Vec::new()));
        let events = Arc::clone(&emitted);
        document.add_listener(
            document.body(),
            "toggle",
            Arc::new(move |event: &Event| events.lock().push(event.detail().clone())),
        );
        let light = ComponentHandle::new::<LightControl>(
            &document,
            Props::new()
                .with("entityId", "light.kitchen")
                .with_callback("onToggle", move |id| sink.lock().push(id.clone())),
        );
        light.mount(document.body()).unwrap();

        let toggle = light.query(".light-control__toggle").unwrap();
        document.dispatch_event(toggle, &Event::click());

        assert_eq!(*toggled.lock(), vec![json!("light.kitchen")]);
        assert_eq!(*emitted.lock(), vec![json!({ "entityId": "light.kitchen" })]);
    }
}
