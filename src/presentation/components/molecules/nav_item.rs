use serde_json::{Value, json};

use crate::domain::errors::ComponentError;
use crate::presentation::components::component::{
    Component, ComponentDef, ComponentKind, Lifecycle, Target,
};
use crate::presentation::components::icons::icon_or;
use crate::presentation::components::markup::{ClassList, escape, svg_icon};
use crate::presentation::components::props::{Props, State, truthy};

/// Navigation button. Clicking calls `onClick` with the view and emits
/// `navigate {view}`.
#[derive(Debug, Default)]
pub struct NavItem;

impl Component for NavItem {
    fn tag(&self) -> &'static str {
        "button"
    }

    fn class_name(&self, props: &Props, _state: &State) -> Option<String> {
        Some(
            ClassList::new("nav-item")
                .with_if(props.flag("active"), "nav-item--active")
                .with_opt(props.str("className"))
                .build(),
        )
    }

    fn template(&self, props: &Props, _state: &State) -> String {
        let badge = props
            .get("badge")
            .filter(|b| truthy(b))
            .map(|b| match b {
                Value::String(s) => escape(s),
                other => other.to_string(),
            })
            .map(|b| format!(r#"<span class="nav-item__badge">{b}</span>"#))
            .unwrap_or_default();
        format!(
            r#"{}<span class="nav-item__label">{}</span>{badge}"#,
            svg_icon("nav-item__icon", icon_or(props.str("icon"), "home")),
            escape(props.str("label").unwrap_or_default()),
        )
    }

    fn on_mount(&mut self, cx: &mut Lifecycle<'_>) -> Result<(), ComponentError> {
        cx.on(Target::Root, "click", |this, _| {
            let props = this.props();
            let view = props.get("view").cloned().unwrap_or(Value::Null);
            if let Some(on_click) = props.callback("onClick") {
                on_click(&view);
            }
            this.emit("navigate", json!({ "view": view }));
        });

        let view = cx.props().str("view").map(str::to_string);
        if let Some(view) = view {
            cx.set_attribute("data-view", &view);
        }
        Ok(())
    }
}

impl ComponentDef for NavItem {
    const NAME: &'static str = "NavItem";
    const KIND: ComponentKind = ComponentKind::Molecule;

    fn styles() -> String {
        r"
.nav-item {
    display: flex;
    flex-direction: column;
    align-items: center;
    gap: var(--spacing-xs);
    padding: var(--spacing-sm) 2px;
    color: var(--color-text-tertiary);
    position: relative;
    background: transparent;
    border: none;
    cursor: pointer;
}
.nav-item--active { color: var(--color-cyan); }
.nav-item__icon { width: 20px; height: 20px; }
.nav-item__label { font-size: 0.5625rem; text-transform: uppercase; letter-spacing: 0.02em; }
.nav-item__badge {
    position: absolute;
    top: 4px;
    right: 50%;
    min-width: 14px;
    height: 14px;
    padding: 0 4px;
    background: var(--color-red);
    border-radius: var(--radius-full);
    font-size: 0.5rem;
    color: white;
}
"
        .to_string()
    }

    fn create(_props: &Props) -> Self {
        Self
    }
}
