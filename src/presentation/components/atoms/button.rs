use serde_json::Value;

use crate::domain::errors::ComponentError;
use crate::presentation::components::component::{
    Component, ComponentDef, ComponentKind, Lifecycle, Target,
};
use crate::presentation::components::icons::icon;
use crate::presentation::components::markup::{ClassList, escape, svg_icon};
use crate::presentation::components::props::{Props, State};

/// Button with variants.
///
/// Props: `text`, `variant` (default `primary`), `size` (default `md`),
/// `icon`, `iconRight`, `block`, `iconOnly`, `glow`, `loading`, `disabled`,
/// `className` and the `onClick` callback. Clicks only invoke `onClick`;
/// the button emits no events of its own.
#[derive(Debug, Default)]
pub struct Button;

impl Component for Button {
    fn tag(&self) -> &'static str {
        "button"
    }

    fn class_name(&self, props: &Props, _state: &State) -> Option<String> {
        let glow = props.str("glow").filter(|g| !g.is_empty());
        Some(
            ClassList::new("btn")
                .with(format!("btn--{}", props.str_or("variant", "primary")))
                .with(format!("btn--{}", props.str_or("size", "md")))
                .with_if(props.flag("block"), "btn--block")
                .with_if(props.flag("iconOnly"), "btn--icon")
                .with_opt(glow.map(|g| format!("btn--glow-{g}")).as_deref())
                .with_if(props.flag("loading"), "btn--loading")
                .with_opt(props.str("className"))
                .build(),
        )
    }

    fn template(&self, props: &Props, _state: &State) -> String {
        let icon_html = |key: &str| {
            props
                .str(key)
                .and_then(icon)
                .map(|path| svg_icon("btn__icon", path))
                .unwrap_or_default()
        };
        let text = props
            .str("text")
            .filter(|t| !t.is_empty())
            .map(|t| format!(r#"<span class="btn__text">{}</span>"#, escape(t)))
            .unwrap_or_default();
        let spinner = if props.flag("loading") {
            r#"<span class="btn__spinner"></span>"#
        } else {
            ""
        };

        format!("{}{text}{}{spinner}", icon_html("icon"), icon_html("iconRight"))
    }

    fn on_mount(&mut self, cx: &mut Lifecycle<'_>) -> Result<(), ComponentError> {
        if cx.props().flag("disabled") {
            cx.set_attribute("disabled", "");
        }

        if cx.props().callback("onClick").is_some() {
            cx.on(Target::Root, "click", |this, _| {
                let props = this.props();
                if props.flag("disabled") || props.flag("loading") {
                    return;
                }
                if let Some(on_click) = props.callback("onClick") {
                    on_click(&Value::Null);
                }
            });
        }
        Ok(())
    }
}

impl ComponentDef for Button {
    const NAME: &'static str = "Button";
    const KIND: ComponentKind = ComponentKind::Atom;

    fn styles() -> String {
        r"
.btn {
    display: inline-flex;
    align-items: center;
    justify-content: center;
    gap: var(--spacing-sm);
    font-weight: var(--font-semibold);
    border-radius: var(--btn-radius);
    transition: all var(--transition-fast);
    cursor: pointer;
}
.btn:active { transform: scale(0.95); }
.btn:disabled { opacity: 0.5; cursor: not-allowed; transform: none; }
.btn--sm { height: var(--btn-height-sm); padding: 0 var(--spacing-md); font-size: var(--text-sm); }
.btn--md { height: var(--btn-height-md); padding: 0 var(--spacing-lg); font-size: var(--text-base); }
.btn--lg { height: var(--btn-height-lg); padding: 0 var(--spacing-xl); font-size: var(--text-lg); }
.btn--primary { background: linear-gradient(135deg, var(--color-purple), var(--color-blue)); color: white; }
.btn--secondary { background: var(--glass-bg); border: 1px solid var(--glass-border); color: var(--color-text-secondary); }
.btn--danger { background: linear-gradient(135deg, #f43f5e, var(--color-red)); color: white; }
.btn--success { background: linear-gradient(135deg, var(--color-emerald), var(--color-teal)); color: white; }
.btn--warning { background: linear-gradient(135deg, var(--color-amber), var(--color-orange)); color: white; }
.btn--ghost { background: transparent; color: var(--color-text-secondary); }
.btn--icon { padding: 0; width: var(--btn-height-md); }
.btn--block { width: 100%; }
.btn--glow-amber { box-shadow: var(--glow-amber); }
.btn--glow-emerald { box-shadow: var(--glow-emerald); }
.btn--glow-red { box-shadow: var(--glow-red); }
.btn__icon { width: 18px; height: 18px; flex-shrink: 0; }
.btn--loading { pointer-events: none; }
.btn--loading .btn__text { opacity: 0; }
.btn__spinner {
    position: absolute;
    width: 18px;
    height: 18px;
    border: 2px solid transparent;
    border-top-color: currentColor;
    border-radius: 50%;
    animation: spin 1s linear infinite;
}
"
        .to_string()
    }

    fn create(_props: &Props) -> Self {
        Self
    }
}
