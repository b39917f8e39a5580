use serde::Deserialize;
use serde_json::{Value, json};

use crate::domain::errors::ComponentError;
use crate::presentation::components::component::{
    Component, ComponentDef, ComponentHandle, ComponentKind, Lifecycle, Target,
};
use crate::presentation::components::icons::icon_or;
use crate::presentation::components::markup::{ClassList, escape, svg_icon};
use crate::presentation::components::props::{Props, State, truthy};

/// One entry of the bottom navigation.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct NavEntry {
    /// View name written to `data-view`.
    pub id: String,
    /// Icon name.
    #[serde(default)]
    pub icon: Option<String>,
    /// Visible label.
    #[serde(default)]
    pub label: String,
    /// Optional notification badge.
    #[serde(default)]
    pub badge: Option<Value>,
}

impl NavEntry {
    fn new(id: &str, icon: &str, label: &str) -> Self {
        Self {
            id: id.to_string(),
            icon: Some(icon.to_string()),
            label: label.to_string(),
            badge: None,
        }
    }

    /// Entries used when no `items` prop is given.
    #[must_use]
    pub fn defaults() -> Vec<Self> {
        vec![
            Self::new("home", "home", "Home"),
            Self::new("cameras", "camera", "Cams"),
            Self::new("calendar", "calendar", "Calendar"),
            Self::new("security", "shield", "Secure"),
            Self::new("more", "menu", "More"),
        ]
    }
}

/// Bottom navigation bar.
///
/// Clicking an item marks it active, calls `onNavigate` and emits
/// `navigate {view}`.
#[derive(Debug, Default)]
pub struct BottomNav;

impl BottomNav {
    /// Marks `view` as the active item.
    pub fn set_active_view(handle: &ComponentHandle, view: &str) {
        handle.set_state(json!({ "activeView": view }));
    }

    fn entries(props: &Props) -> Vec<NavEntry> {
        let items: Vec<NavEntry> = props
            .list("items")
            .iter()
            .filter_map(|item| NavEntry::deserialize(item).ok())
            .collect();
        if items.is_empty() { NavEntry::defaults() } else { items }
    }
}

impl Component for BottomNav {
    fn tag(&self) -> &'static str {
        "nav"
    }

    fn class_name(&self, _props: &Props, _state: &State) -> Option<String> {
        Some("bottom-nav".to_string())
    }

    fn initial_state(&self, props: &Props) -> State {
        let mut state = State::new();
        state.insert("activeView".into(), props.str_or("activeView", "home").into());
        state
    }

    fn template(&self, props: &Props, state: &State) -> String {
        let active = state.get("activeView").and_then(Value::as_str).unwrap_or("home");
        Self::entries(props)
            .iter()
            .map(|entry| {
                let class = ClassList::new("bottom-nav__item")
                    .with_if(entry.id == active, "bottom-nav__item--active")
                    .build();
                let badge = entry
                    .badge
                    .as_ref()
                    .filter(|b| truthy(b))
                    .map(|b| match b {
                        Value::String(s) => escape(s),
                        other => other.to_string(),
                    })
                    .map(|b| format!(r#"<span class="bottom-nav__badge">{b}</span>"#))
                    .unwrap_or_default();
                let id = escape(&entry.id);
                format!(
                    r#"<button class="{class}" data-view="{id}" id="nav-{id}">{}<span class="bottom-nav__label">{}</span>{badge}</button>"#,
                    svg_icon("bottom-nav__icon", icon_or(entry.icon.as_deref(), "home")),
                    escape(&entry.label),
                )
            })
            .collect()
    }

    fn on_mount(&mut self, cx: &mut Lifecycle<'_>) -> Result<(), ComponentError> {
        cx.on(Target::Root, "click", |this, event| {
            let document = this.document();
            let Some(item) = event
                .target()
                .and_then(|target| document.closest(target, ".bottom-nav__item").ok().flatten())
            else {
                return;
            };
            let Some(view) = document.attribute(item, "data-view") else {
                return;
            };

            Self::set_active_view(this, &view);
            if let Some(on_navigate) = this.callback("onNavigate") {
                on_navigate(&Value::String(view.clone()));
            }
            this.emit("navigate", json!({ "view": view }));
        });
        Ok(())
    }
}

impl ComponentDef for BottomNav {
    const NAME: &'static str = "BottomNav";
    const KIND: ComponentKind = ComponentKind::Organism;

    fn styles() -> String {
        r"
.bottom-nav {
    position: fixed;
    bottom: 0;
    left: 0;
    right: 0;
    display: grid;
    grid-template-columns: repeat(5, 1fr);
    padding: var(--spacing-xs) var(--spacing-sm) calc(var(--spacing-sm) + env(safe-area-inset-bottom));
    background: linear-gradient(to top, rgba(10, 10, 15, 0.98) 0%, rgba(10, 10, 15, 0.8) 100%);
    z-index: 100;
}
.bottom-nav__item {
    display: flex;
    flex-direction: column;
    align-items: center;
    gap: 2px;
    color: var(--color-text-tertiary);
    background: transparent;
    border: none;
    position: relative;
}
.bottom-nav__item--active { color: var(--color-cyan); }
.bottom-nav__icon { width: 22px; height: 22px; }
.bottom-nav__label { font-size: 0.5625rem; text-transform: uppercase; }
.bottom-nav__badge {
    position: absolute;
    top: 2px;
    right: 50%;
    min-width: 14px;
    height: 14px;
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
