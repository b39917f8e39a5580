use serde_json::{Value, json};

use crate::domain::dom::{Document, Event, NodeId};
use crate::domain::errors::ComponentError;
use crate::presentation::components::component::{
    Component, ComponentDef, ComponentHandle, ComponentKind, Lifecycle, Target,
};
use crate::presentation::components::icons::icon_or;
use crate::presentation::components::markup::{ClassList, escape, svg_icon};
use crate::presentation::components::props::{Props, State};

/// Room summary card with quick actions and scenes.
///
/// Emits `room-select {roomId}` for card clicks, `room-action {roomId, action}`
/// for the all-on/all-off buttons and `scene-activate {roomId, sceneId}` for
/// scene buttons. Button clicks do not reach ancestors.
#[derive(Debug, Default)]
pub struct RoomCard;

impl RoomCard {
    /// Updates the light counters of a mounted or unmounted card.
    pub fn update_lights(handle: &ComponentHandle, lights_on: u64, total_lights: u64) {
        handle.set_state(json!({ "lightsOn": lights_on, "totalLights": total_lights }));
    }

    fn lights_on(state: &State) -> u64 {
        state.get("lightsOn").and_then(Value::as_u64).unwrap_or(0)
    }

    fn scenes_html(scenes: &[Value]) -> String {
        if scenes.is_empty() {
            return String::new();
        }
        let buttons: String = scenes
            .iter()
            .map(|scene| {
                let id = scene.get("id").and_then(Value::as_str).unwrap_or_default();
                let name = scene.get("name").and_then(Value::as_str).unwrap_or(id);
                let class = ClassList::new("room-card__scene")
                    .with_if(
                        scene.get("active").and_then(Value::as_bool).unwrap_or(false),
                        "room-card__scene--active",
                    )
                    .build();
                format!(
                    r#"<button class="{class}" data-scene="{}">{}</button>"#,
                    escape(id),
                    escape(name)
                )
            })
            .collect();
        format!(r#"<div class="room-card__scenes">{buttons}</div>"#)
    }

    fn handle_click(this: &ComponentHandle, event: &Event) {
        let document = this.document();
        let Some(target) = event.target() else {
            return;
        };
        let props = this.props();
        let room_id = props.get("roomId").cloned().unwrap_or(Value::Null);

        if let Some(button) = closest(document, target, ".room-card__action") {
            event.stop_propagation();
            let action = document.attribute(button, "data-action").unwrap_or_default();
            let callback = match action.as_str() {
                "all-on" => props.callback("onAllOn"),
                "all-off" => props.callback("onAllOff"),
                _ => None,
            };
            if let Some(callback) = callback {
                callback(&room_id);
            }
            this.emit("room-action", json!({ "roomId": room_id, "action": action }));
            return;
        }

        if let Some(button) = closest(document, target, ".room-card__scene") {
            event.stop_propagation();
            let scene_id = document.attribute(button, "data-scene").unwrap_or_default();
            if let Some(callback) = props.callback("onSceneActivate") {
                callback(&Value::String(scene_id.clone()));
            }
            this.emit("scene-activate", json!({ "roomId": room_id, "sceneId": scene_id }));
            return;
        }

        if let Some(callback) = props.callback("onClick") {
            callback(&room_id);
        }
        this.emit("room-select", json!({ "roomId": room_id }));
    }
}

fn closest(document: &Document, node: NodeId, selector: &str) -> Option<NodeId> {
    document.closest(node, selector).ok().flatten()
}

impl Component for RoomCard {
    fn class_name(&self, props: &Props, state: &State) -> Option<String> {
        Some(
            ClassList::new("room-card")
                .with_if(Self::lights_on(state) > 0, "room-card--active")
                .with_opt(props.str("className"))
                .build(),
        )
    }

    fn initial_state(&self, props: &Props) -> State {
        let count = |key: &str| props.i64(key).and_then(|n| u64::try_from(n).ok()).unwrap_or(0);
        let mut state = State::new();
        state.insert("lightsOn".into(), count("lightsOn").into());
        state.insert("totalLights".into(), count("totalLights").into());
        state
    }

    fn template(&self, props: &Props, state: &State) -> String {
        let lights_on = Self::lights_on(state);
        let status = match lights_on {
            0 => "All off".to_string(),
            1 => "1 light on".to_string(),
            n => format!("{n} lights on"),
        };
        let background = props
            .str("backgroundImage")
            .filter(|url| !url.is_empty())
            .map(|url| {
                format!(
                    r#"<div class="room-card__bg" style="background-image: url('{}')"></div>"#,
                    escape(url)
                )
            })
            .unwrap_or_default();
        let show_actions = props.get("showActions").is_none_or(|v| v.as_bool().unwrap_or(true));
        let actions = if show_actions {
            format!(
                r#"<div class="room-card__actions"><button class="room-card__action" data-action="all-on">{}All On</button><button class="room-card__action" data-action="all-off">{}All Off</button></div>"#,
                svg_icon("", icon_or(Some("lightbulb"), "home")),
                svg_icon("", icon_or(Some("close"), "home")),
            )
        } else {
            String::new()
        };

        format!(
            r#"{background}<div class="room-card__content"><div class="room-card__header"><div class="room-card__icon">{}</div><div class="room-card__info"><div class="room-card__name">{}</div><div class="room-card__status">{status}</div></div></div>{actions}{}</div>"#,
            svg_icon("", icon_or(props.str("icon"), "home")),
            escape(props.str("name").unwrap_or_default()),
            Self::scenes_html(props.list("scenes")),
        )
    }

    fn on_mount(&mut self, cx: &mut Lifecycle<'_>) -> Result<(), ComponentError> {
        cx.on(Target::Root, "click", Self::handle_click);

        let room_id = cx.props().str("roomId").map(str::to_string);
        if let Some(room_id) = room_id {
            cx.set_attribute("data-room-id", &room_id);
        }
        Ok(())
    }
}

impl ComponentDef for RoomCard {
    const NAME: &'static str = "RoomCard";
    const KIND: ComponentKind = ComponentKind::Organism;

    fn styles() -> String {
        r"
.room-card {
    position: relative;
    overflow: hidden;
    padding: var(--spacing-lg);
    background: var(--glass-bg);
    border: 1px solid var(--glass-border);
    border-radius: var(--radius-xl);
    cursor: pointer;
}
.room-card--active { border-color: rgba(245, 158, 11, 0.4); }
.room-card__bg { position: absolute; inset: 0; background-size: cover; opacity: 0.25; }
.room-card__content { position: relative; display: flex; flex-direction: column; gap: var(--spacing-md); }
.room-card__header { display: flex; align-items: center; gap: var(--spacing-md); }
.room-card__icon { width: 40px; height: 40px; color: var(--color-text-secondary); }
.room-card--active .room-card__icon { color: var(--color-amber); }
.room-card__name { font-weight: var(--font-semibold); }
.room-card__status { font-size: var(--text-xs); color: var(--color-text-tertiary); }
.room-card__actions { display: flex; gap: var(--spacing-sm); }
.room-card__action { flex: 1; display: flex; align-items: center; gap: var(--spacing-xs); }
.room-card__scenes { display: flex; flex-wrap: wrap; gap: var(--spacing-xs); }
.room-card__scene--active { background: var(--color-purple); color: white; }
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
    use parking_lot::Mutex;
    use std::sync::Arc;

    fn recorder(document: &Document, events: &[&str]) -> Arc<Mutex<Vec<(String, Value)>>> {
        let log = Arc::new(Mutex::new(Vec::new()));
        for name in events {
            let sink = Arc::clone(&log);
            document.add_listener(
                document.root(),
                name,
                Arc::new(move |event: &Event| {
                    sink.lock().push((event.event_type().to_string(), event.detail().clone()));
                }),
            );
        }
        log
    }

    fn kitchen(document: &Document) -> ComponentHandle {
        let handle = ComponentHandle::new::<RoomCard>(
            document,
            Props::from_value(json!({
                "roomId": "kitchen",
                "name": "Kitchen",
                "lightsOn": 2,
                "totalLights": 4,
                "scenes": [
                    { "id": "scene.cooking", "name": "Cooking", "active": true },
                    { "id": "scene.dinner", "name": "Dinner" },
                ],
            })),
        );
        handle.mount(document.body()).unwrap();
        handle
    }

    #[test]
    fn test_accented_room_name_renders() {
        let document = Document::new();
        let handle = ComponentHandle::new::<RoomCard>(
            &document,
            Props::from_value(json!({ "roomId": "attic", "name": "Ático", "totalLights": 1 })),
        );

        let element = handle.mount(document.body()).unwrap();

        assert!(document.text_content(element).contains("Ático"));
    }

    #[test]
    fn test_status_text_and_active_class() {
        let document = Document::new();
        let card = kitchen(&document);
        let element = card.element().unwrap();

        assert!(document.has_class(element, "room-card--active"));
        let status = card.query(".room-card__status").unwrap();
        assert_eq!(document.text_content(status), "2 lights on");

        RoomCard::update_lights(&card, 1, 4);
        let status = card.query(".room-card__status").unwrap();
        assert_eq!(document.text_content(status), "1 light on");

        RoomCard::update_lights(&card, 0, 4);
        assert!(!document.has_class(element, "room-card--active"));
        let status = card.query(".room-card__status").unwrap();
        assert_eq!(document.text_content(status), "All off");
    }

    #[test]
    fn test_action_button_emits_room_action_only() {
        let document = Document::new();
        let log = recorder(&document, &["room-action", "room-select"]);
        let card = kitchen(&document);

        let all_off = card.query(r#"[data-action="all-off"]"#).unwrap();
        document.dispatch_event(all_off, &Event::click());

        assert_eq!(
            *log.lock(),
            vec![(
                "room-action".to_string(),
                json!({ "roomId": "kitchen", "action": "all-off" })
            )]
        );
    }

    #[test]
    fn test_scene_and_card_clicks() {
        let document = Document::new();
        let log = recorder(&document, &["scene-activate", "room-select"]);
        let card = kitchen(&document);

        let scene = card.query(r#"[data-scene="scene.dinner"]"#).unwrap();
        document.dispatch_event(scene, &Event::click());
        let name = card.query(".room-card__name").unwrap();
        document.dispatch_event(name, &Event::click());

        assert_eq!(
            *log.lock(),
            vec![
                (
                    "scene-activate".to_string(),
                    json!({ "roomId": "kitchen", "sceneId": "scene.dinner" })
                ),
                ("room-select".to_string(), json!({ "roomId": "kitchen" })),
            ]
        );
        assert_eq!(card.query_all(".room-card__scene--active").len(), 1);
    }

    #[test]
    fn test_listeners_survive_rerender() {
        let document = Document::new();
        let log = recorder(&document, &["room-action"]);
        let card = kitchen(&document);

        RoomCard::update_lights(&card, 3, 4);
        let all_on = card.query(r#"[data-action="all-on"]"#).unwrap();
        document.dispatch_event(all_on, &Event::click());

        assert_eq!(log.lock().len(), 1);
        assert_eq!(card.listener_count(), 1);
    }

    #[test]
    fn test_hidden_actions() {
        let html = RoomCard.template(&Props::new().with("showActions", false), &State::new());
        assert!(!html.contains("room-card__actions"));
        assert!(html.contains("All off"));
    }
}
