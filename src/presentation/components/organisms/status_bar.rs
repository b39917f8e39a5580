use std::time::Duration;

use chrono::Local;
use serde_json::{Value, json};

use crate::domain::dom::{Document, NodeId};
use crate::domain::errors::ComponentError;
use crate::presentation::components::component::{
    Component, ComponentDef, ComponentKind, Lifecycle, Target, TimerId,
};
use crate::presentation::components::icons::icon_or;
use crate::presentation::components::markup::{ClassList, svg_icon};
use crate::presentation::components::props::{Props, State};

const CLOCK_PERIOD: Duration = Duration::from_secs(60);

/// Top bar with clock, weather, connection dot and status pills.
///
/// Clicking a `data-action` element emits `status-action {action}` and stops
/// the click there. The clock re-renders every minute while mounted.
#[derive(Debug, Default)]
pub struct StatusBar {
    clock: Option<TimerId>,
}

impl StatusBar {
    fn clock_state() -> Value {
        let now = Local::now();
        json!({
            "time": now.format("%H:%M").to_string(),
            "date": now.format("%a, %b %-d").to_string(),
        })
    }

    /// Compact power readout: `1.5k` from 1000 W, whole watts below.
    #[must_use]
    pub fn format_power(watts: Option<f64>) -> String {
        match watts.filter(|w| w.is_finite()) {
            None => "--".to_string(),
            Some(w) if w.abs() >= 1000.0 => format!("{:.1}k", w / 1000.0),
            Some(w) => format!("{}", w.round()),
        }
    }

    fn pill(kind: &str, modifier: &str, action: &str, icon: &str, value: &str, label: &str) -> String {
        let class = ClassList::new("status-pill")
            .with(format!("status-pill--{kind}"))
            .with(modifier)
            .build();
        format!(
            r#"<div class="{class}" data-action="{action}">{}<span class="status-pill__value">{value}</span><span class="status-pill__label">{label}</span></div>"#,
            svg_icon("status-pill__icon", icon_or(Some(icon), "info")),
        )
    }
}

impl Component for StatusBar {
    fn initial_state(&self, _props: &Props) -> State {
        match Self::clock_state() {
            Value::Object(state) => state,
            _ => State::new(),
        }
    }

    fn template(&self, props: &Props, state: &State) -> String {
        let time = state.get("time").and_then(Value::as_str).unwrap_or("--:--");
        let date = state.get("date").and_then(Value::as_str).unwrap_or_default();
        let temperature = props.f64("temperature").filter(|t| t.is_finite()).map(f64::round);
        let lights_on = props.i64("lightsOn").unwrap_or(0);
        let armed = props.str_or("alarmState", "disarmed") != "disarmed";
        let indicator = if props.flag("connected") {
            "indicator--emerald"
        } else {
            "indicator--red indicator--pulse"
        };

        let show_pills = props.get("showPills").is_none_or(|v| v.as_bool().unwrap_or(true));
        let pills = if show_pills {
            [
                Self::pill(
                    "lights",
                    if lights_on > 0 { "status-pill--active" } else { "" },
                    "showAllLights",
                    "lightbulb",
                    &lights_on.to_string(),
                    "Lights",
                ),
                Self::pill(
                    "security",
                    if armed { "status-pill--armed" } else { "status-pill--disarmed" },
                    "showSecurity",
                    "shield",
                    if armed { "On" } else { "Off" },
                    "Alarm",
                ),
                Self::pill(
                    "power",
                    "",
                    "showEnergy",
                    "power",
                    &Self::format_power(props.f64("power").or(Some(0.0))),
                    "Power",
                ),
                Self::pill(
                    "temperature",
                    "",
                    "showWeather",
                    "sun",
                    &temperature.map_or_else(|| "--".to_string(), |t| format!("{t}°")),
                    "Outside",
                ),
            ]
            .concat()
        } else {
            String::new()
        };
        let pills = if pills.is_empty() {
            pills
        } else {
            format!(r#"<div class="status-bar__pills">{pills}</div>"#)
        };

        format!(
            r#"<div class="status-bar__top"><div class="status-bar__time-wrapper"><div class="status-bar__time">{time}</div><div class="status-bar__date">{date}</div></div><div class="status-bar__right"><div class="weather-badge" data-action="showWeather">{}<span class="weather-badge__temp">{}</span></div><span class="indicator indicator--md {indicator}"></span></div></div>{pills}"#,
            svg_icon("weather-badge__icon", icon_or(Some("sun"), "info")),
            temperature.map_or_else(|| "--°".to_string(), |t| format!("{t}°")),
        )
    }

    fn on_mount(&mut self, cx: &mut Lifecycle<'_>) -> Result<(), ComponentError> {
        self.clock = cx.set_interval(CLOCK_PERIOD, |this| this.set_state(Self::clock_state()));

        cx.on(Target::Root, "click", |this, event| {
            let document = this.document();
            let Some(target) = event.target() else {
                return;
            };
            let Some(element) = document.closest(target, "[data-action]").ok().flatten() else {
                return;
            };
            if !this.element().is_some_and(|root| is_within(document, element, root)) {
                return;
            }
            let Some(action) = document.attribute(element, "data-action") else {
                return;
            };
            event.stop_propagation();
            this.emit("status-action", json!({ "action": action }));
        });
        Ok(())
    }

    fn on_unmount(&mut self, cx: &mut Lifecycle<'_>) -> Result<(), ComponentError> {
        if let Some(clock) = self.clock.take() {
            cx.clear_interval(clock);
        }
        Ok(())
    }
}

fn is_within(document: &Document, node: NodeId, ancestor: NodeId) -> bool {
    let mut current = Some(node);
    while let Some(id) = current {
        if id == ancestor {
            return true;
        }
        current = document.parent(id);
    }
    false
}

impl ComponentDef for StatusBar {
    const NAME: &'static str = "StatusBar";
    const KIND: ComponentKind = ComponentKind::Organism;

    fn styles() -> String {
        r"
.status-bar {
    display: flex;
    flex-direction: column;
    gap: var(--spacing-sm);
    padding: var(--spacing-md) var(--spacing-lg);
}
.status-bar__top { display: flex; align-items: center; justify-content: space-between; }
.status-bar__time { font-size: 2rem; font-weight: var(--font-bold); line-height: 1; }
.status-bar__date { font-size: var(--text-sm); color: var(--color-text-tertiary); }
.status-bar__right { display: flex; align-items: center; gap: var(--spacing-md); }
.status-bar__pills { display: flex; gap: var(--spacing-xs); overflow-x: auto; }
"
        .to_string()
    }

    fn create(_props: &Props) -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::dom::Event;
    use crate::presentation::components::ComponentHandle;
    use parking_lot::Mutex;
    use std::sync::Arc;
    use test_case::test_case;

    #[test_case(None, "--" ; "missing")]
    #[test_case(Some(450.4), "450" ; "watts")]
    #[test_case(Some(1234.0), "1.2k" ; "kilowatts")]
    fn test_format_power(watts: Option<f64>, expected: &str) {
        assert_eq!(StatusBar::format_power(watts), expected);
    }

    #[test]
    fn test_pills_reflect_props() {
        let props = Props::from_value(json!({
            "lightsOn": 3,
            "alarmState": "armed_away",
            "power": 1500,
            "temperature": 12.4,
            "connected": true,
        }));
        let html = StatusBar::default().template(&props, &State::new());

        assert!(html.contains("status-pill--lights status-pill--active"));
        assert!(html.contains("status-pill--security status-pill--armed"));
        assert!(html.contains(r#"<span class="status-pill__value">1.5k</span>"#));
        assert!(html.contains(r#"<span class="weather-badge__temp">12°</span>"#));
        assert!(html.contains("indicator--emerald"));
    }

    #[test]
    fn test_render_is_idempotent() {
        let document = Document::new();
        let bar = ComponentHandle::new::<StatusBar>(&document, Props::new().with("lightsOn", 1));

        let element = bar.render();
        let first = document.outer_html(element);
        bar.render();

        assert_eq!(first, bar.html());
    }

    #[tokio::test]
    async fn test_pill_click_emits_status_action_and_stops() {
        let document = Document::new();
        let actions = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&actions);
        document.add_listener(
            document.root(),
            "status-action",
            Arc::new(move |event: &Event| sink.lock().push(event.detail()["action"].clone())),
        );
        let clicks_at_root = Arc::new(Mutex::new(0));
        let counter = Arc::clone(&clicks_at_root);
        document.add_listener(
            document.root(),
            "click",
            Arc::new(move |_: &Event| *counter.lock() += 1),
        );
        let bar = ComponentHandle::new::<StatusBar>(&document, Props::new());
        bar.mount(document.body()).unwrap();

        let security = bar.query(r#"[data-action="showSecurity"] .status-pill__value"#).unwrap();
        document.dispatch_event(security, &Event::click());
        let time = bar.query(".status-bar__time").unwrap();
        document.dispatch_event(time, &Event::click());

        assert_eq!(*actions.lock(), vec![json!("showSecurity")]);
        assert_eq!(*clicks_at_root.lock(), 1);
        bar.unmount();
    }

    #[tokio::test]
    async fn test_clock_timer_is_cleared_on_unmount() {
        let document = Document::new();
        let bar = ComponentHandle::new::<StatusBar>(&document, Props::new());
        bar.mount(document.body()).unwrap();
        assert_eq!(bar.timer_count(), 1);

        bar.unmount();

        assert_eq!(bar.timer_count(), 0);
        assert!(!bar.is_mounted());
        assert_eq!(document.total_listeners(), 0);
    }
}
