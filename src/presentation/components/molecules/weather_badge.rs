use serde_json::Value;

use crate::domain::errors::ComponentError;
use crate::presentation::components::component::{
    Component, ComponentDef, ComponentKind, Lifecycle, Target,
};
use crate::presentation::components::icons::icon_or;
use crate::presentation::components::markup::{ClassList, svg_icon};
use crate::presentation::components::props::{Props, State};

/// Home Assistant weather condition to icon name.
const WEATHER_ICONS: &[(&str, &str)] = &[
    ("clear-night", "moon"),
    ("cloudy", "cloud"),
    ("fog", "fog"),
    ("hail", "cloud"),
    ("lightning", "lightning"),
    ("lightning-rainy", "lightning"),
    ("partlycloudy", "sun"),
    ("pouring", "rain"),
    ("rainy", "rain"),
    ("snowy", "snow"),
    ("snowy-rainy", "snow"),
    ("sunny", "sun"),
    ("windy", "cloud"),
    ("windy-variant", "cloud"),
    ("exceptional", "info"),
];

/// Maps a condition to its color class. Later rules override earlier ones.
fn condition_class(condition: &str) -> &'static str {
    let mut class = "sunny";
    if condition.contains("cloud") || condition.contains("fog") {
        class = "cloudy";
    }
    if condition.contains("rain") || condition.contains("pour") {
        class = "rainy";
    }
    if condition.contains("lightning") {
        class = "stormy";
    }
    if condition.contains("night") {
        class = "night";
    }
    class
}

/// Current temperature with a condition icon.
#[derive(Debug, Default)]
pub struct WeatherBadge;

impl Component for WeatherBadge {
    fn class_name(&self, props: &Props, _state: &State) -> Option<String> {
        Some(
            ClassList::new("weather-badge")
                .with(format!(
                    "weather-badge--{}",
                    condition_class(props.str_or("condition", "sunny"))
                ))
                .with_opt(props.str("className"))
                .build(),
        )
    }

    fn template(&self, props: &Props, _state: &State) -> String {
        let condition = props.str_or("condition", "sunny");
        let icon_name = WEATHER_ICONS
            .iter()
            .find(|(key, _)| *key == condition)
            .map(|(_, name)| *name);
        let temperature = props
            .f64("temperature")
            .filter(|t| t.is_finite())
            .map_or_else(|| "--°".to_string(), |t| format!("{}°", t.round()));

        format!(
            r#"{}<span class="weather-badge__temp">{temperature}</span>"#,
            svg_icon("weather-badge__icon", icon_or(icon_name, "sun")),
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
        Ok(())
    }
}

impl ComponentDef for WeatherBadge {
    const NAME: &'static str = "WeatherBadge";
    const KIND: ComponentKind = ComponentKind::Molecule;

    fn styles() -> String {
        r"
.weather-badge {
    display: flex;
    align-items: center;
    gap: var(--spacing-xs);
    padding: var(--spacing-xs) var(--spacing-md);
    background: var(--glass-bg);
    border: 1px solid var(--glass-border);
    border-radius: var(--radius-full);
    cursor: pointer;
}
.weather-badge__icon { width: 18px; height: 18px; color: var(--color-amber); }
.weather-badge__temp { font-size: var(--text-base); font-weight: var(--font-semibold); }
.weather-badge--sunny .weather-badge__icon { color: var(--color-amber); }
.weather-badge--cloudy .weather-badge__icon { color: var(--color-text-tertiary); }
.weather-badge--rainy .weather-badge__icon { color: var(--color-blue); }
.weather-badge--stormy .weather-badge__icon { color: var(--color-purple); }
.weather-badge--night .weather-badge__icon { color: var(--color-cyan); }
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
    use crate::presentation::components::icons::icon;
    use test_case::test_case;

    #[test_case("sunny", "sunny" ; "sunny")]
    #[test_case("partlycloudy", "cloudy" ; "partly_cloudy")]
    #[test_case("fog", "cloudy" ; "fog")]
    #[test_case("pouring", "rainy" ; "pouring")]
    #[test_case("lightning-rainy", "stormy" ; "lightning_overrides_rain")]
    #[test_case("clear-night", "night" ; "night")]
    fn test_condition_class(condition: &str, expected: &str) {
        assert_eq!(condition_class(condition), expected);
    }

    #[test]
    fn test_template() {
        let html = WeatherBadge.template(
            &Props::new().with("condition", "clear-night").with("temperature", 17.5),
            &State::new(),
        );
        assert!(html.contains(r#"<span class="weather-badge__temp">18°</span>"#));
        assert!(html.contains(icon("moon").unwrap()));

        let html = WeatherBadge.template(&Props::new().with("condition", "unknown"), &State::new());
        assert!(html.contains("--°"));
        assert!(html.contains(icon("sun").unwrap()));
    }
}
