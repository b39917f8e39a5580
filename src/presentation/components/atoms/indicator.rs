use crate::presentation::components::component::{Component, ComponentDef, ComponentKind};
use crate::presentation::components::markup::ClassList;
use crate::presentation::components::props::{Props, State};

const INDICATOR_STYLES: &str = r"
.indicator {
    display: inline-block;
    border-radius: 50%;
    flex-shrink: 0;
}
.indicator--xs { width: 6px; height: 6px; }
.indicator--sm { width: 8px; height: 8px; }
.indicator--md { width: 10px; height: 10px; }
.indicator--lg { width: 12px; height: 12px; }
.indicator--xl { width: 16px; height: 16px; }
.indicator--emerald { background: var(--color-emerald); box-shadow: 0 0 8px var(--color-emerald); }
.indicator--red { background: var(--color-red); box-shadow: 0 0 8px var(--color-red); }
.indicator--amber { background: var(--color-amber); box-shadow: 0 0 8px var(--color-amber); }
.indicator--blue { background: var(--color-blue); }
.indicator--muted { background: var(--color-text-muted); }
.indicator--pulse { animation: pulseDot 2s ease-in-out infinite; }
.indicator--ring { background: transparent; border: 2px solid currentColor; }
.indicator--ring.indicator--emerald { border-color: var(--color-emerald); }
.indicator--ring.indicator--red { border-color: var(--color-red); }
";

/// Status dot.
///
/// Props: `color` (default `emerald`), `size` (default `md`), `pulse`, `ring`.
#[derive(Debug, Default)]
pub struct Indicator;

impl Component for Indicator {
    fn tag(&self) -> &'static str {
        "span"
    }

    fn class_name(&self, props: &Props, _state: &State) -> Option<String> {
        Some(
            ClassList::new("indicator")
                .with(format!("indicator--{}", props.str_or("color", "emerald")))
                .with(format!("indicator--{}", props.str_or("size", "md")))
                .with_if(props.flag("pulse"), "indicator--pulse")
                .with_if(props.flag("ring"), "indicator--ring")
                .with_opt(props.str("className"))
                .build(),
        )
    }

    fn template(&self, _props: &Props, _state: &State) -> String {
        String::new()
    }
}

impl ComponentDef for Indicator {
    const NAME: &'static str = "Indicator";
    const KIND: ComponentKind = ComponentKind::Atom;

    fn styles() -> String {
        INDICATOR_STYLES.to_string()
    }

    fn create(_props: &Props) -> Self {
        Self
    }
}

/// Connection status dot.
///
/// `connected` wins over `connecting`; neither means disconnected.
#[derive(Debug, Default)]
pub struct ConnectionIndicator;

impl ConnectionIndicator {
    fn status(props: &Props) -> &'static str {
        if props.flag("connected") {
            "connected"
        } else if props.flag("connecting") {
            "connecting"
        } else {
            "disconnected"
        }
    }
}

impl Component for ConnectionIndicator {
    fn tag(&self) -> &'static str {
        "span"
    }

    fn class_name(&self, props: &Props, _state: &State) -> Option<String> {
        Some(
            ClassList::new("indicator")
                .with("connection-indicator")
                .with(format!("indicator--{}", props.str_or("size", "md")))
                .with(format!("connection-indicator--{}", Self::status(props)))
                .with_opt(props.str("className"))
                .build(),
        )
    }

    fn template(&self, _props: &Props, _state: &State) -> String {
        String::new()
    }
}

impl ComponentDef for ConnectionIndicator {
    const NAME: &'static str = "ConnectionIndicator";
    const KIND: ComponentKind = ComponentKind::Atom;

    fn styles() -> String {
        format!(
            "{INDICATOR_STYLES}{}",
            r"
.connection-indicator { transition: background var(--transition-normal); }
.connection-indicator--connected { background: var(--color-emerald); box-shadow: 0 0 8px var(--color-emerald); }
.connection-indicator--disconnected { background: var(--color-red); box-shadow: 0 0 8px var(--color-red); }
.connection-indicator--connecting { background: var(--color-amber); animation: pulseDot 1s ease-in-out infinite; }
"
        )
    }

    fn create(_props: &Props) -> Self {
        Self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn test_indicator_defaults() {
        let class = Indicator.class_name(&Props::new().with("ring", true), &State::new());
        assert_eq!(
            class.as_deref(),
            Some("indicator indicator--emerald indicator--md indicator--ring")
        );
    }

    #[test_case(Props::new().with("connected", true).with("connecting", true), "connected" ; "connected_wins")]
    #[test_case(Props::new().with("connecting", true), "connecting" ; "connecting")]
    #[test_case(Props::new(), "disconnected" ; "neither")]
    fn test_connection_status(props: Props, status: &str) {
        let class = ConnectionIndicator.class_name(&props, &State::new()).unwrap();
        assert_eq!(
            class,
            format!("indicator connection-indicator indicator--md connection-indicator--{status}")
        );
    }

    #[test]
    fn test_connection_styles_include_base() {
        let css = ConnectionIndicator::styles();
        assert!(css.starts_with(INDICATOR_STYLES));
        assert!(css.contains(".connection-indicator--connecting"));
    }
}
