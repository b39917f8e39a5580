use crate::presentation::components::component::{Component, ComponentDef, ComponentKind};
use crate::presentation::components::markup::{ClassList, escape};
use crate::presentation::components::props::{Props, State};

/// Status badge with color variants.
#[derive(Debug, Default)]
pub struct Badge;

impl Component for Badge {
    fn tag(&self) -> &'static str {
        "span"
    }

    fn class_name(&self, props: &Props, _state: &State) -> Option<String> {
        let size = props.str_or("size", "md");
        Some(
            ClassList::new("badge")
                .with(format!("badge--{}", props.str_or("color", "default")))
                .with_if(size != "md", format!("badge--{size}"))
                .with_if(props.flag("pill"), "badge--pill")
                .with_if(props.flag("pulse"), "badge--pulse")
                .with_opt(props.str("className"))
                .build(),
        )
    }

    fn template(&self, props: &Props, _state: &State) -> String {
        let dot = if props.flag("dot") {
            r#"<span class="badge__dot"></span>"#
        } else {
            ""
        };
        format!("{dot}{}", escape(props.str("text").unwrap_or_default()))
    }
}

impl ComponentDef for Badge {
    const NAME: &'static str = "Badge";
    const KIND: ComponentKind = ComponentKind::Atom;

    fn styles() -> String {
        r"
.badge {
    display: inline-flex;
    align-items: center;
    gap: var(--spacing-xs);
    padding: 2px 8px;
    border-radius: var(--radius-sm);
    font-size: var(--text-xs);
    font-weight: var(--font-semibold);
    text-transform: uppercase;
    letter-spacing: 0.05em;
}
.badge--default { background: var(--glass-bg); color: var(--color-text-secondary); }
.badge--amber { background: rgba(245, 158, 11, 0.2); color: var(--color-amber); }
.badge--emerald { background: rgba(16, 185, 129, 0.2); color: var(--color-emerald); }
.badge--red { background: rgba(239, 68, 68, 0.2); color: var(--color-red); }
.badge--blue { background: rgba(59, 130, 246, 0.2); color: var(--color-blue); }
.badge--purple { background: rgba(168, 85, 247, 0.2); color: var(--color-purple); }
.badge--sm { padding: 1px 6px; font-size: 0.625rem; }
.badge--lg { padding: 4px 12px; font-size: var(--text-sm); }
.badge--pill { border-radius: var(--radius-full); padding: 2px 10px; }
.badge__dot { width: 6px; height: 6px; border-radius: 50%; background: currentColor; }
.badge--pulse .badge__dot { animation: pulseDot 2s ease-in-out infinite; }
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
    use crate::domain::dom::Document;
    use crate::presentation::components::ComponentHandle;
    use test_case::test_case;

    #[test_case(Props::new(), "badge badge--default" ; "defaults")]
    #[test_case(Props::new().with("color", "red").with("size", "md"), "badge badge--red" ; "md_size_omitted")]
    #[test_case(Props::new().with("size", "sm").with("pill", true).with("pulse", 1), "badge badge--default badge--sm badge--pill badge--pulse" ; "modifiers")]
    fn test_class_name(props: Props, expected: &str) {
        assert_eq!(Badge.class_name(&props, &State::new()).as_deref(), Some(expected));
    }

    #[test]
    fn test_dot_and_escaped_text() {
        let document = Document::new();
        let badge = ComponentHandle::new::<Badge>(
            &document,
            Props::new().with("text", "<armed>").with("dot", true),
        );
        let element = badge.render();

        assert_eq!(
            document.inner_html(element),
            r#"<span class="badge__dot"></span>&lt;armed&gt;"#
        );
    }
}
