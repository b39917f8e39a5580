use crate::presentation::components::component::{Component, ComponentDef, ComponentKind};
use crate::presentation::components::icons::icon;
use crate::presentation::components::markup::{ClassList, svg_icon};
use crate::presentation::components::props::{Props, State};

/// Standalone icon.
///
/// Props: `name`, `size` (`sm`, `md`, `lg`), `className`.
#[derive(Debug, Default)]
pub struct Icon;

impl Component for Icon {
    fn tag(&self) -> &'static str {
        "span"
    }

    fn class_name(&self, props: &Props, _state: &State) -> Option<String> {
        Some(
            ClassList::new("icon")
                .with(format!("icon--{}", props.str_or("size", "md")))
                .with_opt(props.str("className"))
                .build(),
        )
    }

    fn template(&self, props: &Props, _state: &State) -> String {
        props
            .str("name")
            .and_then(icon)
            .map(|path| svg_icon("icon__svg", path))
            .unwrap_or_default()
    }
}

impl ComponentDef for Icon {
    const NAME: &'static str = "Icon";
    const KIND: ComponentKind = ComponentKind::Atom;

    fn styles() -> String {
        r"
.icon { display: inline-flex; align-items: center; justify-content: center; }
.icon--sm .icon__svg { width: 14px; height: 14px; }
.icon--md .icon__svg { width: 20px; height: 20px; }
.icon--lg .icon__svg { width: 28px; height: 28px; }
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

    #[test]
    fn test_unknown_icon_renders_empty() {
        let document = Document::new();
        let handle = ComponentHandle::new::<Icon>(&document, Props::new().with("name", "nope"));

        handle.render();

        assert_eq!(handle.html(), r#"<span data-component="Icon" class="icon icon--md"></span>"#);
    }

    #[test]
    fn test_known_icon_renders_svg() {
        let document = Document::new();
        let handle = ComponentHandle::new::<Icon>(
            &document,
            Props::new().with("name", "shield").with("size", "lg"),
        );

        handle.render();

        assert!(handle.query("svg.icon__svg path").is_some());
        assert!(handle.html().contains("icon--lg"));
    }
}
