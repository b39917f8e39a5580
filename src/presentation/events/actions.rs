//! `data-action` click delegation.
//!
//! Markup declares intent with `data-action="name"` plus optional `data-*`
//! parameters. One click listener at the document root resolves the closest
//! action element and calls the handler registered for it.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use parking_lot::RwLock;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::domain::dom::{Document, Event, ListenerId, NodeId};
use crate::domain::entities::ViewId;
use crate::domain::errors::ActionError;

/// Known `data-action` identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum Action {
    ShowView,
    ShowHome,
    ShowAllLights,
    ShowSecurity,
    ShowEnergy,
    ShowWeather,
    ShowCameras,
    ShowCalendar,
    OpenRoom,
    CloseModal,
}

impl Action {
    /// Every action.
    pub const ALL: [Self; 10] = [
        Self::ShowView,
        Self::ShowHome,
        Self::ShowAllLights,
        Self::ShowSecurity,
        Self::ShowEnergy,
        Self::ShowWeather,
        Self::ShowCameras,
        Self::ShowCalendar,
        Self::OpenRoom,
        Self::CloseModal,
    ];

    /// Returns the attribute value naming this action.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ShowView => "showView",
            Self::ShowHome => "showHome",
            Self::ShowAllLights => "showAllLights",
            Self::ShowSecurity => "showSecurity",
            Self::ShowEnergy => "showEnergy",
            Self::ShowWeather => "showWeather",
            Self::ShowCameras => "showCameras",
            Self::ShowCalendar => "showCalendar",
            Self::OpenRoom => "openRoom",
            Self::CloseModal => "closeModal",
        }
    }

    /// Returns the view a navigation action leads to.
    #[must_use]
    pub const fn target_view(self) -> Option<ViewId> {
        match self {
            Self::ShowHome => Some(ViewId::Home),
            Self::ShowSecurity => Some(ViewId::Security),
            Self::ShowEnergy => Some(ViewId::Energy),
            Self::ShowWeather => Some(ViewId::Weather),
            Self::ShowCameras => Some(ViewId::Cameras),
            Self::ShowCalendar => Some(ViewId::Calendar),
            Self::ShowView | Self::ShowAllLights | Self::OpenRoom | Self::CloseModal => None,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = ActionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|action| action.as_str() == s)
            .ok_or_else(|| ActionError::unknown(s))
    }
}

/// What a handler receives.
#[derive(Debug, Clone)]
pub struct ActionContext {
    /// Triggered action.
    pub action: Action,
    /// Element carrying `data-action`.
    pub element: NodeId,
    /// Parsed `data-*` parameters.
    pub params: Map<String, Value>,
}

impl ActionContext {
    /// Returns a string parameter.
    #[must_use]
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).and_then(Value::as_str)
    }
}

/// Registered action handler.
pub type ActionHandler = Arc<dyn Fn(&ActionContext) + Send + Sync>;

/// Action to handler table.
#[derive(Default)]
pub struct ActionRegistry {
    handlers: RwLock<HashMap<Action, ActionHandler>>,
}

impl fmt::Debug for ActionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionRegistry")
            .field("actions", &self.handlers.read().keys().collect::<Vec<_>>())
            .finish()
    }
}

impl ActionRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers or replaces the handler of `action`.
    pub fn register<F>(&self, action: Action, handler: F)
    where
        F: Fn(&ActionContext) + Send + Sync + 'static,
    {
        if self.handlers.write().insert(action, Arc::new(handler)).is_some() {
            debug!(action = %action, "Action handler replaced");
        }
    }

    /// Registers a handler by attribute name.
    ///
    /// # Errors
    /// Returns error if the name is not a known action.
    pub fn register_named<F>(&self, name: &str, handler: F) -> Result<Action, ActionError>
    where
        F: Fn(&ActionContext) + Send + Sync + 'static,
    {
        let action = name.parse()?;
        self.register(action, handler);
        Ok(action)
    }

    /// Returns whether `action` has a handler.
    #[must_use]
    pub fn is_registered(&self, action: Action) -> bool {
        self.handlers.read().contains_key(&action)
    }

    /// Invokes the handler for `action`. Returns false when none is registered.
    pub fn trigger(&self, context: &ActionContext) -> bool {
        let handler = self.handlers.read().get(&context.action).cloned();
        match handler {
            Some(handler) => {
                debug!(action = %context.action, params = ?context.params, "Action triggered");
                handler(context);
                true
            }
            None => false,
        }
    }

    /// Attaches the delegating click listener to the document root.
    pub fn install(self: &Arc<Self>, document: &Document) -> Option<ListenerId> {
        let registry = Arc::downgrade(self);
        let weak_document = document.downgrade();
        document.add_listener(
            document.root(),
            "click",
            Arc::new(move |event: &Event| {
                if let (Some(registry), Some(document)) = (registry.upgrade(), weak_document.upgrade()) {
                    registry.handle_click(&document, event);
                }
            }),
        )
    }

    fn handle_click(&self, document: &Document, event: &Event) {
        let Some(target) = event.target() else {
            return;
        };
        let Some(element) = document.closest(target, "[data-action]").ok().flatten() else {
            return;
        };
        let name = document.attribute(element, "data-action").unwrap_or_default();

        let Ok(action) = name.parse::<Action>() else {
            warn!(action = %name, "No handler registered for action");
            return;
        };
        let context = ActionContext {
            action,
            element,
            params: parse_params(&document.attributes(element)),
        };
        if self.trigger(&context) {
            event.prevent_default();
            event.stop_propagation();
        } else {
            warn!(action = %name, "No handler registered for action");
        }
    }
}

/// Collects `data-*` attributes other than `data-action` as parameters.
///
/// `data-param-room` becomes `room`; other names are camel-cased
/// (`data-entity-id` becomes `entityId`).
#[must_use]
pub fn parse_params(attributes: &[(String, String)]) -> Map<String, Value> {
    attributes
        .iter()
        .filter_map(|(name, value)| {
            let key = name.strip_prefix("data-")?;
            if matches!(key, "action" | "change-action" | "context-action") {
                return None;
            }
            let key = match key.strip_prefix("param-") {
                Some(param) => param.replace('-', "").to_lowercase(),
                None => camel_case(key),
            };
            Some((key, parse_value(value)))
        })
        .collect()
}

fn camel_case(kebab: &str) -> String {
    let mut out = String::with_capacity(kebab.len());
    let mut upper = false;
    for c in kebab.chars() {
        if c == '-' {
            upper = true;
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}

/// Interprets an attribute value as bool, number, JSON or string.
#[must_use]
pub fn parse_value(value: &str) -> Value {
    match value {
        "true" => return Value::Bool(true),
        "false" => return Value::Bool(false),
        _ => {}
    }
    if let Ok(number) = value.trim().parse::<f64>()
        && !value.trim().is_empty()
        && let Some(number) = serde_json::Number::from_f64(number)
    {
        return Value::Number(number);
    }
    let looks_like_json = (value.starts_with('{') && value.ends_with('}'))
        || (value.starts_with('[') && value.ends_with(']'));
    if looks_like_json && let Ok(parsed) = serde_json::from_str(value) {
        return parsed;
    }
    Value::String(value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use serde_json::json;
    use test_case::test_case;

    fn document_with(html: &str) -> Document {
        let document = Document::new();
        document.append_html(document.body(), html);
        document
    }

    fn recording(registry: &ActionRegistry, action: Action) -> Arc<Mutex<Vec<ActionContext>>> {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&calls);
        registry.register(action, move |context| sink.lock().push(context.clone()));
        calls
    }

    #[test_case("showHome", Action::ShowHome ; "show home")]
    #[test_case("openRoom", Action::OpenRoom ; "open room")]
    #[test_case("closeModal", Action::CloseModal ; "close modal")]
    fn test_parse_action(name: &str, expected: Action) {
        assert_eq!(name.parse::<Action>().unwrap(), expected);
        assert_eq!(expected.as_str(), name);
    }

    #[test]
    fn test_unknown_action_is_error() {
        let registry = ActionRegistry::new();

        let err = registry.register_named("launchRocket", |_| {}).unwrap_err();

        assert_eq!(err, ActionError::unknown("launchRocket"));
        assert!(Action::ALL.iter().all(|a| !registry.is_registered(*a)));
    }

    #[test]
    fn test_target_views() {
        assert_eq!(Action::ShowSecurity.target_view(), Some(ViewId::Security));
        assert_eq!(Action::ShowHome.target_view(), Some(ViewId::Home));
        assert_eq!(Action::OpenRoom.target_view(), None);
    }

    #[test_case("true", json!(true) ; "bool")]
    #[test_case("42", json!(42.0) ; "integer")]
    #[test_case("2.5", json!(2.5) ; "float")]
    #[test_case(r#"{"a":1}"#, json!({"a": 1}) ; "object")]
    #[test_case("[1,2]", json!([1, 2]) ; "array")]
    #[test_case("[broken", json!("[broken") ; "not json")]
    #[test_case("kitchen", json!("kitchen") ; "plain string")]
    #[test_case("", json!("") ; "empty")]
    fn test_parse_value(raw: &str, expected: Value) {
        assert_eq!(parse_value(raw), expected);
    }

    #[test]
    fn test_parse_params_names() {
        let attributes = vec![
            ("data-action".to_string(), "openRoom".to_string()),
            ("data-param-room".to_string(), "kitchen".to_string()),
            ("data-entity-id".to_string(), "light.kitchen".to_string()),
            ("data-context-action".to_string(), "menu".to_string()),
            ("class".to_string(), "pill".to_string()),
        ];

        let params = parse_params(&attributes);

        assert_eq!(params.len(), 2);
        assert_eq!(params["room"], "kitchen");
        assert_eq!(params["entityId"], "light.kitchen");
    }

    #[test]
    fn test_click_on_descendant_dispatches_action() {
        let document = document_with(
            r#"<div data-action="openRoom" data-param-room="kitchen"><span id="inner">Kitchen</span></div>"#,
        );
        let registry = Arc::new(ActionRegistry::new());
        let calls = recording(&registry, Action::OpenRoom);
        registry.install(&document).unwrap();

        let event = Event::click();
        let inner = document.get_element_by_id("inner").unwrap();
        document.dispatch_event(inner, &event);

        let calls = calls.lock();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].param("room"), Some("kitchen"));
        assert_eq!(document.tag_name(calls[0].element).as_deref(), Some("div"));
        assert!(event.default_prevented());
    }

    #[test]
    fn test_unhandled_action_is_ignored() {
        let document = document_with(r#"<button id="b" data-action="showEnergy">Energy</button>"#);
        let registry = Arc::new(ActionRegistry::new());
        registry.install(&document).unwrap();

        let event = Event::click();
        document.dispatch_event(document.get_element_by_id("b").unwrap(), &event);

        assert!(!event.default_prevented());
    }

    #[test]
    fn test_click_outside_action_does_nothing() {
        let document = document_with(r#"<p id="text">hello</p>"#);
        let registry = Arc::new(ActionRegistry::new());
        let calls = recording(&registry, Action::ShowHome);
        registry.install(&document).unwrap();

        document.dispatch_event(document.get_element_by_id("text").unwrap(), &Event::click());

        assert!(calls.lock().is_empty());
    }

    #[test]
    fn test_dropped_registry_leaves_listener_inert() {
        let document = document_with(r#"<button id="b" data-action="showHome">Home</button>"#);
        let registry = Arc::new(ActionRegistry::new());
        let calls = recording(&registry, Action::ShowHome);
        registry.install(&document).unwrap();
        drop(registry);

        document.dispatch_event(document.get_element_by_id("b").unwrap(), &Event::click());

        assert!(calls.lock().is_empty());
    }
}
