//! Component props and state.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde_json::{Map, Value};

/// Owner-supplied callback prop, invoked with a JSON argument.
pub type Callback = Arc<dyn Fn(&Value) + Send + Sync>;

/// Internal component state: a JSON object.
pub type State = Map<String, Value>;

/// Read-only input of a component: JSON values plus named callbacks.
#[derive(Clone, Default)]
pub struct Props {
    values: Map<String, Value>,
    callbacks: BTreeMap<String, Callback>,
}

impl fmt::Debug for Props {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Props")
            .field("values", &self.values)
            .field("callbacks", &self.callbacks.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl From<Map<String, Value>> for Props {
    fn from(values: Map<String, Value>) -> Self {
        Self {
            values,
            callbacks: BTreeMap::new(),
        }
    }
}

impl Props {
    /// Creates empty props.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates props from a JSON object. Any other value yields empty props.
    #[must_use]
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(values) => values.into(),
            _ => Self::new(),
        }
    }

    /// Sets a value prop.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Sets a callback prop.
    #[must_use]
    pub fn with_callback<F>(mut self, key: impl Into<String>, callback: F) -> Self
    where
        F: Fn(&Value) + Send + Sync + 'static,
    {
        self.callbacks.insert(key.into(), Arc::new(callback));
        self
    }

    /// Sets a value prop in place.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(key.into(), value.into());
    }

    /// Shallow-merges `other` into these props; keys in `other` win.
    pub fn merge(&mut self, other: Self) {
        self.values.extend(other.values);
        self.callbacks.extend(other.callbacks);
    }

    /// Returns the raw value of a prop.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// Returns a string prop.
    #[must_use]
    pub fn str(&self, key: &str) -> Option<&str> {
        self.values.get(key).and_then(Value::as_str)
    }

    /// Returns a string prop or `default` when absent or empty.
    #[must_use]
    pub fn str_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.str(key).filter(|s| !s.is_empty()).unwrap_or(default)
    }

    /// Returns a numeric prop.
    #[must_use]
    pub fn f64(&self, key: &str) -> Option<f64> {
        self.values.get(key).and_then(Value::as_f64)
    }

    /// Returns an integer prop, truncating floats.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn i64(&self, key: &str) -> Option<i64> {
        self.values
            .get(key)
            .and_then(|v| v.as_i64().or_else(|| v.as_f64().map(|f| f as i64)))
    }

    /// Returns whether a prop is truthy.
    #[must_use]
    pub fn flag(&self, key: &str) -> bool {
        self.values.get(key).is_some_and(truthy)
    }

    /// Returns an array prop, empty when absent.
    #[must_use]
    pub fn list(&self, key: &str) -> &[Value] {
        self.values
            .get(key)
            .and_then(Value::as_array)
            .map_or(&[], Vec::as_slice)
    }

    /// Returns the callback stored under `key`.
    #[must_use]
    pub fn callback(&self, key: &str) -> Option<Callback> {
        self.callbacks.get(key).cloned()
    }

    /// Returns the value props.
    #[must_use]
    pub const fn values(&self) -> &Map<String, Value> {
        &self.values
    }
}

/// Truthiness of a JSON value: `false`, `null`, `0`, `""` are falsy.
#[must_use]
pub fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use test_case::test_case;

    #[test_case(json!(null), false ; "null")]
    #[test_case(json!(0), false ; "zero")]
    #[test_case(json!(""), false ; "empty_string")]
    #[test_case(json!(2.5), true ; "number")]
    #[test_case(json!("x"), true ; "string")]
    #[test_case(json!([]), true ; "empty_array")]
    fn test_truthy(value: Value, expected: bool) {
        assert_eq!(truthy(&value), expected);
    }

    #[test]
    fn test_merge_is_shallow_and_right_biased() {
        let mut props = Props::new()
            .with("text", "Arm")
            .with("variant", "primary")
            .with("nested", json!({ "a": 1 }));

        props.merge(Props::new().with("variant", "danger").with("nested", json!({ "b": 2 })));

        assert_eq!(props.str("text"), Some("Arm"));
        assert_eq!(props.str("variant"), Some("danger"));
        assert_eq!(props.get("nested"), Some(&json!({ "b": 2 })));
    }

    #[test]
    fn test_typed_accessors() {
        let props = Props::from_value(json!({
            "count": 3.9,
            "name": "",
            "items": [1, 2],
        }))
        .with_callback("onClick", |_| {});

        assert_eq!(props.i64("count"), Some(3));
        assert_eq!(props.str_or("name", "fallback"), "fallback");
        assert_eq!(props.list("items").len(), 2);
        assert!(props.list("missing").is_empty());
        assert!(props.callback("onClick").is_some());
        assert!(!props.flag("name"));
    }

    #[test]
    fn test_from_non_object_is_empty() {
        assert!(Props::from_value(json!([1, 2])).values().is_empty());
    }
}
