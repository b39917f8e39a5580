//! Markup helpers shared by component templates.

/// Escapes text for use in element content or attribute values.
#[must_use]
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Converts a component type name to its CSS block name (`StatusPill` -> `status-pill`).
#[must_use]
pub fn kebab_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for (i, c) in name.chars().enumerate() {
        if c.is_ascii_uppercase() {
            if i > 0 {
                out.push('-');
            }
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// Space-separated class list builder.
#[derive(Debug, Default, Clone)]
pub struct ClassList(Vec<String>);

impl ClassList {
    /// Starts a list with a base class.
    #[must_use]
    pub fn new(base: impl Into<String>) -> Self {
        Self(vec![base.into()])
    }

    /// Appends a class.
    #[must_use]
    pub fn with(mut self, class: impl Into<String>) -> Self {
        let class = class.into();
        if !class.is_empty() {
            self.0.push(class);
        }
        self
    }

    /// Appends a class when `condition` holds.
    #[must_use]
    pub fn with_if(self, condition: bool, class: impl Into<String>) -> Self {
        if condition { self.with(class) } else { self }
    }

    /// Appends an optional extra class.
    #[must_use]
    pub fn with_opt(self, class: Option<&str>) -> Self {
        match class {
            Some(class) => self.with(class),
            None => self,
        }
    }

    /// Joins the classes.
    #[must_use]
    pub fn build(self) -> String {
        self.0.join(" ")
    }
}

/// Wraps an icon path in the inline SVG used across components.
#[must_use]
pub fn svg_icon(class: &str, path: &str) -> String {
    let class_attr = if class.is_empty() {
        String::new()
    } else {
        format!(r#" class="{class}""#)
    };
    format!(r#"<svg{class_attr} fill="none" stroke="currentColor" viewBox="0 0 24 24">{path}</svg>"#)
}
