//! Minimal CSS selector support.

use std::fmt;
use std::str::FromStr;

use crate::domain::errors::DomError;

#[derive(Debug, Clone, PartialEq, Eq)]
struct AttributeMatch {
    name: String,
    value: Option<String>,
}

/// One compound selector, e.g. `button.nav-item[data-view=home]`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Compound {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
    attributes: Vec<AttributeMatch>,
}

impl Compound {
    /// Tests the compound against an element's tag and attributes.
    pub(crate) fn matches<'a>(&self, tag: &str, attribute: impl Fn(&str) -> Option<&'a str>) -> bool {
        if self.tag.as_deref().is_some_and(|t| t != tag) {
            return false;
        }
        if self
            .id
            .as_deref()
            .is_some_and(|id| attribute("id") != Some(id))
        {
            return false;
        }
        if !self.classes.is_empty() {
            let class_attr = attribute("class").unwrap_or_default();
            if !self
                .classes
                .iter()
                .all(|class| class_attr.split_whitespace().any(|c| c == class))
            {
                return false;
            }
        }
        self.attributes.iter().all(|m| match (attribute(&m.name), &m.value) {
            (Some(_), None) => true,
            (Some(actual), Some(expected)) => actual == expected,
            (None, _) => false,
        })
    }
}

/// Parsed selector: compound selectors joined by descendant combinators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    source: String,
    compounds: Vec<Compound>,
}

impl Selector {
    /// Parses a selector string.
    ///
    /// # Errors
    /// Returns `DomError::InvalidSelector` for empty input or unsupported syntax.
    pub fn parse(source: &str) -> Result<Self, DomError> {
        let compounds = source
            .split_whitespace()
            .map(|part| parse_compound(source, part))
            .collect::<Result<Vec<_>, _>>()?;

        if compounds.is_empty() {
            return Err(DomError::invalid_selector(source, "empty selector"));
        }

        Ok(Self {
            source: source.to_string(),
            compounds,
        })
    }

    /// Returns the rightmost compound, which the matched element itself must satisfy.
    pub(crate) fn subject(&self) -> &Compound {
        &self.compounds[self.compounds.len() - 1]
    }

    /// Returns the ancestor compounds, innermost first.
    pub(crate) fn ancestors(&self) -> impl Iterator<Item = &Compound> {
        self.compounds[..self.compounds.len() - 1].iter().rev()
    }

    /// Returns the original selector text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.source
    }
}

impl FromStr for Selector {
    type Err = DomError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

fn take_ident<'a>(selector: &str, input: &'a str) -> Result<(&'a str, &'a str), DomError> {
    let end = input.find(|c: char| !is_ident_char(c)).unwrap_or(input.len());
    if end == 0 {
        return Err(DomError::invalid_selector(selector, "expected identifier"));
    }
    Ok((&input[..end], &input[end..]))
}

fn parse_compound(selector: &str, part: &str) -> Result<Compound, DomError> {
    let mut compound = Compound::default();
    let mut rest = part;

    if let Some(after) = rest.strip_prefix('*') {
        rest = after;
    } else if rest.starts_with(|c: char| c.is_ascii_alphabetic()) {
        let (tag, after) = take_ident(selector, rest)?;
        compound.tag = Some(tag.to_ascii_lowercase());
        rest = after;
    }

    while let Some(ch) = rest.chars().next() {
        match ch {
            '#' => {
                let (id, after) = take_ident(selector, &rest[1..])?;
                compound.id = Some(id.to_string());
                rest = after;
            }
            '.' => {
                let (class, after) = take_ident(selector, &rest[1..])?;
                compound.classes.push(class.to_string());
                rest = after;
            }
            '[' => {
                let end = rest
                    .find(']')
                    .ok_or_else(|| DomError::invalid_selector(selector, "unclosed attribute"))?;
                let body = &rest[1..end];
                rest = &rest[end + 1..];

                let attribute = match body.split_once('=') {
                    Some((name, value)) => AttributeMatch {
                        name: name.trim().to_ascii_lowercase(),
                        value: Some(value.trim().trim_matches(['"', '\'']).to_string()),
                    },
                    None => AttributeMatch {
                        name: body.trim().to_ascii_lowercase(),
                        value: None,
                    },
                };
                if attribute.name.is_empty() || !attribute.name.chars().all(is_ident_char) {
                    return Err(DomError::invalid_selector(selector, "bad attribute name"));
                }
                compound.attributes.push(attribute);
            }
            other => {
                return Err(DomError::invalid_selector(
                    selector,
                    format!("unsupported character `{other}`"),
                ));
            }
        }
    }

    Ok(compound)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn matches(selector: &str, tag: &str, attrs: &[(&str, &str)]) -> bool {
        let attrs: HashMap<&str, &str> = attrs.iter().copied().collect();
        Selector::parse(selector)
            .unwrap()
            .subject()
            .matches(tag, |name| attrs.get(name).copied())
    }

    #[test]
    fn test_compound_matching() {
        assert!(matches("button", "button", &[]));
        assert!(matches("#nav-home", "button", &[("id", "nav-home")]));
        assert!(matches(".a.b", "div", &[("class", "b x a")]));
        assert!(!matches(".a.b", "div", &[("class", "a")]));
        assert!(matches("[data-action]", "div", &[("data-action", "showSecurity")]));
        assert!(matches(
            "button.bottom-nav__item[data-view=\"home\"]",
            "button",
            &[("class", "bottom-nav__item"), ("data-view", "home")]
        ));
        assert!(!matches("[data-view=home]", "div", &[("data-view", "cameras")]));
        assert!(matches("*", "span", &[]));
    }

    #[test]
    fn test_descendant_parts() {
        let selector = Selector::parse(".room-card .room-card__action").unwrap();

        assert_eq!(selector.ancestors().count(), 1);
        assert_eq!(selector.to_string(), ".room-card .room-card__action");
    }

    #[test]
    fn test_invalid_selectors() {
        assert!(Selector::parse("").is_err());
        assert!(Selector::parse("div > p").is_err());
        assert!(Selector::parse("[data-x").is_err());
        assert!(Selector::parse(".").is_err());
    }
}
