//! Tolerant HTML fragment parser.

use std::sync::OnceLock;

use regex::Regex;

/// Elements that never have children or an end tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

/// Elements whose content is kept as raw text.
const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style"];

/// Parsed markup node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fragment {
    /// Element with lowercase tag name and attributes in source order.
    Element {
        /// Tag name.
        tag: String,
        /// Attributes in source order.
        attributes: Vec<(String, String)>,
        /// Child nodes.
        children: Vec<Fragment>,
    },
    /// Raw text run, entities left untouched.
    Text(String),
}

impl Fragment {
    /// Returns whether the tag is a void element.
    #[must_use]
    pub fn is_void(tag: &str) -> bool {
        VOID_ELEMENTS.contains(&tag)
    }

    /// Returns whether the tag holds raw text.
    #[must_use]
    pub fn is_raw_text(tag: &str) -> bool {
        RAW_TEXT_ELEMENTS.contains(&tag)
    }
}

struct OpenElement {
    tag: String,
    attributes: Vec<(String, String)>,
    children: Vec<Fragment>,
}

impl OpenElement {
    fn finish(self) -> Fragment {
        Fragment::Element {
            tag: self.tag,
            attributes: self.attributes,
            children: self.children,
        }
    }
}

fn attribute_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"([^\s"'=<>/]+)(?:\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'=<>`]+)))?"#)
            .expect("Invalid regex")
    })
}

fn push_node(stack: &mut [OpenElement], roots: &mut Vec<Fragment>, node: Fragment) {
    match stack.last_mut() {
        Some(open) => open.children.push(node),
        None => roots.push(node),
    }
}

fn close_element(stack: &mut Vec<OpenElement>, roots: &mut Vec<Fragment>, tag: &str) {
    let Some(position) = stack.iter().rposition(|open| open.tag == tag) else {
        return;
    };
    while stack.len() > position {
        if let Some(open) = stack.pop() {
            let node = open.finish();
            push_node(stack, roots, node);
        }
    }
}

/// Finds the `>` closing a start tag, skipping quoted attribute values.
fn find_tag_end(source: &str) -> Option<usize> {
    let mut quote: Option<char> = None;
    for (index, ch) in source.char_indices().skip(1) {
        match (quote, ch) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"' | '\'') => quote = Some(ch),
            (None, '>') => return Some(index),
            (None, _) => {}
        }
    }
    None
}

fn parse_attributes(source: &str) -> Vec<(String, String)> {
    attribute_regex()
        .captures_iter(source)
        .filter_map(|caps| {
            let name = caps.get(1)?.as_str().to_ascii_lowercase();
            let value = caps
                .get(2)
                .or_else(|| caps.get(3))
                .or_else(|| caps.get(4))
                .map_or_else(String::new, |m| m.as_str().to_string());
            Some((name, value))
        })
        .collect()
}

/// Parses an HTML fragment into a list of top-level nodes.
///
/// Comments, doctypes and processing instructions are dropped. End tags
/// without a matching open element are ignored and elements still open at
/// the end of input are closed implicitly.
#[must_use]
pub fn parse_fragment(html: &str) -> Vec<Fragment> {
    let mut roots = Vec::new();
    let mut stack: Vec<OpenElement> = Vec::new();
    let mut rest = html;

    while !rest.is_empty() {
        if let Some(after) = rest.strip_prefix("<!--") {
            rest = after.find("-->").map_or("", |end| &after[end + 3..]);
            continue;
        }

        if rest.starts_with("<!") || rest.starts_with("<?") {
            rest = rest.find('>').map_or("", |end| &rest[end + 1..]);
            continue;
        }

        if let Some(after) = rest.strip_prefix("</") {
            let end = after.find('>').unwrap_or(after.len());
            let tag = after[..end].trim().to_ascii_lowercase();
            rest = after.get(end + 1..).unwrap_or("");
            close_element(&mut stack, &mut roots, &tag);
            continue;
        }

        let starts_tag = rest.starts_with('<')
            && rest[1..].starts_with(|c: char| c.is_ascii_alphabetic());

        if starts_tag {
            let Some(end) = find_tag_end(rest) else {
                push_node(&mut stack, &mut roots, Fragment::Text(rest.to_string()));
                break;
            };

            let inner = rest[1..end].trim_end();
            rest = &rest[end + 1..];

            let self_closing = inner.ends_with('/');
            let inner = inner.trim_end_matches('/');
            let (tag, attribute_source) = inner
                .find(char::is_whitespace)
                .map_or((inner, ""), |split| (&inner[..split], &inner[split..]));
            let tag = tag.to_ascii_lowercase();
            let attributes = parse_attributes(attribute_source);

            if Fragment::is_raw_text(&tag) && !self_closing {
                let lower = rest.to_ascii_lowercase();
                let close = format!("</{tag}");
                let text_end = lower.find(&close).unwrap_or(rest.len());
                let text = &rest[..text_end];
                rest = rest[text_end..]
                    .find('>')
                    .map_or("", |gt| &rest[text_end + gt + 1..]);

                let children = if text.is_empty() {
                    Vec::new()
                } else {
                    vec![Fragment::Text(text.to_string())]
                };
                push_node(
                    &mut stack,
                    &mut roots,
                    Fragment::Element {
                        tag,
                        attributes,
                        children,
                    },
                );
                continue;
            }

            if self_closing || Fragment::is_void(&tag) {
                push_node(
                    &mut stack,
                    &mut roots,
                    Fragment::Element {
                        tag,
                        attributes,
                        children: Vec::new(),
                    },
                );
            } else {
                stack.push(OpenElement {
                    tag,
                    attributes,
                    children: Vec::new(),
                });
            }
            continue;
        }

        let skip = rest.chars().next().map_or(0, char::len_utf8);
        let end = rest[skip..].find('<').map_or(rest.len(), |i| i + skip);
        push_node(&mut stack, &mut roots, Fragment::Text(rest[..end].to_string()));
        rest = &rest[end..];
    }

    while let Some(open) = stack.pop() {
        let node = open.finish();
        push_node(&mut stack, &mut roots, node);
    }

    roots
}
