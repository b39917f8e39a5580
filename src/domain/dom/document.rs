//! Shared document tree.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use tracing::{trace, warn};

use super::parser::{Fragment, parse_fragment};
use super::selector::Selector;
use super::Event;
use crate::domain::errors::DomError;

/// Handle to a node in a [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u64);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node-{}", self.0)
    }
}

/// Handle to a registered event listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Event listener callback.
pub type Listener = Arc<dyn Fn(&Event) + Send + Sync>;

#[derive(Debug)]
struct Element {
    tag: String,
    attributes: Vec<(String, String)>,
}

impl Element {
    fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    fn set_attribute(&mut self, name: &str, value: &str) {
        match self.attributes.iter_mut().find(|(key, _)| key == name) {
            Some((_, existing)) => value.clone_into(existing),
            None => self.attributes.push((name.to_string(), value.to_string())),
        }
    }

    fn classes(&self) -> impl Iterator<Item = &str> {
        self.attribute("class").unwrap_or_default().split_whitespace()
    }
}

#[derive(Debug)]
enum NodeData {
    Element(Element),
    Text(String),
}

struct ListenerEntry {
    id: ListenerId,
    event: String,
    listener: Listener,
}

struct Node {
    data: NodeData,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    listeners: Vec<ListenerEntry>,
}

struct Tree {
    nodes: HashMap<NodeId, Node>,
    next_node: u64,
    next_listener: u64,
    root: NodeId,
    head: NodeId,
    body: NodeId,
}

impl Tree {
    fn new() -> Self {
        let mut tree = Self {
            nodes: HashMap::new(),
            next_node: 0,
            next_listener: 0,
            root: NodeId(0),
            head: NodeId(0),
            body: NodeId(0),
        };
        tree.root = tree.alloc_element("html", Vec::new());
        tree.head = tree.alloc_element("head", Vec::new());
        tree.body = tree.alloc_element("body", Vec::new());
        let (root, head, body) = (tree.root, tree.head, tree.body);
        tree.link(root, head);
        tree.link(root, body);
        tree
    }

    fn alloc(&mut self, data: NodeData) -> NodeId {
        let id = NodeId(self.next_node);
        self.next_node += 1;
        self.nodes.insert(
            id,
            Node {
                data,
                parent: None,
                children: Vec::new(),
                listeners: Vec::new(),
            },
        );
        id
    }

    fn alloc_element(&mut self, tag: &str, attributes: Vec<(String, String)>) -> NodeId {
        self.alloc(NodeData::Element(Element {
            tag: tag.to_ascii_lowercase(),
            attributes,
        }))
    }

    fn element(&self, id: NodeId) -> Option<&Element> {
        match &self.nodes.get(&id)?.data {
            NodeData::Element(element) => Some(element),
            NodeData::Text(_) => None,
        }
    }

    fn element_mut(&mut self, id: NodeId) -> Option<&mut Element> {
        match &mut self.nodes.get_mut(&id)?.data {
            NodeData::Element(element) => Some(element),
            NodeData::Text(_) => None,
        }
    }

    fn link(&mut self, parent: NodeId, child: NodeId) {
        if let Some(node) = self.nodes.get_mut(&child) {
            node.parent = Some(parent);
        }
        if let Some(node) = self.nodes.get_mut(&parent) {
            node.children.push(child);
        }
    }

    fn detach(&mut self, id: NodeId) -> bool {
        let Some(parent) = self.nodes.get_mut(&id).and_then(|node| node.parent.take()) else {
            return false;
        };
        if let Some(parent) = self.nodes.get_mut(&parent) {
            parent.children.retain(|child| *child != id);
        }
        true
    }

    fn destroy(&mut self, id: NodeId) {
        if let Some(node) = self.nodes.remove(&id) {
            for child in node.children {
                self.destroy(child);
            }
        }
    }

    fn clear_children(&mut self, id: NodeId) {
        let children = self
            .nodes
            .get_mut(&id)
            .map(|node| std::mem::take(&mut node.children))
            .unwrap_or_default();
        for child in children {
            self.destroy(child);
        }
    }

    fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.nodes.get(&id).and_then(|n| n.parent), |current| {
            self.nodes.get(current).and_then(|n| n.parent)
        })
    }

    fn is_attached(&self, id: NodeId) -> bool {
        id == self.root || self.ancestors(id).any(|ancestor| ancestor == self.root)
    }

    fn build(&mut self, parent: NodeId, fragments: Vec<Fragment>) {
        for fragment in fragments {
            match fragment {
                Fragment::Element {
                    tag,
                    attributes,
                    children,
                } => {
                    let id = self.alloc_element(&tag, attributes);
                    self.link(parent, id);
                    self.build(id, children);
                }
                Fragment::Text(text) => {
                    let id = self.alloc(NodeData::Text(text));
                    self.link(parent, id);
                }
            }
        }
    }

    /// Collects descendants of `scope` in document order, excluding `scope`.
    fn descendants(&self, scope: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self
            .nodes
            .get(&scope)
            .map(|n| n.children.iter().rev().copied().collect())
            .unwrap_or_default();
        while let Some(id) = stack.pop() {
            out.push(id);
            if let Some(node) = self.nodes.get(&id) {
                stack.extend(node.children.iter().rev().copied());
            }
        }
        out
    }

    fn matches(&self, id: NodeId, selector: &Selector) -> bool {
        let Some(element) = self.element(id) else {
            return false;
        };
        if !selector
            .subject()
            .matches(&element.tag, |name| element.attribute(name))
        {
            return false;
        }

        let mut ancestors = self.ancestors(id);
        selector.ancestors().all(|compound| {
            ancestors.any(|ancestor| {
                self.element(ancestor)
                    .is_some_and(|el| compound.matches(&el.tag, |name| el.attribute(name)))
            })
        })
    }

    fn serialize(&self, id: NodeId, out: &mut String) {
        let Some(node) = self.nodes.get(&id) else {
            return;
        };
        match &node.data {
            NodeData::Text(text) => out.push_str(text),
            NodeData::Element(element) => {
                out.push('<');
                out.push_str(&element.tag);
                for (name, value) in &element.attributes {
                    out.push(' ');
                    out.push_str(name);
                    if !value.is_empty() {
                        out.push_str("=\"");
                        out.push_str(&escape_attribute(value));
                        out.push('"');
                    }
                }
                out.push('>');
                if Fragment::is_void(&element.tag) {
                    return;
                }
                for child in &node.children {
                    self.serialize(*child, out);
                }
                out.push_str("</");
                out.push_str(&element.tag);
                out.push('>');
            }
        }
    }

    fn collect_text(&self, id: NodeId, out: &mut String) {
        let Some(node) = self.nodes.get(&id) else {
            return;
        };
        match &node.data {
            NodeData::Text(text) => out.push_str(text),
            NodeData::Element(_) => {
                for child in &node.children {
                    self.collect_text(*child, out);
                }
            }
        }
    }
}

fn escape_attribute(value: &str) -> String {
    value.replace('&', "&amp;").replace('"', "&quot;")
}

/// Shared, cheaply cloneable handle to a document tree.
///
/// Every operation takes the lock for its own duration only. Listeners run
/// with the lock released, so they may mutate the document freely.
#[derive(Clone)]
pub struct Document {
    tree: Arc<Mutex<Tree>>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tree = self.tree.lock();
        f.debug_struct("Document")
            .field("nodes", &tree.nodes.len())
            .finish()
    }
}

/// Non-owning document handle for listeners stored inside the tree.
#[derive(Clone, Debug, Default)]
pub struct WeakDocument {
    tree: Weak<Mutex<Tree>>,
}

impl WeakDocument {
    /// Returns the document if it is still alive.
    #[must_use]
    pub fn upgrade(&self) -> Option<Document> {
        self.tree.upgrade().map(|tree| Document { tree })
    }
}

impl Document {
    /// Returns a handle that does not keep the tree alive.
    #[must_use]
    pub fn downgrade(&self) -> WeakDocument {
        WeakDocument {
            tree: Arc::downgrade(&self.tree),
        }
    }

    /// Creates an empty `html > head + body` document.
    #[must_use]
    pub fn new() -> Self {
        Self {
            tree: Arc::new(Mutex::new(Tree::new())),
        }
    }

    /// Returns the `html` element.
    #[must_use]
    pub fn root(&self) -> NodeId {
        self.tree.lock().root
    }

    /// Returns the `head` element.
    #[must_use]
    pub fn head(&self) -> NodeId {
        self.tree.lock().head
    }

    /// Returns the `body` element.
    #[must_use]
    pub fn body(&self) -> NodeId {
        self.tree.lock().body
    }

    /// Creates a detached element.
    #[must_use]
    pub fn create_element(&self, tag: &str) -> NodeId {
        self.tree.lock().alloc_element(tag, Vec::new())
    }

    /// Appends `child` to `parent`, moving it out of its current parent.
    ///
    /// # Errors
    /// Returns an error if either node is missing or `child` is an ancestor of `parent`.
    pub fn append_child(&self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        let mut tree = self.tree.lock();
        if !tree.nodes.contains_key(&parent) {
            return Err(DomError::NodeNotFound(parent));
        }
        if !tree.nodes.contains_key(&child) {
            return Err(DomError::NodeNotFound(child));
        }
        if parent == child || tree.ancestors(parent).any(|a| a == child) {
            return Err(DomError::HierarchyRequest { parent, child });
        }
        tree.detach(child);
        tree.link(parent, child);
        Ok(())
    }

    /// Detaches a node from its parent, keeping the subtree alive.
    pub fn detach(&self, node: NodeId) -> bool {
        self.tree.lock().detach(node)
    }

    /// Detaches and destroys a node and its subtree, dropping their listeners.
    pub fn remove_node(&self, node: NodeId) -> bool {
        let mut tree = self.tree.lock();
        if !tree.nodes.contains_key(&node) {
            return false;
        }
        tree.detach(node);
        tree.destroy(node);
        true
    }

    /// Returns whether the node still exists.
    #[must_use]
    pub fn contains(&self, node: NodeId) -> bool {
        self.tree.lock().nodes.contains_key(&node)
    }

    /// Returns whether the node is connected to the document root.
    #[must_use]
    pub fn is_attached(&self, node: NodeId) -> bool {
        self.tree.lock().is_attached(node)
    }

    /// Returns the node's parent.
    #[must_use]
    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.tree.lock().nodes.get(&node)?.parent
    }

    /// Returns the node's children.
    #[must_use]
    pub fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.tree
            .lock()
            .nodes
            .get(&node)
            .map(|n| n.children.clone())
            .unwrap_or_default()
    }

    /// Returns the element's tag name.
    #[must_use]
    pub fn tag_name(&self, node: NodeId) -> Option<String> {
        self.tree.lock().element(node).map(|el| el.tag.clone())
    }

    /// Finds an attached element by `id` attribute.
    #[must_use]
    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        let tree = self.tree.lock();
        tree.descendants(tree.root)
            .into_iter()
            .find(|node| tree.element(*node).and_then(|el| el.attribute("id")) == Some(id))
    }

    /// Returns the first descendant of `scope` matching `selector`.
    ///
    /// # Errors
    /// Returns an error if the selector is invalid.
    pub fn query_selector(&self, scope: NodeId, selector: &str) -> Result<Option<NodeId>, DomError> {
        let selector = Selector::parse(selector)?;
        let tree = self.tree.lock();
        Ok(tree
            .descendants(scope)
            .into_iter()
            .find(|node| tree.matches(*node, &selector)))
    }

    /// Returns every descendant of `scope` matching `selector`, in document order.
    ///
    /// # Errors
    /// Returns an error if the selector is invalid.
    pub fn query_selector_all(&self, scope: NodeId, selector: &str) -> Result<Vec<NodeId>, DomError> {
        let selector = Selector::parse(selector)?;
        let tree = self.tree.lock();
        Ok(tree
            .descendants(scope)
            .into_iter()
            .filter(|node| tree.matches(*node, &selector))
            .collect())
    }

    /// Resolves a selector against the whole document.
    #[must_use]
    pub fn query(&self, selector: &str) -> Option<NodeId> {
        match self.query_selector(self.root(), selector) {
            Ok(found) => found,
            Err(e) => {
                warn!(error = %e, "Invalid selector");
                None
            }
        }
    }

    /// Returns the node itself or its nearest ancestor matching `selector`.
    ///
    /// # Errors
    /// Returns an error if the selector is invalid.
    pub fn closest(&self, node: NodeId, selector: &str) -> Result<Option<NodeId>, DomError> {
        let selector = Selector::parse(selector)?;
        let tree = self.tree.lock();
        Ok(std::iter::once(node)
            .chain(tree.ancestors(node))
            .find(|candidate| tree.matches(*candidate, &selector)))
    }

    /// Returns an attribute value.
    #[must_use]
    pub fn attribute(&self, node: NodeId, name: &str) -> Option<String> {
        self.tree
            .lock()
            .element(node)
            .and_then(|el| el.attribute(name))
            .map(str::to_string)
    }

    /// Returns all attributes in insertion order.
    #[must_use]
    pub fn attributes(&self, node: NodeId) -> Vec<(String, String)> {
        self.tree
            .lock()
            .element(node)
            .map(|el| el.attributes.clone())
            .unwrap_or_default()
    }

    /// Sets an attribute, returning false for missing or non-element nodes.
    pub fn set_attribute(&self, node: NodeId, name: &str, value: &str) -> bool {
        self.tree
            .lock()
            .element_mut(node)
            .map(|el| el.set_attribute(&name.to_ascii_lowercase(), value))
            .is_some()
    }

    /// Removes an attribute.
    pub fn remove_attribute(&self, node: NodeId, name: &str) -> bool {
        self.tree.lock().element_mut(node).is_some_and(|el| {
            let before = el.attributes.len();
            el.attributes.retain(|(key, _)| !key.eq_ignore_ascii_case(name));
            el.attributes.len() != before
        })
    }

    /// Returns whether the element carries `class`.
    #[must_use]
    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.tree
            .lock()
            .element(node)
            .is_some_and(|el| el.classes().any(|c| c == class))
    }

    /// Adds or removes `class` to match `present`.
    pub fn toggle_class(&self, node: NodeId, class: &str, present: bool) {
        let mut tree = self.tree.lock();
        let Some(element) = tree.element_mut(node) else {
            return;
        };
        let mut classes: Vec<String> = element.classes().map(str::to_string).collect();
        let has = classes.iter().any(|c| c == class);
        if present && !has {
            classes.push(class.to_string());
        } else if !present && has {
            classes.retain(|c| c != class);
        } else {
            return;
        }
        element.set_attribute("class", &classes.join(" "));
    }

    /// Adds a class.
    pub fn add_class(&self, node: NodeId, class: &str) {
        self.toggle_class(node, class, true);
    }

    /// Removes a class.
    pub fn remove_class(&self, node: NodeId, class: &str) {
        self.toggle_class(node, class, false);
    }

    /// Replaces the node's children with parsed markup.
    ///
    /// Replaced children are destroyed together with their listeners.
    pub fn set_inner_html(&self, node: NodeId, html: &str) {
        let fragments = parse_fragment(html);
        let mut tree = self.tree.lock();
        if !tree.nodes.contains_key(&node) {
            return;
        }
        tree.clear_children(node);
        tree.build(node, fragments);
    }

    /// Parses markup and appends it after the node's existing children.
    pub fn append_html(&self, node: NodeId, html: &str) {
        let fragments = parse_fragment(html);
        let mut tree = self.tree.lock();
        if tree.nodes.contains_key(&node) {
            tree.build(node, fragments);
        }
    }

    /// Serializes the node's children.
    #[must_use]
    pub fn inner_html(&self, node: NodeId) -> String {
        let tree = self.tree.lock();
        let mut out = String::new();
        if let Some(n) = tree.nodes.get(&node) {
            for child in &n.children {
                tree.serialize(*child, &mut out);
            }
        }
        out
    }

    /// Serializes the node including its own tag.
    #[must_use]
    pub fn outer_html(&self, node: NodeId) -> String {
        let mut out = String::new();
        self.tree.lock().serialize(node, &mut out);
        out
    }

    /// Returns the concatenated text of the node's subtree.
    #[must_use]
    pub fn text_content(&self, node: NodeId) -> String {
        let mut out = String::new();
        self.tree.lock().collect_text(node, &mut out);
        out
    }

    /// Replaces the node's children with a single unparsed text node.
    pub fn set_text_content(&self, node: NodeId, text: &str) {
        let mut tree = self.tree.lock();
        if !tree.nodes.contains_key(&node) {
            return;
        }
        tree.clear_children(node);
        if !text.is_empty() {
            let id = tree.alloc(NodeData::Text(text.to_string()));
            tree.link(node, id);
        }
    }

    /// Registers a listener; returns `None` when the node does not exist.
    pub fn add_listener(&self, node: NodeId, event: &str, listener: Listener) -> Option<ListenerId> {
        let mut tree = self.tree.lock();
        let id = ListenerId(tree.next_listener);
        let entry = tree.nodes.get_mut(&node)?;
        entry.listeners.push(ListenerEntry {
            id,
            event: event.to_string(),
            listener,
        });
        tree.next_listener += 1;
        Some(id)
    }

    /// Removes a listener. Missing nodes or listeners are not an error.
    pub fn remove_listener(&self, node: NodeId, id: ListenerId) -> bool {
        let mut tree = self.tree.lock();
        let Some(entry) = tree.nodes.get_mut(&node) else {
            trace!(%node, "Listener owner already destroyed");
            return false;
        };
        let before = entry.listeners.len();
        entry.listeners.retain(|l| l.id != id);
        entry.listeners.len() != before
    }

    /// Returns the number of listeners attached to a node.
    #[must_use]
    pub fn listener_count(&self, node: NodeId) -> usize {
        self.tree
            .lock()
            .nodes
            .get(&node)
            .map_or(0, |n| n.listeners.len())
    }

    /// Returns the number of listeners attached anywhere in the arena.
    #[must_use]
    pub fn total_listeners(&self) -> usize {
        self.tree
            .lock()
            .nodes
            .values()
            .map(|n| n.listeners.len())
            .sum()
    }

    /// Dispatches an event at `target`, bubbling to ancestors when requested.
    ///
    /// Returns false when a listener called `prevent_default`.
    pub fn dispatch_event(&self, target: NodeId, event: &Event) -> bool {
        let path: Vec<NodeId> = {
            let tree = self.tree.lock();
            if !tree.nodes.contains_key(&target) {
                return true;
            }
            if event.bubbles() {
                std::iter::once(target).chain(tree.ancestors(target)).collect()
            } else {
                vec![target]
            }
        };

        event.set_target(target);
        trace!(event = event.event_type(), %target, "Dispatching event");

        for node in path {
            let listeners: Vec<Listener> = {
                let tree = self.tree.lock();
                tree.nodes
                    .get(&node)
                    .map(|n| {
                        n.listeners
                            .iter()
                            .filter(|l| l.event == event.event_type())
                            .map(|l| Arc::clone(&l.listener))
                            .collect()
                    })
                    .unwrap_or_default()
            };

            event.set_current_target(Some(node));
            for listener in listeners {
                listener(event);
            }

            if event.is_propagation_stopped() {
                break;
            }
        }

        event.set_current_target(None);
        !event.default_prevented()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counter(count: &Arc<AtomicUsize>) -> Listener {
        let count = Arc::clone(count);
        Arc::new(move |_event: &Event| {
            count.fetch_add(1, Ordering::SeqCst);
        })
    }

    #[test]
    fn test_new_document_structure() {
        let doc = Document::new();

        assert_eq!(doc.children(doc.root()), vec![doc.head(), doc.body()]);
        assert_eq!(doc.outer_html(doc.root()), "<html><head></head><body></body></html>");
    }

    #[test]
    fn test_inner_html_roundtrip_and_lookup() {
        let doc = Document::new();
        doc.set_inner_html(
            doc.body(),
            r#"<main id="views-container"><div id="view-home" class="view">Home</div></main>"#,
        );

        let home = doc.get_element_by_id("view-home").unwrap();
        assert_eq!(doc.text_content(home), "Home");
        assert_eq!(
            doc.inner_html(doc.body()),
            r#"<main id="views-container"><div id="view-home" class="view">Home</div></main>"#
        );
    }

    #[test]
    fn test_detached_nodes_are_not_found_by_id() {
        let doc = Document::new();
        let div = doc.create_element("div");
        doc.set_attribute(div, "id", "floating");

        assert!(doc.get_element_by_id("floating").is_none());
        doc.append_child(doc.body(), div).unwrap();
        assert_eq!(doc.get_element_by_id("floating"), Some(div));
    }

    #[test]
    fn test_append_child_rejects_cycles() {
        let doc = Document::new();
        let outer = doc.create_element("div");
        let inner = doc.create_element("div");
        doc.append_child(outer, inner).unwrap();

        assert!(matches!(
            doc.append_child(inner, outer),
            Err(DomError::HierarchyRequest { .. })
        ));
    }

    #[test]
    fn test_class_toggling() {
        let doc = Document::new();
        let node = doc.create_element("div");
        doc.set_attribute(node, "class", "view");

        doc.toggle_class(node, "hidden", true);
        doc.toggle_class(node, "hidden", true);
        assert_eq!(doc.attribute(node, "class").as_deref(), Some("view hidden"));

        doc.remove_class(node, "hidden");
        assert!(!doc.has_class(node, "hidden"));
        assert!(doc.has_class(node, "view"));
    }

    #[test]
    fn test_attribute_names_are_case_insensitive() {
        let doc = Document::new();
        let node = doc.create_element("button");
        doc.set_attribute(node, "data-entityId", "light.kitchen");

        assert_eq!(doc.attributes(node)[0].0, "data-entityid");
        assert_eq!(doc.attribute(node, "data-entityId").as_deref(), Some("light.kitchen"));
        assert_eq!(doc.attribute(node, "DATA-ENTITYID").as_deref(), Some("light.kitchen"));
        assert!(doc.remove_attribute(node, "Data-EntityId"));
        assert!(doc.attribute(node, "data-entityid").is_none());
    }

    #[test]
    fn test_query_selectors_and_closest() {
        let doc = Document::new();
        doc.set_inner_html(
            doc.body(),
            r#"<div class="card"><button class="act" data-action="all-on"><span>On</span></button><button class="act" data-action="all-off">Off</button></div>"#,
        );
        let body = doc.body();

        let buttons = doc.query_selector_all(body, ".card .act").unwrap();
        assert_eq!(buttons.len(), 2);

        let span = doc.query_selector(body, "span").unwrap().unwrap();
        let closest = doc.closest(span, "[data-action]").unwrap();
        assert_eq!(closest, Some(buttons[0]));
        assert_eq!(doc.closest(span, ".missing").unwrap(), None);
        assert!(doc.query_selector(body, "div > span").is_err());
    }

    #[test]
    fn test_bubbling_and_stop_propagation() {
        let doc = Document::new();
        let outer = doc.create_element("div");
        let inner = doc.create_element("button");
        doc.append_child(doc.body(), outer).unwrap();
        doc.append_child(outer, inner).unwrap();

        let outer_hits = Arc::new(AtomicUsize::new(0));
        doc.add_listener(outer, "click", counter(&outer_hits));

        doc.dispatch_event(inner, &Event::click());
        assert_eq!(outer_hits.load(Ordering::SeqCst), 1);

        doc.dispatch_event(inner, &Event::new("click"));
        assert_eq!(outer_hits.load(Ordering::SeqCst), 1);

        doc.add_listener(inner, "click", Arc::new(|event: &Event| event.stop_propagation()));
        doc.dispatch_event(inner, &Event::click());
        assert_eq!(outer_hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_listener_may_mutate_document() {
        let doc = Document::new();
        let button = doc.create_element("button");
        doc.append_child(doc.body(), button).unwrap();

        let handle = doc.clone();
        doc.add_listener(
            button,
            "click",
            Arc::new(move |event: &Event| {
                if let Some(target) = event.target() {
                    handle.set_attribute(target, "data-clicked", "true");
                }
            }),
        );

        doc.dispatch_event(button, &Event::click());
        assert_eq!(doc.attribute(button, "data-clicked").as_deref(), Some("true"));
    }

    #[test]
    fn test_removing_nodes_drops_listeners() {
        let doc = Document::new();
        doc.set_inner_html(doc.body(), "<div><button>x</button></div>");
        let button = doc.query("button").unwrap();
        let id = doc.add_listener(button, "click", Arc::new(|_: &Event| {})).unwrap();
        assert_eq!(doc.total_listeners(), 1);

        doc.set_inner_html(doc.body(), "<p>replaced</p>");

        assert_eq!(doc.total_listeners(), 0);
        assert!(!doc.contains(button));
        assert!(!doc.remove_listener(button, id));
    }

    #[test]
    fn test_text_content_is_not_parsed() {
        let doc = Document::new();
        let style = doc.create_element("style");
        doc.set_text_content(style, ".a > .b { color: red; }");

        assert_eq!(doc.children(style).len(), 1);
        assert_eq!(doc.text_content(style), ".a > .b { color: red; }");
    }
}
