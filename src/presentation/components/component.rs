//! Component base: behavior trait, class descriptors and instance handles.
//!
//! A component is split in two. The [`Component`] implementation is the
//! behavior (template, class name, lifecycle hooks); the [`ComponentHandle`]
//! owns the instance data (props, state, backing node, recorded listeners and
//! timers) and runs the lifecycle around it.
//!
//! Rendering replaces the backing node's children wholesale. Uncontrolled
//! child state such as listeners attached to inner nodes is lost on every
//! render, so components attach listeners to their root node and delegate.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, Weak};
use std::time::Duration;

use parking_lot::Mutex;
use serde_json::Value;
use tokio::task::AbortHandle;
use tracing::{debug, trace, warn};

use crate::domain::dom::{Document, Event, ListenerId, NodeId};
use crate::domain::errors::ComponentError;

use super::markup::kebab_case;
use super::props::{Callback, Props, State};

/// Composition level of a component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ComponentKind {
    /// Smallest building block.
    Atom,
    /// Group of atoms.
    Molecule,
    /// Self-contained section of a view.
    Organism,
    /// Page-level layout.
    Template,
}

impl ComponentKind {
    /// Lowercase name used in logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Atom => "atom",
            Self::Molecule => "molecule",
            Self::Organism => "organism",
            Self::Template => "template",
        }
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Behavior of a component.
#[allow(unused_variables)]
pub trait Component: Send + 'static {
    /// Tag of the backing element.
    fn tag(&self) -> &'static str {
        "div"
    }

    /// Class attribute of the backing element.
    ///
    /// `None` uses the kebab-cased type name plus the `className` prop.
    fn class_name(&self, props: &Props, state: &State) -> Option<String> {
        None
    }

    /// Inner markup. Must be a pure function of props and state.
    fn template(&self, props: &Props, state: &State) -> String;

    /// State of a freshly created instance.
    fn initial_state(&self, props: &Props) -> State {
        State::new()
    }

    /// Runs after the backing element is attached.
    ///
    /// # Errors
    /// Errors are logged by the handle and never propagated.
    fn on_mount(&mut self, cx: &mut Lifecycle<'_>) -> Result<(), ComponentError> {
        Ok(())
    }

    /// Runs before listeners are released and the element is removed.
    ///
    /// # Errors
    /// Errors are logged by the handle and never propagated.
    fn on_unmount(&mut self, cx: &mut Lifecycle<'_>) -> Result<(), ComponentError> {
        Ok(())
    }

    /// Runs after props or state were merged, before any re-render.
    fn on_update(&mut self, prev_state: &State, prev_props: &Props) {}
}

/// A component type that can be registered by name.
pub trait ComponentDef: Component + Sized {
    /// Registry name, also written to `data-component`.
    const NAME: &'static str;
    /// Composition level.
    const KIND: ComponentKind;

    /// Scoped stylesheet text.
    #[must_use]
    fn styles() -> String {
        String::new()
    }

    /// Creates the behavior for the given props.
    fn create(props: &Props) -> Self;
}

fn construct<T: ComponentDef>(props: &Props) -> Box<dyn Component> {
    Box::new(T::create(props))
}

/// Registry entry describing a component type.
#[derive(Clone)]
pub struct ComponentClass {
    name: &'static str,
    kind: ComponentKind,
    styles: Arc<str>,
    construct: fn(&Props) -> Box<dyn Component>,
}

impl fmt::Debug for ComponentClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentClass")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("styles", &self.styles.len())
            .finish_non_exhaustive()
    }
}

impl ComponentClass {
    /// Describes component type `T`.
    #[must_use]
    pub fn of<T: ComponentDef>() -> Self {
        Self {
            name: T::NAME,
            kind: T::KIND,
            styles: T::styles().into(),
            construct: construct::<T>,
        }
    }

    /// Returns the registry name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the composition level.
    #[must_use]
    pub const fn kind(&self) -> ComponentKind {
        self.kind
    }

    /// Returns the stylesheet text, possibly empty.
    #[must_use]
    pub fn styles(&self) -> &str {
        &self.styles
    }

    /// Creates an unmounted instance.
    #[must_use]
    pub fn instantiate(&self, document: &Document, props: Props) -> ComponentHandle {
        let behavior = (self.construct)(&props);
        ComponentHandle::from_parts(self.name, self.kind, behavior, document.clone(), props)
    }
}

/// Where a component mounts or attaches a listener.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// The component's own backing element.
    Root,
    /// An explicit node.
    Node(NodeId),
    /// A selector, resolved against the document when mounting and against
    /// the component's subtree when attaching listeners.
    Selector(String),
}

impl From<NodeId> for Target {
    fn from(node: NodeId) -> Self {
        Self::Node(node)
    }
}

impl From<&str> for Target {
    fn from(selector: &str) -> Self {
        Self::Selector(selector.to_string())
    }
}

impl From<String> for Target {
    fn from(selector: String) -> Self {
        Self::Selector(selector)
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Root => f.write_str(":root"),
            Self::Node(node) => write!(f, "{node}"),
            Self::Selector(selector) => f.write_str(selector),
        }
    }
}

/// Identifier of a component-owned interval timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerId(u64);

#[derive(Debug)]
struct HandlerRecord {
    node: NodeId,
    event: String,
    listener: ListenerId,
}

struct InstanceData {
    name: &'static str,
    kind: ComponentKind,
    props: Props,
    state: State,
    element: Option<NodeId>,
    mounted: bool,
    handlers: Vec<HandlerRecord>,
    timers: BTreeMap<TimerId, AbortHandle>,
    next_timer: u64,
}

impl Drop for InstanceData {
    fn drop(&mut self) {
        for timer in self.timers.values() {
            timer.abort();
        }
    }
}

struct Instance {
    behavior: Box<dyn Component>,
    data: InstanceData,
}

struct Shared {
    document: Document,
    instance: Mutex<Instance>,
}

#[derive(Clone, Copy)]
enum HookKind {
    Mount,
    Unmount,
}

impl HookKind {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Mount => "on_mount",
            Self::Unmount => "on_unmount",
        }
    }
}

/// Shared handle to a component instance.
///
/// Listeners and timers registered through the handle keep only a weak
/// reference; once the last handle is dropped they stop doing anything.
#[derive(Clone)]
pub struct ComponentHandle {
    shared: Arc<Shared>,
}

/// Weak counterpart of [`ComponentHandle`].
#[derive(Clone)]
pub struct WeakComponentHandle {
    shared: Weak<Shared>,
}

impl WeakComponentHandle {
    /// Upgrades to a strong handle while the instance is alive.
    #[must_use]
    pub fn upgrade(&self) -> Option<ComponentHandle> {
        self.shared.upgrade().map(|shared| ComponentHandle { shared })
    }
}

impl fmt::Debug for WeakComponentHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeakComponentHandle")
            .field("alive", &(self.shared.strong_count() > 0))
            .finish()
    }
}

impl fmt::Debug for ComponentHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let instance = self.shared.instance.lock();
        f.debug_struct("ComponentHandle")
            .field("name", &instance.data.name)
            .field("element", &instance.data.element)
            .field("mounted", &instance.data.mounted)
            .finish_non_exhaustive()
    }
}

impl ComponentHandle {
    /// Wraps a behavior in a new, unmounted instance.
    #[must_use]
    pub fn new<T: ComponentDef>(document: &Document, props: Props) -> Self {
        let behavior = Box::new(T::create(&props));
        Self::from_parts(T::NAME, T::KIND, behavior, document.clone(), props)
    }

    fn from_parts(
        name: &'static str,
        kind: ComponentKind,
        behavior: Box<dyn Component>,
        document: Document,
        props: Props,
    ) -> Self {
        let state = behavior.initial_state(&props);
        Self {
            shared: Arc::new(Shared {
                document,
                instance: Mutex::new(Instance {
                    behavior,
                    data: InstanceData {
                        name,
                        kind,
                        props,
                        state,
                        element: None,
                        mounted: false,
                        handlers: Vec::new(),
                        timers: BTreeMap::new(),
                        next_timer: 0,
                    },
                }),
            }),
        }
    }

    /// Returns a weak reference to this instance.
    #[must_use]
    pub fn downgrade(&self) -> WeakComponentHandle {
        WeakComponentHandle {
            shared: Arc::downgrade(&self.shared),
        }
    }

    /// Returns the document the instance renders into.
    #[must_use]
    pub fn document(&self) -> &Document {
        &self.shared.document
    }

    /// Returns the component's registry name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.shared.instance.lock().data.name
    }

    /// Returns the component's composition level.
    #[must_use]
    pub fn kind(&self) -> ComponentKind {
        self.shared.instance.lock().data.kind
    }

    /// Returns a copy of the current props.
    #[must_use]
    pub fn props(&self) -> Props {
        self.shared.instance.lock().data.props.clone()
    }

    /// Returns a copy of the current state.
    #[must_use]
    pub fn state(&self) -> State {
        self.shared.instance.lock().data.state.clone()
    }

    /// Returns a callback prop.
    #[must_use]
    pub fn callback(&self, key: &str) -> Option<Callback> {
        self.shared.instance.lock().data.props.callback(key)
    }

    /// Returns the backing element once rendered.
    #[must_use]
    pub fn element(&self) -> Option<NodeId> {
        self.shared.instance.lock().data.element
    }

    /// Returns whether the instance is mounted.
    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.shared.instance.lock().data.mounted
    }

    /// Returns the number of listeners recorded for release on unmount.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.shared.instance.lock().data.handlers.len()
    }

    /// Returns the number of live interval timers.
    #[must_use]
    pub fn timer_count(&self) -> usize {
        self.shared.instance.lock().data.timers.len()
    }

    /// Serializes the backing element, empty before the first render.
    #[must_use]
    pub fn html(&self) -> String {
        self.element()
            .map(|element| self.shared.document.outer_html(element))
            .unwrap_or_default()
    }

    /// Renders the template into the backing element, creating it if needed.
    pub fn render(&self) -> NodeId {
        let document = &self.shared.document;
        let mut guard = self.shared.instance.lock();
        let Instance { behavior, data } = &mut *guard;

        let element = match data.element {
            Some(element) if document.contains(element) => element,
            _ => {
                let element = document.create_element(behavior.tag());
                document.set_attribute(element, "data-component", data.name);
                data.element = Some(element);
                element
            }
        };

        let class = behavior
            .class_name(&data.props, &data.state)
            .unwrap_or_else(|| default_class_name(data.name, &data.props));
        document.set_attribute(element, "class", &class);
        if let Some(id) = data.props.str("id") {
            document.set_attribute(element, "id", id);
        }
        document.set_inner_html(element, &behavior.template(&data.props, &data.state));

        // Inner listeners died with the replaced children.
        data.handlers.retain(|record| document.contains(record.node));
        trace!(component = data.name, %element, "Component rendered");
        element
    }

    /// Renders and appends the instance to `parent`, then runs `on_mount`.
    ///
    /// # Errors
    /// Returns error if already mounted, if the parent cannot be resolved, or
    /// if the selector is invalid.
    pub fn mount(&self, parent: impl Into<Target>) -> Result<NodeId, ComponentError> {
        let parent = parent.into();
        let name = self.name();
        if self.is_mounted() {
            return Err(ComponentError::AlreadyMounted {
                component: name.to_string(),
            });
        }

        let document = &self.shared.document;
        let resolved = match &parent {
            Target::Root => None,
            Target::Node(node) => Some(*node).filter(|node| document.contains(*node)),
            Target::Selector(selector) => document.query_selector(document.root(), selector)?,
        };
        let Some(parent_node) = resolved else {
            warn!(component = name, target = %parent, "Cannot mount component: parent not found");
            return Err(ComponentError::parent_not_found(name, parent.to_string()));
        };

        let element = self.render();
        document.append_child(parent_node, element)?;
        self.shared.instance.lock().data.mounted = true;
        debug!(component = name, %element, parent = %parent_node, "Component mounted");

        self.run_hook(HookKind::Mount);
        Ok(element)
    }

    /// Runs `on_unmount`, releases listeners and timers and destroys the
    /// backing element. Does nothing when not mounted.
    pub fn unmount(&self) {
        if !self.is_mounted() {
            return;
        }
        self.run_hook(HookKind::Unmount);

        let (name, element, handlers, timers) = {
            let mut guard = self.shared.instance.lock();
            let data = &mut guard.data;
            data.mounted = false;
            (
                data.name,
                data.element.take(),
                std::mem::take(&mut data.handlers),
                std::mem::take(&mut data.timers),
            )
        };

        let document = &self.shared.document;
        for record in handlers {
            if !document.remove_listener(record.node, record.listener) {
                trace!(component = name, event = %record.event, "Listener already released");
            }
        }

        if !timers.is_empty() {
            warn!(component = name, timers = timers.len(), "Timers still running after unmount, aborting");
            for timer in timers.values() {
                timer.abort();
            }
        }

        if let Some(element) = element {
            document.remove_node(element);
        }
        debug!(component = name, "Component unmounted");
    }

    /// Shallow-merges `partial` into the state, runs `on_update` and
    /// re-renders when mounted. Non-object values are ignored.
    pub fn set_state(&self, partial: Value) {
        let Value::Object(partial) = partial else {
            warn!(component = self.name(), "Ignoring non-object state update");
            return;
        };

        let mounted = {
            let mut guard = self.shared.instance.lock();
            let Instance { behavior, data } = &mut *guard;
            let prev_state = data.state.clone();
            data.state.extend(partial);
            behavior.on_update(&prev_state, &data.props);
            data.mounted
        };
        if mounted {
            self.render();
        }
    }

    /// Shallow-merges `partial` into the props, runs `on_update` and
    /// re-renders when mounted.
    pub fn set_props(&self, partial: Props) {
        let mounted = {
            let mut guard = self.shared.instance.lock();
            let Instance { behavior, data } = &mut *guard;
            let prev_props = data.props.clone();
            data.props.merge(partial);
            behavior.on_update(&data.state, &prev_props);
            data.mounted
        };
        if mounted {
            self.render();
        }
    }

    /// Attaches a listener and records it for release on unmount.
    ///
    /// Returns `None` when the target does not resolve.
    pub fn on<F>(&self, target: impl Into<Target>, event: &str, listener: F) -> Option<ListenerId>
    where
        F: Fn(&Self, &Event) + Send + Sync + 'static,
    {
        let weak = self.downgrade();
        let mut guard = self.shared.instance.lock();
        attach_listener(&self.shared.document, &mut guard.data, &weak, &target.into(), event, listener)
    }

    /// Dispatches a bubbling, composed custom event from the backing element.
    ///
    /// Does nothing when the instance is not rendered.
    pub fn emit(&self, event: &str, detail: Value) {
        let Some(element) = self.element() else {
            trace!(component = self.name(), event, "Emit on unrendered component skipped");
            return;
        };
        self.shared.document.dispatch_event(element, &Event::custom(event, detail));
    }

    /// Returns the first match of `selector` inside the backing element.
    #[must_use]
    pub fn query(&self, selector: &str) -> Option<NodeId> {
        let element = self.element()?;
        self.shared
            .document
            .query_selector(element, selector)
            .unwrap_or_else(|e| {
                warn!(component = self.name(), error = %e, "Invalid selector");
                None
            })
    }

    /// Returns every match of `selector` inside the backing element.
    #[must_use]
    pub fn query_all(&self, selector: &str) -> Vec<NodeId> {
        let Some(element) = self.element() else {
            return Vec::new();
        };
        self.shared
            .document
            .query_selector_all(element, selector)
            .unwrap_or_else(|e| {
                warn!(component = self.name(), error = %e, "Invalid selector");
                Vec::new()
            })
    }

    fn run_hook(&self, hook: HookKind) {
        let (name, result, deferred) = {
            let mut guard = self.shared.instance.lock();
            let Instance { behavior, data } = &mut *guard;
            let mut cx = Lifecycle::new(data, &self.shared.document, self.downgrade());
            let result = match hook {
                HookKind::Mount => behavior.on_mount(&mut cx),
                HookKind::Unmount => behavior.on_unmount(&mut cx),
            };
            let deferred = cx.into_deferred();
            (data.name, result, deferred)
        };

        if let Err(e) = result {
            warn!(component = name, hook = hook.as_str(), error = %e, "Component hook failed");
        }

        if let Some(partial) = deferred.state {
            self.set_state(Value::Object(partial));
        }
        for (event, detail) in deferred.events {
            self.emit(&event, detail);
        }
    }
}

fn default_class_name(name: &str, props: &Props) -> String {
    let base = kebab_case(name);
    match props.str("className").map(str::trim) {
        Some(extra) if !extra.is_empty() => format!("{base} {extra}"),
        _ => base,
    }
}

fn attach_listener<F>(
    document: &Document,
    data: &mut InstanceData,
    weak: &WeakComponentHandle,
    target: &Target,
    event: &str,
    listener: F,
) -> Option<ListenerId>
where
    F: Fn(&ComponentHandle, &Event) + Send + Sync + 'static,
{
    let node = match target {
        Target::Root => data.element,
        Target::Node(node) => Some(*node),
        Target::Selector(selector) => {
            let element = data.element?;
            document.query_selector(element, selector).unwrap_or_else(|e| {
                warn!(component = data.name, error = %e, "Invalid listener selector");
                None
            })
        }
    };
    let Some(node) = node else {
        debug!(component = data.name, target = %target, event, "Listener target not found");
        return None;
    };

    let weak = weak.clone();
    let id = document.add_listener(
        node,
        event,
        Arc::new(move |e: &Event| {
            if let Some(handle) = weak.upgrade() {
                listener(&handle, e);
            }
        }),
    )?;
    data.handlers.push(HandlerRecord {
        node,
        event: event.to_string(),
        listener: id,
    });
    Some(id)
}

#[derive(Default)]
struct Deferred {
    state: Option<State>,
    events: Vec<(String, Value)>,
}

/// Context handed to `on_mount` and `on_unmount`.
///
/// The instance stays locked while a hook runs, so the context exposes no
/// way to dispatch events. State updates and emitted events are deferred
/// until the hook returns.
pub struct Lifecycle<'a> {
    data: &'a mut InstanceData,
    document: &'a Document,
    weak: WeakComponentHandle,
    deferred: Deferred,
}

impl<'a> Lifecycle<'a> {
    fn new(data: &'a mut InstanceData, document: &'a Document, weak: WeakComponentHandle) -> Self {
        Self {
            data,
            document,
            weak,
            deferred: Deferred::default(),
        }
    }

    fn into_deferred(self) -> Deferred {
        self.deferred
    }

    /// Returns the component name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.data.name
    }

    /// Returns the current props.
    #[must_use]
    pub fn props(&self) -> &Props {
        &self.data.props
    }

    /// Returns the current state.
    #[must_use]
    pub fn state(&self) -> &State {
        &self.data.state
    }

    /// Returns the backing element.
    #[must_use]
    pub fn element(&self) -> Option<NodeId> {
        self.data.element
    }

    /// Attaches a recorded listener, see [`ComponentHandle::on`].
    pub fn on<F>(&mut self, target: impl Into<Target>, event: &str, listener: F) -> Option<ListenerId>
    where
        F: Fn(&ComponentHandle, &Event) + Send + Sync + 'static,
    {
        attach_listener(self.document, self.data, &self.weak, &target.into(), event, listener)
    }

    /// Sets an attribute on the backing element.
    pub fn set_attribute(&self, name: &str, value: &str) -> bool {
        self.data
            .element
            .is_some_and(|element| self.document.set_attribute(element, name, value))
    }

    /// Returns every match of `selector` inside the backing element.
    #[must_use]
    pub fn query_all(&self, selector: &str) -> Vec<NodeId> {
        self.data
            .element
            .and_then(|element| self.document.query_selector_all(element, selector).ok())
            .unwrap_or_default()
    }

    /// Queues a state update applied after the hook returns.
    pub fn set_state(&mut self, partial: Value) {
        let Value::Object(partial) = partial else {
            warn!(component = self.data.name, "Ignoring non-object state update");
            return;
        };
        self.deferred.state.get_or_insert_with(State::new).extend(partial);
    }

    /// Queues a custom event emitted after the hook returns.
    pub fn emit(&mut self, event: impl Into<String>, detail: Value) {
        self.deferred.events.push((event.into(), detail));
    }

    /// Starts an interval timer owned by the instance.
    ///
    /// The first tick fires one `period` after the call. Returns `None`
    /// outside a tokio runtime.
    pub fn set_interval<F>(&mut self, period: Duration, tick: F) -> Option<TimerId>
    where
        F: Fn(&ComponentHandle) + Send + Sync + 'static,
    {
        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            warn!(component = self.data.name, "No async runtime, interval not started");
            return None;
        };

        let weak = self.weak.clone();
        let task = runtime.spawn(async move {
            let start = tokio::time::Instant::now() + period;
            let mut ticker = tokio::time::interval_at(start, period);
            loop {
                ticker.tick().await;
                let Some(handle) = weak.upgrade() else {
                    break;
                };
                tick(&handle);
            }
        });

        let id = TimerId(self.data.next_timer);
        self.data.next_timer += 1;
        self.data.timers.insert(id, task.abort_handle());
        trace!(component = self.data.name, ?id, ?period, "Interval started");
        Some(id)
    }

    /// Stops a timer started with [`Self::set_interval`].
    pub fn clear_interval(&mut self, id: TimerId) -> bool {
        self.data.timers.remove(&id).is_some_and(|timer| {
            timer.abort();
            true
        })
    }
}
