//! Component system: base trait and handle, registry, and the built-in
//! atoms, molecules and organisms.

pub mod atoms;
mod component;
pub mod format;
pub mod icons;
mod layout;
pub mod markup;
pub mod molecules;
pub mod organisms;
mod props;
mod registry;

pub use component::{
    Component, ComponentClass, ComponentDef, ComponentHandle, ComponentKind, Lifecycle, Target,
    TimerId, WeakComponentHandle,
};
pub use layout::{ComponentConfig, ViewLayout};
pub use props::{Callback, Props, State, truthy};
pub use registry::{ComponentRegistry, STYLE_ELEMENT_ID, init_components};
