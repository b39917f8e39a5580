//! Domain entity definitions.

mod view;

pub use view::{ControllerRef, ModalDescriptor, ModalId, ViewDescriptor, ViewId};
