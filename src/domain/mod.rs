//! Domain layer with the document model, view entities and port definitions.

/// In-process document model.
pub mod dom;
/// Entity definitions.
pub mod entities;
/// Error types.
pub mod errors;
/// Port definitions.
pub mod ports;
/// Static view and modal registry.
pub mod view_registry;

pub use dom::{Document, Event, NodeId};
pub use entities::{ControllerRef, ModalId, ViewDescriptor, ViewId};
pub use errors::{ActionError, ComponentError, DomError, ViewError};
pub use ports::{ControllerLoaderPort, TemplateLoaderPort, TemplateSource};
pub use view_registry::ViewRegistry;
