//! Port definitions.

mod controller_port;
mod template_loader_port;
mod template_source_port;

pub use controller_port::{ControllerLoaderPort, ControllerModule, Hook, HookContext, HookFuture};
pub use template_loader_port::TemplateLoaderPort;
pub use template_source_port::TemplateSource;
