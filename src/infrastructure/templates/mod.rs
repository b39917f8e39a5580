//! Template loading: sources and the document-inserting loader.

mod fs_source;
mod http_source;
mod loader;

pub use fs_source::FsTemplateSource;
pub use http_source::HttpTemplateSource;
pub use loader::{MODALS_CONTAINER_ID, TemplateLoader, VIEWS_CONTAINER_ID};
