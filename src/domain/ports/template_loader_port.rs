//! Template loader port definition.

use async_trait::async_trait;

use crate::domain::entities::{ModalId, ViewId};
use crate::domain::errors::ViewError;

/// Port that places view and modal markup into the document.
///
/// A successful load guarantees the markup exists under its conventional
/// container id.
#[async_trait]
pub trait TemplateLoaderPort: Send + Sync {
    /// Loads a view template into the views container.
    async fn load_view(&self, view: ViewId) -> Result<(), ViewError>;

    /// Loads a modal template into the modals container.
    async fn load_modal(&self, modal: ModalId) -> Result<(), ViewError>;

    /// Checks whether the view was already inserted.
    fn is_view_loaded(&self, view: ViewId) -> bool;

    /// Checks whether the modal was already inserted.
    fn is_modal_loaded(&self, modal: ModalId) -> bool;
}
