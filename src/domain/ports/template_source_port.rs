//! Template source port definition.

use async_trait::async_trait;

use crate::domain::errors::ViewError;

/// Port for fetching raw template markup by path.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TemplateSource: Send + Sync {
    /// Fetches the markup stored at `path`.
    async fn fetch(&self, path: &str) -> Result<String, ViewError>;
}
