//! Filesystem template source.

use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;
use tracing::debug;

use crate::domain::errors::ViewError;
use crate::domain::ports::TemplateSource;

/// Reads templates from a local directory.
#[derive(Debug, Clone)]
pub struct FsTemplateSource {
    root: PathBuf,
}

impl FsTemplateSource {
    /// Creates a source rooted at `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl TemplateSource for FsTemplateSource {
    async fn fetch(&self, path: &str) -> Result<String, ViewError> {
        let full_path = self.root.join(path);
        debug!(path = %full_path.display(), "Reading template");
        fs::read_to_string(&full_path)
            .await
            .map_err(|e| ViewError::fetch(path, e.to_string()))
    }
}
