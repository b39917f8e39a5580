//! HTTP template source.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, header};
use tracing::{debug, warn};

use crate::domain::errors::ViewError;
use crate::domain::ports::TemplateSource;

const USER_AGENT: &str = concat!("homeboard/", env!("CARGO_PKG_VERSION"));

/// Fetches templates from a web server, bypassing HTTP caches.
///
/// Every request carries a `?v=<token>` query. The token is fixed for the
/// lifetime of the source so a session sees consistent markup, while a new
/// session picks up edited templates.
pub struct HttpTemplateSource {
    client: Client,
    base_url: String,
    cache_buster: String,
}

impl HttpTemplateSource {
    /// Creates a source for `base_url`.
    ///
    /// Uses `cache_buster` when given, otherwise the current timestamp.
    ///
    /// # Errors
    /// Returns error if HTTP client creation fails.
    pub fn new(base_url: impl Into<String>, cache_buster: Option<String>) -> Result<Self, ViewError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(15))
            .build()
            .map_err(|e| ViewError::fetch("", format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            cache_buster: cache_buster
                .unwrap_or_else(|| chrono::Utc::now().timestamp_millis().to_string()),
        })
    }

    /// Returns the cache-busting token in use.
    #[must_use]
    pub fn cache_buster(&self) -> &str {
        &self.cache_buster
    }

    pub(crate) fn url_for(&self, path: &str) -> String {
        format!(
            "{}/{}?v={}",
            self.base_url,
            path.trim_start_matches('/'),
            self.cache_buster
        )
    }
}

#[async_trait]
impl TemplateSource for HttpTemplateSource {
    async fn fetch(&self, path: &str) -> Result<String, ViewError> {
        let url = self.url_for(path);
        debug!(%url, "Fetching template");

        let response = self
            .client
            .get(&url)
            .header(header::CACHE_CONTROL, "no-cache")
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, %url, "Template request failed");
                if e.is_timeout() {
                    ViewError::fetch(path, "request timed out")
                } else if e.is_connect() {
                    ViewError::fetch(path, "failed to connect")
                } else {
                    ViewError::fetch(path, e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ViewError::fetch(path, format!("HTTP {status}")));
        }

        response
            .text()
            .await
            .map_err(|e| ViewError::fetch(path, format!("failed to read body: {e}")))
    }
}
