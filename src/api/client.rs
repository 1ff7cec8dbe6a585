/// Blocking HTTP client for the random-image API.
///
/// Uses the synchronous `ureq` client, one request per call. Non-2xx
/// statuses come back from `ureq` as errors, so every method either returns a
/// fully parsed body or an error with the failing URL in its context.
use std::time::Duration;

use anyhow::{Context, Result};

use super::endpoints::Origin;
use super::types::{
    Category, CategoryCount, JsonImage, Orientation, ResponseMode, ServiceStatus, TypeCatalog,
};
use super::ImageApi;
use crate::config::DashConfig;

/// HTTP implementation of [`ImageApi`].
#[derive(Debug, Clone)]
pub struct HttpApi {
    origin: Origin,
    timeout: Duration,
}

impl HttpApi {
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        Self {
            origin: Origin::new(base_url),
            timeout,
        }
    }

    /// Build a client from the resolved config.
    pub fn from_config(config: &DashConfig) -> Self {
        Self::new(
            &config.server.base_url,
            Duration::from_millis(config.server.timeout_ms),
        )
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T> {
        let resp = ureq::get(url)
            .timeout(self.timeout)
            .call()
            .with_context(|| format!("request to {url} failed"))?;

        resp.into_json()
            .with_context(|| format!("failed to parse JSON from {url}"))
    }
}

impl ImageApi for HttpApi {
    fn origin(&self) -> &Origin {
        &self.origin
    }

    fn fetch_types(&self) -> Result<TypeCatalog> {
        self.get_json(&self.origin.types_url())
    }

    fn fetch_status(&self) -> Result<ServiceStatus> {
        let value: serde_json::Value = self.get_json(&self.origin.status_url())?;
        if !value.is_object() {
            anyhow::bail!("status payload is not a JSON object");
        }
        Ok(ServiceStatus::from_value(value))
    }

    fn fetch_count(&self, category: &Category) -> Result<CategoryCount> {
        self.get_json(&self.origin.count_url(category))
    }

    fn fetch_json_image(
        &self,
        category: &Category,
        orientation: Option<Orientation>,
    ) -> Result<JsonImage> {
        let url = self
            .origin
            .random_image_url(ResponseMode::Json, category, orientation);
        self.get_json(&url)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
