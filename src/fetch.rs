//! Image downloads
//!
//! Every consumer of a campaign image (library persistence, packaging) downloads it from
//! the record's `image_url`. `ImageSource` is the seam; `HttpImageSource` does the real
//! GET and `CachedImageSource` shares successful downloads within one run.

use crate::error::StorageError;
use async_trait::async_trait;
use bytes::Bytes;
use parking_lot::Mutex;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;
use tracing::debug;

/// HTTP settings for image downloads
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Per-download timeout in seconds
    #[serde(default = "default_download_timeout_secs")]
    pub download_timeout_secs: u64,
}

fn default_download_timeout_secs() -> u64 {
    30
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            download_timeout_secs: default_download_timeout_secs(),
        }
    }
}

impl HttpConfig {
    pub fn download_timeout(&self) -> Duration {
        Duration::from_secs(self.download_timeout_secs)
    }
}

/// Anything that can turn an image URL into bytes
#[async_trait]
pub trait ImageSource: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<Bytes, StorageError>;
}

/// Plain HTTP GET with a fixed timeout. No content-type negotiation.
pub struct HttpImageSource {
    client: Client,
}

impl HttpImageSource {
    pub fn new(timeout: Duration) -> Result<Self, StorageError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| StorageError::ClientInit(e.to_string()))?;
        Ok(Self { client })
    }

    pub fn from_config(config: &HttpConfig) -> Result<Self, StorageError> {
        Self::new(config.download_timeout())
    }
}

#[async_trait]
impl ImageSource for HttpImageSource {
    async fn fetch(&self, url: &str) -> Result<Bytes, StorageError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| StorageError::FetchFailed {
                url: url.to_string(),
                reason: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(StorageError::FetchStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response.bytes().await.map_err(|e| StorageError::FetchFailed {
            url: url.to_string(),
            reason: e.to_string(),
        })
    }
}

/// Per-run cache keyed by URL. Failures are not cached, so a later consumer retries.
pub struct CachedImageSource<S> {
    inner: S,
    cache: Mutex<HashMap<String, Bytes>>,
}

impl<S: ImageSource> CachedImageSource<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            cache: Mutex::new(HashMap::new()),
        }
    }

    #[cfg(test)]
    fn cached_len(&self) -> usize {
        self.cache.lock().len()
    }
}

#[async_trait]
impl<S: ImageSource> ImageSource for CachedImageSource<S> {
    async fn fetch(&self, url: &str) -> Result<Bytes, StorageError> {
        let cached = self.cache.lock().get(url).cloned();
        if let Some(bytes) = cached {
            debug!(url, "Image cache hit");
            return Ok(bytes);
        }

        let bytes = self.inner.fetch(url).await?;
        self.cache.lock().insert(url.to_string(), bytes.clone());
        Ok(bytes)
    }
}
