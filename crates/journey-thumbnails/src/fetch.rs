use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{debug, warn};

use crate::cache::ImageCache;

/// Downloads remote images, going to the disk cache first.
#[derive(Clone)]
pub struct ImageFetcher {
    http: reqwest::Client,
    cache: Arc<ImageCache>,
}

impl ImageFetcher {
    pub fn new(cache: ImageCache) -> Self {
        Self {
            http: reqwest::Client::new(),
            cache: Arc::new(cache),
        }
    }

    pub async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        let cache = self.cache.clone();
        let key = url.to_string();
        let cached = tokio::task::spawn_blocking(move || cache.load(&key))
            .await
            .context("cache lookup task")?;
        if let Some(bytes) = cached {
            debug!(url, "image cache hit");
            return Ok(bytes);
        }

        let response = self
            .http
            .get(url)
            .send()
            .await
            .with_context(|| format!("request {url}"))?
            .error_for_status()
            .with_context(|| format!("download {url}"))?;
        let bytes = response.bytes().await.context("read image body")?.to_vec();

        let cache = self.cache.clone();
        let key = url.to_string();
        let data = bytes.clone();
        match tokio::task::spawn_blocking(move || cache.store(&key, &data)).await {
            Ok(Ok(_)) => {}
            Ok(Err(err)) => warn!(url, %err, "failed to cache image"),
            Err(err) => warn!(url, %err, "cache store task failed"),
        }
        Ok(bytes)
    }
}
