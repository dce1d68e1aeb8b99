use std::time::Duration;

use async_trait::async_trait;
use moka::future::Cache;
use unicode_normalization::UnicodeNormalization;

use crate::{ProviderMetadata, TranslateError, Translation, Translator};

/// Keeps successful translations in memory for a fixed time.
///
/// Keys are NFC-normalised so differently composed input shares an entry.
pub struct CachedTranslator<T> {
    inner: T,
    cache: Cache<String, Translation>,
}

impl<T: Translator> CachedTranslator<T> {
    pub fn new(inner: T, ttl: Duration, capacity: u64) -> Self {
        let cache = Cache::builder()
            .max_capacity(capacity)
            .time_to_live(ttl)
            .build();

        Self { inner, cache }
    }

    pub fn inner(&self) -> &T {
        &self.inner
    }
}

#[async_trait]
impl<T: Translator> Translator for CachedTranslator<T> {
    async fn translate(&self, text: &str) -> Result<Translation, TranslateError> {
        let key: String = text.nfc().collect();

        if let Some(hit) = self.cache.get(&key).await {
            tracing::debug!("Cache hit for {} chars", key.len());
            return Ok(hit);
        }

        let translation = self.inner.translate(text).await?;
        self.cache.insert(key, translation.clone()).await;
        Ok(translation)
    }

    fn metadata(&self) -> ProviderMetadata {
        self.inner.metadata()
    }
}
