//! Deterministic translator for tests and offline runs

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use crate::{ProviderMetadata, TranslateError, Translation, Translator};

#[derive(Debug, Clone)]
pub enum MockMode {
    /// "hello" → "hello_<suffix>"
    Suffix(String),
    /// Fixed answers; unknown input fails
    Mappings(HashMap<String, String>),
    /// Every call fails with this message
    Error(String),
}

#[derive(Debug)]
pub struct MockTranslator {
    mode: MockMode,
    delay: Option<Duration>,
    calls: AtomicUsize,
}

impl MockTranslator {
    pub fn new(mode: MockMode) -> Self {
        Self {
            mode,
            delay: None,
            calls: AtomicUsize::new(0),
        }
    }

    /// Simulate network latency
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Number of translate calls so far
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Translator for MockTranslator {
    async fn translate(&self, text: &str) -> Result<Translation, TranslateError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let translated = match &self.mode {
            MockMode::Suffix(suffix) => format!("{text}_{suffix}"),
            MockMode::Mappings(map) => map
                .get(text)
                .cloned()
                .ok_or_else(|| TranslateError::ApiError(format!("No mapping for {text:?}")))?,
            MockMode::Error(message) => return Err(TranslateError::ApiError(message.clone())),
        };

        Ok(Translation {
            text: translated,
            to: "mock".to_string(),
            provider: "mock".to_string(),
        })
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            name: "Mock".to_string(),
            requires_api_key: false,
        }
    }
}
