pub mod cache;
pub mod deepseek;
pub mod mock;

pub use cache::CachedTranslator;
pub use deepseek::DeepSeekTranslator;
pub use mock::{MockMode, MockTranslator};

/// Translation provider interface
#[async_trait::async_trait]
pub trait Translator: Send + Sync {
    /// Translate text into the provider's configured target language
    async fn translate(&self, text: &str) -> Result<Translation, TranslateError>;

    /// Provider metadata
    fn metadata(&self) -> ProviderMetadata;
}

#[async_trait::async_trait]
impl<T: Translator + ?Sized> Translator for std::sync::Arc<T> {
    async fn translate(&self, text: &str) -> Result<Translation, TranslateError> {
        (**self).translate(text).await
    }

    fn metadata(&self) -> ProviderMetadata {
        (**self).metadata()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Translation {
    pub text: String,
    pub to: String,
    pub provider: String,
}

#[derive(Debug, Clone)]
pub struct ProviderMetadata {
    pub name: String,
    pub requires_api_key: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum TranslateError {
    #[error("{0}")]
    ApiError(String),

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("API key is not set. Please configure it in the settings profile.")]
    MissingApiKey,

    #[error("Authentication error")]
    AuthenticationError,

    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    #[error("Invalid API response structure or empty translation.")]
    InvalidResponse,
}
