use async_trait::async_trait;
use itf_config::translator::TranslatorConfig;
use reqwest::StatusCode;
use serde::Deserialize;

use crate::{ProviderMetadata, TranslateError, Translation, Translator};

#[derive(Deserialize)]
struct ChatCompletion {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: Option<ChoiceMessage>,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: Option<ErrorDetail>,
}

#[derive(Deserialize)]
struct ErrorDetail {
    message: Option<String>,
}

/// OpenAI-compatible chat completions client, DeepSeek by default
#[derive(Clone)]
pub struct DeepSeekTranslator {
    client: reqwest::Client,
    api_key: String,
    api_url: String,
    model: String,
    target_lang: String,
    temperature: f32,
}

impl DeepSeekTranslator {
    pub fn new(config: &TranslatorConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: config.api_key.clone(),
            api_url: config.api_url.clone(),
            model: config.model.clone(),
            target_lang: config.target_lang.clone(),
            temperature: config.temperature,
        }
    }

    fn system_prompt(&self) -> String {
        format!(
            "You are a professional, authentic translation engine. Translate the user-provided \
             text to {lang}. Output only the translated text, without any explanations or extra \
             content. The target language is {lang}.",
            lang = self.target_lang
        )
    }

    pub fn request_body(&self, text: &str) -> serde_json::Value {
        serde_json::json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": self.system_prompt() },
                { "role": "user", "content": text },
            ],
            "stream": false,
            "temperature": self.temperature,
        })
    }
}

/// Trimmed content of the first choice
pub fn parse_completion(body: &str) -> Result<String, TranslateError> {
    let completion: ChatCompletion =
        serde_json::from_str(body).map_err(|_| TranslateError::InvalidResponse)?;

    completion
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message)
        .and_then(|message| message.content)
        .map(|content| content.trim().to_string())
        .filter(|content| !content.is_empty())
        .ok_or(TranslateError::InvalidResponse)
}

/// Error for a non-success response; the body's `error.message` wins
pub fn error_for_status(status: StatusCode, body: &str) -> TranslateError {
    let message = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.error)
        .and_then(|e| e.message);

    match (message, status) {
        (Some(message), _) => TranslateError::ApiError(message),
        (None, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN) => {
            TranslateError::AuthenticationError
        }
        (None, StatusCode::TOO_MANY_REQUESTS) => TranslateError::RateLimitExceeded,
        (None, status) => {
            TranslateError::ApiError(format!("HTTP error! status: {}", status.as_u16()))
        }
    }
}

#[async_trait]
impl Translator for DeepSeekTranslator {
    async fn translate(&self, text: &str) -> Result<Translation, TranslateError> {
        if self.api_key.is_empty() {
            return Err(TranslateError::MissingApiKey);
        }

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&self.request_body(text))
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(error_for_status(status, &body));
        }

        let translated = parse_completion(&body)?;
        tracing::debug!("Translated {} chars into {} chars", text.len(), translated.len());

        Ok(Translation {
            text: translated,
            to: self.target_lang.clone(),
            provider: "deepseek".to_string(),
        })
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            name: "DeepSeek".to_string(),
            requires_api_key: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn translator(api_key: &str) -> DeepSeekTranslator {
        let mut config = TranslatorConfig::default();
        config.api_key = api_key.to_string();
        DeepSeekTranslator::new(&config)
    }

    #[test]
    fn body_carries_prompt_and_text() {
        let body = translator("k").request_body("Foo bar baz.");
        assert_eq!(body["model"], "deepseek-chat");
        assert_eq!(body["stream"], false);
        assert_eq!(body["messages"][1]["content"], "Foo bar baz.");
        let prompt = body["messages"][0]["content"].as_str().unwrap();
        assert!(prompt.contains("Simplified Chinese"));
    }

    #[test]
    fn deepseek_needs_a_key() {
        let metadata = translator("").metadata();
        assert_eq!(metadata.name, "DeepSeek");
        assert!(metadata.requires_api_key);
    }

    #[test]
    fn completion_content_is_trimmed() {
        let body = r#"{"choices":[{"message":{"role":"assistant","content":"  你好 \n"}}]}"#;
        assert_eq!(parse_completion(body).unwrap(), "你好");
    }

    #[test]
    fn empty_completion_is_invalid() {
        let bodies = [
            r#"{"choices":[]}"#,
            r#"{"choices":[{"message":{"content":"  "}}]}"#,
            "nope",
        ];
        for body in bodies {
            assert!(matches!(
                parse_completion(body),
                Err(TranslateError::InvalidResponse)
            ));
        }
    }

    #[test]
    fn error_message_from_body() {
        let err = error_for_status(
            StatusCode::PAYMENT_REQUIRED,
            r#"{"error":{"message":"Insufficient Balance"}}"#,
        );
        assert_eq!(err.to_string(), "Insufficient Balance");

        let err = error_for_status(StatusCode::BAD_GATEWAY, "<html>");
        assert_eq!(err.to_string(), "HTTP error! status: 502");

        assert!(matches!(
            error_for_status(StatusCode::UNAUTHORIZED, ""),
            TranslateError::AuthenticationError
        ));
    }

    #[tokio::test]
    async fn missing_key_fails_without_network() {
        let err = translator("").translate("hello").await.unwrap_err();
        assert!(matches!(err, TranslateError::MissingApiKey));
        assert!(err.to_string().starts_with("API key is not set"));
    }
}
