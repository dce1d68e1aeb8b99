use serde::{Deserialize, Serialize};

use crate::types::CardId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslateRequest {
    pub id: CardId,
    pub text: String,
    pub context: String,
}

impl TranslateRequest {
    /// Text the translation engine should see: context when present, else the text
    pub fn query(&self) -> &str {
        if self.context.trim().is_empty() {
            &self.text
        } else {
            &self.context
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslateResponse {
    pub id: CardId,
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl TranslateResponse {
    pub fn ok(id: CardId, result: impl Into<String>) -> Self {
        Self {
            id,
            success: true,
            result: Some(result.into()),
            error: None,
        }
    }

    pub fn failed(id: CardId, error: impl Into<String>) -> Self {
        Self {
            id,
            success: false,
            result: None,
            error: Some(error.into()),
        }
    }

    /// Collapse into the text to display, or the error message
    pub fn into_outcome(self) -> Result<String, String> {
        if self.success {
            Ok(self.result.unwrap_or_default())
        } else {
            Err(self.error.unwrap_or_else(|| "Unknown error".to_string()))
        }
    }
}

/// Messages exchanged between the page side and the background worker
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum WireMessage {
    Translate(TranslateRequest),
    TranslationResult(TranslateResponse),
}
