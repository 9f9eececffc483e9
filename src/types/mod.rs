// src/types/mod.rs
//! Foundational domain types shared across the crate.

mod ids;

pub use ids::NotionId;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Validation failures for user-supplied input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid Notion ID format: {0}")]
    InvalidId(String),

    #[error("Invalid API key format: {0}")]
    InvalidApiKey(String),
}

/// A validated Notion integration API key.
///
/// The value is never logged or displayed; `Debug` shows a redacted form.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::InvalidApiKey("key is empty".to_string()));
        }
        if trimmed.contains(char::is_whitespace) {
            return Err(ValidationError::InvalidApiKey(
                "key contains whitespace".to_string(),
            ));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ApiKey(****)")
    }
}

/// One run of rich text as returned by the source API.
///
/// Only the plain-text projection matters to the feed; annotations and
/// mention payloads are dropped at the parsing boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct RichTextItem {
    pub plain_text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
}

impl RichTextItem {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            plain_text: text.into(),
            href: None,
        }
    }
}

/// Concatenates the plain-text runs of a rich-text sequence.
pub fn concat_plain_text(items: &[RichTextItem]) -> String {
    items.iter().map(|t| t.plain_text.as_str()).collect()
}
