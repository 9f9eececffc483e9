// src/types/ids.rs
//! Normalized Notion object identifiers.
//!
//! The Notion API accepts ids in several spellings (bare 32-char hex, dashed
//! UUID, or embedded in a notion.so URL). `NotionId` normalizes all of them
//! to the bare lowercase hex form so cache keys and equality checks are
//! spelling-independent.

use super::ValidationError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// A Notion object id, stored in canonical non-hyphenated lowercase hex.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NotionId(String);

impl NotionId {
    /// Parses a bare hex id, a dashed UUID, or a notion.so URL.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let cleaned = input.trim().trim_end_matches('/');

        if let Ok(uuid) = Uuid::parse_str(cleaned) {
            return Ok(NotionId(uuid.as_simple().to_string()));
        }

        if cleaned.len() == 32 && cleaned.chars().all(|c| c.is_ascii_hexdigit()) {
            return Ok(NotionId(cleaned.to_lowercase()));
        }

        if cleaned.starts_with("http://") || cleaned.starts_with("https://") {
            return Self::extract_from_url(cleaned);
        }

        Err(ValidationError::InvalidId(format!(
            "could not parse Notion id from: {input}"
        )))
    }

    fn extract_from_url(url: &str) -> Result<Self, ValidationError> {
        lazy_static::lazy_static! {
            static ref ID_REGEX: Regex = Regex::new(
                r"([a-fA-F0-9]{32}|[a-fA-F0-9]{8}-[a-fA-F0-9]{4}-[a-fA-F0-9]{4}-[a-fA-F0-9]{4}-[a-fA-F0-9]{12})(?:[/?#]|$)"
            ).expect("Notion id regex must compile");
        }

        if let Some(m) = ID_REGEX.captures(url).and_then(|c| c.get(1)) {
            let hex = m.as_str().replace('-', "");
            if hex.len() == 32 {
                return Ok(NotionId(hex.to_lowercase()));
            }
        }

        Err(ValidationError::InvalidId(format!(
            "no valid id found in URL: {url}"
        )))
    }

    /// The canonical non-hyphenated id.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The hyphenated UUID spelling the HTTP API expects in paths.
    pub fn to_hyphenated(&self) -> String {
        format!(
            "{}-{}-{}-{}-{}",
            &self.0[0..8],
            &self.0[8..12],
            &self.0[12..16],
            &self.0[16..20],
            &self.0[20..32]
        )
    }
}

impl fmt::Display for NotionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for NotionId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for NotionId {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        NotionId::parse(&s).map_err(serde::de::Error::custom)
    }
}
