// src/model/properties.rs
//! Typed database row properties.
//!
//! Each row of a queried database carries a bag of named properties; the
//! feed shows them on page cards and uses the first numeric one to order
//! rows. The variants cover the property types the source API emits for
//! gallery-style databases.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A named, typed property on a database row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyEntry {
    pub name: String,
    pub value: PropertyValue,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// The typed value of a database row property.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum PropertyValue {
    Text(String),
    Number(f64),
    Checkbox(bool),
    Date {
        start: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        end: Option<String>,
    },
    Select(String),
    MultiSelect(Vec<String>),
    Status(String),
    Url(String),
    Email(String),
    Phone(String),
    People(Vec<String>),
    CreatedTime(DateTime<Utc>),
    EditedTime(DateTime<Utc>),
    /// The property exists on the row but holds no value.
    Empty,
}

impl PropertyValue {
    /// The numeric projection, if this value sorts numerically.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }
}

/// The first numeric property of a row's property bag, used for row ordering.
pub fn first_numeric(properties: &[PropertyEntry]) -> Option<f64> {
    properties.iter().find_map(|p| p.value.as_number())
}
