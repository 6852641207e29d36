//! Output object types.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::LineItem;
use crate::error::{Error, Result};

/// Value of one extracted field.
///
/// Whether an alias carries text or a number is decided once, by the
/// alias-based coercion rule, when the output is assembled; the wire
/// shape stays a bare `string`, `number`, or `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Numeric field; `None` when the text failed numeric parsing
    Number(Option<f64>),
    /// Free-text field
    Text(String),
}

impl FieldValue {
    /// Create a text value.
    pub fn text(s: impl Into<String>) -> Self {
        FieldValue::Text(s.into())
    }

    /// Create a numeric value.
    pub fn number(n: impl Into<Option<f64>>) -> Self {
        FieldValue::Number(n.into())
    }

    /// The text content, if this is a text value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            FieldValue::Number(_) => None,
        }
    }

    /// The numeric content, if this is a parsed number.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) => *n,
            FieldValue::Text(_) => None,
        }
    }
}

/// One entry of the key/value output map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KvEntry {
    /// Extracted value
    pub value: FieldValue,

    /// Formatted percentage, empty when no confidence was reported
    pub confidence: String,
}

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// The output object written for one part file.
///
/// Serializes as a single flat map: one entry per resolved query alias,
/// plus the two reserved keys `documentRef` and `lineitems`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PartOutput {
    /// Resolved query aliases and their values
    #[serde(flatten)]
    pub fields: BTreeMap<String, KvEntry>,

    /// Correlation id derived from the document file name
    #[serde(rename = "documentRef")]
    pub document_ref: String,

    /// Records from the selected detail table
    pub lineitems: Vec<LineItem>,
}

impl PartOutput {
    /// Serialize the output object.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        let result = match format {
            JsonFormat::Pretty => serde_json::to_string_pretty(self),
            JsonFormat::Compact => serde_json::to_string(self),
        };
        result.map_err(Error::from)
    }
}
