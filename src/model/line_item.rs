//! Canonical line-item record.

use serde::{Deserialize, Serialize};

/// One record derived from a row of the selected detail table.
///
/// Field names are part of the output contract; downstream systems parse
/// them directly. Absent values serialize as `null`, and `description`
/// is always present (empty string when the column is missing).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    /// Item identifier, absent when no id column matched
    pub id: Option<String>,

    /// Item description, empty when no description column matched
    pub description: String,

    /// Quantity, truncated toward zero
    pub quantity: Option<i64>,

    /// Line amount
    pub amount: Option<f64>,

    /// Amount excluding GST
    pub amount_ex_gst: Option<f64>,

    /// GST portion
    pub amount_gst: Option<f64>,

    /// Amount including GST
    pub amount_inc_gst: Option<f64>,

    /// Formatted percentage of the most confident contributing cell,
    /// empty when no cell carried a confidence
    #[serde(rename = "_confidence")]
    pub confidence: String,
}
