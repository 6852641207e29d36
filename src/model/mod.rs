//! Data model for analysis-output flattening.
//!
//! The input side mirrors the analysis service's wire format (blocks and
//! relationships); the output side is the flattened contract consumed by
//! downstream systems (key/value entries and line items).

mod block;
mod line_item;
mod output;

pub use block::{
    AnalysisResult, Block, BlockType, QueryInfo, Relationship, RelationshipType, SelectionStatus,
};
pub use line_item::LineItem;
pub use output::{FieldValue, JsonFormat, KvEntry, PartOutput};
