//! Input graph types.
//!
//! These mirror the wire shape of the analysis service's JSON output
//! (Amazon Textract `AnalyzeDocument` format): one flat list of typed
//! blocks per page, linked by typed relationships. All fields are
//! defaulted so partial or malformed blocks never fail deserialization.

use serde::{Deserialize, Serialize};

/// One part of an analysis result: the flat block list for a page.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Every block detected on the page.
    #[serde(rename = "Blocks", default)]
    pub blocks: Vec<Block>,
}

impl AnalysisResult {
    /// Check whether the part carried any blocks at all.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Number of blocks of the given type.
    pub fn count_of(&self, block_type: BlockType) -> usize {
        self.blocks
            .iter()
            .filter(|b| b.block_type == block_type)
            .count()
    }
}

/// Atomic node of the analysis result graph.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct Block {
    /// Identifier, unique within one page
    pub id: Option<String>,

    /// What kind of node this is
    pub block_type: BlockType,

    /// Recognized text, where applicable
    pub text: Option<String>,

    /// Extraction confidence, 0-100
    pub confidence: Option<f64>,

    /// Ordered, typed edges to other blocks
    pub relationships: Option<Vec<Relationship>>,

    /// Query definition (QUERY blocks only)
    pub query: Option<QueryInfo>,

    /// Entity tags such as `COLUMN_HEADER`
    pub entity_types: Option<Vec<String>>,

    /// 1-based row position (CELL blocks only)
    pub row_index: Option<u32>,

    /// 1-based column position (CELL blocks only)
    pub column_index: Option<u32>,

    /// Rows covered by this cell, >= 1
    pub row_span: Option<u32>,

    /// Columns covered by this cell, >= 1
    pub column_span: Option<u32>,

    /// Checkbox state (SELECTION_ELEMENT blocks only)
    pub selection_status: Option<SelectionStatus>,
}

impl Block {
    /// Create a block of the given type with everything else unset.
    pub fn new(block_type: BlockType) -> Self {
        Self {
            block_type,
            ..Default::default()
        }
    }

    /// Set the id and return self.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set the text and return self.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Set the confidence and return self.
    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = Some(confidence);
        self
    }

    /// Add a relationship and return self.
    pub fn with_relationship(mut self, rel_type: RelationshipType, ids: Vec<String>) -> Self {
        self.relationships
            .get_or_insert_with(Vec::new)
            .push(Relationship { rel_type, ids });
        self
    }

    /// Ids referenced by relationships of the given type, in order.
    pub fn related_ids(&self, kind: RelationshipType) -> impl Iterator<Item = &str> {
        self.relationships
            .as_deref()
            .unwrap_or(&[])
            .iter()
            .filter(move |r| r.rel_type == kind)
            .flat_map(|r| r.ids.iter().map(String::as_str))
    }

    /// Whether this cell is tagged as part of a header row.
    pub fn is_column_header(&self) -> bool {
        self.entity_types
            .as_deref()
            .unwrap_or(&[])
            .iter()
            .any(|e| e == "COLUMN_HEADER")
    }
}

/// Block kinds consumed by the engine; everything else passes through
/// as [`BlockType::Unknown`] and is ignored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BlockType {
    /// Page container
    Page,
    /// Line of words
    Line,
    /// Single word
    Word,
    /// Table container
    Table,
    /// Table cell
    Cell,
    /// Merged table cell
    MergedCell,
    /// Form key/value container
    KeyValueSet,
    /// Checkbox or radio button
    SelectionElement,
    /// Discrete field query
    Query,
    /// Answer to a query
    QueryResult,
    /// Detected signature
    Signature,
    /// Any block type this engine does not consume
    #[default]
    #[serde(other)]
    Unknown,
}

/// Directed, typed edge from one block to others.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Relationship {
    /// Edge type
    #[serde(rename = "Type")]
    pub rel_type: RelationshipType,

    /// Referenced block ids, order preserved
    #[serde(rename = "Ids", default)]
    pub ids: Vec<String>,
}

/// Relationship kinds; `CHILD` is structural containment, `ANSWER`
/// links a query to its results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RelationshipType {
    /// Structural containment
    Child,
    /// Query-to-result linkage
    Answer,
    /// Merged-cell membership
    MergedCell,
    /// Key to value linkage in forms
    Value,
    /// Any relationship type this engine does not consume
    #[default]
    #[serde(other)]
    Unknown,
}

/// Query definition attached to a QUERY block.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct QueryInfo {
    /// Logical name used as the output key
    pub alias: Option<String>,

    /// The natural-language question
    pub text: Option<String>,
}

/// Checkbox state of a SELECTION_ELEMENT block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SelectionStatus {
    /// The checkbox is ticked
    Selected,
    /// The checkbox is empty
    NotSelected,
}
