//! # untract
//!
//! Flatten document-analysis block graphs into key/value fields and
//! line items.
//!
//! A document-analysis service (Amazon Textract's `AnalyzeDocument`
//! shape) reports each scanned page as a flat list of typed blocks
//! linked by typed relationships. This library reassembles that graph
//! into the two artifacts downstream systems actually want: a map of
//! extracted fields keyed by query alias, and structured line items
//! recovered from the page's detail table.
//!
//! ## Quick Start
//!
//! ```
//! use untract::flatten_part;
//!
//! let body = br#"{"Blocks": [
//!     {"Id": "q1", "BlockType": "QUERY",
//!      "Query": {"Alias": "invoice_number"},
//!      "Relationships": [{"Type": "ANSWER", "Ids": ["r1"]}]},
//!     {"Id": "r1", "BlockType": "QUERY_RESULT",
//!      "Text": "INV-001", "Confidence": 98.2}
//! ]}"#;
//!
//! let output = flatten_part(body, "INV001-scan.pdf")?;
//! assert_eq!(output.document_ref, "INV001");
//! assert_eq!(output.fields["invoice_number"].confidence, "98.2%");
//! # Ok::<(), untract::Error>(())
//! ```
//!
//! ## What it handles
//!
//! - **Answer graphs**: discrete query extractions resolved through
//!   `ANSWER` relationships, with optimistic confidence aggregation
//! - **Spanning cells**: row/column grids reconstructed from cells that
//!   cover multiple grid positions
//! - **Arbitrary headers**: heuristic mapping of table columns onto a
//!   canonical line-item schema
//! - **Locale noise**: `"1,234.56"` and `"12,5"` both parse; anything
//!   unparseable degrades to absent instead of failing the batch
//!
//! Batch processing over a blob store lives in [`pipeline`]; the store
//! itself is only known through the [`store::BlobStore`] seam.

pub mod error;
pub mod extract;
pub mod model;
pub mod pipeline;
pub mod store;
pub mod vendor;

// Re-export commonly used types
pub use error::{Error, Result};
pub use extract::{flatten_blocks, BlockIndex, ExtractedTable, FieldTag, Flattened};
pub use model::{
    AnalysisResult, Block, BlockType, FieldValue, JsonFormat, KvEntry, LineItem, PartOutput,
    QueryInfo, Relationship, RelationshipType, SelectionStatus,
};
pub use pipeline::{document_ref, ProcessOptions, Processor};
pub use store::{BlobStore, FsStore, MemoryStore};
pub use vendor::{QueryConfig, QuerySpec, VendorMatcher, VendorRule};

/// Parse one part body into its block list.
///
/// Fails only on malformed JSON; a body without a `Blocks` array parses
/// as empty and is reported by [`flatten_part`].
pub fn parse_part(bytes: &[u8]) -> Result<AnalysisResult> {
    Ok(serde_json::from_slice(bytes)?)
}

/// Parse and flatten one part body into its output object.
///
/// `file_name` is the document's canonical file name, used to derive
/// the `documentRef` correlation id.
///
/// # Errors
///
/// Returns [`Error::EmptyAnalysis`] when the part carries no blocks,
/// or a JSON error when the body is malformed.
pub fn flatten_part(bytes: &[u8], file_name: &str) -> Result<PartOutput> {
    let result = parse_part(bytes)?;
    if result.is_empty() {
        return Err(Error::EmptyAnalysis);
    }
    let flattened = flatten_blocks(&result.blocks);
    Ok(PartOutput {
        fields: flattened.fields,
        document_ref: document_ref(file_name),
        lineitems: flattened.line_items,
    })
}
