//! The flattening engine.
//!
//! Order of operations over one part's blocks: build the id index,
//! resolve query answers into the key/value map, reconstruct every
//! table, pick the detail table, and map its rows onto line items.
//! Nothing here fails on malformed input — dangling ids and unparseable
//! numbers degrade to empty contributions.

mod index;
mod line_items;
mod numeric;
mod queries;
mod tables;

pub use index::BlockIndex;
pub use line_items::{map_line_items, select_table, FieldTag};
pub use numeric::{percent, to_float, to_int};
pub use queries::{collect_query_answers, QueryAnswer};
pub use tables::{extract_tables, CellValue, ExtractedTable};

use std::collections::BTreeMap;

use crate::model::{Block, FieldValue, KvEntry, LineItem};

/// Aliases whose values are forced through numeric parsing, compared
/// case-insensitively. Everything else stays text.
const NUMERIC_ALIASES: [&str; 3] = ["amount_inc_gst", "amount_ex_gst", "amount_gst"];

/// The flattened form of one part, before the document reference and
/// output envelope are attached.
#[derive(Debug, Clone, Default)]
pub struct Flattened {
    /// Resolved query aliases
    pub fields: BTreeMap<String, KvEntry>,

    /// Records from the selected detail table
    pub line_items: Vec<LineItem>,
}

/// Run the full flattening pass over one part's blocks.
pub fn flatten_blocks(blocks: &[Block]) -> Flattened {
    let index = BlockIndex::build(blocks);

    let mut fields = BTreeMap::new();
    for (alias, answer) in collect_query_answers(blocks, &index) {
        let value = if NUMERIC_ALIASES.contains(&alias.to_lowercase().as_str()) {
            FieldValue::Number(to_float(&answer.text))
        } else {
            FieldValue::Text(answer.text)
        };
        fields.insert(
            alias,
            KvEntry {
                value,
                confidence: percent(answer.confidence),
            },
        );
    }

    let tables = extract_tables(blocks, &index);
    log::debug!(
        "flattened part: {} fields, {} tables",
        fields.len(),
        tables.len()
    );

    let line_items = select_table(&tables).map(map_line_items).unwrap_or_default();

    Flattened { fields, line_items }
}
