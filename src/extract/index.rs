//! Id-to-block lookup.

use std::collections::HashMap;

use crate::model::Block;

/// Lookup table from block id to block, scoped to one part.
///
/// Built in a single linear pass. Blocks without an id are skipped; they
/// cannot be referenced by a relationship. A relationship naming an id
/// that is absent from the index contributes nothing — never an error.
pub struct BlockIndex<'a> {
    by_id: HashMap<&'a str, &'a Block>,
}

impl<'a> BlockIndex<'a> {
    /// Build the index over one part's blocks.
    pub fn build(blocks: &'a [Block]) -> Self {
        let mut by_id = HashMap::with_capacity(blocks.len());
        for block in blocks {
            if let Some(id) = block.id.as_deref() {
                by_id.insert(id, block);
            }
        }
        Self { by_id }
    }

    /// Resolve an id to its block, if known.
    pub fn get(&self, id: &str) -> Option<&'a Block> {
        self.by_id.get(id).copied()
    }

    /// Number of addressable blocks.
    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    /// Whether the index holds no blocks.
    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}
