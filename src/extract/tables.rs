//! Table reconstruction from spanning cells.
//!
//! The analysis service reports a table as a bag of CELL blocks carrying
//! 1-based grid positions and spans. This module expands every cell over
//! its full extent into a sparse grid, derives one header label per
//! column, and emits the remaining rows keyed by those labels.

use std::collections::{BTreeSet, HashMap};

use super::BlockIndex;
use crate::model::{Block, BlockType, RelationshipType, SelectionStatus};

/// Text and confidence of one grid position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CellValue {
    /// Space-joined child text, trimmed
    pub text: String,

    /// Mean confidence of the contributing children, else the cell's own
    pub confidence: Option<f64>,
}

/// A reconstructed table.
#[derive(Debug, Clone, Default)]
pub struct ExtractedTable {
    /// One label per column, left to right
    pub headers: Vec<String>,

    /// Mean header-cell confidence per column
    pub header_confidences: Vec<Option<f64>>,

    /// Non-header rows, keyed by header label
    pub rows: Vec<HashMap<String, CellValue>>,
}

impl ExtractedTable {
    /// Whether the table retained any data rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of columns.
    pub fn column_count(&self) -> usize {
        self.headers.len()
    }
}

/// Reconstruct every TABLE block on the page, in document order.
pub fn extract_tables(blocks: &[Block], index: &BlockIndex) -> Vec<ExtractedTable> {
    blocks
        .iter()
        .filter(|b| b.block_type == BlockType::Table)
        .map(|table| extract_table(table, index))
        .collect()
}

fn extract_table(table: &Block, index: &BlockIndex) -> ExtractedTable {
    let cells: Vec<&Block> = table
        .related_ids(RelationshipType::Child)
        .filter_map(|id| index.get(id))
        .filter(|b| b.block_type == BlockType::Cell)
        .collect();

    // Expand each cell over its span extent. Overlapping extents are
    // last-write-wins; the service does not emit well-formed overlaps
    // and the quirk is part of the observable contract.
    let mut grid: HashMap<(u32, u32), CellValue> = HashMap::new();
    let mut header_rows: BTreeSet<u32> = BTreeSet::new();
    let mut max_row = 0u32;
    let mut max_col = 0u32;

    for cell in &cells {
        let row = cell.row_index.unwrap_or(0);
        let col = cell.column_index.unwrap_or(0);
        let row_span = cell.row_span.unwrap_or(1).max(1);
        let col_span = cell.column_span.unwrap_or(1).max(1);
        let value = cell_value(cell, index);

        if cell.is_column_header() {
            header_rows.insert(row);
        }
        for r in row..row + row_span {
            for c in col..col + col_span {
                grid.insert((r, c), value.clone());
            }
        }
        max_row = max_row.max(row + row_span - 1);
        max_col = max_col.max(col + col_span - 1);
    }

    // No tagged header cells: row 1 is the header by convention.
    if header_rows.is_empty() && max_row >= 1 {
        header_rows.insert(1);
    }

    let mut headers = Vec::with_capacity(max_col as usize);
    let mut header_confidences = Vec::with_capacity(max_col as usize);
    for col in 1..=max_col {
        let mut parts: Vec<&str> = Vec::new();
        let mut confidences: Vec<f64> = Vec::new();
        for &row in &header_rows {
            if let Some(cell) = grid.get(&(row, col)) {
                if !cell.text.is_empty() {
                    parts.push(&cell.text);
                }
                if let Some(c) = cell.confidence {
                    confidences.push(c);
                }
            }
        }
        let label = if parts.is_empty() {
            format!("col_{}", col)
        } else {
            parts.join(" ").trim().to_string()
        };
        headers.push(label);
        header_confidences.push(mean(&confidences));
    }

    let mut rows = Vec::new();
    for row in 1..=max_row {
        if header_rows.contains(&row) {
            continue;
        }
        let mut any_text = false;
        let mut row_map: HashMap<String, CellValue> = HashMap::with_capacity(max_col as usize);
        for col in 1..=max_col {
            let value = grid.get(&(row, col)).cloned().unwrap_or_default();
            if !value.text.is_empty() {
                any_text = true;
            }
            // Duplicate header labels collide here; the rightmost column wins.
            row_map.insert(headers[(col - 1) as usize].clone(), value);
        }
        if any_text {
            rows.push(row_map);
        }
    }

    log::debug!(
        "table reconstructed: {} columns, {} data rows, header rows {:?}",
        max_col,
        rows.len(),
        header_rows
    );

    ExtractedTable {
        headers,
        header_confidences,
        rows,
    }
}

/// Text and confidence of one cell, computed from its CHILD blocks.
fn cell_value(cell: &Block, index: &BlockIndex) -> CellValue {
    let mut texts: Vec<&str> = Vec::new();
    let mut confidences: Vec<f64> = Vec::new();

    for id in cell.related_ids(RelationshipType::Child) {
        let Some(child) = index.get(id) else {
            continue;
        };
        match child.block_type {
            BlockType::Word => {
                if let Some(text) = child.text.as_deref() {
                    if !text.is_empty() {
                        texts.push(text);
                    }
                }
                if let Some(c) = child.confidence {
                    confidences.push(c);
                }
            }
            BlockType::SelectionElement => {
                texts.push(match child.selection_status {
                    Some(SelectionStatus::Selected) => "[X]",
                    _ => "[ ]",
                });
                if let Some(c) = child.confidence {
                    confidences.push(c);
                }
            }
            _ => {}
        }
    }

    let confidence = mean(&confidences).or(cell.confidence);
    CellValue {
        text: texts.join(" ").trim().to_string(),
        confidence,
    }
}

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}
