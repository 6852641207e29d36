//! Query-answer resolution.

use std::collections::BTreeMap;

use super::BlockIndex;
use crate::model::{Block, BlockType, RelationshipType};

/// Resolved answer for one query alias.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryAnswer {
    /// Answer texts in relationship order, space-joined
    pub text: String,

    /// Maximum confidence over the contributing answers
    pub confidence: Option<f64>,
}

/// Resolve every QUERY block on the page into an alias-keyed answer map.
///
/// The alias falls back from `Query.Alias` to `Query.Text` to the
/// literal `"unknown"`. Confidence is the maximum over the answers, not
/// the mean: each answer is a discrete extraction, not an aggregate
/// span. Queries with no non-empty answer text are omitted, and a later
/// QUERY reusing an alias overwrites the earlier entry.
pub fn collect_query_answers(
    blocks: &[Block],
    index: &BlockIndex,
) -> BTreeMap<String, QueryAnswer> {
    let mut out = BTreeMap::new();

    for block in blocks {
        if block.block_type != BlockType::Query {
            continue;
        }

        let alias = block
            .query
            .as_ref()
            .and_then(|q| {
                q.alias
                    .as_deref()
                    .filter(|s| !s.is_empty())
                    .or_else(|| q.text.as_deref().filter(|s| !s.is_empty()))
            })
            .unwrap_or("unknown")
            .to_string();

        let mut texts: Vec<&str> = Vec::new();
        let mut confidences: Vec<f64> = Vec::new();
        for id in block.related_ids(RelationshipType::Answer) {
            let Some(answer) = index.get(id) else {
                continue;
            };
            if answer.block_type != BlockType::QueryResult {
                continue;
            }
            if let Some(text) = answer.text.as_deref() {
                let text = text.trim();
                if !text.is_empty() {
                    texts.push(text);
                }
            }
            if let Some(c) = answer.confidence {
                confidences.push(c);
            }
        }

        if texts.is_empty() {
            log::debug!("query {:?} resolved no answer text", alias);
            continue;
        }

        let confidence = confidences.into_iter().reduce(f64::max);
        out.insert(
            alias,
            QueryAnswer {
                text: texts.join(" "),
                confidence,
            },
        );
    }

    out
}
