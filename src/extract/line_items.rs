//! Header classification and line-item mapping.

use super::numeric::{percent, to_float, to_int};
use super::tables::ExtractedTable;
use crate::model::LineItem;

/// Canonical line-item fields, in the order columns are claimed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldTag {
    /// Item identifier
    Id,
    /// Item description
    Description,
    /// Quantity
    Quantity,
    /// Line amount
    Amount,
    /// Amount excluding GST
    AmountExGst,
    /// GST portion
    AmountGst,
    /// Amount including GST
    AmountIncGst,
}

impl FieldTag {
    /// Every tag, in claim order.
    pub const ALL: [FieldTag; 7] = [
        FieldTag::Id,
        FieldTag::Description,
        FieldTag::Quantity,
        FieldTag::Amount,
        FieldTag::AmountExGst,
        FieldTag::AmountGst,
        FieldTag::AmountIncGst,
    ];

    /// Header keywords that bind a column to this field. A header
    /// matches when it contains any keyword, case-insensitively.
    pub fn keywords(self) -> &'static [&'static str] {
        match self {
            FieldTag::Id => &["id", "item code", "sku", "product code", "item no"],
            FieldTag::Description => {
                &["description of supply", "description", "item", "details", "product"]
            }
            FieldTag::Quantity => &["qty", "quantity", "q'ty"],
            FieldTag::Amount => &["amount", "total", "line total", "price"],
            FieldTag::AmountExGst => {
                &["ex gst", "excluding gst", "excl gst", "amount ex gst", "net"]
            }
            FieldTag::AmountGst => &["gst", "tax"],
            FieldTag::AmountIncGst => {
                &["inc gst", "including gst", "incl gst", "amount inc gst", "gross"]
            }
        }
    }
}

/// Headers that mark a table as holding item descriptions.
const SUBJECT_KEYWORDS: [&str; 3] = ["description", "item", "product"];

/// Headers that mark a table as holding monetary columns.
const MONEY_KEYWORDS: [&str; 4] = ["amount", "price", "total", "gst"];

/// Pick the detail table for line-item mapping.
///
/// The first table, in document order, whose headers mention both an
/// item-ish and a money-ish keyword wins; otherwise the first table of
/// the page. Pages without tables yield no line items.
pub fn select_table(tables: &[ExtractedTable]) -> Option<&ExtractedTable> {
    tables
        .iter()
        .find(|t| {
            let joined = t.headers.join(" ").to_lowercase();
            SUBJECT_KEYWORDS.iter().any(|k| joined.contains(k))
                && MONEY_KEYWORDS.iter().any(|k| joined.contains(k))
        })
        .or_else(|| tables.first())
}

/// Map each retained row of the selected table onto a [`LineItem`].
pub fn map_line_items(table: &ExtractedTable) -> Vec<LineItem> {
    let lower: Vec<String> = table.headers.iter().map(|h| h.to_lowercase()).collect();
    let column_of = |tag: FieldTag| {
        lower
            .iter()
            .position(|h| tag.keywords().iter().any(|k| h.contains(k)))
    };

    let col_id = column_of(FieldTag::Id);
    let col_desc = column_of(FieldTag::Description);
    let col_qty = column_of(FieldTag::Quantity);
    let col_amount = column_of(FieldTag::Amount);
    let col_ex_gst = column_of(FieldTag::AmountExGst);
    let col_gst = column_of(FieldTag::AmountGst);
    let col_inc_gst = column_of(FieldTag::AmountIncGst);

    let mut items = Vec::new();
    for row in &table.rows {
        let fetch = |column: Option<usize>| -> (String, Option<f64>) {
            column
                .and_then(|i| table.headers.get(i))
                .and_then(|label| row.get(label))
                .map(|cell| (cell.text.trim().to_string(), cell.confidence))
                .unwrap_or_default()
        };

        let (id_text, id_conf) = fetch(col_id);
        let (desc_text, desc_conf) = fetch(col_desc);
        let (qty_text, qty_conf) = fetch(col_qty);
        let (amount_text, amount_conf) = fetch(col_amount);
        let (ex_text, ex_conf) = fetch(col_ex_gst);
        let (gst_text, gst_conf) = fetch(col_gst);
        let (inc_text, inc_conf) = fetch(col_inc_gst);

        if id_text.is_empty()
            && desc_text.is_empty()
            && qty_text.is_empty()
            && amount_text.is_empty()
            && ex_text.is_empty()
            && gst_text.is_empty()
            && inc_text.is_empty()
        {
            continue;
        }

        let best = [
            id_conf,
            desc_conf,
            qty_conf,
            amount_conf,
            ex_conf,
            gst_conf,
            inc_conf,
        ]
        .into_iter()
        .flatten()
        .reduce(f64::max);

        items.push(LineItem {
            id: (!id_text.is_empty()).then_some(id_text),
            description: desc_text,
            quantity: to_int(&qty_text),
            amount: to_float(&amount_text),
            amount_ex_gst: to_float(&ex_text),
            amount_gst: to_float(&gst_text),
            amount_inc_gst: to_float(&inc_text),
            confidence: percent(best),
        });
    }

    log::debug!(
        "mapped {} line items from {} rows",
        items.len(),
        table.rows.len()
    );
    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::tables::CellValue;
    use std::collections::HashMap;

    fn table(headers: &[&str], rows: Vec<Vec<(&str, Option<f64>)>>) -> ExtractedTable {
        let headers: Vec<String> = headers.iter().map(|h| h.to_string()).collect();
        let rows = rows
            .into_iter()
            .map(|cells| {
                let mut row = HashMap::new();
                for (label, (text, confidence)) in headers.iter().zip(cells) {
                    row.insert(
                        label.clone(),
                        CellValue {
                            text: text.to_string(),
                            confidence,
                        },
                    );
                }
                row
            })
            .collect();
        ExtractedTable {
            header_confidences: vec![None; headers.len()],
            headers,
            rows,
        }
    }

    #[test]
    fn test_maps_invoice_columns() {
        let t = table(
            &["Item Code", "Description", "Qty", "Amount"],
            vec![vec![
                ("A-1", Some(99.0)),
                ("Widget", Some(98.0)),
                ("3", Some(97.0)),
                ("$10.50", Some(96.0)),
            ]],
        );
        let items = map_line_items(&t);

        assert_eq!(items.len(), 1);
        let item = &items[0];
        assert_eq!(item.id.as_deref(), Some("A-1"));
        assert_eq!(item.description, "Widget");
        assert_eq!(item.quantity, Some(3));
        assert_eq!(item.amount, Some(10.5));
        assert_eq!(item.confidence, "99.0%");
    }

    #[test]
    fn test_gst_column_split() {
        let t = table(
            &["Description", "Ex GST", "GST", "Inc GST"],
            vec![vec![
                ("Service", None),
                ("100.00", Some(90.0)),
                ("10.00", Some(91.0)),
                ("110.00", Some(92.0)),
            ]],
        );
        let item = &map_line_items(&t)[0];
        assert_eq!(item.amount_ex_gst, Some(100.0));
        assert_eq!(item.amount_gst, Some(10.0));
        assert_eq!(item.amount_inc_gst, Some(110.0));
        assert_eq!(item.confidence, "92.0%");
    }

    #[test]
    fn test_unmapped_columns_default() {
        let t = table(&["Description"], vec![vec![("Only text", None)]]);
        let item = &map_line_items(&t)[0];
        assert_eq!(item.id, None);
        assert_eq!(item.quantity, None);
        assert_eq!(item.amount, None);
        assert_eq!(item.confidence, "");
    }

    #[test]
    fn test_all_empty_fields_skip_row() {
        let t = table(
            &["Description", "Amount"],
            vec![
                vec![("", None), ("", None)],
                vec![("Widget", None), ("5.00", None)],
            ],
        );
        let items = map_line_items(&t);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].description, "Widget");
    }

    #[test]
    fn test_unparseable_amount_degrades_to_absent() {
        let t = table(
            &["Description", "Amount"],
            vec![vec![("Widget", None), ("n/a", None)]],
        );
        let item = &map_line_items(&t)[0];
        assert_eq!(item.description, "Widget");
        assert_eq!(item.amount, None);
    }

    #[test]
    fn test_select_table_prefers_qualified() {
        let notes = table(&["Notes"], vec![]);
        let detail = table(&["Description", "Amount"], vec![]);
        let tables = vec![notes, detail];
        let selected = select_table(&tables).unwrap();
        assert_eq!(selected.headers, ["Description", "Amount"]);
    }

    #[test]
    fn test_select_table_falls_back_to_first() {
        let first = table(&["Notes"], vec![]);
        let second = table(&["Remarks"], vec![]);
        let tables = vec![first, second];
        let selected = select_table(&tables).unwrap();
        assert_eq!(selected.headers, ["Notes"]);
    }

    #[test]
    fn test_select_table_empty_page() {
        assert!(select_table(&[]).is_none());
    }

    #[test]
    fn test_first_matching_header_wins_per_field() {
        // "total" appears in two headers; Amount binds to the leftmost.
        let t = table(
            &["Total Qty", "Description", "Total"],
            vec![vec![("2", None), ("Widget", None), ("20.00", None)]],
        );
        let item = &map_line_items(&t)[0];
        // "Total Qty" contains both "qty" and "total": Quantity and
        // Amount each claim it independently.
        assert_eq!(item.quantity, Some(2));
        assert_eq!(item.amount, Some(2.0));
    }

    #[test]
    fn test_keyword_tables_cover_all_tags() {
        for tag in FieldTag::ALL {
            assert!(!tag.keywords().is_empty());
        }
    }
}
