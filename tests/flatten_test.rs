//! Integration tests for the flattening engine.

use untract::{flatten_part, FieldValue};

/// One page as the analysis service reports it: a query with its
/// answer, and a two-column detail table with a tagged header row.
const INVOICE_PART: &[u8] = br#"{
    "Blocks": [
        {"Id": "p1", "BlockType": "PAGE",
         "Relationships": [{"Type": "CHILD", "Ids": ["q1", "t1"]}]},
        {"Id": "q1", "BlockType": "QUERY",
         "Query": {"Alias": "invoice_number", "Text": "What is the invoice number?"},
         "Relationships": [{"Type": "ANSWER", "Ids": ["qr1"]}]},
        {"Id": "qr1", "BlockType": "QUERY_RESULT", "Text": "INV-001", "Confidence": 98.2},
        {"Id": "t1", "BlockType": "TABLE", "Confidence": 99.0,
         "Relationships": [{"Type": "CHILD", "Ids": ["c11", "c12", "c21", "c22"]}]},
        {"Id": "c11", "BlockType": "CELL", "RowIndex": 1, "ColumnIndex": 1,
         "EntityTypes": ["COLUMN_HEADER"],
         "Relationships": [{"Type": "CHILD", "Ids": ["w1"]}]},
        {"Id": "c12", "BlockType": "CELL", "RowIndex": 1, "ColumnIndex": 2,
         "EntityTypes": ["COLUMN_HEADER"],
         "Relationships": [{"Type": "CHILD", "Ids": ["w2"]}]},
        {"Id": "c21", "BlockType": "CELL", "RowIndex": 2, "ColumnIndex": 1,
         "Relationships": [{"Type": "CHILD", "Ids": ["w3"]}]},
        {"Id": "c22", "BlockType": "CELL", "RowIndex": 2, "ColumnIndex": 2,
         "Relationships": [{"Type": "CHILD", "Ids": ["w4"]}]},
        {"Id": "w1", "BlockType": "WORD", "Text": "Description", "Confidence": 99.5},
        {"Id": "w2", "BlockType": "WORD", "Text": "Amount", "Confidence": 99.1},
        {"Id": "w3", "BlockType": "WORD", "Text": "Widget", "Confidence": 98.7},
        {"Id": "w4", "BlockType": "WORD", "Text": "10.00", "Confidence": 97.9}
    ]
}"#;

#[test]
fn end_to_end_invoice_part() {
    let output = flatten_part(INVOICE_PART, "INV001-scan.pdf").unwrap();

    let entry = &output.fields["invoice_number"];
    assert_eq!(entry.value, FieldValue::text("INV-001"));
    assert_eq!(entry.confidence, "98.2%");

    assert_eq!(output.document_ref, "INV001");

    assert_eq!(output.lineitems.len(), 1);
    let item = &output.lineitems[0];
    assert_eq!(item.description, "Widget");
    assert_eq!(item.amount, Some(10.0));
    assert_eq!(item.quantity, None);
    assert_eq!(item.confidence, "98.7%");
}

#[test]
fn end_to_end_wire_shape() {
    let output = flatten_part(INVOICE_PART, "INV001-scan.pdf").unwrap();
    let json: serde_json::Value =
        serde_json::from_str(&output.to_json(untract::JsonFormat::Compact).unwrap()).unwrap();

    assert_eq!(json["invoice_number"]["value"], "INV-001");
    assert_eq!(json["invoice_number"]["confidence"], "98.2%");
    assert_eq!(json["documentRef"], "INV001");
    assert_eq!(json["lineitems"][0]["description"], "Widget");
    assert_eq!(json["lineitems"][0]["amount"], 10.0);
    assert!(json["lineitems"][0]["quantity"].is_null());
    assert_eq!(json["lineitems"][0]["_confidence"], "98.7%");
}

#[test]
fn dangling_relationship_ids_never_fail() {
    let body = br#"{
        "Blocks": [
            {"Id": "q1", "BlockType": "QUERY",
             "Query": {"Alias": "total"},
             "Relationships": [{"Type": "ANSWER", "Ids": ["gone"]}]},
            {"Id": "t1", "BlockType": "TABLE",
             "Relationships": [{"Type": "CHILD", "Ids": ["also-gone"]}]}
        ]
    }"#;

    let output = flatten_part(body, "doc-1.pdf").unwrap();
    assert!(output.fields.is_empty());
    assert!(output.lineitems.is_empty());
}

#[test]
fn detail_table_preferred_over_notes_table() {
    let body = br#"{
        "Blocks": [
            {"Id": "t1", "BlockType": "TABLE",
             "Relationships": [{"Type": "CHILD", "Ids": ["n11", "n21"]}]},
            {"Id": "n11", "BlockType": "CELL", "RowIndex": 1, "ColumnIndex": 1,
             "Relationships": [{"Type": "CHILD", "Ids": ["nw1"]}]},
            {"Id": "n21", "BlockType": "CELL", "RowIndex": 2, "ColumnIndex": 1,
             "Relationships": [{"Type": "CHILD", "Ids": ["nw2"]}]},
            {"Id": "nw1", "BlockType": "WORD", "Text": "Notes", "Confidence": 90.0},
            {"Id": "nw2", "BlockType": "WORD", "Text": "Handle with care", "Confidence": 90.0},
            {"Id": "t2", "BlockType": "TABLE",
             "Relationships": [{"Type": "CHILD", "Ids": ["c11", "c12", "c21", "c22"]}]},
            {"Id": "c11", "BlockType": "CELL", "RowIndex": 1, "ColumnIndex": 1,
             "Relationships": [{"Type": "CHILD", "Ids": ["w1"]}]},
            {"Id": "c12", "BlockType": "CELL", "RowIndex": 1, "ColumnIndex": 2,
             "Relationships": [{"Type": "CHILD", "Ids": ["w2"]}]},
            {"Id": "c21", "BlockType": "CELL", "RowIndex": 2, "ColumnIndex": 1,
             "Relationships": [{"Type": "CHILD", "Ids": ["w3"]}]},
            {"Id": "c22", "BlockType": "CELL", "RowIndex": 2, "ColumnIndex": 2,
             "Relationships": [{"Type": "CHILD", "Ids": ["w4"]}]},
            {"Id": "w1", "BlockType": "WORD", "Text": "Description", "Confidence": 99.0},
            {"Id": "w2", "BlockType": "WORD", "Text": "Amount", "Confidence": 99.0},
            {"Id": "w3", "BlockType": "WORD", "Text": "Bolt", "Confidence": 99.0},
            {"Id": "w4", "BlockType": "WORD", "Text": "2.50", "Confidence": 99.0}
        ]
    }"#;

    let output = flatten_part(body, "doc-1.pdf").unwrap();
    assert_eq!(output.lineitems.len(), 1);
    assert_eq!(output.lineitems[0].description, "Bolt");
    assert_eq!(output.lineitems[0].amount, Some(2.5));
}

#[test]
fn spanning_header_cell_labels_both_columns() {
    // A header cell spanning two columns gives both columns the same
    // label; the data row then keeps only the rightmost value.
    let body = br#"{
        "Blocks": [
            {"Id": "t1", "BlockType": "TABLE",
             "Relationships": [{"Type": "CHILD", "Ids": ["h", "d1", "d2"]}]},
            {"Id": "h", "BlockType": "CELL", "RowIndex": 1, "ColumnIndex": 1,
             "ColumnSpan": 2, "EntityTypes": ["COLUMN_HEADER"],
             "Relationships": [{"Type": "CHILD", "Ids": ["w1"]}]},
            {"Id": "d1", "BlockType": "CELL", "RowIndex": 2, "ColumnIndex": 1,
             "Relationships": [{"Type": "CHILD", "Ids": ["w2"]}]},
            {"Id": "d2", "BlockType": "CELL", "RowIndex": 2, "ColumnIndex": 2,
             "Relationships": [{"Type": "CHILD", "Ids": ["w3"]}]},
            {"Id": "w1", "BlockType": "WORD", "Text": "Item", "Confidence": 95.0},
            {"Id": "w2", "BlockType": "WORD", "Text": "left", "Confidence": 95.0},
            {"Id": "w3", "BlockType": "WORD", "Text": "right", "Confidence": 95.0}
        ]
    }"#;

    let output = flatten_part(body, "doc-1.pdf").unwrap();
    assert_eq!(output.lineitems.len(), 1);
    assert_eq!(output.lineitems[0].description, "right");
}

#[test]
fn selection_elements_render_in_cells() {
    let body = br#"{
        "Blocks": [
            {"Id": "t1", "BlockType": "TABLE",
             "Relationships": [{"Type": "CHILD", "Ids": ["c11", "c12", "c21", "c22"]}]},
            {"Id": "c11", "BlockType": "CELL", "RowIndex": 1, "ColumnIndex": 1,
             "Relationships": [{"Type": "CHILD", "Ids": ["w1"]}]},
            {"Id": "c12", "BlockType": "CELL", "RowIndex": 1, "ColumnIndex": 2,
             "Relationships": [{"Type": "CHILD", "Ids": ["w2"]}]},
            {"Id": "c21", "BlockType": "CELL", "RowIndex": 2, "ColumnIndex": 1,
             "Relationships": [{"Type": "CHILD", "Ids": ["w3"]}]},
            {"Id": "c22", "BlockType": "CELL", "RowIndex": 2, "ColumnIndex": 2,
             "Relationships": [{"Type": "CHILD", "Ids": ["s1"]}]},
            {"Id": "w1", "BlockType": "WORD", "Text": "Description", "Confidence": 95.0},
            {"Id": "w2", "BlockType": "WORD", "Text": "Paid Amount", "Confidence": 95.0},
            {"Id": "w3", "BlockType": "WORD", "Text": "Deposit", "Confidence": 95.0},
            {"Id": "s1", "BlockType": "SELECTION_ELEMENT",
             "SelectionStatus": "NOT_SELECTED", "Confidence": 88.0}
        ]
    }"#;

    let output = flatten_part(body, "doc-1.pdf").unwrap();
    let item = &output.lineitems[0];
    assert_eq!(item.description, "Deposit");
    // "[ ]" carries no digits, so the amount degrades to absent
    assert_eq!(item.amount, None);
}

#[test]
fn numeric_alias_coercion_in_full_output() {
    let body = br#"{
        "Blocks": [
            {"Id": "q1", "BlockType": "QUERY",
             "Query": {"Alias": "amount_inc_gst"},
             "Relationships": [{"Type": "ANSWER", "Ids": ["r1"]}]},
            {"Id": "r1", "BlockType": "QUERY_RESULT", "Text": "$1,210.00", "Confidence": 95.5}
        ]
    }"#;

    let output = flatten_part(body, "doc-1.pdf").unwrap();
    let json = serde_json::to_value(&output).unwrap();
    assert_eq!(json["amount_inc_gst"]["value"], 1210.0);
    assert_eq!(json["amount_inc_gst"]["confidence"], "95.5%");
}
