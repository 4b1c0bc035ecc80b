//! Spreadsheet bulk-import mapping for products.
//!
//! The importer delivers rows already keyed by field name (header matching
//! happens in the frontend widget); this module parses and validates each
//! row, splitting the batch into a bulk-create payload and a downloadable
//! error report.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::aggregate::{normalize_barcode, ProductDraft};

/// Fixed import columns: `(field name, spreadsheet header)`.
pub const COLUMNS: &[(&str, &str)] = &[
    ("name", "NAME"),
    ("stock", "STOCK"),
    ("barcode", "BARCODE"),
    ("buyingPrice", "BUYING PRICE"),
    ("sellingPrice", "SELLING PRICE"),
    ("reorderStockLevel", "REORDER STOCK LEVEL"),
    ("position", "POSITION"),
    ("cifRate", "COST INSURANCE AND FREIGHT (RATE)"),
];

/// One rejected row of the import, reported back to the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowError {
    /// 1-based data row number (excluding the header row).
    pub row: usize,
    pub reason: String,
}

/// Split outcome of a bulk import.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImportOutcome {
    pub valid: Vec<ProductDraft>,
    pub failed: Vec<RowError>,
}

fn parse_number(row: &HashMap<String, String>, field: &str) -> Result<f64, String> {
    let raw = row.get(field).map(String::as_str).unwrap_or("").trim();
    if raw.is_empty() {
        return Ok(0.0);
    }
    raw.replace(',', "")
        .parse::<f64>()
        .map_err(|_| format!("{} is not a number: '{}'", field, raw))
}

/// Map one spreadsheet row to a product draft.
pub fn map_row(row: &HashMap<String, String>) -> Result<ProductDraft, String> {
    let text = |field: &str| row.get(field).cloned().unwrap_or_default();
    let draft = ProductDraft {
        name: text("name").trim().to_string(),
        barcode: normalize_barcode(&text("barcode")),
        stock: parse_number(row, "stock")?,
        buying_price: parse_number(row, "buyingPrice")?,
        selling_price: parse_number(row, "sellingPrice")?,
        reorder_stock_level: parse_number(row, "reorderStockLevel")?,
        position: text("position").trim().to_string(),
        cif_rate: parse_number(row, "cifRate")?,
    };
    if let Err(report) = draft.validate(false) {
        let reasons: Vec<&str> = report.errors().iter().map(|e| e.message.as_str()).collect();
        return Err(reasons.join("; "));
    }
    Ok(draft)
}

/// Validate every row; invalid rows go to the error report, valid rows form
/// the single bulk-create payload.
pub fn map_rows(rows: &[HashMap<String, String>]) -> ImportOutcome {
    let mut outcome = ImportOutcome::default();
    for (index, row) in rows.iter().enumerate() {
        match map_row(row) {
            Ok(draft) => outcome.valid.push(draft),
            Err(reason) => outcome.failed.push(RowError {
                row: index + 1,
                reason,
            }),
        }
    }
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(fields: &[(&str, &str)]) -> HashMap<String, String> {
        fields
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn valid_row_maps_to_draft() {
        let draft = map_row(&row(&[
            ("name", "Sugar 1kg"),
            ("stock", "25"),
            ("barcode", " 616-1100530067 "),
            ("buyingPrice", "1,000"),
            ("sellingPrice", "1200"),
            ("reorderStockLevel", "5"),
            ("position", "A3"),
            ("cifRate", ""),
        ]))
        .unwrap();
        assert_eq!(draft.barcode, "6161100530067");
        assert_eq!(draft.buying_price, 1000.0);
        assert_eq!(draft.cif_rate, 0.0);
    }

    #[test]
    fn bad_rows_go_to_the_error_report() {
        let rows = vec![
            row(&[("name", "Soap"), ("sellingPrice", "500")]),
            row(&[("name", ""), ("sellingPrice", "500")]),
            row(&[("name", "Salt"), ("sellingPrice", "abc")]),
        ];
        let outcome = map_rows(&rows);
        assert_eq!(outcome.valid.len(), 1);
        assert_eq!(outcome.failed.len(), 2);
        assert_eq!(outcome.failed[0].row, 2);
        assert!(outcome.failed[0].reason.contains("name is required"));
        assert!(outcome.failed[1].reason.contains("not a number"));
    }
}
