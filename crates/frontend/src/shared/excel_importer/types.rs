use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One expected column of an import template.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnDef {
    /// Field name the value lands under.
    pub field_name: String,
    /// Header text expected in the first row of the file.
    pub title: String,
}

impl ColumnDef {
    pub fn new(field_name: &str, title: &str) -> Self {
        Self {
            field_name: field_name.to_string(),
            title: title.to_string(),
        }
    }
}

/// How one expected column matched against the file headers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnMapping {
    pub expected: String,
    pub found: Option<String>,
    pub file_index: Option<usize>,
}

/// Parsed spreadsheet: header mapping plus rows keyed by field name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExcelData {
    pub file_name: String,
    pub rows: Vec<HashMap<String, String>>,
    pub column_mapping: Vec<ColumnMapping>,
    pub file_headers: Vec<String>,
}

impl ExcelData {
    /// Map raw cell data (first row is the header row) onto the expected
    /// columns. Header matching is case-insensitive but otherwise exact;
    /// rows where every mapped cell is empty are dropped.
    pub fn from_raw(
        raw_data: Vec<Vec<String>>,
        columns: &[ColumnDef],
        file_name: String,
    ) -> Result<Self, String> {
        if raw_data.is_empty() {
            return Err("the file is empty".to_string());
        }

        let headers = &raw_data[0];
        let file_headers: Vec<String> = headers.iter().map(|h| h.trim().to_string()).collect();

        let mut header_indices: HashMap<String, usize> = HashMap::new();
        for (idx, header) in headers.iter().enumerate() {
            header_indices.insert(header.trim().to_lowercase(), idx);
        }

        let mut column_mapping = Vec::new();
        for col_def in columns {
            let title_lower = col_def.title.trim().to_lowercase();
            match header_indices.get(&title_lower) {
                Some(&col_idx) => column_mapping.push(ColumnMapping {
                    expected: col_def.title.clone(),
                    found: Some(headers[col_idx].trim().to_string()),
                    file_index: Some(col_idx),
                }),
                None => column_mapping.push(ColumnMapping {
                    expected: col_def.title.clone(),
                    found: None,
                    file_index: None,
                }),
            }
        }

        let mut rows = Vec::new();
        for row in raw_data.iter().skip(1) {
            let mut row_data = HashMap::new();
            for (col_def, mapping) in columns.iter().zip(column_mapping.iter()) {
                let value = mapping
                    .file_index
                    .and_then(|idx| row.get(idx).cloned())
                    .unwrap_or_default();
                row_data.insert(col_def.field_name.clone(), value.trim().to_string());
            }
            if row_data.values().any(|v| !v.is_empty()) {
                rows.push(row_data);
            }
        }

        Ok(ExcelData {
            file_name,
            rows,
            column_mapping,
            file_headers,
        })
    }

    pub fn has_all_columns_mapped(&self) -> bool {
        self.column_mapping.iter().all(|m| m.found.is_some())
    }

    pub fn missing_columns(&self) -> Vec<String> {
        self.column_mapping
            .iter()
            .filter(|m| m.found.is_none())
            .map(|m| m.expected.clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn columns() -> Vec<ColumnDef> {
        vec![
            ColumnDef::new("name", "NAME"),
            ColumnDef::new("stock", "STOCK"),
        ]
    }

    #[test]
    fn maps_headers_case_insensitively() {
        let raw = vec![
            vec!["Name".to_string(), "stock".to_string()],
            vec!["Soap".to_string(), "12".to_string()],
        ];
        let data = ExcelData::from_raw(raw, &columns(), "items.xlsx".to_string()).unwrap();
        assert!(data.has_all_columns_mapped());
        assert_eq!(data.rows.len(), 1);
        assert_eq!(data.rows[0]["name"], "Soap");
        assert_eq!(data.rows[0]["stock"], "12");
    }

    #[test]
    fn reports_missing_columns_and_drops_empty_rows() {
        let raw = vec![
            vec!["NAME".to_string()],
            vec!["".to_string()],
            vec!["Soap".to_string()],
        ];
        let data = ExcelData::from_raw(raw, &columns(), "items.xlsx".to_string()).unwrap();
        assert!(!data.has_all_columns_mapped());
        assert_eq!(data.missing_columns(), vec!["STOCK".to_string()]);
        assert_eq!(data.rows.len(), 1);
    }

    #[test]
    fn empty_file_is_an_error() {
        let err = ExcelData::from_raw(vec![], &columns(), "items.xlsx".to_string()).unwrap_err();
        assert_eq!(err, "the file is empty");
    }
}
