use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::HoldingsError;
use crate::tables::{read_table_file, Table};

pub const FORMAT_COLUMN: &str = "FORMAT";
pub const STANDARDIZED_COLUMN: &str = "FORMAT_STANDARDIZED";
pub const TYPE_COLUMN: &str = "FORMAT_TYPE";

/// One row of the standardization reference table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StandardizationEntry {
    /// Raw format name as the identification tool reports it.
    pub format: String,
    pub standardized_name: String,
    pub format_type: String,
}

/// Read entries from a loaded table, skipping rows with a blank raw name.
pub fn entries_from_table(table: &Table) -> Result<Vec<StandardizationEntry>, HoldingsError> {
    let format_idx = table.column(FORMAT_COLUMN)?;
    let std_idx = table.column(STANDARDIZED_COLUMN)?;
    let type_idx = table.column(TYPE_COLUMN)?;

    let mut entries = Vec::with_capacity(table.rows.len());
    for (i, row) in table.rows.iter().enumerate() {
        let format = Table::cell(row, format_idx);
        if format.is_empty() {
            continue;
        }
        let standardized_name = Table::cell(row, std_idx);
        let format_type = Table::cell(row, type_idx);
        if standardized_name.is_empty() || format_type.is_empty() {
            return Err(HoldingsError::Parse {
                table: table.name.clone(),
                row: i + 2,
                reason: format!("format '{format}' has no standardized name or type"),
            });
        }
        entries.push(StandardizationEntry {
            format: format.to_string(),
            standardized_name: standardized_name.to_string(),
            format_type: format_type.to_string(),
        });
    }
    Ok(entries)
}

/// Load entries from a CSV or xlsx file.
pub fn load_entries(path: &Path) -> Result<Vec<StandardizationEntry>, HoldingsError> {
    let table = read_table_file(path)?;
    entries_from_table(&table)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(rows: &[[&str; 3]]) -> Table {
        Table {
            name: "standardize_formats.csv".into(),
            headers: vec![
                FORMAT_COLUMN.into(),
                STANDARDIZED_COLUMN.into(),
                TYPE_COLUMN.into(),
            ],
            rows: rows
                .iter()
                .map(|r| r.iter().map(|s| s.to_string()).collect())
                .collect(),
        }
    }

    #[test]
    fn reads_entries() {
        let t = table(&[
            ["Quicktime", "QuickTime", "video"],
            ["JPEG File Interchange Format", "JPEG", "image"],
        ]);
        let entries = entries_from_table(&t).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].standardized_name, "QuickTime");
        assert_eq!(entries[1].format_type, "image");
    }

    #[test]
    fn blank_raw_names_skipped() {
        let t = table(&[["", "", ""], ["PDF", "PDF", "text"]]);
        assert_eq!(entries_from_table(&t).unwrap().len(), 1);
    }

    #[test]
    fn incomplete_row_reports_line_number() {
        let t = table(&[["PDF", "PDF", "text"], ["WAVE", "", "audio"]]);
        let err = entries_from_table(&t).unwrap_err();
        match err {
            HoldingsError::Parse { row, .. } => assert_eq!(row, 3),
            other => panic!("unexpected error: {other}"),
        }
    }
}
