pub mod delimited;
pub mod xlsx;

use crate::error::HoldingsError;
use std::path::Path;

/// A header row plus string cells, as read from a CSV file or a worksheet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    /// Where the table came from, for error messages.
    pub name: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// Index of a required column, matched case-insensitively.
    pub fn column(&self, column: &str) -> Result<usize, HoldingsError> {
        self.optional_column(column)
            .ok_or_else(|| HoldingsError::MissingColumn {
                table: self.name.clone(),
                column: column.to_string(),
            })
    }

    pub fn optional_column(&self, column: &str) -> Option<usize> {
        self.headers
            .iter()
            .position(|h| h.trim().eq_ignore_ascii_case(column))
    }

    /// Cell text, or "" when the row is short.
    pub fn cell<'a>(row: &'a [String], idx: usize) -> &'a str {
        row.get(idx).map(|s| s.as_str()).unwrap_or("")
    }
}

/// Trait for tabular input backends.
pub trait TableReader: Send + Sync {
    /// Read the first table in `bytes`. `name` labels the table in errors.
    fn read_table(&self, name: &str, bytes: &[u8]) -> Result<Table, HoldingsError>;

    /// Name of this backend (for diagnostics).
    fn backend_name(&self) -> &str;
}

/// Pick a backend from the file extension: spreadsheets for `.xlsx`, tab
/// separated text for `.tsv`, comma separated text for everything else.
pub fn reader_for(path: &Path) -> Box<dyn TableReader> {
    let ext = path
        .extension()
        .map(|ext| ext.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "xlsx" => Box::new(xlsx::XlsxTableReader),
        "tsv" => Box::new(delimited::CsvTableReader::with_delimiter(b'\t')),
        _ => Box::new(delimited::CsvTableReader::new()),
    }
}

/// Read a table from disk. A missing file is reported as such rather than
/// as a generic IO error.
pub fn read_table_file(path: &Path) -> Result<Table, HoldingsError> {
    if !path.is_file() {
        return Err(HoldingsError::MissingInput {
            path: path.to_path_buf(),
        });
    }
    let bytes = std::fs::read(path)?;
    let reader = reader_for(path);
    tracing::debug!(
        path = %path.display(),
        backend = reader.backend_name(),
        "reading table"
    );
    reader.read_table(&path.display().to_string(), &bytes)
}
