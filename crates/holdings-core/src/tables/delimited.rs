use crate::error::HoldingsError;
use crate::tables::{Table, TableReader};

/// Delimited text with a header row. Commas unless told otherwise.
pub struct CsvTableReader {
    delimiter: u8,
}

impl CsvTableReader {
    pub fn new() -> Self {
        CsvTableReader { delimiter: b',' }
    }

    pub fn with_delimiter(delimiter: u8) -> Self {
        CsvTableReader { delimiter }
    }
}

impl Default for CsvTableReader {
    fn default() -> Self {
        Self::new()
    }
}

impl TableReader for CsvTableReader {
    fn read_table(&self, name: &str, bytes: &[u8]) -> Result<Table, HoldingsError> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(true)
            .flexible(true)
            .from_reader(bytes);

        let headers: Vec<String> = reader
            .headers()
            .map_err(|e| HoldingsError::TableRead {
                source_name: name.to_string(),
                reason: e.to_string(),
            })?
            .iter()
            .map(|h| h.trim_start_matches('\u{feff}').trim().to_string())
            .collect();

        if headers.iter().all(|h| h.is_empty()) {
            return Err(HoldingsError::TableRead {
                source_name: name.to_string(),
                reason: "no header row".into(),
            });
        }

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record.map_err(|e| HoldingsError::TableRead {
                source_name: name.to_string(),
                reason: e.to_string(),
            })?;
            let row: Vec<String> = record.iter().map(|c| c.trim().to_string()).collect();
            // Spreadsheet exports often end with blank lines of bare commas
            if row.iter().all(|c| c.is_empty()) {
                continue;
            }
            rows.push(row);
        }

        Ok(Table {
            name: name.to_string(),
            headers,
            rows,
        })
    }

    fn backend_name(&self) -> &str {
        if self.delimiter == b'\t' {
            "tsv"
        } else {
            "csv"
        }
    }
}
