use std::io::Cursor;

use calamine::{Data, Reader, Xlsx};

use crate::error::HoldingsError;
use crate::tables::{Table, TableReader};

/// Reads the first worksheet of an xlsx workbook. The first non-empty row is
/// the header.
pub struct XlsxTableReader;

impl TableReader for XlsxTableReader {
    fn read_table(&self, name: &str, bytes: &[u8]) -> Result<Table, HoldingsError> {
        let cursor = Cursor::new(bytes);
        let mut workbook: Xlsx<_> =
            calamine::open_workbook_from_rs(cursor).map_err(|e| HoldingsError::TableRead {
                source_name: name.to_string(),
                reason: format!("failed to open xlsx: {e}"),
            })?;

        let sheet = workbook
            .worksheet_range_at(0)
            .ok_or_else(|| HoldingsError::TableRead {
                source_name: name.to_string(),
                reason: "workbook has no worksheets".into(),
            })?
            .map_err(|e| HoldingsError::TableRead {
                source_name: name.to_string(),
                reason: format!("failed to read first worksheet: {e}"),
            })?;

        let mut rows = sheet
            .rows()
            .map(|r| r.iter().map(cell_as_string).collect::<Vec<String>>())
            .filter(|r| r.iter().any(|c| !c.is_empty()));

        let headers = rows.next().ok_or_else(|| HoldingsError::TableRead {
            source_name: name.to_string(),
            reason: "worksheet is empty".into(),
        })?;

        Ok(Table {
            name: name.to_string(),
            headers,
            rows: rows.collect(),
        })
    }

    fn backend_name(&self) -> &str {
        "xlsx"
    }
}

/// Render a cell as trimmed text. Whole-number floats lose their ".0" so
/// counts read from spreadsheets parse as integers.
fn cell_as_string(cell: &Data) -> String {
    match cell {
        Data::String(s) => s.trim().to_string(),
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", *f as i64),
        Data::Float(f) => f.to_string(),
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => b.to_string(),
        Data::Empty => String::new(),
        _ => format!("{cell}").trim().to_string(),
    }
}
