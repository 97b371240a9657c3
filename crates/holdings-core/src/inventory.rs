use std::path::Path;

use crate::error::HoldingsError;
use crate::model::{FormatRecord, NO_VALUE};
use crate::tables::{read_table_file, Table};

pub const DEPARTMENT_COLUMN: &str = "department";
pub const FILE_COUNT_COLUMN: &str = "file_count";
pub const SIZE_COLUMN: &str = "size_bytes";
pub const FORMAT_NAME_COLUMN: &str = "format_name";
pub const FORMAT_VERSION_COLUMN: &str = "format_version";
pub const REGISTRY_NAME_COLUMN: &str = "registry_name";
pub const REGISTRY_KEY_COLUMN: &str = "registry_key";
pub const FORMAT_NOTE_COLUMN: &str = "format_note";
pub const AIP_IDS_COLUMN: &str = "aip_ids";

/// Separator inside the AIP list cell.
pub const AIP_DELIMITER: char = '|';

struct Columns {
    department: usize,
    file_count: usize,
    size: usize,
    format_name: usize,
    format_version: Option<usize>,
    registry_name: Option<usize>,
    registry_key: Option<usize>,
    format_note: Option<usize>,
    aip_ids: usize,
}

impl Columns {
    fn locate(table: &Table) -> Result<Self, HoldingsError> {
        Ok(Columns {
            department: table.column(DEPARTMENT_COLUMN)?,
            file_count: table.column(FILE_COUNT_COLUMN)?,
            size: table.column(SIZE_COLUMN)?,
            format_name: table.column(FORMAT_NAME_COLUMN)?,
            format_version: table.optional_column(FORMAT_VERSION_COLUMN),
            registry_name: table.optional_column(REGISTRY_NAME_COLUMN),
            registry_key: table.optional_column(REGISTRY_KEY_COLUMN),
            format_note: table.optional_column(FORMAT_NOTE_COLUMN),
            aip_ids: table.column(AIP_IDS_COLUMN)?,
        })
    }
}

/// Blank cells and cells written as the output placeholder both mean "absent",
/// so merged output can be fed back in.
fn optional_cell(row: &[String], idx: Option<usize>) -> Option<String> {
    let cell = Table::cell(row, idx?);
    if cell.is_empty() || cell == NO_VALUE {
        None
    } else {
        Some(cell.to_string())
    }
}

fn parse_count(table: &Table, row_number: usize, column: &str, cell: &str) -> Result<u64, HoldingsError> {
    cell.replace(',', "")
        .parse::<u64>()
        .map_err(|_| HoldingsError::Parse {
            table: table.name.clone(),
            row: row_number,
            reason: format!("{column} '{cell}' is not a whole number"),
        })
}

/// Split the AIP list cell, dropping blanks.
pub fn split_aip_ids(cell: &str) -> Vec<String> {
    cell.split(AIP_DELIMITER)
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parse a department format inventory.
pub fn records_from_table(table: &Table) -> Result<Vec<FormatRecord>, HoldingsError> {
    let cols = Columns::locate(table)?;
    let mut records = Vec::with_capacity(table.rows.len());

    for (i, row) in table.rows.iter().enumerate() {
        // Spreadsheet row number, counting the header
        let row_number = i + 2;

        let department = Table::cell(row, cols.department);
        if department.is_empty() {
            return Err(HoldingsError::Parse {
                table: table.name.clone(),
                row: row_number,
                reason: "department is blank".into(),
            });
        }
        let format_name = Table::cell(row, cols.format_name);
        if format_name.is_empty() {
            return Err(HoldingsError::Parse {
                table: table.name.clone(),
                row: row_number,
                reason: "format_name is blank".into(),
            });
        }

        records.push(FormatRecord {
            department: department.to_string(),
            file_count: parse_count(
                table,
                row_number,
                FILE_COUNT_COLUMN,
                Table::cell(row, cols.file_count),
            )?,
            size_bytes: parse_count(table, row_number, SIZE_COLUMN, Table::cell(row, cols.size))?,
            format_name: format_name.to_string(),
            format_version: optional_cell(row, cols.format_version),
            registry_name: optional_cell(row, cols.registry_name),
            registry_key: optional_cell(row, cols.registry_key),
            format_note: optional_cell(row, cols.format_note),
            aip_ids: split_aip_ids(Table::cell(row, cols.aip_ids)),
        });
    }

    Ok(records)
}

/// Load and concatenate inventories in the order given.
pub fn load_inventories<P: AsRef<Path>>(paths: &[P]) -> Result<Vec<FormatRecord>, HoldingsError> {
    let mut records = Vec::new();
    for path in paths {
        let path = path.as_ref();
        let table = read_table_file(path)?;
        let loaded = records_from_table(&table)?;
        tracing::info!(path = %path.display(), rows = loaded.len(), "loaded format inventory");
        records.extend(loaded);
    }
    Ok(records)
}
