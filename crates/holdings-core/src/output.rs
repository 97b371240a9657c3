use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::HoldingsError;
use crate::model::NO_VALUE;
use crate::nara::outcome::MatchResult;
use crate::pipeline::{Anomaly, AipFormatRow, DepartmentFormatRow, FormatColumns, MergedTables};

pub const BY_AIP_PREFIX: &str = "archive_formats_by_aip";
pub const BY_DEPARTMENT_PREFIX: &str = "archive_formats_by_department";
pub const ANOMALIES_PREFIX: &str = "collection_anomalies";

const FORMAT_HEADERS: [&str; 7] = [
    "Format Name",
    "Format Version",
    "Registry Name",
    "Registry Key",
    "Format Note",
    "Format Standardized Name",
    "Format Type",
];

const NARA_HEADERS: [&str; 5] = [
    "NARA Format Name",
    "NARA Risk Level",
    "NARA Proposed Preservation Plan",
    "NARA PRONOM URL",
    "NARA Match Type",
];

/// Paths written by [`write_merged`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WrittenFiles {
    pub by_aip: PathBuf,
    pub by_department: PathBuf,
    pub anomalies: Option<PathBuf>,
}

/// `{prefix}_{YYYY-MM-DD}.csv`. The run date lives only in the file name.
pub fn dated_file_name(prefix: &str, run_date: NaiveDate) -> String {
    format!("{prefix}_{}.csv", run_date.format("%Y-%m-%d"))
}

fn cell(value: &str) -> &str {
    if value.is_empty() {
        NO_VALUE
    } else {
        value
    }
}

fn optional(value: Option<&str>) -> &str {
    cell(value.unwrap_or(""))
}

fn format_cells(f: &FormatColumns) -> [&str; 7] {
    [
        cell(&f.format_name),
        optional(f.format_version.as_deref()),
        optional(f.registry_name.as_deref()),
        optional(f.registry_key.as_deref()),
        optional(f.format_note.as_deref()),
        cell(&f.format_standardized),
        cell(&f.format_type),
    ]
}

fn nara_cells(n: &MatchResult) -> [&str; 5] {
    [
        optional(n.nara_format_name.as_deref()),
        n.nara_risk_level.as_str(),
        optional(n.nara_proposed_plan.as_deref()),
        optional(n.nara_pronom_url.as_deref()),
        n.match_type.as_str(),
    ]
}

pub fn write_by_aip<W: Write>(rows: &[AipFormatRow], out: W) -> Result<(), HoldingsError> {
    let mut writer = csv::Writer::from_writer(out);

    let mut header = vec!["Department", "Collection", "AIP"];
    header.extend(FORMAT_HEADERS);
    header.extend(NARA_HEADERS);
    writer.write_record(&header)?;

    for row in rows {
        let mut record = vec![cell(&row.department), cell(&row.collection), cell(&row.aip_id)];
        record.extend(format_cells(&row.format));
        record.extend(nara_cells(&row.nara));
        writer.write_record(&record)?;
    }

    writer.flush()?;
    Ok(())
}

pub fn write_by_department<W: Write>(
    rows: &[DepartmentFormatRow],
    out: W,
) -> Result<(), HoldingsError> {
    let mut writer = csv::Writer::from_writer(out);

    let mut header = vec!["Department", "File Count", "Size (Bytes)"];
    header.extend(FORMAT_HEADERS);
    header.extend(NARA_HEADERS);
    writer.write_record(&header)?;

    for row in rows {
        let file_count = row.file_count.to_string();
        let size = row.size_bytes.to_string();
        let mut record = vec![cell(&row.department), file_count.as_str(), size.as_str()];
        record.extend(format_cells(&row.format));
        record.extend(nara_cells(&row.nara));
        writer.write_record(&record)?;
    }

    writer.flush()?;
    Ok(())
}

pub fn write_anomalies<W: Write>(anomalies: &[Anomaly], out: W) -> Result<(), HoldingsError> {
    let mut writer = csv::Writer::from_writer(out);
    writer.write_record(["Department", "AIP", "Reason"])?;
    for a in anomalies {
        writer.write_record([cell(&a.department), cell(&a.aip_id), cell(&a.reason)])?;
    }
    writer.flush()?;
    Ok(())
}

/// Staged files are written under a hidden `.partial` name next to their
/// final path.
fn partial_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!(".{name}.partial"))
}

/// Write one file under its partial name and record it for the final rename.
fn stage<F>(staged: &mut Vec<PathBuf>, path: PathBuf, write: F) -> Result<PathBuf, HoldingsError>
where
    F: FnOnce(std::fs::File) -> Result<(), HoldingsError>,
{
    let partial = partial_path(&path);
    staged.push(path.clone());
    write(std::fs::File::create(&partial)?)?;
    Ok(path)
}

fn stage_all(
    tables: &MergedTables,
    dir: &Path,
    run_date: NaiveDate,
    staged: &mut Vec<PathBuf>,
) -> Result<WrittenFiles, HoldingsError> {
    let by_aip = stage(staged, dir.join(dated_file_name(BY_AIP_PREFIX, run_date)), |f| {
        write_by_aip(&tables.by_aip, f)
    })?;
    let by_department = stage(
        staged,
        dir.join(dated_file_name(BY_DEPARTMENT_PREFIX, run_date)),
        |f| write_by_department(&tables.by_department, f),
    )?;
    let anomalies = if tables.anomalies.is_empty() {
        None
    } else {
        Some(stage(
            staged,
            dir.join(dated_file_name(ANOMALIES_PREFIX, run_date)),
            |f| write_anomalies(&tables.anomalies, f),
        )?)
    };
    Ok(WrittenFiles {
        by_aip,
        by_department,
        anomalies,
    })
}

/// Write the merged tables into `dir`, creating it if needed. The anomaly
/// file is only written when there are anomalies.
///
/// Every file is written under a partial name first and renamed only once
/// all of them succeeded. On failure the partial files are removed and no
/// dated file appears.
pub fn write_merged(
    tables: &MergedTables,
    dir: &Path,
    run_date: NaiveDate,
) -> Result<WrittenFiles, HoldingsError> {
    std::fs::create_dir_all(dir)?;

    let mut staged = Vec::new();
    let files = match stage_all(tables, dir, run_date, &mut staged) {
        Ok(files) => files,
        Err(e) => {
            for path in &staged {
                let _ = std::fs::remove_file(partial_path(path));
            }
            return Err(e);
        }
    };
    for path in &staged {
        std::fs::rename(partial_path(path), path)?;
    }

    tracing::info!(
        by_aip = %files.by_aip.display(),
        by_department = %files.by_department.display(),
        "wrote merged format tables"
    );

    Ok(files)
}
