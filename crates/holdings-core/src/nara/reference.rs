use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::HoldingsError;
use crate::model::RiskLevel;
use crate::tables::{read_table_file, Table};

pub const NAME_COLUMN: &str = "Format Name";
pub const PRONOM_COLUMN: &str = "PRONOM URL";
pub const RISK_COLUMN: &str = "NARA Risk Level";
pub const PLAN_COLUMN: &str = "NARA Proposed Preservation Plan";

const PRONOM_PATH: &str = "/pronom/";

/// One row of the NARA digital preservation plan spreadsheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NaraEntry {
    pub format_name: String,
    pub pronom_url: Option<String>,
    /// Registry key taken from the PRONOM URL, e.g. "fmt/354".
    pub puid: Option<String>,
    pub risk_level: RiskLevel,
    pub proposed_plan: Option<String>,
}

impl NaraEntry {
    pub fn new(format_name: impl Into<String>, risk_level: RiskLevel) -> Self {
        NaraEntry {
            format_name: format_name.into(),
            pronom_url: None,
            puid: None,
            risk_level,
            proposed_plan: None,
        }
    }

    /// Attach a PRONOM URL (or bare PUID) and derive the registry key.
    pub fn with_pronom(mut self, url: impl Into<String>) -> Self {
        let url = url.into();
        self.puid = puid_from_url(&url);
        self.pronom_url = Some(url);
        self
    }

    pub fn with_plan(mut self, plan: impl Into<String>) -> Self {
        self.proposed_plan = Some(plan.into());
        self
    }
}

/// Registry key from a PRONOM URL. Bare keys ("fmt/354", "x-fmt/111") are
/// accepted as-is; other URLs have no key.
pub fn puid_from_url(url: &str) -> Option<String> {
    let url = url.trim();
    if let Some(idx) = url.to_ascii_lowercase().find(PRONOM_PATH) {
        let tail = url[idx + PRONOM_PATH.len()..].trim_end_matches('/');
        return (!tail.is_empty()).then(|| tail.to_string());
    }
    if url.starts_with("fmt/") || url.starts_with("x-fmt/") {
        return Some(url.to_string());
    }
    None
}

fn optional(cell: &str) -> Option<String> {
    (!cell.is_empty()).then(|| cell.to_string())
}

/// Read entries from the NARA spreadsheet. Columns other than name, PRONOM
/// URL, risk level and proposed plan are ignored.
pub fn entries_from_table(table: &Table) -> Result<Vec<NaraEntry>, HoldingsError> {
    let name_idx = table.column(NAME_COLUMN)?;
    let pronom_idx = table.column(PRONOM_COLUMN)?;
    let risk_idx = table.column(RISK_COLUMN)?;
    let plan_idx = table.column(PLAN_COLUMN)?;

    let mut entries = Vec::with_capacity(table.rows.len());
    for (i, row) in table.rows.iter().enumerate() {
        let name = Table::cell(row, name_idx);
        if name.is_empty() {
            continue;
        }
        let risk_text = Table::cell(row, risk_idx);
        let risk_level = RiskLevel::parse(risk_text).ok_or_else(|| HoldingsError::Parse {
            table: table.name.clone(),
            row: i + 2,
            reason: format!("unknown risk level '{risk_text}' for '{name}'"),
        })?;
        let pronom_url = optional(Table::cell(row, pronom_idx));
        entries.push(NaraEntry {
            format_name: name.to_string(),
            puid: pronom_url.as_deref().and_then(puid_from_url),
            pronom_url,
            risk_level,
            proposed_plan: optional(Table::cell(row, plan_idx)),
        });
    }
    Ok(entries)
}

/// Load entries from a CSV or xlsx file.
pub fn load_entries(path: &Path) -> Result<Vec<NaraEntry>, HoldingsError> {
    let table = read_table_file(path)?;
    entries_from_table(&table)
}
