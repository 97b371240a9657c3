pub mod table;

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

use crate::error::HoldingsError;
use table::StandardizationEntry;

/// Prefix the identification tool puts on names of files it could not read.
pub const ERROR_MARKER_PREFIX: &str = "ERROR: cannot read";

/// Name and type reported for files the identification tool could not read.
pub const IDENTIFICATION_ERROR: &str = "IDENTIFICATION ERROR";

/// Canonical name and coarse type category for a raw format name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StandardizedFormat {
    pub name: String,
    pub format_type: String,
}

impl StandardizedFormat {
    pub fn identification_error() -> Self {
        StandardizedFormat {
            name: IDENTIFICATION_ERROR.to_string(),
            format_type: IDENTIFICATION_ERROR.to_string(),
        }
    }
}

/// Maps raw format names to standardized names by exact, case-insensitive
/// lookup. Read-only after construction.
#[derive(Debug, Clone, Default)]
pub struct Standardizer {
    by_lower_name: HashMap<String, StandardizedFormat>,
}

impl Standardizer {
    /// Build from reference rows. Two rows with the same raw name (ignoring
    /// case) must agree.
    pub fn new(entries: Vec<StandardizationEntry>) -> Result<Self, HoldingsError> {
        if entries.is_empty() {
            return Err(HoldingsError::ReferenceInvalid {
                table: "standardization".into(),
                reason: "table has no rows".into(),
            });
        }

        let mut by_lower_name: HashMap<String, StandardizedFormat> = HashMap::new();
        for entry in entries {
            let key = entry.format.to_lowercase();
            let value = StandardizedFormat {
                name: entry.standardized_name,
                format_type: entry.format_type,
            };
            if let Some(existing) = by_lower_name.get(&key) {
                if *existing != value {
                    return Err(HoldingsError::ReferenceInvalid {
                        table: "standardization".into(),
                        reason: format!(
                            "'{}' maps to both '{}' ({}) and '{}' ({})",
                            entry.format,
                            existing.name,
                            existing.format_type,
                            value.name,
                            value.format_type
                        ),
                    });
                }
                continue;
            }
            by_lower_name.insert(key, value);
        }

        Ok(Standardizer { by_lower_name })
    }

    /// Load the reference table from a CSV or xlsx file.
    pub fn load(path: &Path) -> Result<Self, HoldingsError> {
        let standardizer = Self::new(table::load_entries(path)?)?;
        tracing::info!(
            path = %path.display(),
            entries = standardizer.len(),
            "loaded standardization table"
        );
        Ok(standardizer)
    }

    pub fn len(&self) -> usize {
        self.by_lower_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_lower_name.is_empty()
    }

    /// Standardize a raw format name.
    ///
    /// Names carrying the identification tool's error marker short-circuit
    /// to [`IDENTIFICATION_ERROR`]. Any other name missing from the table is
    /// fatal: the table is stale and must be updated before rerunning.
    pub fn standardize(&self, format_name: &str) -> Result<StandardizedFormat, HoldingsError> {
        if format_name.starts_with(ERROR_MARKER_PREFIX) {
            return Ok(StandardizedFormat::identification_error());
        }

        self.by_lower_name
            .get(&format_name.to_lowercase())
            .cloned()
            .ok_or_else(|| HoldingsError::UnstandardizedFormat {
                format_name: format_name.to_string(),
            })
    }
}
