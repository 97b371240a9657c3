use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::HoldingsError;

/// Run settings as read from a JSON run file or assembled from CLI flags.
/// Every field is optional here; [`RunConfig::resolve`] checks completeness.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RunConfig {
    #[serde(default)]
    pub standardization: Option<PathBuf>,
    #[serde(default)]
    pub nara: Option<PathBuf>,
    #[serde(default)]
    pub inventories: Vec<PathBuf>,
    #[serde(default)]
    pub output_dir: Option<PathBuf>,
    /// Date embedded in output file names, `YYYY-MM-DD`.
    #[serde(default)]
    pub run_date: Option<NaiveDate>,
}

/// A complete, validated run configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedConfig {
    pub standardization: PathBuf,
    pub nara: PathBuf,
    pub inventories: Vec<PathBuf>,
    pub output_dir: PathBuf,
    pub run_date: NaiveDate,
}

impl RunConfig {
    /// Load a run file. Relative paths inside it are taken relative to the
    /// file's own directory.
    pub fn load(path: &Path) -> Result<Self, HoldingsError> {
        let content = std::fs::read_to_string(path).map_err(|e| HoldingsError::ConfigLoad {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        let config: RunConfig =
            serde_json::from_str(&content).map_err(|e| HoldingsError::ConfigLoad {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;
        let base = path.parent().unwrap_or_else(|| Path::new(""));
        Ok(config.relative_to(base))
    }

    /// Parse a run file body (no path context).
    pub fn parse_str(json: &str) -> Result<Self, HoldingsError> {
        Ok(serde_json::from_str(json)?)
    }

    fn relative_to(self, base: &Path) -> Self {
        let rebase = |p: PathBuf| if p.is_relative() { base.join(p) } else { p };
        RunConfig {
            standardization: self.standardization.map(rebase),
            nara: self.nara.map(rebase),
            inventories: self.inventories.into_iter().map(rebase).collect(),
            output_dir: self.output_dir.map(rebase),
            run_date: self.run_date,
        }
    }

    /// Values set in `overrides` win. Inventories are replaced, not appended,
    /// when any are given.
    pub fn overridden_by(self, overrides: RunConfig) -> Self {
        RunConfig {
            standardization: overrides.standardization.or(self.standardization),
            nara: overrides.nara.or(self.nara),
            inventories: if overrides.inventories.is_empty() {
                self.inventories
            } else {
                overrides.inventories
            },
            output_dir: overrides.output_dir.or(self.output_dir),
            run_date: overrides.run_date.or(self.run_date),
        }
    }

    /// Check that every required setting is present. `today` fills in a
    /// missing run date; the output directory defaults to the current one.
    pub fn resolve(self, today: NaiveDate) -> Result<ResolvedConfig, HoldingsError> {
        let standardization = self.standardization.ok_or_else(|| {
            HoldingsError::ConfigInvalid("no standardization table given".into())
        })?;
        let nara = self
            .nara
            .ok_or_else(|| HoldingsError::ConfigInvalid("no NARA risk table given".into()))?;
        if self.inventories.is_empty() {
            return Err(HoldingsError::ConfigInvalid(
                "at least one format inventory is required".into(),
            ));
        }

        Ok(ResolvedConfig {
            standardization,
            nara,
            inventories: self.inventories,
            output_dir: self.output_dir.unwrap_or_else(|| PathBuf::from(".")),
            run_date: self.run_date.unwrap_or(today),
        })
    }
}
