pub mod collection;
pub mod config;
pub mod error;
pub mod inventory;
pub mod model;
pub mod nara;
pub mod output;
pub mod pipeline;
pub mod standardize;
pub mod summary;
pub mod tables;

use serde::{Deserialize, Serialize};

use config::ResolvedConfig;
use error::HoldingsError;
use model::FormatRecord;
use nara::outcome::MatchReview;
use nara::NaraMatcher;
use output::WrittenFiles;
use pipeline::{Anomaly, MergedTables};
use standardize::Standardizer;
use summary::RiskSummaryRow;

/// What a merge run produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MergeReport {
    pub files: WrittenFiles,
    pub inventory_rows: usize,
    pub aip_rows: usize,
    pub department_rows: usize,
    pub risk_summary: Vec<RiskSummaryRow>,
    pub anomalies: Vec<Anomaly>,
    pub reviews: Vec<MatchReview>,
}

/// Merge already-loaded inventories against loaded reference tables.
/// Nothing touches the filesystem.
pub fn merge(
    records: &[FormatRecord],
    standardizer: &Standardizer,
    matcher: &NaraMatcher,
) -> Result<MergedTables, HoldingsError> {
    pipeline::merge_inventories(records, standardizer, matcher)
}

/// Main API entry point: load the reference tables and inventories named by
/// `config`, merge them and write the dated output files.
///
/// Every input is read and the merge completes before any output file is
/// created, so a fatal error leaves the output directory untouched.
pub fn run_merge(config: &ResolvedConfig) -> Result<MergeReport, HoldingsError> {
    let standardizer = Standardizer::load(&config.standardization)?;
    let matcher = NaraMatcher::load(&config.nara)?;
    let records = inventory::load_inventories(&config.inventories)?;

    let tables = merge(&records, &standardizer, &matcher)?;
    let files = output::write_merged(&tables, &config.output_dir, config.run_date)?;

    Ok(MergeReport {
        files,
        inventory_rows: records.len(),
        aip_rows: tables.by_aip.len(),
        department_rows: tables.by_department.len(),
        risk_summary: summary::risk_summary(&tables.by_department),
        anomalies: tables.anomalies,
        reviews: tables.reviews,
    })
}
