use holdings_core::config::RunConfig;
use holdings_core::error::HoldingsError;
use std::path::PathBuf;

use crate::output;

pub fn run(
    config_file: Option<PathBuf>,
    overrides: RunConfig,
    output_format: &str,
) -> Result<(), HoldingsError> {
    let base = match config_file {
        Some(ref path) => {
            tracing::debug!(path = %path.display(), "reading run file");
            RunConfig::load(path)?
        }
        None => RunConfig::default(),
    };
    let today = chrono::Local::now().date_naive();
    let config = base.overridden_by(overrides).resolve(today)?;

    let report = holdings_core::run_merge(&config)?;

    match output_format {
        "json" => output::json::print(&report)?,
        _ => output::table::print_merge(&report),
    }

    Ok(())
}
