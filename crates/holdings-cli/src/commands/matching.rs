use holdings_core::error::HoldingsError;
use holdings_core::model::FormatIdentification;
use holdings_core::nara::NaraMatcher;
use std::path::Path;

use crate::output;

pub fn run(
    name: String,
    version: Option<String>,
    registry_key: Option<String>,
    nara: &Path,
    output_format: &str,
) -> Result<(), HoldingsError> {
    let matcher = NaraMatcher::load(nara)?;

    let mut ident = FormatIdentification::new(name);
    if let Some(version) = version {
        ident = ident.with_version(version);
    }
    if let Some(key) = registry_key {
        ident = ident.with_registry_key(key);
    }

    let outcome = matcher.match_identification(&ident);

    match output_format {
        "json" => output::json::print(&outcome)?,
        _ => output::table::print_matches(&outcome),
    }

    Ok(())
}
