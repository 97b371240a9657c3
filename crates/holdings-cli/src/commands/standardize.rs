use holdings_core::error::HoldingsError;
use holdings_core::standardize::Standardizer;
use std::path::Path;

pub fn run(format_name: &str, table: &Path) -> Result<(), HoldingsError> {
    let standardizer = Standardizer::load(table)?;
    let result = standardizer.standardize(format_name)?;

    println!("  Standardized name: {}", result.name);
    println!("  Format type:       {}", result.format_type);
    Ok(())
}
