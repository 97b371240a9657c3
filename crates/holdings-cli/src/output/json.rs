use holdings_core::error::HoldingsError;
use serde::Serialize;

pub fn print<T: Serialize>(value: &T) -> Result<(), HoldingsError> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{json}");
    Ok(())
}
