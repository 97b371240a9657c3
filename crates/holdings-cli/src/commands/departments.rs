use holdings_core::error::HoldingsError;
use holdings_core::model::Department;

pub fn run() -> Result<(), HoldingsError> {
    println!("Departments:\n");
    for dept in Department::ALL {
        println!("  {:<14} {}", dept.code(), dept.display_name());
    }
    Ok(())
}
