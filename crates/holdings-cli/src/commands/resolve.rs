use holdings_core::collection::resolve_for;
use holdings_core::error::{CollectionError, HoldingsError};
use holdings_core::model::Department;

pub fn run(aip_id: &str, department: &str) -> Result<(), HoldingsError> {
    let dept = Department::from_label(department).ok_or_else(|| {
        CollectionError::UnknownDepartment {
            department: department.to_string(),
        }
    })?;

    let collection = resolve_for(aip_id, dept)?;
    println!("{collection}");
    Ok(())
}
