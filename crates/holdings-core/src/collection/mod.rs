pub mod departments;
pub mod overrides;

use crate::error::CollectionError;
use crate::model::Department;

/// A department's ordered collection rules.
pub type CollectionRule = fn(&str) -> Option<String>;

/// Rule registry. Adding a department means adding one entry here and one
/// function in [`departments`].
const RULES: &[(Department, CollectionRule)] = &[
    (Department::Bmac, departments::bmac),
    (Department::Dlg, departments::dlg),
    (Department::DlgHargrett, departments::dlg_hargrett),
    (Department::DlgMagil, departments::dlg_magil),
    (Department::Hargrett, departments::hargrett),
    (Department::Russell, departments::russell),
];

fn rule_for(department: Department) -> Option<CollectionRule> {
    RULES
        .iter()
        .find(|(d, _)| *d == department)
        .map(|(_, rule)| *rule)
}

/// Derive the collection id from an AIP id and a department code.
///
/// Fails with [`CollectionError::UnknownDepartment`] for codes with no rule
/// set, and with [`CollectionError::PatternNotRecognized`] when the id fits
/// none of the department's rules. Never guesses.
pub fn resolve_collection(aip_id: &str, department: &str) -> Result<String, CollectionError> {
    let dept =
        Department::from_code(department).ok_or_else(|| CollectionError::UnknownDepartment {
            department: department.to_string(),
        })?;
    resolve_for(aip_id, dept)
}

/// Same as [`resolve_collection`] for an already parsed department.
pub fn resolve_for(aip_id: &str, department: Department) -> Result<String, CollectionError> {
    let rule = rule_for(department).ok_or_else(|| CollectionError::UnknownDepartment {
        department: department.code().to_string(),
    })?;
    rule(aip_id).ok_or_else(|| CollectionError::PatternNotRecognized {
        department: department.code().to_string(),
        aip_id: aip_id.to_string(),
    })
}
