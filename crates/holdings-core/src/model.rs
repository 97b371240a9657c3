use serde::{Deserialize, Serialize};
use std::fmt;

/// Placeholder written in place of an empty output cell.
pub const NO_VALUE: &str = "NO VALUE";

/// Placeholder collection id for AIPs no department pattern recognizes.
pub const UNABLE_TO_CALCULATE: &str = "UNABLE TO CALCULATE";

/// Archive departments and their AIP naming conventions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Department {
    Bmac,
    Dlg,
    DlgHargrett,
    DlgMagil,
    Hargrett,
    Russell,
}

impl Department {
    pub const ALL: [Department; 6] = [
        Department::Bmac,
        Department::Dlg,
        Department::DlgHargrett,
        Department::DlgMagil,
        Department::Hargrett,
        Department::Russell,
    ];

    /// Short code used in inventories and AIP ids.
    pub fn code(&self) -> &'static str {
        match self {
            Department::Bmac => "bmac",
            Department::Dlg => "dlg",
            Department::DlgHargrett => "dlg-hargrett",
            Department::DlgMagil => "dlg-magil",
            Department::Hargrett => "hargrett",
            Department::Russell => "russell",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Department::Bmac => "Brown Media Archives",
            Department::Dlg => "Digital Library of Georgia",
            Department::DlgHargrett => "DLG Hargrett",
            Department::DlgMagil => "DLG Map and Government Information Library",
            Department::Hargrett => "Hargrett Rare Book and Manuscript Library",
            Department::Russell => "Russell Library",
        }
    }

    /// Exact code lookup.
    pub fn from_code(code: &str) -> Option<Department> {
        Department::ALL.into_iter().find(|d| d.code() == code)
    }

    /// Accepts a code or a display name, ignoring case and surrounding space.
    /// Usage reports name departments the human way.
    pub fn from_label(label: &str) -> Option<Department> {
        let lower = label.trim().to_lowercase();
        Department::ALL
            .into_iter()
            .find(|d| d.code() == lower || d.display_name().to_lowercase() == lower)
    }
}

impl fmt::Display for Department {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// NARA preservation risk, ordered from least to most concerning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RiskLevel {
    #[serde(rename = "Low Risk")]
    Low,
    #[serde(rename = "Moderate Risk")]
    Moderate,
    #[serde(rename = "High Risk")]
    High,
    #[serde(rename = "No Match")]
    NoMatch,
}

impl RiskLevel {
    pub const ALL: [RiskLevel; 4] = [
        RiskLevel::Low,
        RiskLevel::Moderate,
        RiskLevel::High,
        RiskLevel::NoMatch,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Low Risk",
            RiskLevel::Moderate => "Moderate Risk",
            RiskLevel::High => "High Risk",
            RiskLevel::NoMatch => "No Match",
        }
    }

    pub fn parse(s: &str) -> Option<RiskLevel> {
        let lower = s.trim().to_lowercase();
        RiskLevel::ALL
            .into_iter()
            .find(|r| r.as_str().to_lowercase() == lower)
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Direction of a risk change between two reporting periods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskChange {
    Increased,
    Decreased,
    Unchanged,
}

impl RiskChange {
    pub fn between(previous: RiskLevel, current: RiskLevel) -> RiskChange {
        match current.cmp(&previous) {
            std::cmp::Ordering::Greater => RiskChange::Increased,
            std::cmp::Ordering::Less => RiskChange::Decreased,
            std::cmp::Ordering::Equal => RiskChange::Unchanged,
        }
    }
}

/// The (name, version, registry key) triple a format occurrence is matched by.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FormatIdentification {
    pub name: String,
    pub version: Option<String>,
    pub registry_key: Option<String>,
}

impl FormatIdentification {
    pub fn new(name: impl Into<String>) -> Self {
        FormatIdentification {
            name: name.into(),
            version: None,
            registry_key: None,
        }
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn with_registry_key(mut self, key: impl Into<String>) -> Self {
        self.registry_key = Some(key.into());
        self
    }

    /// Name and version joined the way NARA names embed versions.
    pub fn name_with_version(&self) -> Option<String> {
        self.version
            .as_ref()
            .map(|v| format!("{} {}", self.name, v))
    }
}

impl fmt::Display for FormatIdentification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if let Some(ref v) = self.version {
            write!(f, " {v}")?;
        }
        if let Some(ref k) = self.registry_key {
            write!(f, " ({k})")?;
        }
        Ok(())
    }
}

/// One row of a department's format inventory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormatRecord {
    pub department: String,
    pub file_count: u64,
    pub size_bytes: u64,
    pub format_name: String,
    pub format_version: Option<String>,
    pub registry_name: Option<String>,
    pub registry_key: Option<String>,
    pub format_note: Option<String>,
    pub aip_ids: Vec<String>,
}

impl FormatRecord {
    pub fn identification(&self) -> FormatIdentification {
        FormatIdentification {
            name: self.format_name.clone(),
            version: self.format_version.clone(),
            registry_key: self.registry_key.clone(),
        }
    }
}
