use serde::{Deserialize, Serialize};
use std::fmt;

use crate::model::{FormatIdentification, RiskLevel};
use crate::nara::reference::NaraEntry;

/// How a NARA match was found, most to least specific.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchType {
    #[serde(rename = "PRONOM and Name")]
    PronomAndName,
    #[serde(rename = "PRONOM and Version")]
    PronomAndVersion,
    #[serde(rename = "PRONOM")]
    Pronom,
    #[serde(rename = "Format Name and Version")]
    FormatNameAndVersion,
    #[serde(rename = "Format Name")]
    FormatName,
    #[serde(rename = "No NARA Match")]
    NoMatch,
}

impl MatchType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchType::PronomAndName => "PRONOM and Name",
            MatchType::PronomAndVersion => "PRONOM and Version",
            MatchType::Pronom => "PRONOM",
            MatchType::FormatNameAndVersion => "Format Name and Version",
            MatchType::FormatName => "Format Name",
            MatchType::NoMatch => "No NARA Match",
        }
    }
}

impl fmt::Display for MatchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// NARA columns appended to one output row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    pub nara_format_name: Option<String>,
    pub nara_risk_level: RiskLevel,
    pub nara_proposed_plan: Option<String>,
    pub nara_pronom_url: Option<String>,
    pub match_type: MatchType,
}

impl MatchResult {
    pub fn from_entry(entry: &NaraEntry, match_type: MatchType) -> Self {
        MatchResult {
            nara_format_name: Some(entry.format_name.clone()),
            nara_risk_level: entry.risk_level,
            nara_proposed_plan: entry.proposed_plan.clone(),
            nara_pronom_url: entry.pronom_url.clone(),
            match_type,
        }
    }

    pub fn no_match() -> Self {
        MatchResult {
            nara_format_name: None,
            nara_risk_level: RiskLevel::NoMatch,
            nara_proposed_plan: None,
            nara_pronom_url: None,
            match_type: MatchType::NoMatch,
        }
    }
}

/// Every NARA row chosen for one format identification. `results` is never
/// empty: an identification with no match carries the no-match row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchOutcome {
    pub identification: FormatIdentification,
    pub results: Vec<MatchResult>,
    /// A name tier matched several reference rows. All are emitted and the
    /// identification needs manual review.
    pub needs_review: bool,
}

impl MatchOutcome {
    pub fn match_type(&self) -> MatchType {
        self.results
            .first()
            .map(|r| r.match_type)
            .unwrap_or(MatchType::NoMatch)
    }

    /// Highest risk among the emitted rows.
    pub fn worst_risk(&self) -> RiskLevel {
        self.results
            .iter()
            .map(|r| r.nara_risk_level)
            .max()
            .unwrap_or(RiskLevel::NoMatch)
    }
}

/// An identification whose name-tier match was a tie.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchReview {
    pub identification: FormatIdentification,
    pub match_type: MatchType,
    pub candidates: Vec<String>,
}
