pub mod outcome;
pub mod reference;

use std::collections::HashMap;
use std::path::Path;

use crate::error::HoldingsError;
use crate::model::FormatIdentification;
use outcome::{MatchOutcome, MatchResult, MatchReview, MatchType};
use reference::NaraEntry;

/// Matches format identifications against the NARA risk table.
///
/// Tiers, first with any candidate wins:
/// 1. registry key (exact), narrowed by name or version when the key is shared
/// 2. name and version together (case-insensitive)
/// 3. name alone (case-insensitive)
/// 4. no match
#[derive(Debug, Clone)]
pub struct NaraMatcher {
    entries: Vec<NaraEntry>,
    by_puid: HashMap<String, Vec<usize>>,
    by_lower_name: HashMap<String, Vec<usize>>,
}

impl NaraMatcher {
    pub fn new(entries: Vec<NaraEntry>) -> Result<Self, HoldingsError> {
        if entries.is_empty() {
            return Err(HoldingsError::ReferenceInvalid {
                table: "NARA".into(),
                reason: "table has no rows".into(),
            });
        }

        let mut by_puid: HashMap<String, Vec<usize>> = HashMap::new();
        let mut by_lower_name: HashMap<String, Vec<usize>> = HashMap::new();
        for (idx, entry) in entries.iter().enumerate() {
            if let Some(ref puid) = entry.puid {
                by_puid.entry(puid.clone()).or_default().push(idx);
            }
            by_lower_name
                .entry(entry.format_name.to_lowercase())
                .or_default()
                .push(idx);
        }

        Ok(NaraMatcher {
            entries,
            by_puid,
            by_lower_name,
        })
    }

    /// Load the NARA table from a CSV or xlsx file.
    pub fn load(path: &Path) -> Result<Self, HoldingsError> {
        let matcher = Self::new(reference::load_entries(path)?)?;
        tracing::info!(
            path = %path.display(),
            entries = matcher.len(),
            "loaded NARA risk table"
        );
        Ok(matcher)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Find the NARA rows for one identification. Always yields at least one
    /// result.
    pub fn match_identification(&self, ident: &FormatIdentification) -> MatchOutcome {
        let (rows, match_type, needs_review) = self.select(ident);
        tracing::debug!(
            format = %ident,
            match_type = match_type.as_str(),
            candidates = rows.len(),
            "NARA match"
        );

        let results = if rows.is_empty() {
            vec![MatchResult::no_match()]
        } else {
            rows.iter()
                .map(|&idx| MatchResult::from_entry(&self.entries[idx], match_type))
                .collect()
        };

        MatchOutcome {
            identification: ident.clone(),
            results,
            needs_review,
        }
    }

    /// Review record for an outcome that tied in a name tier.
    pub fn review_for(outcome: &MatchOutcome) -> Option<MatchReview> {
        if !outcome.needs_review {
            return None;
        }
        Some(MatchReview {
            identification: outcome.identification.clone(),
            match_type: outcome.match_type(),
            candidates: outcome
                .results
                .iter()
                .filter_map(|r| r.nara_format_name.clone())
                .collect(),
        })
    }

    fn select(&self, ident: &FormatIdentification) -> (Vec<usize>, MatchType, bool) {
        if let Some((rows, match_type)) = self.by_registry_key(ident) {
            return (rows, match_type, false);
        }

        if let Some(name_version) = ident.name_with_version() {
            if let Some(rows) = self.by_lower_name.get(&name_version.to_lowercase()) {
                return (rows.clone(), MatchType::FormatNameAndVersion, rows.len() > 1);
            }
        }

        if let Some(rows) = self.by_lower_name.get(&ident.name.to_lowercase()) {
            return (rows.clone(), MatchType::FormatName, rows.len() > 1);
        }

        (Vec::new(), MatchType::NoMatch, false)
    }

    fn by_registry_key(&self, ident: &FormatIdentification) -> Option<(Vec<usize>, MatchType)> {
        let key = ident.registry_key.as_deref().filter(|k| !k.is_empty())?;
        let rows = self.by_puid.get(key)?;

        if rows.len() == 1 {
            return Some((rows.clone(), MatchType::Pronom));
        }

        // Shared key: try to narrow to a single row before emitting them all
        let name_lower = ident.name.to_lowercase();
        let name_hits: Vec<usize> = rows
            .iter()
            .copied()
            .filter(|&idx| self.entries[idx].format_name.to_lowercase() == name_lower)
            .collect();
        if name_hits.len() == 1 {
            return Some((name_hits, MatchType::PronomAndName));
        }

        if let Some(ref version) = ident.version {
            let version_lower = version.to_lowercase();
            let version_hits: Vec<usize> = rows
                .iter()
                .copied()
                .filter(|&idx| {
                    mentions_version(&self.entries[idx].format_name.to_lowercase(), &version_lower)
                })
                .collect();
            if version_hits.len() == 1 {
                return Some((version_hits, MatchType::PronomAndVersion));
            }
        }

        Some((rows.clone(), MatchType::Pronom))
    }
}

/// Whether a lowercase NARA name contains the version as a whole token.
fn mentions_version(nara_name: &str, version: &str) -> bool {
    if version.is_empty() {
        return false;
    }
    nara_name
        .split(|c: char| c.is_whitespace() || matches!(c, '(' | ')' | ',' | ';' | '/'))
        .any(|token| token == version)
}
