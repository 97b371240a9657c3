use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::collection::resolve_for;
use crate::error::{CollectionError, HoldingsError};
use crate::model::{Department, FormatIdentification, FormatRecord, UNABLE_TO_CALCULATE};
use crate::nara::outcome::{MatchOutcome, MatchResult, MatchReview};
use crate::nara::NaraMatcher;
use crate::standardize::{StandardizedFormat, Standardizer};

/// Format columns shared by both merged tables. Ordered field by field.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FormatColumns {
    pub format_name: String,
    pub format_version: Option<String>,
    pub registry_name: Option<String>,
    pub registry_key: Option<String>,
    pub format_note: Option<String>,
    pub format_standardized: String,
    pub format_type: String,
}

impl FormatColumns {
    fn new(record: &FormatRecord, standardized: &StandardizedFormat) -> Self {
        FormatColumns {
            format_name: record.format_name.clone(),
            format_version: record.format_version.clone(),
            registry_name: record.registry_name.clone(),
            registry_key: record.registry_key.clone(),
            format_note: record.format_note.clone(),
            format_standardized: standardized.name.clone(),
            format_type: standardized.format_type.clone(),
        }
    }
}

/// One row per department, collection, AIP and format identification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AipFormatRow {
    pub department: String,
    pub collection: String,
    pub aip_id: String,
    pub format: FormatColumns,
    pub nara: MatchResult,
}

/// One row per department and format identification, with totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepartmentFormatRow {
    /// Position of the source inventory record in canonical record order.
    /// Rows expanded from one record share it.
    pub record_index: usize,
    pub department: String,
    pub file_count: u64,
    pub size_bytes: u64,
    pub format: FormatColumns,
    pub nara: MatchResult,
}

/// An AIP whose collection could not be calculated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Anomaly {
    pub department: String,
    pub aip_id: String,
    pub reason: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MergedTables {
    pub by_aip: Vec<AipFormatRow>,
    pub by_department: Vec<DepartmentFormatRow>,
    /// AIPs placed in the "UNABLE TO CALCULATE" bucket.
    pub anomalies: Vec<Anomaly>,
    /// NARA name matches that tied and need a person to check.
    pub reviews: Vec<MatchReview>,
}

/// Memoises NARA outcomes so each identification is matched once per run.
pub struct MatchCache<'a> {
    matcher: &'a NaraMatcher,
    outcomes: HashMap<FormatIdentification, MatchOutcome>,
}

impl<'a> MatchCache<'a> {
    pub fn new(matcher: &'a NaraMatcher) -> Self {
        MatchCache {
            matcher,
            outcomes: HashMap::new(),
        }
    }

    pub fn outcome(&mut self, ident: &FormatIdentification) -> &MatchOutcome {
        let matcher = self.matcher;
        self.outcomes.entry(ident.clone()).or_insert_with(|| {
            let outcome = matcher.match_identification(ident);
            if outcome.needs_review {
                tracing::warn!(
                    format = %ident,
                    candidates = outcome.results.len(),
                    "ambiguous NARA name match, all candidates kept for review"
                );
            }
            outcome
        })
    }

    /// Review records for every tied outcome seen so far, sorted.
    pub fn reviews(&self) -> Vec<MatchReview> {
        let mut reviews: Vec<MatchReview> = self
            .outcomes
            .values()
            .filter_map(NaraMatcher::review_for)
            .collect();
        reviews.sort_by(|a, b| a.identification.cmp(&b.identification));
        reviews
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }
}

/// Collection for one AIP, falling back to the placeholder when the id fits
/// no rule. Unknown departments are returned as errors.
pub fn collection_or_placeholder(
    aip_id: &str,
    department: Department,
) -> Result<(String, Option<Anomaly>), CollectionError> {
    match resolve_for(aip_id, department) {
        Ok(collection) => Ok((collection, None)),
        Err(err @ CollectionError::PatternNotRecognized { .. }) => {
            tracing::warn!(
                department = department.code(),
                aip_id,
                "could not calculate collection"
            );
            Ok((
                UNABLE_TO_CALCULATE.to_string(),
                Some(Anomaly {
                    department: department.code().to_string(),
                    aip_id: aip_id.to_string(),
                    reason: err.to_string(),
                }),
            ))
        }
        Err(err) => Err(err),
    }
}

/// Merge department inventories into the by-AIP and by-department tables.
///
/// Fails without partial output when a department code is unknown or a
/// format name is missing from the standardization table.
pub fn merge_inventories(
    records: &[FormatRecord],
    standardizer: &Standardizer,
    matcher: &NaraMatcher,
) -> Result<MergedTables, HoldingsError> {
    // Validate everything fatal before building any rows
    let mut prepared = Vec::with_capacity(records.len());
    for record in records {
        let department = Department::from_code(&record.department).ok_or_else(|| {
            CollectionError::UnknownDepartment {
                department: record.department.clone(),
            }
        })?;
        let standardized = standardizer.standardize(&record.format_name)?;
        let format = FormatColumns::new(record, &standardized);
        prepared.push((record, department, format));
    }

    // Canonical record order, so nothing downstream sees inventory order
    prepared.sort_by(|a, b| record_key(a.0, &a.2).cmp(&record_key(b.0, &b.2)));

    let mut cache = MatchCache::new(matcher);
    let mut merged = MergedTables::default();

    for (record_index, (record, department, format)) in prepared.into_iter().enumerate() {
        let results = cache.outcome(&record.identification()).results.clone();

        for nara in &results {
            merged.by_department.push(DepartmentFormatRow {
                record_index,
                department: record.department.clone(),
                file_count: record.file_count,
                size_bytes: record.size_bytes,
                format: format.clone(),
                nara: nara.clone(),
            });
        }

        for aip_id in &record.aip_ids {
            let (collection, anomaly) = collection_or_placeholder(aip_id, department)?;
            if let Some(anomaly) = anomaly {
                merged.anomalies.push(anomaly);
            }
            for nara in &results {
                merged.by_aip.push(AipFormatRow {
                    department: record.department.clone(),
                    collection: collection.clone(),
                    aip_id: aip_id.clone(),
                    format: format.clone(),
                    nara: nara.clone(),
                });
            }
        }
    }

    sort_rows(&mut merged);
    merged.anomalies.sort_by(|a, b| {
        (a.department.as_str(), a.aip_id.as_str()).cmp(&(b.department.as_str(), b.aip_id.as_str()))
    });
    merged.anomalies.dedup();
    merged.reviews = cache.reviews();

    tracing::info!(
        records = records.len(),
        identifications = cache.len(),
        aip_rows = merged.by_aip.len(),
        department_rows = merged.by_department.len(),
        anomalies = merged.anomalies.len(),
        reviews = merged.reviews.len(),
        "merged format inventories"
    );

    Ok(merged)
}

type RecordKey<'a> = (&'a str, &'a FormatColumns, u64, u64, &'a [String]);

fn record_key<'a>(record: &'a FormatRecord, format: &'a FormatColumns) -> RecordKey<'a> {
    (
        record.department.as_str(),
        format,
        record.file_count,
        record.size_bytes,
        record.aip_ids.as_slice(),
    )
}

/// Output order must not depend on inventory order. Records are already in
/// canonical order and the sorts are stable, so rows expanded from one
/// ambiguous match keep NARA table order.
fn sort_rows(merged: &mut MergedTables) {
    merged.by_aip.sort_by(|a, b| {
        (
            a.department.as_str(),
            a.collection.as_str(),
            a.aip_id.as_str(),
            &a.format,
        )
            .cmp(&(
                b.department.as_str(),
                b.collection.as_str(),
                b.aip_id.as_str(),
                &b.format,
            ))
    });
    merged.by_department.sort_by(|a, b| {
        (
            a.department.as_str(),
            &a.format,
            a.file_count,
            a.size_bytes,
            a.record_index,
        )
            .cmp(&(
                b.department.as_str(),
                &b.format,
                b.file_count,
                b.size_bytes,
                b.record_index,
            ))
    });
}
