use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::model::RiskLevel;
use crate::pipeline::DepartmentFormatRow;

/// Risk distribution of one department's holdings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskSummaryRow {
    pub department: String,
    pub risk_level: RiskLevel,
    /// Inventory records (format identifications) at this risk level.
    pub format_count: usize,
    pub file_count: u64,
    pub size_bytes: u64,
    /// Share of the department's files, rounded to two places.
    pub file_percentage: Decimal,
}

/// Count formats and files per department and risk level.
///
/// Rows expanded from one inventory record (same `record_index`) count once,
/// at the highest risk among them, so file totals match the inventory.
pub fn risk_summary(rows: &[DepartmentFormatRow]) -> Vec<RiskSummaryRow> {
    let mut worst: BTreeMap<(&str, usize), (RiskLevel, u64, u64)> = BTreeMap::new();
    for row in rows {
        worst
            .entry((row.department.as_str(), row.record_index))
            .and_modify(|(risk, _, _)| *risk = (*risk).max(row.nara.nara_risk_level))
            .or_insert((row.nara.nara_risk_level, row.file_count, row.size_bytes));
    }

    let mut totals: BTreeMap<&str, u64> = BTreeMap::new();
    let mut buckets: BTreeMap<(&str, RiskLevel), (usize, u64, u64)> = BTreeMap::new();
    for ((department, _), (risk, files, size)) in &worst {
        let (files, size) = (*files, *size);
        *totals.entry(*department).or_default() += files;
        let bucket = buckets.entry((*department, *risk)).or_default();
        bucket.0 += 1;
        bucket.1 += files;
        bucket.2 += size;
    }

    buckets
        .into_iter()
        .map(|((department, risk_level), (format_count, file_count, size_bytes))| {
            let total = totals.get(department).copied().unwrap_or(0);
            RiskSummaryRow {
                department: department.to_string(),
                risk_level,
                format_count,
                file_count,
                size_bytes,
                file_percentage: percentage(file_count, total),
            }
        })
        .collect()
}

fn percentage(part: u64, total: u64) -> Decimal {
    if total == 0 {
        return Decimal::ZERO;
    }
    (Decimal::from(part) * Decimal::ONE_HUNDRED / Decimal::from(total)).round_dp(2)
}
