//! End-to-end tests for run_merge() and the pieces it wires together.
//!
//! Reference tables and inventories are small CSV fixtures written into a
//! temporary directory, so no real archive exports are needed.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use rust_decimal_macros::dec;

use holdings_core::collection::resolve_collection;
use holdings_core::config::{ResolvedConfig, RunConfig};
use holdings_core::error::{CollectionError, HoldingsError};
use holdings_core::model::{FormatIdentification, RiskLevel, UNABLE_TO_CALCULATE};
use holdings_core::nara::outcome::MatchType;
use holdings_core::nara::reference;
use holdings_core::nara::NaraMatcher;
use holdings_core::standardize::{table, Standardizer, IDENTIFICATION_ERROR};
use holdings_core::tables::delimited::CsvTableReader;
use holdings_core::tables::TableReader;
use holdings_core::{inventory, run_merge};

const STANDARDIZATION: &str = "\
FORMAT,FORMAT_STANDARDIZED,FORMAT_TYPE
Quicktime,QuickTime,video
Waveform Audio,WAVE,audio
Portable Document Format,PDF,text
JPEG File Interchange Format,JPEG,image
";

const NARA: &str = "\
Format Name,PRONOM URL,NARA Risk Level,NARA Proposed Preservation Plan,Tools
QuickTime,,Moderate Risk,Transform to MPEG-4,ffmpeg
Waveform Audio File Format,https://www.nationalarchives.gov.uk/pronom/fmt/141,Low Risk,Retain,
Broadcast WAVE,https://www.nationalarchives.gov.uk/pronom/fmt/141,Low Risk,Retain,
Portable Document Format 1.4,https://www.nationalarchives.gov.uk/pronom/fmt/18,Low Risk,Retain,
";

const INVENTORY_HEADER: &str = "department,file_count,size_bytes,format_name,format_version,registry_name,registry_key,format_note,aip_ids\n";

const BMAC: &str = "bmac,3,3000,quicktime,,,,,bmac_wgst_0001|bmac_2015007_0001\n";

const DLG: &str = "\
dlg,2,200,Waveform Audio,,PRONOM,fmt/141,,dlg_vang_aba001_001
dlg,1,50,JPEG File Interchange Format,1.01,PRONOM,fmt/43,,dlg_turningpoint_harg0015-001-002
";

const RUSSELL: &str =
    "russell,12,\"1,048,576\",Portable Document Format,1.4,PRONOM,fmt/18,,rbrl-153-er-000015|rbrl153-xyz|oops\n";

fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).unwrap();
    path
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn config(dir: &Path, inventories: &[(&str, &str)], run_date: NaiveDate) -> ResolvedConfig {
    let inventories = inventories
        .iter()
        .map(|(name, body)| write(dir, name, &format!("{INVENTORY_HEADER}{body}")))
        .collect();
    RunConfig {
        standardization: Some(write(dir, "standardize_formats.csv", STANDARDIZATION)),
        nara: Some(write(dir, "nara.csv", NARA)),
        inventories,
        output_dir: Some(dir.join("out")),
        run_date: Some(run_date),
    }
    .resolve(date(2000, 1, 1))
    .unwrap()
}

fn all_inventories() -> Vec<(&'static str, &'static str)> {
    vec![
        ("bmac_formats.csv", BMAC),
        ("dlg_formats.csv", DLG),
        ("russell_formats.csv", RUSSELL),
    ]
}

fn matcher() -> NaraMatcher {
    let t = CsvTableReader::new().read_table("nara.csv", NARA.as_bytes()).unwrap();
    NaraMatcher::new(reference::entries_from_table(&t).unwrap()).unwrap()
}

// ---------------------------------------------------------------------------
// Full run
// ---------------------------------------------------------------------------
#[test]
fn merge_writes_dated_tables() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = config(dir.path(), &all_inventories(), date(2024, 3, 7));

    let report = run_merge(&cfg).unwrap();

    assert_eq!(report.inventory_rows, 4);
    // bmac 2 AIPs, dlg 2 (shared key) + 1, russell 3 AIPs
    assert_eq!(report.aip_rows, 8);
    assert_eq!(report.department_rows, 5);

    assert!(report
        .files
        .by_aip
        .ends_with("out/archive_formats_by_aip_2024-03-07.csv"));
    assert!(report
        .files
        .by_department
        .ends_with("out/archive_formats_by_department_2024-03-07.csv"));

    let by_aip = std::fs::read_to_string(&report.files.by_aip).unwrap();
    assert_eq!(by_aip.lines().count(), 9);
    assert!(by_aip.contains("bmac,peabody,bmac_2015007_0001,quicktime,"));
    assert!(by_aip.contains("bmac,wgst,bmac_wgst_0001,quicktime,"));
    assert!(by_aip.contains("dlg,harg-ms15,dlg_turningpoint_harg0015-001-002,"));
    assert!(by_aip.contains("russell,rbrl153,rbrl-153-er-000015,"));
    assert!(by_aip.contains("russell,rbrl153,rbrl153-xyz,"));
    assert!(by_aip.contains(&format!("russell,{UNABLE_TO_CALCULATE},oops,")));
    assert!(by_aip.contains("NO VALUE"));
    assert!(!by_aip.contains(",,"));

    assert_eq!(report.anomalies.len(), 1);
    assert_eq!(report.anomalies[0].aip_id, "oops");
    let anomalies = report.files.anomalies.as_ref().unwrap();
    assert!(std::fs::read_to_string(anomalies)
        .unwrap()
        .contains("russell,oops,"));
}

#[test]
fn risk_summary_follows_merged_rows() {
    let dir = tempfile::tempdir().unwrap();
    let report = run_merge(&config(dir.path(), &all_inventories(), date(2024, 3, 7))).unwrap();

    let summary: Vec<(&str, RiskLevel)> = report
        .risk_summary
        .iter()
        .map(|r| (r.department.as_str(), r.risk_level))
        .collect();
    assert_eq!(
        summary,
        vec![
            ("bmac", RiskLevel::Moderate),
            ("dlg", RiskLevel::Low),
            ("dlg", RiskLevel::NoMatch),
            ("russell", RiskLevel::Low),
        ]
    );
    // The shared-key WAVE rows count once
    assert_eq!(report.risk_summary[1].file_count, 2);
    assert_eq!(report.risk_summary[1].file_percentage, dec!(66.67));
    assert_eq!(report.risk_summary[2].file_percentage, dec!(33.33));
    assert_eq!(report.risk_summary[3].file_percentage, dec!(100));
}

#[test]
fn rerun_on_another_date_changes_only_file_names() {
    let dir = tempfile::tempdir().unwrap();
    let first = run_merge(&config(dir.path(), &all_inventories(), date(2024, 3, 7))).unwrap();
    let second = run_merge(&config(dir.path(), &all_inventories(), date(2025, 1, 15))).unwrap();

    assert_ne!(first.files.by_aip, second.files.by_aip);
    assert_eq!(
        std::fs::read(&first.files.by_aip).unwrap(),
        std::fs::read(&second.files.by_aip).unwrap()
    );
    assert_eq!(
        std::fs::read(&first.files.by_department).unwrap(),
        std::fs::read(&second.files.by_department).unwrap()
    );
}

#[test]
fn inventory_order_does_not_change_output() {
    let dir = tempfile::tempdir().unwrap();
    let forward = run_merge(&config(dir.path(), &all_inventories(), date(2024, 3, 7))).unwrap();
    let forward_text = std::fs::read(&forward.files.by_aip).unwrap();

    let mut reversed = all_inventories();
    reversed.reverse();
    let other = tempfile::tempdir().unwrap();
    let backward = run_merge(&config(other.path(), &reversed, date(2024, 3, 7))).unwrap();

    assert_eq!(forward_text, std::fs::read(&backward.files.by_aip).unwrap());
}

// ---------------------------------------------------------------------------
// Fatal errors leave no output behind
// ---------------------------------------------------------------------------
#[test]
fn unstandardized_format_aborts_without_output() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = config(
        dir.path(),
        &[
            ("bmac_formats.csv", BMAC),
            ("dlg_formats.csv", "dlg,1,10,Matroska,,,,,dlg_vang_aba001_001\n"),
        ],
        date(2024, 3, 7),
    );

    let err = run_merge(&cfg).unwrap_err();
    assert!(matches!(
        err,
        HoldingsError::UnstandardizedFormat { ref format_name } if format_name == "Matroska"
    ));
    assert!(!cfg.output_dir.exists());
}

#[test]
fn unknown_department_aborts_without_output() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = config(
        dir.path(),
        &[("media_formats.csv", "media,1,10,Quicktime,,,,,media_0001\n")],
        date(2024, 3, 7),
    );

    let err = run_merge(&cfg).unwrap_err();
    assert!(matches!(
        err,
        HoldingsError::Collection(CollectionError::UnknownDepartment { .. })
    ));
    assert!(!cfg.output_dir.exists());
}

#[test]
fn missing_inventory_aborts() {
    let dir = tempfile::tempdir().unwrap();
    let mut cfg = config(dir.path(), &all_inventories(), date(2024, 3, 7));
    cfg.inventories.push(dir.path().join("hargrett_formats.csv"));

    let err = run_merge(&cfg).unwrap_err();
    assert!(matches!(err, HoldingsError::MissingInput { .. }));
    assert!(!cfg.output_dir.exists());
}

// ---------------------------------------------------------------------------
// Collection resolution
// ---------------------------------------------------------------------------
#[test]
fn russell_spellings_normalize_to_one_collection() {
    assert_eq!(resolve_collection("rbrl-153-er-000015", "russell").unwrap(), "rbrl153");
    assert_eq!(resolve_collection("rbrl153-xyz", "russell").unwrap(), "rbrl153");
}

#[test]
fn turningpoint_number_loses_leading_zeros() {
    let collection = resolve_collection("dlg_turningpoint_harg0015-001-002", "dlg").unwrap();
    assert!(collection.contains("15"));
    assert!(!collection.contains("0015"));
}

#[test]
fn unrecognized_id_and_unknown_department_are_distinct() {
    assert!(matches!(
        resolve_collection("not-an-aip", "hargrett"),
        Err(CollectionError::PatternNotRecognized { .. })
    ));
    assert!(matches!(
        resolve_collection("bmac_wgst_0001", "G"),
        Err(CollectionError::UnknownDepartment { .. })
    ));
}

#[test]
fn resolution_is_deterministic() {
    let ids = [
        ("bmac_wsb-video_0001", "bmac"),
        ("dlg_ugabma_wsbn_0001", "dlg"),
        ("dlg-hargrett_hmap_1875_0001", "dlg-hargrett"),
        ("dlg-magil_gaed_sm1234_0001", "dlg-magil"),
        ("harg-0041-web-202007-0001", "hargrett"),
    ];
    for (aip, dept) in ids {
        let first = resolve_collection(aip, dept).unwrap();
        assert_eq!(resolve_collection(aip, dept).unwrap(), first);
    }
}

// ---------------------------------------------------------------------------
// NARA matching against a loaded table
// ---------------------------------------------------------------------------
#[test]
fn single_registry_key_match_is_one_pronom_row() {
    let ident = FormatIdentification::new("PDF/A").with_registry_key("fmt/18");
    let outcome = matcher().match_identification(&ident);
    assert_eq!(outcome.results.len(), 1);
    assert_eq!(outcome.results[0].match_type, MatchType::Pronom);
}

#[test]
fn shared_registry_key_expands_to_every_row() {
    let ident = FormatIdentification::new("Waveform Audio").with_registry_key("fmt/141");
    let outcome = matcher().match_identification(&ident);
    assert_eq!(outcome.results.len(), 2);
    assert!(outcome.results.iter().all(|r| r.match_type == MatchType::Pronom));
    assert_eq!(outcome.identification.name, "Waveform Audio");
    assert_ne!(
        outcome.results[0].nara_format_name,
        outcome.results[1].nara_format_name
    );
}

#[test]
fn name_match_ignores_case() {
    let outcome = matcher().match_identification(&FormatIdentification::new("quicktime"));
    assert_eq!(outcome.results.len(), 1);
    assert_eq!(outcome.results[0].match_type, MatchType::FormatName);
    assert_eq!(outcome.results[0].nara_format_name.as_deref(), Some("QuickTime"));
}

#[test]
fn unmatched_identification_still_yields_a_row() {
    let outcome = matcher().match_identification(&FormatIdentification::new("Matroska"));
    assert_eq!(outcome.results.len(), 1);
    let row = &outcome.results[0];
    assert_eq!(row.nara_risk_level, RiskLevel::NoMatch);
    assert_eq!(row.nara_proposed_plan, None);
    assert_eq!(row.match_type, MatchType::NoMatch);
}

// ---------------------------------------------------------------------------
// Standardization
// ---------------------------------------------------------------------------
#[test]
fn identification_errors_skip_the_table() {
    let t = CsvTableReader::new()
        .read_table("standardize_formats.csv", STANDARDIZATION.as_bytes())
        .unwrap();
    let standardizer = Standardizer::new(table::entries_from_table(&t).unwrap()).unwrap();

    let result = standardizer
        .standardize("ERROR: cannot read file X")
        .unwrap();
    assert_eq!(result.name, IDENTIFICATION_ERROR);
    assert_eq!(result.format_type, IDENTIFICATION_ERROR);

    let again = standardizer.standardize("quicktime").unwrap();
    assert_eq!(again, standardizer.standardize("quicktime").unwrap());
    assert_eq!(standardizer.len(), 4);
}

#[test]
fn merged_output_reads_back_as_inventory_cells() {
    // NO VALUE cells in an inventory are treated as blanks
    let body = format!("{INVENTORY_HEADER}bmac,1,10,Quicktime,NO VALUE,NO VALUE,NO VALUE,NO VALUE,bmac_wgst_0001\n");
    let t = CsvTableReader::new()
        .read_table("bmac.csv", body.as_bytes())
        .unwrap();
    let records = inventory::records_from_table(&t).unwrap();
    assert_eq!(records[0].identification(), FormatIdentification::new("Quicktime"));
}
