use holdings_core::model::NO_VALUE;
use holdings_core::nara::outcome::MatchOutcome;
use holdings_core::MergeReport;

pub fn print_merge(report: &MergeReport) {
    println!("=== Merged format tables ===\n");
    println!("  Inventory rows:   {}", report.inventory_rows);
    println!("  By-AIP rows:      {}", report.aip_rows);
    println!("  Department rows:  {}", report.department_rows);
    println!();
    println!("  Wrote {}", report.files.by_aip.display());
    println!("  Wrote {}", report.files.by_department.display());
    if let Some(ref anomalies) = report.files.anomalies {
        println!("  Wrote {}", anomalies.display());
    }
    println!();

    if !report.risk_summary.is_empty() {
        println!("Risk by department:\n");
        let dept_width = report
            .risk_summary
            .iter()
            .map(|r| r.department.len())
            .max()
            .unwrap_or(10)
            .max("Department".len());

        println!(
            "  {:<width$}  {:<14}  {:>7}  {:>10}  {:>8}",
            "Department",
            "Risk",
            "Formats",
            "Files",
            "Files %",
            width = dept_width
        );
        println!("  {}", "-".repeat(dept_width + 2 + 14 + 2 + 7 + 2 + 10 + 2 + 8));
        for row in &report.risk_summary {
            println!(
                "  {:<width$}  {:<14}  {:>7}  {:>10}  {:>8}",
                row.department,
                row.risk_level.as_str(),
                row.format_count,
                row.file_count,
                row.file_percentage,
                width = dept_width
            );
        }
        println!();
    }

    if !report.anomalies.is_empty() {
        println!("Collections that could not be calculated ({}):", report.anomalies.len());
        for a in &report.anomalies {
            println!("  {} {}", a.department, a.aip_id);
        }
        println!();
    }

    if !report.reviews.is_empty() {
        println!("NARA matches needing review ({}):", report.reviews.len());
        for r in &report.reviews {
            println!(
                "  {} [{}] -> {}",
                r.identification,
                r.match_type,
                r.candidates.join(" | ")
            );
        }
        println!();
    }
}

pub fn print_matches(outcome: &MatchOutcome) {
    println!("=== {} ===\n", outcome.identification);

    for result in &outcome.results {
        println!(
            "  {} ({})",
            result.nara_format_name.as_deref().unwrap_or(NO_VALUE),
            result.match_type
        );
        println!("    Risk:  {}", result.nara_risk_level);
        println!(
            "    Plan:  {}",
            result.nara_proposed_plan.as_deref().unwrap_or(NO_VALUE)
        );
        if let Some(ref url) = result.nara_pronom_url {
            println!("    URL:   {url}");
        }
        println!();
    }

    if outcome.needs_review {
        println!("  Several NARA rows share this name. Check which one applies.\n");
    }
}
