use std::fmt::Write as _;
use ucp_core::DisclaimerConfig;
use ucp_scanner::ScoreReport;

pub fn print_report(
    json: bool,
    report: &ScoreReport,
    disclaimer: &DisclaimerConfig,
) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
    } else {
        print!("{}", summary(report, disclaimer)?);
    }
    Ok(())
}

/// Plain-text summary: header, one line per component, disclaimer.
pub fn summary(
    report: &ScoreReport,
    disclaimer: &DisclaimerConfig,
) -> Result<String, std::fmt::Error> {
    let mut out = String::new();
    writeln!(out, "{}", report.meta.title)?;
    writeln!(out, "Site reviewed: {}", report.target_origin)?;
    writeln!(out, "Review date:   {}", report.review_timestamp)?;
    writeln!(
        out,
        "Score:         {}/100 ({})",
        report.aggregate_score, report.status_label
    )?;
    writeln!(out)?;

    for component in &report.components {
        writeln!(
            out,
            "  [{}] {:<28} {:>3}/{:<3} {}",
            if component.passed { "PASS" } else { "FAIL" },
            component.label,
            component.awarded_score,
            component.weight,
            component.finding
        )?;
    }

    writeln!(out)?;
    writeln!(out, "{}", disclaimer.title)?;
    writeln!(out, "Reviewer location: {}", report.reviewer_location)?;
    for paragraph in &disclaimer.paragraphs {
        writeln!(out, "{paragraph}")?;
    }
    writeln!(out, "{}", report.jurisdiction_disclaimer)?;
    Ok(out)
}
