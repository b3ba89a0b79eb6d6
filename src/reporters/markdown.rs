//! Markdown reporter
//!
//! Suitable for README files, pull request comments, and wikis.

use crate::errors::AuditError;
use crate::models::AuditReport;

/// Render report as Markdown
pub fn render(report: &AuditReport) -> Result<String, AuditError> {
    let mut md = String::new();

    md.push_str("# COBOL Audit Report\n\n");
    md.push_str(&format!(
        "Date: {}\n\nFile analyzed: `{}`\n\n",
        report.generated_at.format("%Y-%m-%d %H:%M:%S"),
        report.file.display()
    ));

    // Summary
    md.push_str("## Summary\n\n");
    md.push_str(&format!(
        "- Score: **{:.1}/100** (grade **{}**)\n",
        report.score, report.grade
    ));
    md.push_str(&format!("- Total lines: {}\n", report.metrics.total_lines));
    md.push_str(&format!("- Procedures: {}\n", report.metrics.procedures));
    md.push_str(&format!("- Data items: {}\n", report.metrics.data_items));
    md.push_str(&format!("- Complexity: {}\n", report.metrics.complexity));
    md.push_str("- Issues found:\n");
    md.push_str(&format!("  - Errors: {}\n", report.summary.errors));
    md.push_str(&format!("  - Warnings: {}\n", report.summary.warnings));
    md.push_str(&format!("  - Infos: {}\n\n", report.summary.infos));

    // Metrics
    md.push_str("## Metrics\n\n");
    for (key, value) in report.metrics.entries() {
        md.push_str(&format!("- **{key}**: {value}\n"));
    }
    md.push('\n');

    // Issues
    md.push_str("## Issues\n\n");
    if report.issues.is_empty() {
        md.push_str("No issues detected.\n\n");
    } else {
        for issue in &report.issues {
            md.push_str(&format!("### {}: {}\n\n", issue.severity, issue.message));
            md.push_str(&format!("- Type: `{}`\n", issue.kind));
            match issue.line {
                Some(line) => md.push_str(&format!("- Line: {line}\n\n")),
                None => md.push_str("- Line: N/A\n\n"),
            }
        }
    }

    // Recommendations
    md.push_str("## Recommendations\n\n");
    if report.recommendations.is_empty() {
        md.push_str("No specific recommendations.\n");
    } else {
        for rec in &report.recommendations {
            md.push_str(&format!("- {rec}\n"));
        }
    }

    if !report.detailed_analysis.is_empty() {
        md.push_str("\n## Detailed Analysis\n\n");
        for line in &report.detailed_analysis {
            md.push_str(&format!("- {line}\n"));
        }
    }

    Ok(md)
}
