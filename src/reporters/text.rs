//! Text (terminal) reporter with colors and formatting

use crate::errors::AuditError;
use crate::models::{AuditReport, Grade, Severity};

/// Grade colors (ANSI escape codes)
fn grade_color(grade: Grade) -> &'static str {
    match grade {
        Grade::A => "\x1b[32m", // Green
        Grade::B => "\x1b[92m", // Light green
        Grade::C => "\x1b[33m", // Yellow
        Grade::D => "\x1b[91m", // Light red
        Grade::F => "\x1b[31m", // Red
    }
}

/// Severity colors
fn severity_color(severity: Severity) -> &'static str {
    match severity {
        Severity::Error => "\x1b[31m",   // Red
        Severity::Warning => "\x1b[33m", // Yellow
        Severity::Info => "\x1b[90m",    // Gray
    }
}

/// Reset ANSI color
const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";

fn severity_tag(severity: Severity) -> &'static str {
    match severity {
        Severity::Error => "[E]",
        Severity::Warning => "[W]",
        Severity::Info => "[I]",
    }
}

/// Render report as formatted terminal output
pub fn render(report: &AuditReport) -> Result<String, AuditError> {
    let mut out = String::new();

    // Header
    let grade_c = grade_color(report.grade);
    out.push_str(&format!("\n{BOLD}COBOL Audit{RESET}\n"));
    out.push_str(&format!(
        "{DIM}──────────────────────────────────────{RESET}\n"
    ));
    out.push_str(&format!(
        "File: {}  Score: {BOLD}{:.1}/100{RESET}  Grade: {grade_c}{BOLD}{}{RESET}\n\n",
        report.file.display(),
        report.score,
        report.grade
    ));

    // Metrics (compact)
    out.push_str(&format!("{BOLD}METRICS{RESET}\n"));
    out.push_str(&format!(
        "  Lines: {}  Procedures: {}  Data items: {}  Complexity: {}\n",
        report.metrics.total_lines,
        report.metrics.procedures,
        report.metrics.data_items,
        report.metrics.complexity
    ));
    out.push_str(&format!(
        "  Unused vars: {}  Empty sections: {}  Nesting: {}  Magic numbers: {}  Dead sections: {}\n\n",
        report.metrics.unused_vars,
        report.metrics.empty_sections,
        report.metrics.nested_conditions,
        report.metrics.magic_numbers,
        report.metrics.dead_code_sections
    ));

    // Issue summary
    let summary = &report.summary;
    out.push_str(&format!("{BOLD}ISSUES{RESET} ({} total)\n", summary.total));

    let mut parts = Vec::new();
    if summary.errors > 0 {
        parts.push(format!("\x1b[31m{} errors{RESET}", summary.errors));
    }
    if summary.warnings > 0 {
        parts.push(format!("\x1b[33m{} warnings{RESET}", summary.warnings));
    }
    if summary.infos > 0 {
        parts.push(format!("\x1b[90m{} infos{RESET}", summary.infos));
    }
    if !parts.is_empty() {
        out.push_str(&format!("  {}\n\n", parts.join(" | ")));
    }

    for issue in &report.issues {
        let sev_c = severity_color(issue.severity);
        let location = match issue.line {
            Some(line) => format!("line {line}"),
            None => String::from("-"),
        };
        out.push_str(&format!(
            "  {sev_c}{}{RESET}  {:<50}  {DIM}{} ({}){RESET}\n",
            severity_tag(issue.severity),
            issue.message,
            location,
            issue.kind
        ));
    }
    if !report.issues.is_empty() {
        out.push('\n');
    }

    // Recommendations
    if !report.recommendations.is_empty() {
        out.push_str(&format!("{BOLD}RECOMMENDATIONS{RESET}\n"));
        for rec in &report.recommendations {
            out.push_str(&format!("  - {rec}\n"));
        }
        out.push('\n');
    }

    if !report.detailed_analysis.is_empty() {
        out.push_str(&format!("{BOLD}DETAILS{RESET}\n"));
        for line in &report.detailed_analysis {
            out.push_str(&format!("  {line}\n"));
        }
        out.push('\n');
    }

    match report.grade {
        Grade::A => out.push_str(&format!("{DIM}Excellent. Keep it that way.{RESET}\n")),
        Grade::B => out.push_str(&format!(
            "{DIM}Good shape. Address remaining issues for an A.{RESET}\n"
        )),
        _ => out.push_str(&format!(
            "{DIM}Run with --detailed for suggestion-level recommendations.{RESET}\n"
        )),
    }

    Ok(out)
}
