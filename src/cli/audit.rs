//! `audit` command: analyze one file, score it, render the report

use crate::analyzer::Analyzer;
use crate::models::{AuditReport, IssueSummary};
use crate::reporters;
use crate::scoring;
use anyhow::{Context, Result};
use chrono::Local;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::path::Path;
use std::time::Duration;
use tracing::info;

pub fn run(
    file: &Path,
    format: &str,
    output: Option<&Path>,
    verbose: bool,
    detailed: bool,
) -> Result<()> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::with_template("{spinner:.green} {msg}")?);
    spinner.set_message(format!("Analyzing {}...", file.display()));
    spinner.enable_steady_tick(Duration::from_millis(80));

    let result = Analyzer::new().analyze(file);
    spinner.finish_and_clear();
    let result = result?;

    info!(
        issues = result.issues.len(),
        lines = result.metrics.total_lines,
        "analysis complete"
    );

    let (score, grade) = scoring::score(&result.metrics);
    let recommendations = scoring::recommendations(&result.metrics, detailed);
    let detailed_analysis = if detailed {
        scoring::detailed_analysis(&result.metrics)
    } else {
        Vec::new()
    };

    let report = AuditReport {
        file: file.to_path_buf(),
        generated_at: Local::now(),
        tool_version: env!("CARGO_PKG_VERSION"),
        score,
        grade,
        summary: IssueSummary::from_issues(&result.issues),
        metrics: result.metrics,
        issues: result.issues,
        recommendations,
        detailed_analysis,
    };

    if verbose {
        print_summary(&report);
    }

    let rendered = reporters::report(&report, format)?;

    match output {
        Some(path) => {
            fs::write(path, rendered)
                .with_context(|| format!("cannot write report to {}", path.display()))?;
            println!(
                "{}",
                style(format!("Report saved to {}", path.display())).green()
            );
        }
        None => println!("{rendered}"),
    }

    Ok(())
}

/// Plain metric and issue tables, printed before the report in verbose mode.
fn print_summary(report: &AuditReport) {
    println!("{}", style("Analysis Summary").bold());
    for (key, value) in report.metrics.entries() {
        println!("  {:<22} {}", style(key).cyan(), value);
    }
    if !report.issues.is_empty() {
        println!("{}", style("Detected Issues").bold());
        for issue in &report.issues {
            println!(
                "  {:<8} {:<18} {}",
                style(issue.severity).red(),
                style(&issue.kind).blue(),
                issue.message
            );
        }
    }
    println!();
}
