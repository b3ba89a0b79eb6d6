//! Output reporters for audit results
//!
//! Supported formats:
//! - `text` - Terminal output with colors
//! - `markdown` - Markdown report
//! - `json` - Machine-readable JSON
//! - `csv` - Sectioned CSV rows
//! - `sonarqube` - SonarQube generic issue-import payload
//!
//! Reporters only consume the assembled [`AuditReport`]; none of them
//! performs analysis.

mod csv;
mod json;
mod markdown;
mod sonarqube;
mod text;

use crate::errors::AuditError;
use crate::models::AuditReport;
use std::str::FromStr;

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Markdown,
    Json,
    Csv,
    SonarQube,
}

impl FromStr for OutputFormat {
    type Err = AuditError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" | "terminal" => Ok(OutputFormat::Text),
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            "sonarqube" | "sonar" => Ok(OutputFormat::SonarQube),
            _ => Err(AuditError::report(format!(
                "unknown format '{s}'; valid formats: text, markdown, json, csv, sonarqube"
            ))),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Markdown => write!(f, "markdown"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Csv => write!(f, "csv"),
            OutputFormat::SonarQube => write!(f, "sonarqube"),
        }
    }
}

/// Render an audit report in the named format.
pub fn report(report: &AuditReport, format: &str) -> Result<String, AuditError> {
    render(report, OutputFormat::from_str(format)?)
}

/// Render an audit report using an [`OutputFormat`].
pub fn render(report: &AuditReport, format: OutputFormat) -> Result<String, AuditError> {
    match format {
        OutputFormat::Text => text::render(report),
        OutputFormat::Markdown => markdown::render(report),
        OutputFormat::Json => json::render(report),
        OutputFormat::Csv => csv::render(report),
        OutputFormat::SonarQube => sonarqube::render(report),
    }
}
