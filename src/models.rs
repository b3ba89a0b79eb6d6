//! Core data models for Cobaudit
//!
//! These models are shared by the analyzer, scorer, and reporters. Field
//! names on the serialized forms are stable (`severity`, `message`, `type`,
//! `line`, and the nine metric keys) so downstream formatters never need to
//! inspect internals.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Severity levels for issues
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    #[default]
    Info,
    Warning,
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Info => write!(f, "INFO"),
            Severity::Warning => write!(f, "WARNING"),
            Severity::Error => write!(f, "ERROR"),
        }
    }
}

/// A single quality finding from one rule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Issue {
    pub severity: Severity,
    pub message: String,
    /// Rule-type tag, a free-form key used for recommendation lookup
    /// (e.g. `structure`, `best_practice`, `unused_variable`).
    #[serde(rename = "type")]
    pub kind: String,
    /// 1-based source line, where the rule has one to point at.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,
}

impl Issue {
    pub fn new(severity: Severity, kind: &str, message: impl Into<String>) -> Self {
        Self {
            severity,
            message: message.into(),
            kind: kind.to_string(),
            line: None,
        }
    }

    pub fn error(kind: &str, message: impl Into<String>) -> Self {
        Self::new(Severity::Error, kind, message)
    }

    pub fn warning(kind: &str, message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, kind, message)
    }

    pub fn info(kind: &str, message: impl Into<String>) -> Self {
        Self::new(Severity::Info, kind, message)
    }

    pub fn with_line(mut self, line: u32) -> Self {
        self.line = Some(line);
        self
    }
}

/// The quality metrics a rule can contribute a value for.
///
/// Structural counters (`total_lines`, `procedures`, `data_items`) are
/// filled by the analyzer directly from the parsed structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    Complexity,
    UnusedVars,
    EmptySections,
    NestedConditions,
    MagicNumbers,
    DeadCodeSections,
}

impl Metric {
    pub fn key(self) -> &'static str {
        match self {
            Metric::Complexity => "complexity",
            Metric::UnusedVars => "unused_vars",
            Metric::EmptySections => "empty_sections",
            Metric::NestedConditions => "nested_conditions",
            Metric::MagicNumbers => "magic_numbers",
            Metric::DeadCodeSections => "dead_code_sections",
        }
    }
}

/// Snapshot of all metrics for one analyzed file.
///
/// Every value is derived purely from the parsed divisions; there is no
/// external state, so re-running on unchanged input reproduces it exactly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metrics {
    pub total_lines: u64,
    pub procedures: u64,
    pub data_items: u64,
    pub complexity: u64,
    pub unused_vars: u64,
    pub empty_sections: u64,
    pub nested_conditions: u64,
    pub magic_numbers: u64,
    pub dead_code_sections: u64,
}

impl Metrics {
    /// Metric keys that describe file structure rather than quality.
    pub const STRUCTURE_KEYS: [&'static str; 3] = ["total_lines", "procedures", "data_items"];

    pub fn set(&mut self, metric: Metric, value: u64) {
        match metric {
            Metric::Complexity => self.complexity = value,
            Metric::UnusedVars => self.unused_vars = value,
            Metric::EmptySections => self.empty_sections = value,
            Metric::NestedConditions => self.nested_conditions = value,
            Metric::MagicNumbers => self.magic_numbers = value,
            Metric::DeadCodeSections => self.dead_code_sections = value,
        }
    }

    /// All nine metrics as stable (key, value) pairs, in declaration order.
    pub fn entries(&self) -> [(&'static str, u64); 9] {
        [
            ("total_lines", self.total_lines),
            ("procedures", self.procedures),
            ("data_items", self.data_items),
            ("complexity", self.complexity),
            ("unused_vars", self.unused_vars),
            ("empty_sections", self.empty_sections),
            ("nested_conditions", self.nested_conditions),
            ("magic_numbers", self.magic_numbers),
            ("dead_code_sections", self.dead_code_sections),
        ]
    }

    /// The six quality metrics the scorer weighs, in scoring order.
    pub fn quality_entries(&self) -> [(&'static str, u64); 6] {
        [
            ("complexity", self.complexity),
            ("unused_vars", self.unused_vars),
            ("empty_sections", self.empty_sections),
            ("nested_conditions", self.nested_conditions),
            ("magic_numbers", self.magic_numbers),
            ("dead_code_sections", self.dead_code_sections),
        ]
    }
}

/// Letter grade derived from the audit score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Grade {
    A,
    B,
    C,
    D,
    F,
}

impl Grade {
    /// Grade thresholds, evaluated high to low; score >= threshold wins.
    pub fn from_score(score: f64) -> Self {
        match score {
            s if s >= 90.0 => Grade::A,
            s if s >= 80.0 => Grade::B,
            s if s >= 70.0 => Grade::C,
            s if s >= 60.0 => Grade::D,
            _ => Grade::F,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::D => "D",
            Grade::F => "F",
        }
    }
}

impl std::fmt::Display for Grade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Issue counts by severity
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct IssueSummary {
    pub errors: usize,
    pub warnings: usize,
    pub infos: usize,
    pub total: usize,
}

impl IssueSummary {
    pub fn from_issues(issues: &[Issue]) -> Self {
        let mut summary = Self::default();
        for issue in issues {
            match issue.severity {
                Severity::Error => summary.errors += 1,
                Severity::Warning => summary.warnings += 1,
                Severity::Info => summary.infos += 1,
            }
            summary.total += 1;
        }
        summary
    }
}

/// Everything a reporter needs to render one audit.
#[derive(Debug, Clone, Serialize)]
pub struct AuditReport {
    pub file: PathBuf,
    pub generated_at: DateTime<Local>,
    pub tool_version: &'static str,
    pub score: f64,
    pub grade: Grade,
    pub metrics: Metrics,
    pub issues: Vec<Issue>,
    pub recommendations: Vec<String>,
    /// Extra metric commentary, only populated in detailed mode.
    pub detailed_analysis: Vec<String>,
    pub summary: IssueSummary,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_serializes_uppercase() {
        assert_eq!(
            serde_json::to_string(&Severity::Warning).unwrap(),
            "\"WARNING\""
        );
    }

    #[test]
    fn issue_uses_stable_field_names() {
        let issue = Issue::warning("best_practice", "GOTO used").with_line(12);
        let value = serde_json::to_value(&issue).unwrap();
        assert_eq!(value["severity"], "WARNING");
        assert_eq!(value["type"], "best_practice");
        assert_eq!(value["line"], 12);
        assert_eq!(value["message"], "GOTO used");
    }

    #[test]
    fn metrics_entries_cover_all_nine_keys() {
        let metrics = Metrics::default();
        let keys: Vec<&str> = metrics.entries().iter().map(|(k, _)| *k).collect();
        assert_eq!(keys.len(), 9);
        assert!(keys.contains(&"total_lines"));
        assert!(keys.contains(&"dead_code_sections"));
    }

    #[test]
    fn grade_boundaries() {
        assert_eq!(Grade::from_score(100.0), Grade::A);
        assert_eq!(Grade::from_score(90.0), Grade::A);
        assert_eq!(Grade::from_score(89.9), Grade::B);
        assert_eq!(Grade::from_score(70.0), Grade::C);
        assert_eq!(Grade::from_score(60.0), Grade::D);
        assert_eq!(Grade::from_score(59.9), Grade::F);
    }

    #[test]
    fn summary_counts_by_severity() {
        let issues = vec![
            Issue::error("structure", "missing division"),
            Issue::warning("best_practice", "GOTO"),
            Issue::warning("dead_code", "unreachable"),
            Issue::info("documentation", "FILLER"),
        ];
        let summary = IssueSummary::from_issues(&issues);
        assert_eq!(summary.errors, 1);
        assert_eq!(summary.warnings, 2);
        assert_eq!(summary.infos, 1);
        assert_eq!(summary.total, 4);
    }
}
