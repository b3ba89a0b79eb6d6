//! Analysis orchestration
//!
//! Runs the division splitter, the structural extractor, and the full rule
//! battery in a fixed order, merging everything into one issue list and one
//! metrics snapshot. Rule order never affects correctness (rules are
//! independent) but is fixed so output ordering is reproducible.
//!
//! Internal failures (parse or rule) are re-wrapped as `Analysis` errors
//! carrying their cause; `FileAccess` surfaces verbatim.

use crate::errors::AuditError;
use crate::models::{Issue, Metrics};
use crate::parser::{self, structure, DivisionSet};
use crate::rules::{default_rules, ParsedSource, Rule};
use std::path::Path;
use tracing::debug;

/// The `{issues, metrics}` result handed to scorers and reporters.
#[derive(Debug, Clone)]
pub struct AnalysisResult {
    pub issues: Vec<Issue>,
    pub metrics: Metrics,
}

/// One-shot analyzer. Each instance owns its rule list and nothing else, so
/// callers may run one analyzer per file in parallel.
pub struct Analyzer {
    rules: Vec<Box<dyn Rule>>,
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl Analyzer {
    pub fn new() -> Self {
        Self {
            rules: default_rules(),
        }
    }

    /// Analyze a file on disk.
    pub fn analyze(&self, path: &Path) -> Result<AnalysisResult, AuditError> {
        let divisions = match parser::split_file(path) {
            Ok(divisions) => divisions,
            Err(err @ AuditError::FileAccess { .. }) => return Err(err),
            Err(other) => return Err(AuditError::analysis(other)),
        };
        self.analyze_divisions(divisions)
    }

    /// Analyze already-loaded source lines.
    pub fn analyze_lines<'a, I>(&self, lines: I) -> Result<AnalysisResult, AuditError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let divisions = parser::split_lines(lines).map_err(AuditError::analysis)?;
        self.analyze_divisions(divisions)
    }

    /// Run structural extraction and every rule over split divisions.
    pub fn analyze_divisions(&self, divisions: DivisionSet) -> Result<AnalysisResult, AuditError> {
        let source = ParsedSource {
            procedures: structure::procedures(&divisions),
            data_items: structure::data_items(&divisions),
            divisions,
        };

        let mut metrics = Metrics {
            total_lines: source.divisions.total_lines() as u64,
            procedures: source.procedures.len() as u64,
            data_items: source.data_items.len() as u64,
            ..Metrics::default()
        };

        let mut issues = Vec::new();
        for rule in &self.rules {
            let outcome = rule
                .check(&source)
                .map_err(|err| AuditError::analysis(format!("{}: {err}", rule.name())))?;
            debug!(
                rule = rule.name(),
                issues = outcome.issues.len(),
                "rule finished"
            );
            issues.extend(outcome.issues);
            for (metric, value) in outcome.metrics {
                metrics.set(metric, value);
            }
        }

        Ok(AnalysisResult { issues, metrics })
    }
}
