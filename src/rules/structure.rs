//! Structure rules: division presence and naming conventions

use super::{ParsedSource, Rule, RuleOutcome};
use crate::models::Issue;
use crate::parser::structure::is_section_header;
use crate::parser::Division;
use anyhow::Result;
use regex::Regex;
use std::sync::OnceLock;

static COBOL_NAME: OnceLock<Regex> = OnceLock::new();

fn cobol_name() -> &'static Regex {
    COBOL_NAME.get_or_init(|| Regex::new(r"^[A-Z][A-Z0-9-]*$").expect("valid regex"))
}

/// Identification and Procedure divisions must be present and non-empty.
pub struct DivisionPresenceRule;

impl Rule for DivisionPresenceRule {
    fn name(&self) -> &'static str {
        "division-presence"
    }

    fn description(&self) -> &'static str {
        "Flags missing or empty IDENTIFICATION/PROCEDURE divisions"
    }

    fn check(&self, source: &ParsedSource) -> Result<RuleOutcome> {
        let required = [Division::Identification, Division::Procedure];
        let issues = required
            .iter()
            .filter(|division| source.divisions.is_empty(**division))
            .map(|division| {
                Issue::error(
                    "structure",
                    format!("{} division missing or empty", division.name()),
                )
            })
            .collect();
        Ok(RuleOutcome::issues(issues))
    }
}

/// Flags SECTION and data-item names that break COBOL naming conventions.
///
/// Checks the raw source spelling, not the extractor's upper-cased view:
/// upper-case letters, digits, and hyphens only, starting with a letter.
/// FILLER entries are anonymous and skipped.
pub struct NamingConventionRule;

impl NamingConventionRule {
    fn violation(name: &str, line: u32) -> Issue {
        Issue::warning(
            "naming",
            format!("Name {name} does not follow COBOL naming conventions"),
        )
        .with_line(line)
    }
}

impl Rule for NamingConventionRule {
    fn name(&self) -> &'static str {
        "naming-conventions"
    }

    fn description(&self) -> &'static str {
        "Flags SECTION and data-item names outside the COBOL convention"
    }

    fn check(&self, source: &ParsedSource) -> Result<RuleOutcome> {
        let mut issues = Vec::new();

        for line in source.divisions.lines(Division::Procedure) {
            if !is_section_header(&line.text) {
                continue;
            }
            if let Some(name) = line.text.trim().split_whitespace().next() {
                if !cobol_name().is_match(name) {
                    issues.push(Self::violation(name, line.number));
                }
            }
        }

        for item in &source.data_items {
            if item.is_filler() {
                continue;
            }
            let Some(raw) = item.text.split_whitespace().nth(1) else {
                continue;
            };
            let raw = raw.trim_end_matches('.');
            if !cobol_name().is_match(raw) {
                issues.push(Self::violation(raw, item.line));
            }
        }

        Ok(RuleOutcome::issues(issues))
    }
}
