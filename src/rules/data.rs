//! Data-division rules: FILLER documentation, unused variables, level order

use super::{ParsedSource, Rule, RuleOutcome};
use crate::models::{Issue, Metric};
use crate::parser::structure::is_section_header;
use crate::parser::Division;
use anyhow::Result;
use regex::Regex;
use rustc_hash::FxHashSet;
use std::sync::OnceLock;

static IDENTIFIER: OnceLock<Regex> = OnceLock::new();
static LEADING_LEVEL: OnceLock<Regex> = OnceLock::new();

fn identifier() -> &'static Regex {
    IDENTIFIER.get_or_init(|| Regex::new(r"[A-Z0-9][A-Z0-9-]*").expect("valid regex"))
}

fn leading_level() -> &'static Regex {
    LEADING_LEVEL.get_or_init(|| Regex::new(r"^\s*(\d+)").expect("valid regex"))
}

/// Flags FILLER entries declared without any description.
pub struct FillerDocumentationRule;

impl Rule for FillerDocumentationRule {
    fn name(&self) -> &'static str {
        "filler-documentation"
    }

    fn description(&self) -> &'static str {
        "Flags FILLER entries with no accompanying description"
    }

    fn check(&self, source: &ParsedSource) -> Result<RuleOutcome> {
        let issues = source
            .divisions
            .lines(Division::Data)
            .iter()
            .filter(|line| {
                line.text.to_uppercase().contains("FILLER")
                    && line.text.split_whitespace().count() < 3
            })
            .map(|line| {
                Issue::info("documentation", "FILLER without an explicit description")
                    .with_line(line.number)
            })
            .collect();
        Ok(RuleOutcome::issues(issues))
    }
}

/// Flags declared data items that never appear in the Procedure division.
///
/// One pass tokenizes every non-header Procedure line into an identifier
/// set; each declared name then costs a single membership check.
pub struct UnusedVariableRule;

impl Rule for UnusedVariableRule {
    fn name(&self) -> &'static str {
        "unused-variables"
    }

    fn description(&self) -> &'static str {
        "Flags data items declared but never referenced"
    }

    fn check(&self, source: &ParsedSource) -> Result<RuleOutcome> {
        let mut used: FxHashSet<String> = FxHashSet::default();
        for line in source.divisions.lines(Division::Procedure) {
            if is_section_header(&line.text) {
                continue;
            }
            let upper = line.text.to_uppercase();
            for token in identifier().find_iter(&upper) {
                used.insert(token.as_str().to_string());
            }
        }

        let mut issues = Vec::new();
        for item in &source.data_items {
            if item.is_filler() || used.contains(&item.name) {
                continue;
            }
            issues.push(
                Issue::warning(
                    "unused_variable",
                    format!("Variable {} is declared but never used", item.name),
                )
                .with_line(item.line),
            );
        }

        let count = issues.len() as u64;
        Ok(RuleOutcome::issues(issues).with_metric(Metric::UnusedVars, count))
    }
}

/// Flags WORKING-STORAGE level numbers that do not strictly increase.
///
/// Level 01 always resets the tracking; any other level that is less than
/// or equal to the previous one is reported. Repeated sibling levels are
/// flagged too; the heuristic is deliberately coarse.
pub struct LevelOrderingRule;

impl Rule for LevelOrderingRule {
    fn name(&self) -> &'static str {
        "level-ordering"
    }

    fn description(&self) -> &'static str {
        "Flags non-increasing level numbers in WORKING-STORAGE"
    }

    fn check(&self, source: &ParsedSource) -> Result<RuleOutcome> {
        let mut issues = Vec::new();
        let mut current_level: u32 = 0;

        for line in source.divisions.lines(Division::Data) {
            let Some(caps) = leading_level().captures(&line.text) else {
                continue;
            };
            let Ok(level) = caps[1].parse::<u32>() else {
                continue;
            };
            if level != 1 && level <= current_level {
                issues.push(
                    Issue::warning(
                        "data_organization",
                        format!(
                            "Level {level:02} does not nest under level {current_level:02}"
                        ),
                    )
                    .with_line(line.number),
                );
            }
            current_level = level;
        }

        Ok(RuleOutcome::issues(issues))
    }
}
