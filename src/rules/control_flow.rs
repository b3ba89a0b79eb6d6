//! Control-flow rules: GO TO usage, PERFORM THRU, ALTERed GO TO

use super::{ParsedSource, Rule, RuleOutcome};
use crate::models::Issue;
use crate::parser::Division;
use anyhow::Result;

/// True for both spellings of the transfer statement.
pub(crate) fn has_goto(upper: &str) -> bool {
    upper.contains("GOTO") || upper.contains("GO TO")
}

/// Flags every Procedure-division line using GO TO.
pub struct GotoUsageRule;

impl Rule for GotoUsageRule {
    fn name(&self) -> &'static str {
        "goto-usage"
    }

    fn description(&self) -> &'static str {
        "Flags GO TO transfers; structured PERFORM is preferred"
    }

    fn check(&self, source: &ParsedSource) -> Result<RuleOutcome> {
        let issues = source
            .divisions
            .lines(Division::Procedure)
            .iter()
            .filter(|line| has_goto(&line.text.to_uppercase()))
            .map(|line| {
                Issue::warning("best_practice", "GOTO transfer detected").with_line(line.number)
            })
            .collect();
        Ok(RuleOutcome::issues(issues))
    }
}

/// Flags PERFORM ... THRU ranges, which break when paragraphs move.
pub struct PerformThruRule;

impl Rule for PerformThruRule {
    fn name(&self) -> &'static str {
        "perform-thru"
    }

    fn description(&self) -> &'static str {
        "Flags PERFORM THRU ranges"
    }

    fn check(&self, source: &ParsedSource) -> Result<RuleOutcome> {
        let issues = source
            .divisions
            .lines(Division::Procedure)
            .iter()
            .filter(|line| {
                let upper = line.text.to_uppercase();
                upper.contains("PERFORM") && upper.contains("THRU")
            })
            .map(|line| {
                Issue::warning("perform_thru", "PERFORM THRU range detected")
                    .with_line(line.number)
            })
            .collect();
        Ok(RuleOutcome::issues(issues))
    }
}

/// Flags ALTER statements, which rewrite GO TO targets at runtime.
pub struct AlteredGotoRule;

impl Rule for AlteredGotoRule {
    fn name(&self) -> &'static str {
        "altered-goto"
    }

    fn description(&self) -> &'static str {
        "Flags ALTER statements that retarget GO TO at runtime"
    }

    fn check(&self, source: &ParsedSource) -> Result<RuleOutcome> {
        let issues = source
            .divisions
            .lines(Division::Procedure)
            .iter()
            .filter(|line| {
                let upper = line.text.to_uppercase();
                upper.contains("ALTER") && upper.contains("TO")
            })
            .map(|line| {
                Issue::error("altered_goto", "ALTERed GO TO detected").with_line(line.number)
            })
            .collect();
        Ok(RuleOutcome::issues(issues))
    }
}
