//! Complexity rules: magic numbers, nested conditions, cyclomatic metric

use super::{ParsedSource, Rule, RuleOutcome};
use crate::models::{Issue, Metric};
use crate::parser::Division;
use anyhow::Result;
use regex::Regex;
use std::sync::OnceLock;

static DIGIT_RUN: OnceLock<Regex> = OnceLock::new();
static LEVEL_PREFIX: OnceLock<Regex> = OnceLock::new();

fn digit_run() -> &'static Regex {
    DIGIT_RUN.get_or_init(|| Regex::new(r"\d+").expect("valid regex"))
}

fn level_prefix() -> &'static Regex {
    LEVEL_PREFIX.get_or_init(|| Regex::new(r"^\s*\d{2}\s+").expect("valid regex"))
}

/// Maximum IF/EVALUATE terms on a single line before it is flagged.
const MAX_NESTING: usize = 2;

/// First maximal digit run of two or more digits on the line, if any.
fn magic_number(line: &str) -> Option<&str> {
    digit_run()
        .find_iter(line)
        .map(|m| m.as_str())
        .find(|run| run.len() >= 2)
}

/// Flags multi-digit literals in the Procedure division.
///
/// Level-number declarations (`NN name`) are exempt; PIC clause literals
/// are not.
pub struct MagicNumberRule;

impl Rule for MagicNumberRule {
    fn name(&self) -> &'static str {
        "magic-numbers"
    }

    fn description(&self) -> &'static str {
        "Flags unexplained multi-digit literals"
    }

    fn check(&self, source: &ParsedSource) -> Result<RuleOutcome> {
        let mut issues = Vec::new();
        for line in source.divisions.lines(Division::Procedure) {
            if level_prefix().is_match(&line.text) {
                continue;
            }
            if let Some(number) = magic_number(&line.text) {
                issues.push(
                    Issue::info("magic_number", format!("Magic number {number} detected"))
                        .with_line(line.number),
                );
            }
        }
        let count = issues.len() as u64;
        Ok(RuleOutcome::issues(issues).with_metric(Metric::MagicNumbers, count))
    }
}

/// Per-line IF/EVALUATE term count.
fn nesting_depth(upper: &str) -> usize {
    upper.matches("IF ").count() + upper.matches("EVALUATE ").count()
}

/// Flags lines stacking more than two condition terms; reports the maximum
/// depth seen as the `nested_conditions` metric.
pub struct NestedConditionRule;

impl Rule for NestedConditionRule {
    fn name(&self) -> &'static str {
        "nested-conditions"
    }

    fn description(&self) -> &'static str {
        "Flags lines stacking too many IF/EVALUATE terms"
    }

    fn check(&self, source: &ParsedSource) -> Result<RuleOutcome> {
        let mut issues = Vec::new();
        let mut max_depth: usize = 0;

        for line in source.divisions.lines(Division::Procedure) {
            let depth = nesting_depth(&line.text.to_uppercase());
            max_depth = max_depth.max(depth);
            if depth > MAX_NESTING {
                issues.push(
                    Issue::warning(
                        "nested_conditions",
                        format!("{depth} condition terms on a single line"),
                    )
                    .with_line(line.number),
                );
            }
        }

        Ok(RuleOutcome::issues(issues).with_metric(Metric::NestedConditions, max_depth as u64))
    }
}

/// Cyclomatic complexity over the Procedure division.
///
/// Base 1, plus one per decision point: IF/EVALUATE terms, PERFORM loops
/// (UNTIL/VARYING), GOTO transfers, and SECTION boundaries; IF lines also
/// add their AND/OR operator counts.
pub struct ComplexityRule;

impl Rule for ComplexityRule {
    fn name(&self) -> &'static str {
        "complexity"
    }

    fn description(&self) -> &'static str {
        "Computes cyclomatic complexity from decision points"
    }

    fn check(&self, source: &ParsedSource) -> Result<RuleOutcome> {
        let mut complexity: u64 = 1;

        for line in source.divisions.lines(Division::Procedure) {
            let upper = line.text.to_uppercase();
            if upper.contains("IF ") || upper.contains("EVALUATE ") {
                complexity += 1;
            }
            if upper.contains("PERFORM")
                && (upper.contains("UNTIL ") || upper.contains("VARYING "))
            {
                complexity += 1;
            }
            if upper.contains("GOTO ") {
                complexity += 1;
            }
            if upper.contains("SECTION.") {
                complexity += 1;
            }
            if upper.contains("IF ") {
                complexity +=
                    (upper.matches(" AND ").count() + upper.matches(" OR ").count()) as u64;
            }
        }

        Ok(RuleOutcome::default().with_metric(Metric::Complexity, complexity))
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::parse_procedure;
    use super::*;

    fn metric_value(outcome: &RuleOutcome) -> u64 {
        outcome.metrics[0].1
    }

    #[test]
    fn multi_digit_literals_are_magic() {
        let source = parse_procedure(&[
            "MAIN SECTION.",
            "    IF COUNTER > 100",
            "    ADD 1 TO COUNTER",
        ]);
        let outcome = MagicNumberRule.check(&source).unwrap();
        assert_eq!(outcome.issues.len(), 1);
        assert!(outcome.issues[0].message.contains("100"));
        assert_eq!(metric_value(&outcome), 1);
    }

    #[test]
    fn level_number_lines_are_exempt() {
        let source = parse_procedure(&["01 COUNTER", "05 FILLER"]);
        let outcome = MagicNumberRule.check(&source).unwrap();
        assert!(outcome.issues.is_empty());
    }

    #[test]
    fn single_digits_are_not_magic() {
        let source = parse_procedure(&["MAIN SECTION.", "    ADD 1 TO COUNTER"]);
        let outcome = MagicNumberRule.check(&source).unwrap();
        assert!(outcome.issues.is_empty());
    }

    #[test]
    fn nesting_depth_counts_condition_terms() {
        assert_eq!(nesting_depth("IF A = B"), 1);
        assert_eq!(nesting_depth("IF A = B AND IF C = D"), 2);
        assert_eq!(nesting_depth("MOVE A TO B"), 0);
    }

    #[test]
    fn deep_nesting_is_flagged_and_max_reported() {
        let source = parse_procedure(&[
            "MAIN SECTION.",
            "    IF A = B",
            "    IF A IF B IF C",
        ]);
        let outcome = NestedConditionRule.check(&source).unwrap();
        assert_eq!(outcome.issues.len(), 1);
        assert_eq!(outcome.issues[0].line, Some(4));
        assert_eq!(metric_value(&outcome), 3);
    }

    #[test]
    fn complexity_counts_decision_points() {
        let source = parse_procedure(&[
            "MAIN SECTION.",
            "    IF WS-A > 1 AND WS-B > 2",
            "    PERFORM LOOP-BODY UNTIL WS-A > 9",
            "    MOVE A TO B",
        ]);
        // 1 base + 1 section + (1 IF + 1 AND) + 1 loop
        let outcome = ComplexityRule.check(&source).unwrap();
        assert_eq!(metric_value(&outcome), 5);
    }

    #[test]
    fn empty_procedure_division_has_base_complexity() {
        let source = parse_procedure(&[]);
        let outcome = ComplexityRule.check(&source).unwrap();
        assert_eq!(metric_value(&outcome), 1);
    }
}
