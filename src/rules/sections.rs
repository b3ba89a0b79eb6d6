//! Section-level rules: empty sections and dead code

use super::control_flow::has_goto;
use super::{ParsedSource, Rule, RuleOutcome};
use crate::models::{Issue, Metric};
use anyhow::Result;

/// Flags sections whose body does nothing beyond EXIT.
pub struct EmptySectionRule;

impl Rule for EmptySectionRule {
    fn name(&self) -> &'static str {
        "empty-sections"
    }

    fn description(&self) -> &'static str {
        "Flags sections containing nothing but EXIT"
    }

    fn check(&self, source: &ParsedSource) -> Result<RuleOutcome> {
        let issues: Vec<Issue> = source
            .procedures
            .iter()
            .filter(|procedure| {
                procedure.body.iter().all(|line| {
                    let upper = line.text.trim().to_uppercase();
                    upper.is_empty() || upper == "EXIT." || upper == "EXIT"
                })
            })
            .map(|procedure| {
                Issue::info(
                    "empty_section",
                    format!("Section {} is empty", procedure.name),
                )
                .with_line(procedure.header_line)
            })
            .collect();

        let count = issues.len() as u64;
        Ok(RuleOutcome::issues(issues).with_metric(Metric::EmptySections, count))
    }
}

/// Flags sections with no PERFORM/GO TO entry signal in their own body.
///
/// This is a weak proxy for reachability, not a call-graph analysis: the
/// presence of any PERFORM or GO TO token inside a section is treated as
/// evidence the section participates in control flow. The first section is
/// exempt (it is the program entry), and the last section is evaluated by
/// the same rule at end-of-division.
pub struct DeadCodeRule;

impl Rule for DeadCodeRule {
    fn name(&self) -> &'static str {
        "dead-code"
    }

    fn description(&self) -> &'static str {
        "Flags sections that show no sign of participating in control flow"
    }

    fn check(&self, source: &ParsedSource) -> Result<RuleOutcome> {
        let issues: Vec<Issue> = source
            .procedures
            .iter()
            .enumerate()
            .skip(1)
            .filter(|(_, procedure)| {
                !procedure.body.iter().any(|line| {
                    let upper = line.text.to_uppercase();
                    upper.contains("PERFORM") || has_goto(&upper)
                })
            })
            .map(|(_, procedure)| {
                Issue::warning(
                    "dead_code",
                    format!("Section {} appears to be dead code", procedure.name),
                )
                .with_line(procedure.header_line)
            })
            .collect();

        let count = issues.len() as u64;
        Ok(RuleOutcome::issues(issues).with_metric(Metric::DeadCodeSections, count))
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::parse_procedure;
    use super::*;

    #[test]
    fn exit_only_sections_are_empty() {
        let source = parse_procedure(&[
            "INIT SECTION.",
            "    MOVE 0 TO WS-TOTAL.",
            "NOOP SECTION.",
            "    EXIT.",
            "BLANK SECTION.",
        ]);
        let outcome = EmptySectionRule.check(&source).unwrap();
        assert_eq!(outcome.issues.len(), 2);
        assert!(outcome.issues[0].message.contains("NOOP"));
        assert!(outcome.issues[1].message.contains("BLANK"));
        assert_eq!(outcome.metrics, vec![(Metric::EmptySections, 2)]);
    }

    #[test]
    fn dead_code_exempts_first_and_evaluates_last() {
        // A carries no entry signal but is the entry section; B performs;
        // C is last, carries nothing, and is the one flagged.
        let source = parse_procedure(&[
            "SECTION-A SECTION.",
            "    MOVE A TO B.",
            "SECTION-B SECTION.",
            "    MOVE C TO D.",
            "    PERFORM SECTION-A",
            "SECTION-C SECTION.",
            "    MOVE E TO F.",
        ]);
        let outcome = DeadCodeRule.check(&source).unwrap();
        assert_eq!(outcome.issues.len(), 1);
        assert!(outcome.issues[0].message.contains("SECTION-C"));
        assert_eq!(outcome.metrics, vec![(Metric::DeadCodeSections, 1)]);
    }

    #[test]
    fn go_to_counts_as_entry_signal() {
        let source = parse_procedure(&[
            "MAIN SECTION.",
            "    PERFORM LOOP-BODY",
            "LOOP-BODY SECTION.",
            "    GO TO MAIN",
        ]);
        let outcome = DeadCodeRule.check(&source).unwrap();
        assert!(outcome.issues.is_empty());
    }

    #[test]
    fn single_section_is_never_dead() {
        let source = parse_procedure(&["MAIN SECTION.", "    MOVE A TO B."]);
        let outcome = DeadCodeRule.check(&source).unwrap();
        assert!(outcome.issues.is_empty());
        assert_eq!(outcome.metrics, vec![(Metric::DeadCodeSections, 0)]);
    }
}
