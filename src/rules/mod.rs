//! Quality rules
//!
//! Each rule is a pure check unit: given the parsed source, it returns
//! findings and/or metric values and shares no state with other rules. The
//! analyzer runs the fixed ordered list from [`default_rules`], so new
//! rules slot in here without touching the analyzer's control flow.
//!
//! All rules match on one physical line at a time; statements split across
//! lines are a known source of false negatives.

mod complexity;
mod control_flow;
mod data;
mod sections;
mod structure;

pub use complexity::{ComplexityRule, MagicNumberRule, NestedConditionRule};
pub use control_flow::{AlteredGotoRule, GotoUsageRule, PerformThruRule};
pub use data::{FillerDocumentationRule, LevelOrderingRule, UnusedVariableRule};
pub use sections::{DeadCodeRule, EmptySectionRule};
pub use structure::{DivisionPresenceRule, NamingConventionRule};

use crate::models::{Issue, Metric};
use crate::parser::structure::{DataItem, Procedure};
use crate::parser::DivisionSet;
use anyhow::Result;

/// The parsed view of one source file that rules consume.
pub struct ParsedSource {
    pub divisions: DivisionSet,
    pub procedures: Vec<Procedure>,
    pub data_items: Vec<DataItem>,
}

/// What one rule contributes to the analysis result.
#[derive(Debug, Default)]
pub struct RuleOutcome {
    pub issues: Vec<Issue>,
    pub metrics: Vec<(Metric, u64)>,
}

impl RuleOutcome {
    pub fn issues(issues: Vec<Issue>) -> Self {
        Self {
            issues,
            metrics: Vec::new(),
        }
    }

    pub fn with_metric(mut self, metric: Metric, value: u64) -> Self {
        self.metrics.push((metric, value));
        self
    }
}

/// A single audit check.
///
/// Implementations must be deterministic and derive everything from the
/// given source; the analyzer relies on that for reproducible output.
pub trait Rule: Send + Sync {
    /// Unique identifier, used in logs.
    fn name(&self) -> &'static str;

    /// Human-readable description of what this rule flags.
    fn description(&self) -> &'static str;

    fn check(&self, source: &ParsedSource) -> Result<RuleOutcome>;
}

/// The full rule battery in its fixed execution order: structure first,
/// then the two simple per-line checks, then the advanced rules, with the
/// complexity metric last.
pub fn default_rules() -> Vec<Box<dyn Rule>> {
    vec![
        Box::new(DivisionPresenceRule),
        Box::new(GotoUsageRule),
        Box::new(FillerDocumentationRule),
        Box::new(UnusedVariableRule),
        Box::new(EmptySectionRule),
        Box::new(DeadCodeRule),
        Box::new(MagicNumberRule),
        Box::new(NestedConditionRule),
        Box::new(PerformThruRule),
        Box::new(AlteredGotoRule),
        Box::new(LevelOrderingRule),
        Box::new(NamingConventionRule),
        Box::new(ComplexityRule),
    ]
}
