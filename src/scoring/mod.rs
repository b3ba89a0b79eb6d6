//! Weighted audit scoring and recommendations
//!
//! # Scoring formula
//!
//! ```text
//! score = clamp(100 - Σ penalty, 0, 100)
//! penalty = min(metric_value × weight × 10, weight × 100)   (per metric)
//! ```
//!
//! The per-metric cap means a single runaway metric can never cost more
//! than its weight share of the full 100 points. Grades follow the usual
//! scale: 90→A, 80→B, 70→C, 60→D, else F.
//!
//! Recommendations come from fixed (high, low) thresholds per metric: at or
//! above `high` the urgent message always fires; between `low` and `high`
//! the suggestion fires only in detailed mode.

use crate::models::{Grade, Metrics};

/// Fixed weights for the six quality metrics, in scoring order.
const METRIC_WEIGHTS: [(&str, f64); 6] = [
    ("complexity", 0.20),
    ("unused_vars", 0.15),
    ("empty_sections", 0.10),
    ("nested_conditions", 0.15),
    ("magic_numbers", 0.10),
    ("dead_code_sections", 0.30),
];

struct Threshold {
    metric: &'static str,
    high: u64,
    low: u64,
    urgent: &'static str,
    suggestion: &'static str,
}

const THRESHOLDS: [Threshold; 5] = [
    Threshold {
        metric: "complexity",
        high: 10,
        low: 5,
        urgent: "Reduce complexity by splitting complex procedures into sub-procedures",
        suggestion: "Consider simplifying the most complex procedures",
    },
    Threshold {
        metric: "unused_vars",
        high: 5,
        low: 2,
        urgent: "Clean up unused variables to improve maintainability",
        suggestion: "Review and remove potentially unneeded variables",
    },
    Threshold {
        metric: "nested_conditions",
        high: 4,
        low: 2,
        urgent: "Simplify nested conditions using decision tables",
        suggestion: "Evaluate whether some conditions can be combined",
    },
    Threshold {
        metric: "magic_numbers",
        high: 8,
        low: 4,
        urgent: "Define named constants for all magic numbers",
        suggestion: "Identify and replace the most frequently used magic numbers",
    },
    Threshold {
        metric: "dead_code_sections",
        high: 3,
        low: 1,
        urgent: "Remove dead code sections to improve maintainability",
        suggestion: "Review and document potentially dead sections",
    },
];

/// Weighted 0-100 score and its letter grade.
pub fn score(metrics: &Metrics) -> (f64, Grade) {
    let mut base: f64 = 100.0;

    for (key, weight) in METRIC_WEIGHTS {
        let value = metrics
            .quality_entries()
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| *v)
            .unwrap_or(0) as f64;
        let penalty = (value * weight * 10.0).min(weight * 100.0);
        base -= penalty;
    }

    let final_score = base.clamp(0.0, 100.0);
    (final_score, Grade::from_score(final_score))
}

/// Threshold-driven recommendation strings, in fixed metric order.
pub fn recommendations(metrics: &Metrics, detailed: bool) -> Vec<String> {
    let mut out = Vec::new();

    for threshold in &THRESHOLDS {
        let value = metrics
            .quality_entries()
            .iter()
            .find(|(k, _)| *k == threshold.metric)
            .map(|(_, v)| *v)
            .unwrap_or(0);

        if value >= threshold.high {
            out.push(format!("URGENT: {}", threshold.urgent));
        } else if detailed && value >= threshold.low {
            out.push(format!("SUGGESTION: {}", threshold.suggestion));
        }
    }

    out
}

/// Extra metric commentary for detailed reports.
pub fn detailed_analysis(metrics: &Metrics) -> Vec<String> {
    let mut out = Vec::new();

    if metrics.complexity > 0 {
        out.push(format!("Cyclomatic complexity: {}", metrics.complexity));
    }
    if metrics.procedures > 0 {
        out.push(format!("Procedures: {}", metrics.procedures));
        if metrics.total_lines > 0 {
            let per_procedure = metrics.total_lines as f64 / metrics.procedures as f64;
            out.push(format!("Average lines per procedure: {per_procedure:.1}"));
        }
    }

    out
}
