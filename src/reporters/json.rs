//! JSON reporter
//!
//! Pretty-printed JSON for machine consumption: metadata, score, the nine
//! metric keys, issues with stable field names, and recommendations.

use crate::errors::AuditError;
use crate::models::AuditReport;
use serde_json::json;

/// Render report as pretty-printed JSON
pub fn render(report: &AuditReport) -> Result<String, AuditError> {
    let mut payload = json!({
        "metadata": {
            "timestamp": report.generated_at.to_rfc3339(),
            "file_analyzed": report.file.display().to_string(),
            "tool_version": report.tool_version,
        },
        "audit_score": {
            "score": report.score,
            "grade": report.grade,
        },
        "metrics": report.metrics,
        "issues": report.issues.iter().map(|issue| json!({
            "severity": issue.severity,
            "message": issue.message,
            "type": issue.kind,
            "line": issue.line,
        })).collect::<Vec<_>>(),
        "recommendations": report.recommendations,
        "summary": {
            "total_issues": report.summary.total,
            "severity_counts": {
                "ERROR": report.summary.errors,
                "WARNING": report.summary.warnings,
                "INFO": report.summary.infos,
            },
        },
    });

    if !report.detailed_analysis.is_empty() {
        payload["detailed_analysis"] = json!(report.detailed_analysis);
    }

    serde_json::to_string_pretty(&payload).map_err(AuditError::report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reporters::tests::test_report;

    #[test]
    fn output_parses_with_stable_keys() {
        let out = render(&test_report()).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();

        assert_eq!(parsed["audit_score"]["grade"], "B");
        assert_eq!(parsed["metrics"]["total_lines"], 120);
        assert_eq!(parsed["metrics"]["dead_code_sections"], 0);
        assert_eq!(parsed["summary"]["total_issues"], 3);
        assert_eq!(parsed["summary"]["severity_counts"]["ERROR"], 1);

        let issue = &parsed["issues"][0];
        assert_eq!(issue["severity"], "WARNING");
        assert_eq!(issue["type"], "best_practice");
        assert_eq!(issue["line"], 12);
    }

    #[test]
    fn detailed_analysis_is_optional() {
        let mut report = test_report();
        let out = render(&report).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert!(parsed.get("detailed_analysis").is_none());

        report.detailed_analysis = vec!["Procedures: 4".into()];
        let parsed: serde_json::Value =
            serde_json::from_str(&render(&report).unwrap()).unwrap();
        assert_eq!(parsed["detailed_analysis"][0], "Procedures: 4");
    }

    #[test]
    fn issue_without_line_serializes_null() {
        let out = render(&test_report()).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
        // The structure error carries no line.
        assert!(parsed["issues"][2]["line"].is_null());
    }
}
