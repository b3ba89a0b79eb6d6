//! SonarQube reporter
//!
//! Emits the generic issue-import payload: one `CODE_SMELL` entry per
//! issue, a metric array, and a quality gate derived from the grade.

use crate::errors::AuditError;
use crate::models::{AuditReport, Grade};
use serde_json::json;

fn gate_status(grade: Grade) -> &'static str {
    match grade {
        Grade::A | Grade::B => "OK",
        Grade::C => "WARN",
        Grade::D | Grade::F => "ERROR",
    }
}

/// Render report as a SonarQube generic issue payload
pub fn render(report: &AuditReport) -> Result<String, AuditError> {
    let file_path = report.file.display().to_string();

    let payload = json!({
        "issues": report.issues.iter().map(|issue| {
            let line = issue.line.unwrap_or(1);
            json!({
                "engineId": "cobol-audit",
                "ruleId": issue.kind,
                "severity": issue.severity.to_string().to_lowercase(),
                "type": "CODE_SMELL",
                "primaryLocation": {
                    "message": issue.message,
                    "filePath": file_path,
                    "textRange": {
                        "startLine": line,
                        "endLine": line,
                    },
                },
            })
        }).collect::<Vec<_>>(),
        "metrics": report.metrics.entries().iter().map(|(key, value)| json!({
            "metric": key,
            "value": value,
        })).collect::<Vec<_>>(),
        "quality_gate": {
            "status": gate_status(report.grade),
            "score": report.score,
            "grade": report.grade,
        },
        "recommendations": report.recommendations,
    });

    serde_json::to_string_pretty(&payload).map_err(AuditError::report)
}
