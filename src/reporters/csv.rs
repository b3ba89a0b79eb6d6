//! CSV reporter
//!
//! Sectioned rows: header block, structure and quality metrics,
//! recommendations, optional detailed analysis, then the issue table.

use crate::errors::AuditError;
use crate::models::{AuditReport, Metrics};

fn title_case(key: &str) -> String {
    key.split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Render report as CSV
pub fn render(report: &AuditReport) -> Result<String, AuditError> {
    let mut writer = csv::WriterBuilder::new()
        .flexible(true)
        .from_writer(Vec::new());

    let write = |writer: &mut csv::Writer<Vec<u8>>, row: &[String]| {
        writer.write_record(row).map_err(AuditError::report)
    };

    // Header block
    write(&mut writer, &["COBOL Audit Report".into()])?;
    write(
        &mut writer,
        &["File:".into(), report.file.display().to_string()],
    )?;
    write(
        &mut writer,
        &[
            "Date:".into(),
            report.generated_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        ],
    )?;
    write(
        &mut writer,
        &[
            "Score:".into(),
            format!("{:.1}", report.score),
            "Grade:".into(),
            report.grade.to_string(),
        ],
    )?;
    write(&mut writer, &[String::new()])?;

    // Metrics
    write(&mut writer, &["Metrics".into()])?;
    write(
        &mut writer,
        &["Category".into(), "Metric".into(), "Value".into()],
    )?;
    for (key, value) in report.metrics.entries() {
        let category = if Metrics::STRUCTURE_KEYS.contains(&key) {
            "Structure"
        } else {
            "Quality"
        };
        write(
            &mut writer,
            &[category.into(), title_case(key), value.to_string()],
        )?;
    }
    write(&mut writer, &[String::new()])?;

    // Recommendations
    if !report.recommendations.is_empty() {
        write(&mut writer, &["Recommendations".into()])?;
        for rec in &report.recommendations {
            write(&mut writer, &[rec.clone()])?;
        }
        write(&mut writer, &[String::new()])?;
    }

    // Detailed analysis
    if !report.detailed_analysis.is_empty() {
        write(&mut writer, &["Detailed Analysis".into()])?;
        for line in &report.detailed_analysis {
            write(&mut writer, &[line.clone()])?;
        }
        write(&mut writer, &[String::new()])?;
    }

    // Issues
    if !report.issues.is_empty() {
        write(&mut writer, &["Issues".into()])?;
        write(
            &mut writer,
            &[
                "Severity".into(),
                "Type".into(),
                "Message".into(),
                "Line".into(),
            ],
        )?;
        for issue in &report.issues {
            let line = issue
                .line
                .map(|n| n.to_string())
                .unwrap_or_else(|| "N/A".into());
            write(
                &mut writer,
                &[
                    issue.severity.to_string(),
                    issue.kind.clone(),
                    issue.message.clone(),
                    line,
                ],
            )?;
        }
    }

    let bytes = writer.into_inner().map_err(AuditError::report)?;
    String::from_utf8(bytes).map_err(AuditError::report)
}
