//! Error taxonomy for the audit pipeline
//!
//! Quality findings are data, never errors: nothing in here is raised for a
//! detected code smell. These variants cover the failure surface only.

use std::path::PathBuf;
use thiserror::Error;

/// Failures the audit core can surface to callers.
#[derive(Debug, Error)]
pub enum AuditError {
    /// The source file is missing or unreadable. Fatal, surfaced verbatim.
    #[error("cannot read {path}: {source}")]
    FileAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A division header carried a name outside the four COBOL divisions.
    #[error("unrecognized division header '{name}' at line {line}")]
    Parse { name: String, line: u32 },

    /// Any internal failure during rule evaluation or metrics aggregation,
    /// re-wrapped at the analyzer boundary with its original cause.
    #[error("analysis failed: {cause}")]
    Analysis { cause: String },

    /// Report rendering failed. Owned by the reporters, not the core.
    #[error("report generation failed: {cause}")]
    Report { cause: String },
}

impl AuditError {
    /// Wrap an arbitrary failure as an analysis error carrying its cause.
    pub fn analysis(cause: impl std::fmt::Display) -> Self {
        AuditError::Analysis {
            cause: cause.to_string(),
        }
    }

    /// Wrap a rendering failure.
    pub fn report(cause: impl std::fmt::Display) -> Self {
        AuditError::Report {
            cause: cause.to_string(),
        }
    }
}
