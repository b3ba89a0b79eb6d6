//! Division splitter
//!
//! Partitions raw COBOL source into the four division buckets by scanning
//! for `<word> DIVISION.` headers. Lines stream through a fold with an
//! explicit accumulator (the current division), so there is no instance
//! state and the file is never materialized twice.
//!
//! Two kinds of lines are skipped silently by design: lines seen before the
//! first division header, and blank/comment lines (`*` in the first
//! non-blank column).

pub mod structure;

use crate::errors::AuditError;
use regex::Regex;
use std::fs;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::sync::OnceLock;

static DIVISION_HEADER: OnceLock<Regex> = OnceLock::new();

fn division_header() -> &'static Regex {
    DIVISION_HEADER
        .get_or_init(|| Regex::new(r"(?i)^([A-Za-z0-9-]+)\s+DIVISION\s*\.").expect("valid regex"))
}

/// The four COBOL divisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Division {
    Identification,
    Environment,
    Data,
    Procedure,
}

impl Division {
    pub const ALL: [Division; 4] = [
        Division::Identification,
        Division::Environment,
        Division::Data,
        Division::Procedure,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Division::Identification => "IDENTIFICATION",
            Division::Environment => "ENVIRONMENT",
            Division::Data => "DATA",
            Division::Procedure => "PROCEDURE",
        }
    }

    fn from_keyword(word: &str) -> Option<Self> {
        match word.to_uppercase().as_str() {
            "IDENTIFICATION" => Some(Division::Identification),
            "ENVIRONMENT" => Some(Division::Environment),
            "DATA" => Some(Division::Data),
            "PROCEDURE" => Some(Division::Procedure),
            _ => None,
        }
    }
}

/// One physical source line, trimmed, with its 1-based line number.
///
/// The number is retained for every bucket entry so issues can point back
/// into the original file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLine {
    pub number: u32,
    pub text: String,
}

/// Ordered line buckets for the four divisions.
///
/// Insertion order within a bucket follows the file; membership is not
/// required to be contiguous (a re-encountered header resumes appending to
/// the same bucket).
#[derive(Debug, Clone, Default)]
pub struct DivisionSet {
    identification: Vec<SourceLine>,
    environment: Vec<SourceLine>,
    data: Vec<SourceLine>,
    procedure: Vec<SourceLine>,
}

impl DivisionSet {
    pub fn lines(&self, division: Division) -> &[SourceLine] {
        match division {
            Division::Identification => &self.identification,
            Division::Environment => &self.environment,
            Division::Data => &self.data,
            Division::Procedure => &self.procedure,
        }
    }

    fn bucket_mut(&mut self, division: Division) -> &mut Vec<SourceLine> {
        match division {
            Division::Identification => &mut self.identification,
            Division::Environment => &mut self.environment,
            Division::Data => &mut self.data,
            Division::Procedure => &mut self.procedure,
        }
    }

    pub fn is_empty(&self, division: Division) -> bool {
        self.lines(division).is_empty()
    }

    /// Total line count across all buckets (headers, blanks, and comments
    /// are never stored, so they never count).
    pub fn total_lines(&self) -> usize {
        Division::ALL.iter().map(|d| self.lines(*d).len()).sum()
    }
}

/// Fold one raw line into the set. Returns the division that is current
/// after this line.
fn fold_line(
    set: &mut DivisionSet,
    current: Option<Division>,
    number: u32,
    raw: &str,
) -> Result<Option<Division>, AuditError> {
    let line = raw.trim();
    if line.is_empty() || line.starts_with('*') {
        return Ok(current);
    }

    if let Some(caps) = division_header().captures(line) {
        let name = &caps[1];
        return match Division::from_keyword(name) {
            Some(division) => Ok(Some(division)),
            None => Err(AuditError::Parse {
                name: name.to_uppercase(),
                line: number,
            }),
        };
    }

    if let Some(division) = current {
        set.bucket_mut(division).push(SourceLine {
            number,
            text: line.to_string(),
        });
    }
    // Lines before the first header are dropped silently.
    Ok(current)
}

/// Split a readable source into division buckets, streaming line by line.
pub fn split_reader<R: BufRead>(reader: R, path: &Path) -> Result<DivisionSet, AuditError> {
    let mut set = DivisionSet::default();
    let mut current = None;
    for (index, line) in reader.lines().enumerate() {
        let raw = line.map_err(|source| AuditError::FileAccess {
            path: path.to_path_buf(),
            source,
        })?;
        current = fold_line(&mut set, current, (index + 1) as u32, &raw)?;
    }
    Ok(set)
}

/// Split a file on disk into division buckets.
pub fn split_file(path: &Path) -> Result<DivisionSet, AuditError> {
    let file = fs::File::open(path).map_err(|source| AuditError::FileAccess {
        path: path.to_path_buf(),
        source,
    })?;
    split_reader(BufReader::new(file), path)
}

/// Split in-memory lines. Used by the analyzer tests and by callers that
/// already hold the source.
pub fn split_lines<'a, I>(lines: I) -> Result<DivisionSet, AuditError>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut set = DivisionSet::default();
    let mut current = None;
    for (index, raw) in lines.into_iter().enumerate() {
        current = fold_line(&mut set, current, (index + 1) as u32, raw)?;
    }
    Ok(set)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_lines_into_their_divisions() {
        let set = split_lines([
            "IDENTIFICATION DIVISION.",
            "PROGRAM-ID. PAYROLL.",
            "DATA DIVISION.",
            "01 WS-TOTAL PIC 9(8).",
            "PROCEDURE DIVISION.",
            "MAIN SECTION.",
            "    MOVE 0 TO WS-TOTAL.",
        ])
        .unwrap();

        assert_eq!(set.lines(Division::Identification).len(), 1);
        assert_eq!(set.lines(Division::Data).len(), 1);
        assert_eq!(set.lines(Division::Procedure).len(), 2);
        assert!(set.is_empty(Division::Environment));
        assert_eq!(set.total_lines(), 4);
    }

    #[test]
    fn headers_are_not_stored_in_any_bucket() {
        let set = split_lines(["IDENTIFICATION DIVISION.", "PROCEDURE DIVISION."]).unwrap();
        assert_eq!(set.total_lines(), 0);
    }

    #[test]
    fn two_division_round_trip() {
        let set = split_lines([
            "IDENTIFICATION DIVISION.",
            "PROGRAM-ID. TEST.",
            "PROCEDURE DIVISION.",
            "MAIN SECTION.",
        ])
        .unwrap();
        assert!(!set.is_empty(Division::Identification));
        assert!(!set.is_empty(Division::Procedure));
        assert!(set.is_empty(Division::Environment));
        assert!(set.is_empty(Division::Data));
    }

    #[test]
    fn skips_blanks_comments_and_preheader_lines() {
        let set = split_lines([
            "floating text before any header",
            "",
            "* a comment",
            "IDENTIFICATION DIVISION.",
            "   * indented comment",
            "PROGRAM-ID. TEST.",
        ])
        .unwrap();
        assert_eq!(set.lines(Division::Identification).len(), 1);
        assert_eq!(set.total_lines(), 1);
    }

    #[test]
    fn header_matching_is_case_insensitive() {
        let set = split_lines(["identification division.", "PROGRAM-ID. TEST."]).unwrap();
        assert_eq!(set.lines(Division::Identification).len(), 1);
    }

    #[test]
    fn reencountered_header_resumes_the_same_bucket() {
        let set = split_lines([
            "DATA DIVISION.",
            "01 WS-A PIC X.",
            "PROCEDURE DIVISION.",
            "MAIN SECTION.",
            "DATA DIVISION.",
            "01 WS-B PIC X.",
        ])
        .unwrap();
        assert_eq!(set.lines(Division::Data).len(), 2);
        assert_eq!(set.lines(Division::Data)[1].text, "01 WS-B PIC X.");
    }

    #[test]
    fn line_numbers_are_one_based_and_retained() {
        let set = split_lines([
            "IDENTIFICATION DIVISION.",
            "PROGRAM-ID. TEST.",
            "",
            "PROCEDURE DIVISION.",
            "MAIN SECTION.",
        ])
        .unwrap();
        assert_eq!(set.lines(Division::Identification)[0].number, 2);
        assert_eq!(set.lines(Division::Procedure)[0].number, 5);
    }

    #[test]
    fn unknown_division_header_is_a_parse_error() {
        let err = split_lines(["NONSENSE DIVISION.", "SOME LINE."]).unwrap_err();
        match err {
            AuditError::Parse { name, line } => {
                assert_eq!(name, "NONSENSE");
                assert_eq!(line, 1);
            }
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn missing_file_is_a_file_access_error() {
        let err = split_file(Path::new("does-not-exist.cbl")).unwrap_err();
        assert!(matches!(err, AuditError::FileAccess { .. }));
    }
}
