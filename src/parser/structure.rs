//! Structural extraction: procedures and data items
//!
//! A procedure is a COBOL SECTION, recognized purely by its header line.
//! Paragraph labels and GOTO targets are deliberately not modeled as
//! procedures. A data item is any Data-division line whose leading token is
//! a numeric level.

use super::{Division, DivisionSet, SourceLine};
use regex::Regex;
use std::sync::OnceLock;

static SECTION_HEADER: OnceLock<Regex> = OnceLock::new();
static DATA_ITEM: OnceLock<Regex> = OnceLock::new();

fn section_header() -> &'static Regex {
    SECTION_HEADER
        .get_or_init(|| Regex::new(r"^([A-Z0-9][A-Z0-9-]*)\s+SECTION\s*\.").expect("valid regex"))
}

fn data_item_pattern() -> &'static Regex {
    DATA_ITEM.get_or_init(|| Regex::new(r"^\s*(\d+)\s+(\S+)").expect("valid regex"))
}

/// A SECTION-delimited unit of the Procedure division.
#[derive(Debug, Clone)]
pub struct Procedure {
    pub name: String,
    pub header_line: u32,
    /// Body lines up to (not including) the next SECTION header.
    pub body: Vec<SourceLine>,
}

/// A level-numbered entry of the Data division.
#[derive(Debug, Clone)]
pub struct DataItem {
    pub level: u32,
    /// Token following the level, trailing period stripped. May be FILLER.
    pub name: String,
    pub line: u32,
    pub text: String,
}

impl DataItem {
    pub fn is_filler(&self) -> bool {
        self.name.eq_ignore_ascii_case("FILLER")
    }
}

/// Does this line open a SECTION? Matched on the trimmed, upper-cased text.
pub fn is_section_header(text: &str) -> bool {
    section_header().is_match(&text.trim().to_uppercase())
}

/// Extract SECTION-delimited procedures from the Procedure division.
pub fn procedures(divisions: &DivisionSet) -> Vec<Procedure> {
    let mut procedures: Vec<Procedure> = Vec::new();

    for line in divisions.lines(Division::Procedure) {
        let upper = line.text.trim().to_uppercase();
        if let Some(caps) = section_header().captures(&upper) {
            procedures.push(Procedure {
                name: caps[1].to_string(),
                header_line: line.number,
                body: Vec::new(),
            });
        } else if let Some(current) = procedures.last_mut() {
            current.body.push(line.clone());
        }
        // Lines before the first SECTION header belong to no procedure.
    }

    procedures
}

/// Extract level-numbered data items from the Data division.
pub fn data_items(divisions: &DivisionSet) -> Vec<DataItem> {
    divisions
        .lines(Division::Data)
        .iter()
        .filter_map(|line| {
            let caps = data_item_pattern().captures(&line.text)?;
            let level: u32 = caps[1].parse().ok()?;
            let name = caps[2].trim_end_matches('.').to_uppercase();
            Some(DataItem {
                level,
                name,
                line: line.number,
                text: line.text.clone(),
            })
        })
        .collect()
}
