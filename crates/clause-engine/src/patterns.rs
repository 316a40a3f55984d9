//! Regex patterns for clause headings and keyword matching

use lazy_static::lazy_static;
use regex::{Regex, RegexBuilder};

lazy_static! {
    /// Clause heading patterns in priority order; the first capture group is the clause id
    static ref CLAUSE_HEADING_PATTERNS: Vec<Regex> = vec![
        Regex::new(r"^Section\s+(\d+\.\d+|\d+)").unwrap(),
        Regex::new(r"^Clause\s+(\d+\.\d+|\d+)").unwrap(),
        Regex::new(r"^Article\s+(\d+\.\d+|\d+)").unwrap(),
        Regex::new(r"^\s*(\d+\.\d+)\s+").unwrap(),
        Regex::new(r"^\s*(\d+\.\d+\.\d+)\s+").unwrap(),
        Regex::new(r"^\s*(\d+)\.\s+").unwrap(),
    ];
}

/// Marker that flags a sentence as conditional
const CONDITIONAL_MARKER: &str = "if";

/// Return the clause id if `text` opens with a recognised heading
///
/// Patterns are tried in order and only the first match counts.
pub fn match_heading(text: &str) -> Option<String> {
    let text = text.trim();
    CLAUSE_HEADING_PATTERNS.iter().find_map(|pattern| {
        pattern
            .captures(text)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().to_string())
    })
}

/// Build a case-insensitive, whole-word matcher for a taxonomy keyword
pub fn keyword_matcher(keyword: &str) -> Result<Regex, regex::Error> {
    RegexBuilder::new(&format!(r"\b{}\b", regex::escape(keyword.trim())))
        .case_insensitive(true)
        .build()
}

/// True if "if" occurs anywhere in the sentence, in any casing
///
/// This is a substring test, so "notify" and "specified" also count.
pub fn is_conditional(sentence: &str) -> bool {
    sentence.to_lowercase().contains(CONDITIONAL_MARKER)
}
