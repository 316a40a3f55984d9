//! Linguistic-signal collaborators
//!
//! The scorer never parses language itself. A collaborator is built once by
//! the caller and handed to the analyzer, which asks it for sentence and
//! negation data per clause.

use lazy_static::lazy_static;
use regex::Regex;
use shared_types::LinguisticSignals;

use crate::error::SignalError;

lazy_static! {
    /// Negation markers a dependency parser would tag as `neg`
    static ref NEGATION_PATTERN: Regex =
        Regex::new(r"(?i)\b(?:not|never|nor|neither|cannot)\b|n['’]t\b").unwrap();
}

/// Source of sentence boundaries and negation tokens for a piece of text
pub trait LinguisticAnalyzer: Send + Sync {
    /// Short identifier used in logs
    fn name(&self) -> &'static str;

    fn analyze(&self, text: &str) -> Result<LinguisticSignals, SignalError>;
}

/// Rule-based collaborator for callers without an NLP service
///
/// Sentences end at `.`, `!` or `?` followed by whitespace, or at a newline.
/// The determiner "no" is not treated as a negation.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicAnalyzer;

impl HeuristicAnalyzer {
    pub fn new() -> Self {
        Self
    }
}

impl LinguisticAnalyzer for HeuristicAnalyzer {
    fn name(&self) -> &'static str {
        "heuristic"
    }

    fn analyze(&self, text: &str) -> Result<LinguisticSignals, SignalError> {
        Ok(LinguisticSignals {
            sentences: split_sentences(text),
            negation_tokens: NEGATION_PATTERN
                .find_iter(text)
                .map(|m| m.as_str().to_string())
                .collect(),
        })
    }
}

fn split_sentences(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((idx, c)) = chars.next() {
        let end = match c {
            '\n' => Some(idx),
            '.' | '!' | '?' => match chars.peek() {
                Some((_, next)) if next.is_whitespace() => Some(idx + 1),
                None => Some(idx + 1),
                _ => None,
            },
            _ => None,
        };

        if let Some(end) = end {
            push_sentence(&mut sentences, &text[start..end]);
            start = end;
        }
    }
    push_sentence(&mut sentences, &text[start..]);

    sentences
}

fn push_sentence(sentences: &mut Vec<String>, candidate: &str) {
    let candidate = candidate.trim();
    if !candidate.is_empty() {
        sentences.push(candidate.to_string());
    }
}

/// Cut `text` to at most `limit` characters on a character boundary
pub fn truncate_chars(text: &str, limit: usize) -> &str {
    match text.char_indices().nth(limit) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
