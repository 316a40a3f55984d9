//! Position map construction
//!
//! Offsets are counted in characters so they index the reconstructed buffer
//! the same way regardless of the source encoding.

use serde::{Deserialize, Serialize};
use shared_types::PositionLine;

/// Reconstructed document text together with its per-line position map
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedText {
    /// Physical lines separated by a single `\n`
    pub raw_text: String,

    /// One entry per physical line, in document order
    pub position_map: Vec<PositionLine>,

    /// Number of pages the text was assembled from
    pub page_count: u32,
}

/// Build the buffer from per-page text
///
/// Every line of every page is appended followed by a newline. Line numbers
/// run across pages starting at 1; pages with no text add nothing but still
/// advance the page counter.
pub fn from_pages<S: AsRef<str>>(pages: &[S]) -> ExtractedText {
    let mut raw_text = String::new();
    let mut position_map = Vec::new();
    let mut char_len = 0usize;
    let mut line_number = 1u32;

    for (idx, page) in pages.iter().enumerate() {
        let page_text = page.as_ref();
        if page_text.is_empty() {
            continue;
        }

        for line in page_text.split('\n') {
            let line_chars = line.chars().count();
            raw_text.push_str(line);
            raw_text.push('\n');

            position_map.push(PositionLine {
                line_number,
                page: (idx + 1) as u32,
                text: line.trim().to_string(),
                char_start: char_len,
                char_end: char_len + line_chars,
            });

            char_len += line_chars + 1;
            line_number += 1;
        }
    }

    ExtractedText {
        raw_text,
        position_map,
        page_count: pages.len() as u32,
    }
}

/// Treat `text` as a single page and index it in place
pub fn from_plain_text(text: &str) -> ExtractedText {
    let mut char_pos = 0usize;

    let position_map = text
        .split('\n')
        .enumerate()
        .map(|(idx, line)| {
            let line_chars = line.chars().count();
            let entry = PositionLine {
                line_number: (idx + 1) as u32,
                page: 1,
                text: line.trim().to_string(),
                char_start: char_pos,
                char_end: char_pos + line_chars,
            };
            char_pos += line_chars + 1;
            entry
        })
        .collect();

    ExtractedText {
        raw_text: text.to_string(),
        position_map,
        page_count: 1,
    }
}
