use shared_types::{Clause, Paragraph, PositionLine};
use tracing::debug;

use crate::patterns::match_heading;

/// Clause accumulation state while paragraphs are scanned in order
#[derive(Debug)]
enum ClauseState {
    /// No heading seen yet; paragraphs are discarded
    Idle,
    /// A clause is accumulating paragraphs until the next heading
    Open(OpenClause),
}

#[derive(Debug)]
struct OpenClause {
    id: String,
    text: String,
    char_start: usize,
    char_end: usize,
}

impl OpenClause {
    fn seal(self, lines: &[PositionLine]) -> Clause {
        let lines = lines
            .iter()
            .filter(|line| line.within(self.char_start, self.char_end))
            .cloned()
            .collect();

        Clause {
            id: self.id,
            text: self.text,
            char_start: self.char_start,
            char_end: self.char_end,
            lines,
        }
    }
}

/// Partition paragraphs into heading-delimited clauses
///
/// A paragraph opening with a heading seals the clause in progress and opens
/// a new one; any other paragraph extends the open clause. Paragraphs before
/// the first heading are dropped.
pub fn identify_clauses(paragraphs: &[Paragraph], lines: &[PositionLine]) -> Vec<Clause> {
    let mut clauses = Vec::new();
    let mut state = ClauseState::Idle;
    let mut dropped = 0usize;

    for paragraph in paragraphs {
        let para_text = paragraph.text.trim();

        state = match (match_heading(para_text), state) {
            (Some(id), previous) => {
                if let ClauseState::Open(open) = previous {
                    clauses.push(open.seal(lines));
                }
                ClauseState::Open(OpenClause {
                    id,
                    text: para_text.to_string(),
                    char_start: paragraph.char_start,
                    char_end: paragraph.char_end,
                })
            }
            (None, ClauseState::Open(mut open)) => {
                open.text.push('\n');
                open.text.push_str(para_text);
                open.char_end = paragraph.char_end;
                ClauseState::Open(open)
            }
            (None, ClauseState::Idle) => {
                dropped += 1;
                ClauseState::Idle
            }
        };
    }

    if let ClauseState::Open(open) = state {
        clauses.push(open.seal(lines));
    }

    if dropped > 0 {
        debug!("Dropped {} paragraphs before the first clause heading", dropped);
    }

    clauses
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segment::split_paragraphs;
    use pretty_assertions::assert_eq;

    fn line(line_number: u32, char_start: usize, char_end: usize) -> PositionLine {
        PositionLine {
            line_number,
            page: 1,
            text: String::new(),
            char_start,
            char_end,
        }
    }

    #[test]
    fn test_headings_open_new_clauses() {
        let text = "Section 1.1 Rent\n\nbody of one\n\nSection 1.2 Term\n\n3.1 Water use";
        let clauses = identify_clauses(&split_paragraphs(text), &[]);

        let ids: Vec<&str> = clauses.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["1.1", "1.2", "3.1"]);
        assert_eq!(clauses[0].text, "Section 1.1 Rent\nbody of one");
        assert_eq!(clauses[0].char_start, 0);
        assert_eq!(clauses[0].char_end, 29);
    }

    #[test]
    fn test_preamble_before_first_heading_is_dropped() {
        let text = "FARM LEASE AGREEMENT\n\nBetween the parties\n\n1. Term\n\nOne year.";
        let clauses = identify_clauses(&split_paragraphs(text), &[]);

        assert_eq!(clauses.len(), 1);
        assert_eq!(clauses[0].id, "1");
        assert_eq!(clauses[0].text, "1. Term\nOne year.");
    }

    #[test]
    fn test_no_headings_no_clauses() {
        let text = "Just prose.\n\nMore prose.";
        assert!(identify_clauses(&split_paragraphs(text), &[]).is_empty());
    }

    #[test]
    fn test_lines_attached_by_containment() {
        // "Section 1 A" [0,11) / "" / "Section 2 B" [13,24)
        let text = "Section 1 A\n\nSection 2 B";
        let lines = vec![line(1, 0, 11), line(2, 12, 12), line(3, 13, 24)];
        let clauses = identify_clauses(&split_paragraphs(text), &lines);

        assert_eq!(clauses.len(), 2);
        let first: Vec<u32> = clauses[0].lines.iter().map(|l| l.line_number).collect();
        let second: Vec<u32> = clauses[1].lines.iter().map(|l| l.line_number).collect();
        assert_eq!(first, vec![1]);
        assert_eq!(second, vec![3]);
    }

    #[test]
    fn test_identical_input_identical_clauses() {
        let text = "Article 1 Scope\n\nterms\n\nArticle 2 Price\nmarket price";
        let paragraphs = split_paragraphs(text);
        assert_eq!(
            identify_clauses(&paragraphs, &[]),
            identify_clauses(&paragraphs, &[])
        );
    }
}
