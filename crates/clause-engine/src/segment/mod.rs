//! Clause segmentation
//!
//! Text is split into paragraphs first, then paragraphs are partitioned into
//! clauses. Both passes are sequential: clause boundaries depend on scan order.

pub mod clauses;
pub mod paragraphs;

pub use clauses::identify_clauses;
pub use paragraphs::split_paragraphs;

use shared_types::{Clause, PositionLine};
use tracing::{debug, warn};

/// Segment `raw_text` into clauses with their source lines attached
///
/// Position lines that are inverted or reach past the end of the text are
/// left out of line attribution instead of failing the run.
pub fn segment(raw_text: &str, position_map: &[PositionLine]) -> Vec<Clause> {
    let text_len = raw_text.chars().count();
    let (usable, skipped): (Vec<PositionLine>, Vec<PositionLine>) = position_map
        .iter()
        .cloned()
        .partition(|line| line.char_start <= line.char_end && line.char_end <= text_len);

    if !skipped.is_empty() {
        warn!(
            "Skipping {} position lines outside the {}-character text",
            skipped.len(),
            text_len
        );
    }

    let paragraphs = split_paragraphs(raw_text);
    let clauses = identify_clauses(&paragraphs, &usable);
    debug!(
        "Segmented {} paragraphs into {} clauses",
        paragraphs.len(),
        clauses.len()
    );

    clauses
}
