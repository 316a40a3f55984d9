use shared_types::{PositionLine, RiskFactors, RiskLine};

/// Cite the clause lines that mention any flagged term
///
/// Every recorded term is pooled, numeric and sentence evidence included,
/// and tested as a case-insensitive substring of each line. This is looser
/// than scoring's whole-word match: "fee" cites a line containing "feedback".
pub fn find_risk_lines(lines: &[PositionLine], factors: &RiskFactors) -> Vec<RiskLine> {
    let pool: Vec<(&str, String)> = factors
        .all_terms()
        .map(|term| (term, term.to_lowercase()))
        .collect();

    if pool.is_empty() {
        return Vec::new();
    }

    lines
        .iter()
        .filter_map(|line| {
            let line_text = line.text.to_lowercase();
            let terms: Vec<String> = pool
                .iter()
                .filter(|(_, lowered)| line_text.contains(lowered.as_str()))
                .map(|(term, _)| term.to_string())
                .collect();

            if terms.is_empty() {
                None
            } else {
                Some(RiskLine {
                    line_number: line.line_number,
                    page: line.page,
                    text: line.text.clone(),
                    terms,
                })
            }
        })
        .collect()
}
