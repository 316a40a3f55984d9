use serde::{Deserialize, Serialize};

/// One physical line of the reconstructed document text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionLine {
    pub line_number: u32, // 1-based, monotonically increasing
    pub page: u32,        // 1-based
    pub text: String,     // Trimmed line text
    pub char_start: usize,
    pub char_end: usize, // Exclusive end of the line content
}

impl PositionLine {
    /// True if the whole line lies inside `[start, end]`
    pub fn within(&self, start: usize, end: usize) -> bool {
        self.char_start >= start && self.char_end <= end
    }
}

/// A blank-line delimited block of text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paragraph {
    pub text: String, // Trimmed lines joined with a single space
    pub char_start: usize,
    pub char_end: usize,
}

/// A heading-delimited unit of contract text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clause {
    pub id: String, // Heading label, e.g. "3.2"
    pub text: String,
    pub char_start: usize,
    pub char_end: usize,
    pub lines: Vec<PositionLine>,
}

/// Sentence and negation data computed outside the engine
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinguisticSignals {
    pub sentences: Vec<String>,
    pub negation_tokens: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub category: String,
    pub recommendation: String,
    pub terms: Vec<String>,
}

/// Scoring outcome for a single clause
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RiskAnalysis {
    pub risk_score: f64,
    pub risk_factors: crate::RiskFactors,
    pub recommendations: Vec<Recommendation>,
}

/// A source line citing one or more flagged terms
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskLine {
    pub line_number: u32,
    pub page: u32,
    pub text: String,
    pub terms: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    High,
    Medium,
    Low,
}

impl RiskLevel {
    /// Bucket a score: above 5 is high, above 2 is medium, anything else is low
    pub fn from_score(score: f64) -> Self {
        if score > 5.0 {
            RiskLevel::High
        } else if score > 2.0 {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClauseReport {
    pub clause_id: String,
    pub text: String,
    pub risk_score: f64,
    pub risk_level: RiskLevel,
    pub risk_factors: crate::RiskFactors,
    pub recommendations: Vec<Recommendation>,
    pub risk_lines: Vec<RiskLine>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>, // Set when scoring this clause failed
}

/// Where the analysed text came from, filled in by the transport
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentInfo {
    pub filename: Option<String>,
    pub pages: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContractReport {
    pub clauses: Vec<ClauseReport>, // Sorted by risk_score, descending
    pub total_clauses: usize,
    pub high_risk_count: usize,
    pub medium_risk_count: usize,
    pub low_risk_count: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document: Option<DocumentInfo>,
}
