//! Contract analysis pipeline
//!
//! Segmentation runs sequentially over the whole document. Once clauses are
//! fixed, each one is scored independently (in parallel), and the reports
//! are ranked with a stable sort so ties keep document order.

use std::sync::Arc;

use rayon::prelude::*;
use shared_types::{
    Clause, ClauseReport, ContractReport, LinguisticSignals, PositionLine, RiskAnalysis,
    RiskFactors, RiskLevel,
};
use tracing::{info, warn};

use crate::error::{EngineError, SignalError};
use crate::rules::{find_risk_lines, recommend};
use crate::scoring::RiskScorer;
use crate::segment;
use crate::signals::{truncate_chars, LinguisticAnalyzer};
use crate::taxonomy::Taxonomy;

/// Clause segmentation and risk scoring engine
#[derive(Clone)]
pub struct ContractAnalyzer {
    taxonomy: Taxonomy,
    scorer: RiskScorer,
    linguistics: Option<Arc<dyn LinguisticAnalyzer>>,
}

impl ContractAnalyzer {
    /// Compile `taxonomy` into an analyzer without linguistic signals
    pub fn new(taxonomy: Taxonomy) -> Result<Self, EngineError> {
        let scorer = RiskScorer::new(&taxonomy)?;
        Ok(Self {
            taxonomy,
            scorer,
            linguistics: None,
        })
    }

    /// Analyzer over the built-in taxonomy
    pub fn builtin() -> Self {
        Self::new(Taxonomy::builtin()).expect("built-in taxonomy compiles")
    }

    /// Attach a collaborator that supplies sentences and negations per clause
    pub fn with_linguistics(mut self, analyzer: Arc<dyn LinguisticAnalyzer>) -> Self {
        self.linguistics = Some(analyzer);
        self
    }

    pub fn taxonomy(&self) -> &Taxonomy {
        &self.taxonomy
    }

    /// Partition the document into clauses without scoring them
    pub fn segment(&self, raw_text: &str, position_map: &[PositionLine]) -> Vec<Clause> {
        segment::segment(raw_text, position_map)
    }

    /// Score one piece of text and attach recommendations
    pub fn analyze_risk(&self, text: &str, signals: Option<&LinguisticSignals>) -> RiskAnalysis {
        let mut analysis = self.scorer.score(text, signals);
        analysis.recommendations = recommend(&analysis.risk_factors, &self.taxonomy);
        analysis
    }

    /// Score a sealed clause and cite its risky lines
    ///
    /// A collaborator failure is confined to this clause: it is reported with
    /// a zero score, no factors and the error message.
    pub fn analyze_clause(&self, clause: &Clause) -> ClauseReport {
        let signals = match self.signals_for(&clause.text) {
            Ok(signals) => signals,
            Err(e) => {
                let source = self.linguistics.as_ref().map_or("none", |nlp| nlp.name());
                warn!("Clause {}: {} (analyzer: {})", clause.id, e, source);
                return failed_report(clause, e.to_string());
            }
        };

        let analysis = self.analyze_risk(&clause.text, signals.as_ref());
        let risk_lines = find_risk_lines(&clause.lines, &analysis.risk_factors);

        ClauseReport {
            clause_id: clause.id.clone(),
            text: clause.text.clone(),
            risk_score: analysis.risk_score,
            risk_level: RiskLevel::from_score(analysis.risk_score),
            risk_factors: analysis.risk_factors,
            recommendations: analysis.recommendations,
            risk_lines,
            error: None,
        }
    }

    /// Run the full pipeline over extracted text
    pub fn analyze(&self, raw_text: &str, position_map: &[PositionLine]) -> ContractReport {
        let clauses = self.segment(raw_text, position_map);

        let reports: Vec<ClauseReport> = clauses
            .par_iter()
            .map(|clause| self.analyze_clause(clause))
            .collect();

        let report = rank(reports);
        info!(
            "Analyzed {} clauses: {} high, {} medium, {} low",
            report.total_clauses,
            report.high_risk_count,
            report.medium_risk_count,
            report.low_risk_count
        );
        report
    }

    fn signals_for(&self, text: &str) -> Result<Option<LinguisticSignals>, SignalError> {
        match &self.linguistics {
            Some(nlp) => {
                let limit = self.scorer.weights().signal_text_limit;
                nlp.analyze(truncate_chars(text, limit)).map(Some)
            }
            None => Ok(None),
        }
    }
}

impl Default for ContractAnalyzer {
    fn default() -> Self {
        Self::builtin()
    }
}

fn failed_report(clause: &Clause, error: String) -> ClauseReport {
    ClauseReport {
        clause_id: clause.id.clone(),
        text: clause.text.clone(),
        risk_score: 0.0,
        risk_level: RiskLevel::Low,
        risk_factors: RiskFactors::new(),
        recommendations: Vec::new(),
        risk_lines: Vec::new(),
        error: Some(error),
    }
}

/// Sort clause reports by score, highest first, and count severity buckets
///
/// The sort is stable, so equal scores keep their incoming order.
pub fn rank(mut clauses: Vec<ClauseReport>) -> ContractReport {
    clauses.sort_by(|a, b| b.risk_score.total_cmp(&a.risk_score));

    let mut report = ContractReport {
        total_clauses: clauses.len(),
        ..Default::default()
    };
    for clause in &clauses {
        match RiskLevel::from_score(clause.risk_score) {
            RiskLevel::High => report.high_risk_count += 1,
            RiskLevel::Medium => report.medium_risk_count += 1,
            RiskLevel::Low => report.low_risk_count += 1,
        }
    }
    report.clauses = clauses;

    report
}
