//! Clause risk scoring
//!
//! The score is additive and starts at zero:
//! - each distinct taxonomy keyword found as a whole word adds its category weight
//! - each percentage and each currency amount adds its weight, per occurrence
//! - with linguistic signals, each conditional sentence and each negation
//!   token adds its weight
//!
//! Keyword matchers are compiled once when the scorer is built.

use regex::Regex;
use shared_types::{LinguisticSignals, RiskAnalysis, RiskFactors};
use tracing::debug;

use crate::error::EngineError;
use crate::extractors::{extract_amounts, extract_percentages};
use crate::patterns::{is_conditional, keyword_matcher};
use crate::taxonomy::{ScoringWeights, Taxonomy};

pub const PERCENTAGES: &str = "percentages";
pub const AMOUNTS: &str = "amounts";
pub const CONDITIONALS: &str = "conditionals";
pub const NEGATIONS: &str = "negations";

/// Categories the scorer fills itself; taxonomies may not reuse these names
pub const SYNTHETIC_CATEGORIES: &[&str] = &[PERCENTAGES, AMOUNTS, CONDITIONALS, NEGATIONS];

#[derive(Debug, Clone)]
struct CompiledKeyword {
    term: String,
    matcher: Regex,
}

#[derive(Debug, Clone)]
struct CompiledCategory {
    name: String,
    weight: f64,
    keywords: Vec<CompiledKeyword>,
}

/// Scores clause text against a compiled taxonomy
#[derive(Debug, Clone)]
pub struct RiskScorer {
    categories: Vec<CompiledCategory>,
    weights: ScoringWeights,
}

impl RiskScorer {
    pub fn new(taxonomy: &Taxonomy) -> Result<Self, EngineError> {
        taxonomy.validate()?;

        let categories = taxonomy
            .categories
            .iter()
            .map(|category| {
                let keywords = category
                    .keywords
                    .iter()
                    .map(|keyword| {
                        keyword_matcher(keyword)
                            .map(|matcher| CompiledKeyword {
                                term: keyword.clone(),
                                matcher,
                            })
                            .map_err(|source| EngineError::Keyword {
                                category: category.name.clone(),
                                keyword: keyword.clone(),
                                source,
                            })
                    })
                    .collect::<Result<Vec<_>, _>>()?;

                Ok(CompiledCategory {
                    name: category.name.clone(),
                    weight: category.effective_weight(),
                    keywords,
                })
            })
            .collect::<Result<Vec<_>, EngineError>>()?;

        Ok(Self {
            categories,
            weights: taxonomy.scoring.clone(),
        })
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    /// Score a clause; recommendations are left empty
    pub fn score(&self, text: &str, signals: Option<&LinguisticSignals>) -> RiskAnalysis {
        let mut risk_score = 0.0;
        let mut risk_factors = RiskFactors::new();

        for category in &self.categories {
            for keyword in &category.keywords {
                if keyword.matcher.is_match(text) {
                    risk_score += category.weight;
                    risk_factors.record(&category.name, keyword.term.as_str());
                }
            }
        }

        let percentages = extract_percentages(text);
        risk_score += percentages.len() as f64 * self.weights.percentage_weight;
        risk_factors.record_all(PERCENTAGES, percentages);

        let amounts = extract_amounts(text);
        risk_score += amounts.len() as f64 * self.weights.amount_weight;
        risk_factors.record_all(AMOUNTS, amounts);

        if let Some(signals) = signals {
            let conditionals: Vec<&String> = signals
                .sentences
                .iter()
                .filter(|sentence| is_conditional(sentence))
                .collect();
            risk_score += conditionals.len() as f64 * self.weights.conditional_weight;
            risk_factors.record_all(
                CONDITIONALS,
                conditionals
                    .into_iter()
                    .take(self.weights.max_recorded_conditionals)
                    .cloned(),
            );

            risk_score += signals.negation_tokens.len() as f64 * self.weights.negation_weight;
            risk_factors.record_all(NEGATIONS, signals.negation_tokens.iter().cloned());
        }

        debug!(
            "Scored clause: {} factor categories, score {}",
            risk_factors.len(),
            risk_score
        );

        RiskAnalysis {
            risk_score,
            risk_factors,
            recommendations: Vec::new(),
        }
    }
}
