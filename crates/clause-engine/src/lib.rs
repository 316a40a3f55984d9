//! Clause segmentation and risk scoring for contract text
//!
//! Input is the reconstructed document text plus its per-line position map;
//! output is a [`ContractReport`] ranking every clause by risk with
//! recommendations and source-line citations.

pub mod analyzer;
pub mod error;
pub mod extractors;
pub mod patterns;
pub mod rules;
pub mod scoring;
pub mod segment;
pub mod signals;
pub mod taxonomy;

pub use analyzer::{rank, ContractAnalyzer};
pub use error::{EngineError, SignalError};
pub use scoring::RiskScorer;
pub use signals::{HeuristicAnalyzer, LinguisticAnalyzer};
pub use taxonomy::{CategorySpec, ScoringWeights, Taxonomy, Tier};

pub use shared_types::{ClauseReport, ContractReport, LinguisticSignals, PositionLine};
