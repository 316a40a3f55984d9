pub mod factors;
pub mod types;

pub use factors::RiskFactors;
pub use types::{
    Clause, ClauseReport, ContractReport, DocumentInfo, LinguisticSignals, Paragraph,
    PositionLine, Recommendation, RiskAnalysis, RiskLevel, RiskLine,
};
