//! Post-scoring rules: remediation advice and source-line citations

pub mod recommendations;
pub mod risk_lines;

pub use recommendations::recommend;
pub use risk_lines::find_risk_lines;
