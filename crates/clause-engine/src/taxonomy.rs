//! Risk taxonomy configuration
//!
//! Keyword categories, their weights and their remediation advice are data,
//! not code: they are parsed from TOML so a category can be added without
//! touching the scorer. The built-in taxonomy is embedded from
//! `taxonomy.toml` at the crate root.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::scoring::SYNTHETIC_CATEGORIES;

const BUILTIN_TAXONOMY: &str = include_str!("../taxonomy.toml");

/// Complete taxonomy loaded from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Taxonomy {
    /// Weights for the numeric and linguistic signals
    #[serde(default)]
    pub scoring: ScoringWeights,
    /// Keyword categories, in evaluation order
    pub categories: Vec<CategorySpec>,
}

/// Which family a keyword category belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    General,
    Domain,
}

/// A single keyword category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySpec {
    pub name: String,
    #[serde(default = "default_tier")]
    pub tier: Tier,
    /// Score added per distinct keyword found in a clause; defaults by tier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    pub keywords: Vec<String>,
    #[serde(default)]
    pub recommendation: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringWeights {
    #[serde(default = "default_unit_weight")]
    pub percentage_weight: f64,
    #[serde(default = "default_unit_weight")]
    pub amount_weight: f64,
    #[serde(default = "default_signal_weight")]
    pub conditional_weight: f64,
    #[serde(default = "default_signal_weight")]
    pub negation_weight: f64,
    /// How many conditional sentences are kept as evidence
    #[serde(default = "default_max_conditionals")]
    pub max_recorded_conditionals: usize,
    /// Characters of clause text handed to the linguistic collaborator
    #[serde(default = "default_signal_text_limit")]
    pub signal_text_limit: usize,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            percentage_weight: default_unit_weight(),
            amount_weight: default_unit_weight(),
            conditional_weight: default_signal_weight(),
            negation_weight: default_signal_weight(),
            max_recorded_conditionals: default_max_conditionals(),
            signal_text_limit: default_signal_text_limit(),
        }
    }
}

fn default_tier() -> Tier {
    Tier::General
}

impl Tier {
    /// Keyword weight for categories that do not set one
    pub fn default_weight(self) -> f64 {
        match self {
            Tier::General => 1.0,
            Tier::Domain => 1.5,
        }
    }
}

impl CategorySpec {
    /// The configured weight, or the tier default when none is set
    pub fn effective_weight(&self) -> f64 {
        self.weight.unwrap_or_else(|| self.tier.default_weight())
    }
}

fn default_unit_weight() -> f64 {
    1.0
}

fn default_signal_weight() -> f64 {
    0.5
}

fn default_max_conditionals() -> usize {
    3
}

fn default_signal_text_limit() -> usize {
    10_000
}

impl Taxonomy {
    /// The taxonomy shipped with the engine
    pub fn builtin() -> Self {
        Self::from_toml_str(BUILTIN_TAXONOMY).expect("embedded taxonomy.toml is valid")
    }

    /// Load a taxonomy from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, EngineError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| EngineError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Parse and validate a taxonomy from a TOML string
    pub fn from_toml_str(s: &str) -> Result<Self, EngineError> {
        let mut taxonomy: Taxonomy = toml::from_str(s)?;
        for category in &mut taxonomy.categories {
            category.weight.get_or_insert(category.tier.default_weight());
        }
        taxonomy.validate()?;
        Ok(taxonomy)
    }

    /// Check structural rules that serde cannot express
    ///
    /// Keyword compilation is checked separately when the scorer is built.
    pub fn validate(&self) -> Result<(), EngineError> {
        let mut seen = HashSet::new();

        for category in &self.categories {
            if category.name.trim().is_empty() {
                return Err(EngineError::Invalid("category name is empty".to_string()));
            }
            if SYNTHETIC_CATEGORIES.contains(&category.name.as_str()) {
                return Err(EngineError::Invalid(format!(
                    "category name '{}' is reserved",
                    category.name
                )));
            }
            if !seen.insert(category.name.as_str()) {
                return Err(EngineError::Invalid(format!(
                    "category '{}' is defined more than once",
                    category.name
                )));
            }
            if category.keywords.is_empty() {
                return Err(EngineError::Invalid(format!(
                    "category '{}' has no keywords",
                    category.name
                )));
            }
            if let Some(keyword) = category.keywords.iter().find(|k| k.trim().is_empty()) {
                return Err(EngineError::Invalid(format!(
                    "category '{}' has a blank keyword {:?}",
                    category.name, keyword
                )));
            }
            check_weight(&category.name, category.effective_weight())?;
        }

        let s = &self.scoring;
        check_weight("percentage_weight", s.percentage_weight)?;
        check_weight("amount_weight", s.amount_weight)?;
        check_weight("conditional_weight", s.conditional_weight)?;
        check_weight("negation_weight", s.negation_weight)?;

        Ok(())
    }

    pub fn category(&self, name: &str) -> Option<&CategorySpec> {
        self.categories.iter().find(|c| c.name == name)
    }

    /// Remediation advice registered for `category`, if any
    pub fn recommendation_for(&self, category: &str) -> Option<&str> {
        self.category(category)
            .and_then(|c| c.recommendation.as_deref())
    }
}

impl Default for Taxonomy {
    fn default() -> Self {
        Self::builtin()
    }
}

fn check_weight(name: &str, weight: f64) -> Result<(), EngineError> {
    if weight.is_finite() && weight >= 0.0 {
        Ok(())
    } else {
        Err(EngineError::Invalid(format!(
            "weight for '{}' must be a finite non-negative number (found {})",
            name, weight
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_taxonomy_shape() {
        let taxonomy = Taxonomy::builtin();

        let general: Vec<&str> = taxonomy
            .categories
            .iter()
            .filter(|c| c.tier == Tier::General)
            .map(|c| c.name.as_str())
            .collect();
        let domain: Vec<&str> = taxonomy
            .categories
            .iter()
            .filter(|c| c.tier == Tier::Domain)
            .map(|c| c.name.as_str())
            .collect();

        assert_eq!(
            general,
            vec!["penalties", "time_constraints", "payment_terms", "liability", "termination"]
        );
        assert_eq!(
            domain,
            vec![
                "crop_terms",
                "land_use",
                "weather_clauses",
                "price_terms",
                "equipment",
                "pesticides",
                "water_rights"
            ]
        );
        assert!(taxonomy.categories.iter().all(|c| c.recommendation.is_some()));
    }

    #[test]
    fn test_builtin_weights() {
        let taxonomy = Taxonomy::builtin();
        assert_eq!(taxonomy.category("penalties").unwrap().effective_weight(), 1.0);
        assert_eq!(taxonomy.category("water_rights").unwrap().effective_weight(), 1.5);
        assert_eq!(taxonomy.scoring, ScoringWeights::default());
    }

    #[test]
    fn test_synthetic_categories_have_no_recommendation() {
        let taxonomy = Taxonomy::builtin();
        for name in ["percentages", "amounts", "conditionals", "negations"] {
            assert!(taxonomy.recommendation_for(name).is_none());
        }
        assert!(taxonomy.recommendation_for("liability").is_some());
    }

    #[test]
    fn test_minimal_taxonomy_uses_defaults() {
        let toml = r#"
            [[categories]]
            name = "custom"
            keywords = ["escrow"]
        "#;
        let taxonomy = Taxonomy::from_toml_str(toml).unwrap();
        let custom = taxonomy.category("custom").unwrap();
        assert_eq!(custom.tier, Tier::General);
        assert_eq!(custom.weight, Some(1.0));
        assert!(custom.recommendation.is_none());
        assert_eq!(taxonomy.scoring.max_recorded_conditionals, 3);
    }

    #[test]
    fn test_weight_defaults_follow_tier() {
        let toml = r#"
            [[categories]]
            name = "orchard"
            tier = "domain"
            keywords = ["graft"]

            [[categories]]
            name = "escrow"
            tier = "general"
            keywords = ["escrow"]

            [[categories]]
            name = "hedgerow"
            tier = "domain"
            weight = 0.5
            keywords = ["hedge"]
        "#;
        let taxonomy = Taxonomy::from_toml_str(toml).unwrap();
        assert_eq!(taxonomy.category("orchard").unwrap().weight, Some(1.5));
        assert_eq!(taxonomy.category("escrow").unwrap().weight, Some(1.0));
        assert_eq!(taxonomy.category("hedgerow").unwrap().weight, Some(0.5));
    }

    #[test]
    fn test_effective_weight_without_parsing() {
        let spec = CategorySpec {
            name: "orchard".to_string(),
            tier: Tier::Domain,
            weight: None,
            keywords: vec!["graft".to_string()],
            recommendation: None,
        };
        assert_eq!(spec.effective_weight(), 1.5);
    }

    #[test]
    fn test_rejects_duplicate_category() {
        let toml = r#"
            [[categories]]
            name = "fees"
            keywords = ["fee"]

            [[categories]]
            name = "fees"
            keywords = ["charge"]
        "#;
        assert!(matches!(
            Taxonomy::from_toml_str(toml),
            Err(EngineError::Invalid(_))
        ));
    }

    #[test]
    fn test_rejects_empty_keywords_and_bad_weights() {
        let empty = r#"
            [[categories]]
            name = "fees"
            keywords = []
        "#;
        assert!(Taxonomy::from_toml_str(empty).is_err());

        let negative = r#"
            [[categories]]
            name = "fees"
            weight = -1.0
            keywords = ["fee"]
        "#;
        assert!(Taxonomy::from_toml_str(negative).is_err());
    }

    #[test]
    fn test_rejects_reserved_category_name() {
        let toml = r#"
            [[categories]]
            name = "amounts"
            keywords = ["sum"]
        "#;
        assert!(Taxonomy::from_toml_str(toml).is_err());
    }

    #[test]
    fn test_rejects_malformed_toml() {
        assert!(matches!(
            Taxonomy::from_toml_str("[[categories]\nname ="),
            Err(EngineError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_file_reports_path() {
        let err = Taxonomy::from_file("/nonexistent/taxonomy.toml").unwrap_err();
        assert!(err.to_string().contains("/nonexistent/taxonomy.toml"));
    }
}
