use shared_types::{Recommendation, RiskFactors};

use crate::taxonomy::Taxonomy;

/// One recommendation per triggered category that has advice registered
///
/// Order follows the factor map, i.e. the order categories first matched.
/// Synthetic categories (percentages, amounts, ...) carry no advice.
pub fn recommend(factors: &RiskFactors, taxonomy: &Taxonomy) -> Vec<Recommendation> {
    factors
        .iter()
        .filter_map(|(category, terms)| {
            taxonomy
                .recommendation_for(category)
                .map(|advice| Recommendation {
                    category: category.to_string(),
                    recommendation: advice.to_string(),
                    terms: terms.to_vec(),
                })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_recommendations_follow_factor_order() {
        let mut factors = RiskFactors::new();
        factors.record("weather_clauses", "drought");
        factors.record("amounts", "500");
        factors.record("penalties", "fee");
        factors.record("penalties", "fines");

        let recs = recommend(&factors, &Taxonomy::builtin());
        let categories: Vec<&str> = recs.iter().map(|r| r.category.as_str()).collect();

        assert_eq!(categories, vec!["weather_clauses", "penalties"]);
        assert_eq!(recs[1].terms, vec!["fee", "fines"]);
        assert!(recs[1].recommendation.starts_with("Consider negotiating lower penalty fees"));
    }

    #[test]
    fn test_synthetic_only_yields_nothing() {
        let mut factors = RiskFactors::new();
        factors.record("percentages", "5%");
        factors.record("conditionals", "If late, pay.");
        factors.record("negations", "not");

        assert!(recommend(&factors, &Taxonomy::builtin()).is_empty());
    }
}
