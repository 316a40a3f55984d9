//! End-to-end scenarios over realistic contract text

use std::sync::Arc;

use clause_engine::{ContractAnalyzer, HeuristicAnalyzer};
use pretty_assertions::assert_eq;
use shared_pdf::from_plain_text;
use shared_types::{ContractReport, RiskLevel};

const FARM_LEASE: &str = include_str!("fixtures/farm_lease.txt");

fn analyze(text: &str) -> ContractReport {
    let extracted = from_plain_text(text);
    ContractAnalyzer::builtin().analyze(&extracted.raw_text, &extracted.position_map)
}

fn clause<'a>(report: &'a ContractReport, id: &str) -> &'a shared_types::ClauseReport {
    report
        .clauses
        .iter()
        .find(|c| c.clause_id == id)
        .unwrap_or_else(|| panic!("clause {} missing", id))
}

#[test]
fn test_penalty_scenario() {
    let report = analyze(
        "Section 1.1 The tenant shall pay a penalty of $500 if late.\n\nSection 1.2 No further terms.",
    );

    let ids: Vec<&str> = report.clauses.iter().map(|c| c.clause_id.as_str()).collect();
    assert_eq!(ids, vec!["1.1", "1.2"]);

    let first = clause(&report, "1.1");
    assert_eq!(first.risk_factors.get("penalties").unwrap(), ["penalty"]);
    assert_eq!(first.risk_factors.get("amounts").unwrap(), ["500"]);
    assert!(first.risk_score >= 2.0);
    assert_eq!(first.recommendations.len(), 1);
    assert_eq!(first.recommendations[0].category, "penalties");

    let second = clause(&report, "1.2");
    assert_eq!(second.risk_score, 0.0);
    assert!(second.recommendations.is_empty());
}

#[test]
fn test_farm_lease_ranking() {
    let report = analyze(FARM_LEASE);

    // Preamble before "Section 1" is not a clause
    assert_eq!(report.total_clauses, 5);

    let ranked: Vec<(&str, f64)> = report
        .clauses
        .iter()
        .map(|c| (c.clause_id.as_str(), c.risk_score))
        .collect();
    assert_eq!(
        ranked,
        vec![("4", 5.0), ("3", 4.5), ("2", 4.0), ("1", 1.5), ("5", 0.0)]
    );

    // 5.0 sits in the medium bucket
    assert_eq!(clause(&report, "4").risk_level, RiskLevel::Medium);
    assert_eq!(report.high_risk_count, 0);
    assert_eq!(report.medium_risk_count, 3);
    assert_eq!(report.low_risk_count, 2);
}

#[test]
fn test_farm_lease_factors_and_citations() {
    let report = analyze(FARM_LEASE);

    let rent = clause(&report, "2");
    assert_eq!(rent.risk_factors.get("payment_terms").unwrap(), ["interest", "overdue"]);
    assert_eq!(rent.risk_factors.get("percentages").unwrap(), ["1.5%"]);
    assert_eq!(rent.risk_factors.get("amounts").unwrap(), ["12,500.00"]);

    let cited: Vec<(u32, Vec<&str>)> = rent
        .risk_lines
        .iter()
        .map(|l| (l.line_number, l.terms.iter().map(String::as_str).collect()))
        .collect();
    assert_eq!(
        cited,
        vec![
            (10, vec!["12,500.00"]),
            (11, vec!["interest", "overdue", "1.5%"]),
        ]
    );

    let default = clause(&report, "4");
    let categories: Vec<&str> = default.risk_factors.categories().collect();
    assert_eq!(categories, vec!["penalties", "termination"]);
    let cited: Vec<u32> = default.risk_lines.iter().map(|l| l.line_number).collect();
    assert_eq!(cited, vec![18, 19, 20]);

    let water = clause(&report, "3");
    let advice: Vec<&str> = water
        .recommendations
        .iter()
        .map(|r| r.category.as_str())
        .collect();
    assert_eq!(advice, vec!["pesticides", "water_rights"]);
}

#[test]
fn test_farm_lease_with_linguistic_signals() {
    let extracted = from_plain_text(FARM_LEASE);
    let analyzer =
        ContractAnalyzer::builtin().with_linguistics(Arc::new(HeuristicAnalyzer::new()));
    let report = analyzer.analyze(&extracted.raw_text, &extracted.position_map);

    // The conditional in Section 4 tips it into high risk
    let default = clause(&report, "4");
    assert_eq!(default.risk_score, 5.5);
    assert_eq!(default.risk_factors.get("conditionals").unwrap().len(), 1);
    assert_eq!(report.high_risk_count, 1);

    // "not permitted" is a negation
    let water = clause(&report, "3");
    assert_eq!(water.risk_factors.get("negations").unwrap(), ["not"]);
    assert_eq!(water.risk_score, 5.0);
}

#[test]
fn test_report_json_shape() {
    let report = analyze("Section 1 A fee of 2% applies.");
    let json = serde_json::to_value(&report).unwrap();

    assert_eq!(json["total_clauses"], 1);
    // 2.0 is still low risk
    assert_eq!(json["low_risk_count"], 1);
    assert_eq!(json["medium_risk_count"], 0);
    assert_eq!(json["clauses"][0]["clause_id"], "1");
    assert_eq!(json["clauses"][0]["risk_score"], 2.0);
    assert_eq!(json["clauses"][0]["risk_factors"]["penalties"][0], "fee");
    assert_eq!(json["clauses"][0]["risk_factors"]["percentages"][0], "2%");
    assert!(json.get("document").is_none());
}

#[test]
fn test_no_headings_drops_everything() {
    let report = analyze("WHEREAS the parties agree to a penalty.\n\nNOW THEREFORE breach.");
    assert_eq!(report.total_clauses, 0);
    assert_eq!(report.high_risk_count + report.medium_risk_count + report.low_risk_count, 0);
}
