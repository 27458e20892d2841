//! Tests for the canonical scenario catalog
//!
//! Headline values are for the static tier baseline with the catalog defaults.

use crate::config::catalog::{self, ScenarioKind};
use crate::cost_benefit::{compare_scenarios, compute_timeline};

fn npv(kind: ScenarioKind) -> f64 {
    compute_timeline(&catalog::scenario(kind).unwrap()).npv()
}

#[test]
fn test_canonical_npv_ordering() {
    let optimistic = npv(ScenarioKind::Optimistic);
    let baseline = npv(ScenarioKind::Baseline);
    let pessimistic = npv(ScenarioKind::Pessimistic);
    let extreme = npv(ScenarioKind::ExtremeFlight);

    assert!(
        optimistic > baseline && baseline > pessimistic && pessimistic > extreme && extreme > 0.0,
        "NPVs out of order: {optimistic} {baseline} {pessimistic} {extreme}"
    );
}

#[test]
fn test_baseline_headline_values() {
    let result = compute_timeline(&catalog::scenario(ScenarioKind::Baseline).unwrap());
    let summary = &result.summary;

    // 2245.2B * 0.89 * 5%
    assert!((summary.gross_revenue - 99.9114).abs() < 1e-3);
    assert!((summary.net_revenue - 84.7747).abs() < 1e-3);
    assert!((summary.departures - 0.6125).abs() < 1e-9);
    assert!((result.migration.annual_cost() - 0.1325).abs() < 1e-3);
    assert!((summary.total_revenue_collected - 89.8612).abs() < 1e-3);
    assert!((summary.total_spending_impact - 126.7382).abs() < 1e-3);
    assert!(
        (summary.npv - 202.4962).abs() < 1e-2,
        "Expected NPV ~202.50, got {}",
        summary.npv
    );
}

#[test]
fn test_catalog_npv_values() {
    let expected = [
        (ScenarioKind::Optimistic, 246.3648),
        (ScenarioKind::Pessimistic, 147.2875),
        (ScenarioKind::ExtremeFlight, 110.8362),
    ];
    for (kind, value) in expected {
        let actual = npv(kind);
        assert!(
            (actual - value).abs() < 1e-2,
            "{kind}: expected {value}, got {actual}"
        );
    }
}

#[test]
fn test_gross_revenue_independent_of_behavior() {
    let summaries = compare_scenarios(&catalog::all_scenarios().unwrap());
    let gross = summaries[0].gross_revenue;
    assert!(summaries.iter().all(|s| s.gross_revenue == gross));
}

#[test]
fn test_installments_collect_interest() {
    let result = compute_timeline(&catalog::scenario(ScenarioKind::Baseline).unwrap());
    let interest: f64 = result.rows.iter().map(|r| r.interest).sum();
    assert!(interest > 0.0);
    assert!(
        (result.summary.total_revenue_collected - (result.summary.net_revenue + interest)).abs()
            < 1e-9
    );
    // 40% of 84.7747 in installments at 5%, balances 1.0 + 0.8 + ... + 0.2
    assert!((interest - 84.7747 * 0.4 * 0.05 * 3.0).abs() < 1e-3);
    // Installments end after five years
    assert!(result.rows[5..].iter().all(|r| r.revenue_collected == 0.0));
}

#[test]
fn test_migration_costs_recur_every_year() {
    let result = compute_timeline(&catalog::scenario(ScenarioKind::Pessimistic).unwrap());
    let annual = result.migration.annual_cost();
    assert!((result.rows[0].migration_cost - annual * 0.5).abs() < 1e-12);
    assert!(result.rows[1..].iter().all(|r| r.migration_cost == annual));
    assert!((result.summary.total_migration_cost - annual * 19.5).abs() < 1e-9);
}

#[test]
fn test_benefit_cost_ratio() {
    let summary = compute_timeline(&catalog::scenario(ScenarioKind::Baseline).unwrap()).summary;
    let ratio = summary.benefit_cost_ratio.unwrap();
    assert!((ratio - summary.total_benefits / summary.total_costs).abs() < 1e-12);
    assert!(ratio > 1.0);
}
