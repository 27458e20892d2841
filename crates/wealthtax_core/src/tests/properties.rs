//! Property tests across the estimators and the integrator

use crate::config::catalog::{self, ScenarioKind};
use crate::cost_benefit::compute_timeline;
use crate::migration::estimate_departures;
use crate::model::{MigrationParameters, Population, TaxParameters};
use crate::revenue::{effective_rate, estimate_revenue};

fn baseline() -> crate::config::ScenarioBundle {
    catalog::scenario(ScenarioKind::Baseline).unwrap()
}

fn tax_with(compliance_rate: f64, admin_cost: f64) -> TaxParameters {
    TaxParameters {
        compliance_rate,
        admin_cost,
        ..*baseline().tax()
    }
}

fn migration_with(elasticity: f64) -> MigrationParameters {
    MigrationParameters {
        elasticity,
        ..*baseline().migration()
    }
}

#[test]
fn test_net_revenue_increases_with_compliance() {
    let population = Population::baseline();
    let mut previous = f64::NEG_INFINITY;
    for step in 0..=10 {
        let compliance = step as f64 / 10.0;
        let net = estimate_revenue(&population, &tax_with(compliance, 0.15)).net_revenue;
        assert!(net > previous, "net revenue fell at compliance {compliance}");
        previous = net;
    }
}

#[test]
fn test_net_revenue_decreases_with_admin_cost() {
    let population = Population::baseline();
    let low = estimate_revenue(&population, &tax_with(0.85, 0.015)).net_revenue;
    let high = estimate_revenue(&population, &tax_with(0.85, 0.30)).net_revenue;
    assert!((low - high - 0.285).abs() < 1e-9);
}

#[test]
fn test_departures_monotone_in_elasticity_and_rate() {
    let count = 250;
    let mut previous = 0.0;
    for step in 0..=20 {
        let elasticity = step as f64 * 0.1;
        let departures = estimate_departures(0.05, &migration_with(elasticity), count).departures;
        assert!(departures >= previous);
        assert!((0.0..=count as f64).contains(&departures));
        previous = departures;
    }

    let params = migration_with(0.35);
    let mut previous = 0.0;
    for step in 0..=20 {
        let rate = step as f64 * 0.05;
        let departures = estimate_departures(rate, &params, count).departures;
        assert!(departures >= previous);
        assert!(departures <= count as f64);
        previous = departures;
    }
}

#[test]
fn test_effective_rate_exact_at_catalog_band() {
    let tax = *baseline().tax();
    assert_eq!(effective_rate(tax.phase_in_lower, &tax), 0.0);
    assert_eq!(effective_rate(tax.phase_in_upper, &tax), tax.rate);
}

#[test]
fn test_worked_example() {
    let population = Population::from_net_worths(&[1.05, 2.0]).unwrap();
    let tax = TaxParameters {
        real_estate_exclusion: 0.0,
        pension_exclusion: 0.0,
        compliance_rate: 1.0,
        admin_cost: 0.0,
        ..*baseline().tax()
    };
    let revenue = estimate_revenue(&population, &tax);
    assert!((revenue.gross_tax - 0.12625).abs() < 1e-12);
}

#[test]
fn test_identical_bundles_produce_identical_rows() {
    let first = compute_timeline(&baseline());
    let second = compute_timeline(&baseline());
    assert_eq!(first, second);
}

#[test]
fn test_synthetic_population_is_deterministic() {
    let a = Population::synthetic(42, 250, 2245.2).unwrap();
    let b = Population::synthetic(42, 250, 2245.2).unwrap();
    assert_eq!(a, b);

    let bundle = catalog::builder(ScenarioKind::Baseline)
        .population(a)
        .build()
        .unwrap();
    let result = compute_timeline(&bundle);
    assert!((result.revenue.gross_wealth - 2245.2).abs() < 1e-6);
    assert!(result.npv() > 0.0);
}

#[test]
fn test_zero_elasticity_removes_migration_cost() {
    let bundle = catalog::builder(ScenarioKind::ExtremeFlight)
        .elasticity(0.0)
        .build()
        .unwrap();
    let result = compute_timeline(&bundle);
    assert_eq!(result.summary.departures, 0.0);
    assert!(result.rows.iter().all(|r| r.migration_cost == 0.0));
}

#[test]
fn test_empty_population_costs_admin() {
    let bundle = catalog::builder(ScenarioKind::Baseline)
        .population(Population::default())
        .build()
        .unwrap();
    let result = compute_timeline(&bundle);
    assert_eq!(result.summary.gross_revenue, 0.0);
    assert_eq!(result.summary.departures, 0.0);
    assert!(result.npv() < 0.0);
}

#[test]
fn test_timeline_length_equals_horizon() {
    for horizon in [5, 10, 20, 40] {
        let bundle = catalog::builder(ScenarioKind::Optimistic)
            .horizon_years(horizon)
            .build()
            .unwrap();
        assert_eq!(compute_timeline(&bundle).rows.len(), horizon);
    }
}
