//! Tests for scenario building and validation

use crate::config::ScenarioBuilder;
use crate::config::catalog::{self, EDUCATION, HEALTHCARE, ScenarioKind};
use crate::error::ModelError;
use crate::model::{
    CostTrend, Disbursement, InstallmentSchedule, Population, ResponseModel, SpendingCategory,
    WealthHolder,
};

/// Every catalog field can be overridden after the fact
#[test]
fn test_override_on_top_of_catalog() {
    let bundle = catalog::builder(ScenarioKind::Baseline)
        .name("high-rate")
        .tax_rate(0.08)
        .response_model(ResponseModel::NetOfTax)
        .cost_trend(CostTrend::Geometric { annual_rate: -0.05 })
        .build()
        .unwrap();

    assert_eq!(bundle.name(), "high-rate");
    assert_eq!(bundle.tax().rate, 0.08);
    assert_eq!(bundle.migration().response_model, ResponseModel::NetOfTax);
    // Untouched fields come from the catalog
    assert_eq!(bundle.tax().compliance_rate, 0.85);
    assert_eq!(bundle.macro_params().horizon_years, 20);
}

#[test]
fn test_missing_field_is_configuration_error() {
    let mut builder = catalog::builder(ScenarioKind::Pessimistic);
    builder.discount_rate = None;
    let err = builder.build().unwrap_err();
    assert_eq!(
        err,
        ModelError::ConfigurationInconsistency {
            scenario: "pessimistic".into(),
            field: "discount_rate",
        }
    );
    assert!(!err.is_invalid_parameter());
}

#[test]
fn test_missing_installments() {
    let mut builder = catalog::builder(ScenarioKind::Baseline);
    builder.installment_share = None;
    assert!(matches!(
        builder.build(),
        Err(ModelError::ConfigurationInconsistency {
            field: "installment_share",
            ..
        })
    ));

    // An explicit schedule makes the share unnecessary
    let bundle = builder
        .installments(InstallmentSchedule::lump_sum())
        .build()
        .unwrap();
    assert_eq!(bundle.macro_params().installments.years(), 1);
}

#[test]
fn test_invalid_values_rejected() {
    let base = catalog::builder(ScenarioKind::Baseline);

    let cases = [
        base.clone().tax_rate(1.5),
        base.clone().compliance_rate(-0.1),
        base.clone().phase_in_lower(2.0),
        base.clone().elasticity(-1.0),
        base.clone().anti_avoidance_discount(1.2),
        base.clone().discount_rate(-1.0),
        base.clone().installment_share(1.1),
        base.clone().spending_years(0),
        base.clone().horizon_years(0),
        base.clone().category_multiplier("defense", 1.0),
    ];
    for builder in cases {
        let err = builder.build().unwrap_err();
        assert!(err.is_invalid_parameter(), "unexpected error kind: {err}");
    }
}

#[test]
fn test_allocation_must_sum_to_one() {
    let mut builder = catalog::builder(ScenarioKind::Baseline).categories(vec![
        SpendingCategory::new(HEALTHCARE, 0.9, 1.5),
        SpendingCategory::new(EDUCATION, 0.05, 1.2),
    ]);
    // The catalog still carries a food assistance multiplier
    assert!(builder.build().unwrap_err().is_invalid_parameter());

    builder.category_multipliers = None;
    let err = builder.build().unwrap_err();
    assert!(matches!(err, ModelError::FractionSum { .. }), "got {err}");
}

#[test]
fn test_schedule_beyond_horizon_rejected() {
    let err = catalog::builder(ScenarioKind::Baseline)
        .installment_years(10)
        .horizon_years(8)
        .build()
        .unwrap_err();
    assert_eq!(
        err,
        ModelError::ScheduleBeyondHorizon {
            schedule_years: 10,
            horizon_years: 8
        }
    );
}

#[test]
fn test_negative_net_worth_in_override_file() {
    let json = r#"{"population": [{"net_worth": 5.0}, {"net_worth": -2.0}]}"#;
    let err = serde_json::from_str::<ScenarioBuilder>(json).unwrap_err();
    assert!(err.to_string().contains("net worth"));
}

#[test]
fn test_partial_override_file_merges() {
    let json = r#"{
        "name": "custom",
        "elasticity": 0.8,
        "disbursement": {"custom": [0.4, 0.3, 0.2, 0.1, 0.0]},
        "population": [{"net_worth": 3.0}, {"net_worth": 12.0, "industry": "Energy"}]
    }"#;
    let overrides: ScenarioBuilder = serde_json::from_str(json).unwrap();
    let bundle = catalog::builder(ScenarioKind::Baseline)
        .merge(overrides)
        .build()
        .unwrap();

    assert_eq!(bundle.name(), "custom");
    assert_eq!(bundle.migration().elasticity, 0.8);
    assert_eq!(bundle.population().len(), 2);
    assert!(matches!(
        bundle.spending().disbursement,
        Disbursement::Custom(_)
    ));
    // Description still comes from the catalog
    assert!(bundle.description().is_some());
}

#[test]
fn test_population_override() {
    let population = Population::from_net_worths(&[10.0, 20.0, 30.0]).unwrap();
    let bundle = catalog::builder(ScenarioKind::Optimistic)
        .population(population.clone())
        .build()
        .unwrap();
    assert_eq!(bundle.population(), &population);
}

#[test]
fn test_holder_exclusions_must_leave_taxable_wealth() {
    let population = Population::new(vec![
        WealthHolder::new(5.0).real_estate_share(0.2),
        WealthHolder::new(8.0).real_estate_share(1.0),
    ])
    .unwrap();
    let err = catalog::builder(ScenarioKind::Baseline)
        .population(population)
        .pension_exclusion(0.05)
        .build()
        .unwrap_err();
    assert!(matches!(
        err,
        ModelError::InvalidParameter {
            field: "real_estate_share",
            ..
        }
    ));

    // Same shares pass once the combined exclusion stays below 1
    let population = Population::new(vec![WealthHolder::new(8.0).real_estate_share(0.94)]).unwrap();
    let bundle = catalog::builder(ScenarioKind::Baseline)
        .population(population)
        .pension_exclusion(0.05)
        .build()
        .unwrap();
    let assessment = crate::revenue::assess_holder(&bundle.population().holders()[0], bundle.tax());
    assert!((assessment.taxable_wealth - 0.08).abs() < 1e-9);
}
