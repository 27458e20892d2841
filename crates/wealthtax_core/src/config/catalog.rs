//! Canonical scenarios
//!
//! Every scenario starts from `common_parameters()` and overrides only the
//! behavioral and economic assumptions that define it. The four are ordered
//! from most to least favorable, and their NPVs keep that order.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{ScenarioBuilder, ScenarioBundle};
use crate::error::{ModelError, Result};
use crate::model::{BASELINE_TIERS, CostOnset, CostTrend, Population, SpendingCategory};

pub const HEALTHCARE: &str = "healthcare";
pub const EDUCATION: &str = "education";
pub const FOOD_ASSISTANCE: &str = "food_assistance";

/// Identifier for a catalog scenario
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioKind {
    Optimistic,
    Baseline,
    Pessimistic,
    ExtremeFlight,
}

impl ScenarioKind {
    /// All scenarios, most favorable first
    pub const ALL: [ScenarioKind; 4] = [
        ScenarioKind::Optimistic,
        ScenarioKind::Baseline,
        ScenarioKind::Pessimistic,
        ScenarioKind::ExtremeFlight,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            ScenarioKind::Optimistic => "optimistic",
            ScenarioKind::Baseline => "baseline",
            ScenarioKind::Pessimistic => "pessimistic",
            ScenarioKind::ExtremeFlight => "extreme_flight",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ScenarioKind::Optimistic => "Optimistic",
            ScenarioKind::Baseline => "Baseline",
            ScenarioKind::Pessimistic => "Pessimistic",
            ScenarioKind::ExtremeFlight => "Extreme Flight",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ScenarioKind::Optimistic => {
                "Low mobility, strong enforcement and high spending multipliers"
            }
            ScenarioKind::Baseline => "Central estimates from the empirical literature",
            ScenarioKind::Pessimistic => {
                "High mobility, weak compliance and modest multipliers"
            }
            ScenarioKind::ExtremeFlight => {
                "Near-maximal departures with little anti-avoidance protection"
            }
        }
    }
}

impl fmt::Display for ScenarioKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for ScenarioKind {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        ScenarioKind::ALL
            .into_iter()
            .find(|kind| kind.key() == normalized)
            .ok_or_else(|| ModelError::invalid("scenario", format!("unknown scenario `{s}`")))
    }
}

/// Parameters shared by every catalog scenario
pub fn common_parameters() -> ScenarioBuilder {
    ScenarioBuilder::new()
        .population(Population::baseline())
        // Tax design
        .tax_rate(0.05)
        .phase_in_lower(1.0)
        .phase_in_upper(1.1)
        .real_estate_exclusion(0.10)
        .pension_exclusion(0.01)
        // Migration costs
        .avg_income_tax_per_holder(0.05)
        .firm_revenue_share(0.05)
        .value_added_effect(0.34)
        .employment_effect(0.33)
        .annual_vc_investment(150.0)
        .holder_vc_share(0.15)
        .vc_multiplier(3.0)
        // Spending
        .categories(vec![
            SpendingCategory::new(HEALTHCARE, 0.90, 1.5)
                .unit_cost("enrollee-years", 9_400.0)
                .jobs_per_billion(15_000.0),
            SpendingCategory::new(EDUCATION, 0.05, 1.2)
                .unit_cost("teacher position-years", 92_000.0),
            // $234/person/month for a 2.5-person household
            SpendingCategory::new(FOOD_ASSISTANCE, 0.05, 1.7)
                .unit_cost("household-years", 234.0 * 12.0 * 2.5),
        ])
        .spending_years(5)
        // Timeline
        .discount_rate(0.03)
        .horizon_years(20)
        .start_year(2027)
        .installment_years(5)
        .installment_interest_rate(0.05)
        .cost_onset(CostOnset {
            start_offset: 0,
            first_year_fraction: 0.5,
        })
        .cost_trend(CostTrend::Flat)
}

/// The assumptions that distinguish one scenario from another
pub fn overrides(kind: ScenarioKind) -> ScenarioBuilder {
    // elasticity, compliance, admin, multipliers (health, education, food),
    // anti-avoidance, firm discount, installment share
    let (elasticity, compliance, admin, health, education, food, anti_avoidance, firm, share) =
        match kind {
            ScenarioKind::Optimistic => (0.06, 0.95, 0.015, 1.7, 1.4, 1.9, 0.5, 0.75, 0.30),
            ScenarioKind::Baseline => (0.35, 0.85, 0.15, 1.5, 1.2, 1.7, 0.3, 0.5, 0.40),
            ScenarioKind::Pessimistic => (1.0, 0.70, 0.3, 1.3, 1.0, 1.5, 0.15, 0.3, 0.50),
            ScenarioKind::ExtremeFlight => (1.9, 0.60, 0.3, 1.2, 0.9, 1.4, 0.1, 0.2, 0.60),
        };

    ScenarioBuilder::named(kind.key())
        .description(kind.description())
        .elasticity(elasticity)
        .compliance_rate(compliance)
        .admin_cost(admin)
        .category_multiplier(HEALTHCARE, health)
        .category_multiplier(EDUCATION, education)
        .category_multiplier(FOOD_ASSISTANCE, food)
        .anti_avoidance_discount(anti_avoidance)
        .firm_effect_discount(firm)
        .installment_share(share)
}

/// Unbuilt scenario, ready for further overrides
pub fn builder(kind: ScenarioKind) -> ScenarioBuilder {
    common_parameters().merge(overrides(kind))
}

pub fn scenario(kind: ScenarioKind) -> Result<ScenarioBundle> {
    builder(kind).build()
}

/// All four scenarios, most favorable first
pub fn all_scenarios() -> Result<Vec<ScenarioBundle>> {
    ScenarioKind::ALL.into_iter().map(scenario).collect()
}

/// Sum of the static tier table, for display
pub fn baseline_tier_totals() -> (usize, f64) {
    BASELINE_TIERS
        .iter()
        .fold((0, 0.0), |(count, wealth), tier| {
            (count + tier.count, wealth + tier.total_wealth)
        })
}
