//! Spending impact of the collected revenue
//!
//! Net revenue is allocated across categories, each with a fiscal
//! multiplier. Each tranche of revenue is spent over a disbursement window
//! rather than all at once.

use serde::{Deserialize, Serialize};

use crate::model::{Disbursement, SpendingParameters};

const CURRENCY_PER_BILLION: f64 = 1_000_000_000.0;

/// Allocation and impact for one category (billions, except counts)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryImpact {
    pub name: String,
    pub fraction: f64,
    pub allocation: f64,
    pub annual_spending: f64,
    pub multiplier: f64,
    /// Total GDP impact, `allocation * multiplier`
    pub gdp_impact: f64,
    /// Output units bought over the whole window, e.g. enrollee-years
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub units: Option<OperationalUnits>,
    /// Direct jobs supported per spending year
    pub annual_jobs: f64,
}

/// Informational output counts. Never feed into the NPV.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperationalUnits {
    pub label: String,
    pub total: f64,
    pub annual: f64,
}

/// Result of allocating net revenue across spending categories
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpendingEstimate {
    pub net_revenue: f64,
    pub spending_years: usize,
    pub categories: Vec<CategoryImpact>,
    pub total_gdp_impact: f64,
    /// `total_gdp_impact / net_revenue`, zero when nothing is spent
    pub weighted_multiplier: f64,
    pub total_annual_jobs: f64,
}

impl SpendingEstimate {
    pub fn category(&self, name: &str) -> Option<&CategoryImpact> {
        self.categories.iter().find(|c| c.name == name)
    }
}

/// Allocate net revenue across categories and compute their impact
pub fn allocate(net_revenue: f64, params: &SpendingParameters) -> SpendingEstimate {
    let years = params.spending_years.max(1) as f64;

    let categories: Vec<CategoryImpact> = params
        .categories
        .iter()
        .map(|category| {
            let allocation = net_revenue * category.fraction;
            let units = category.unit_cost.as_ref().map(|unit| {
                let total = allocation * CURRENCY_PER_BILLION / unit.cost;
                OperationalUnits {
                    label: unit.label.clone(),
                    total,
                    annual: total / years,
                }
            });
            CategoryImpact {
                name: category.name.clone(),
                fraction: category.fraction,
                allocation,
                annual_spending: allocation / years,
                multiplier: category.multiplier,
                gdp_impact: allocation * category.multiplier,
                units,
                annual_jobs: allocation * category.jobs_per_billion / years,
            }
        })
        .collect();

    let total_gdp_impact: f64 = categories.iter().map(|c| c.gdp_impact).sum();
    let weighted_multiplier = if net_revenue > 0.0 {
        total_gdp_impact / net_revenue
    } else {
        0.0
    };

    SpendingEstimate {
        net_revenue,
        spending_years: params.spending_years,
        total_annual_jobs: categories.iter().map(|c| c.annual_jobs).sum(),
        categories,
        total_gdp_impact,
        weighted_multiplier,
    }
}

/// Share of a tranche spent in each year of the disbursement window
pub fn disbursement_weights(params: &SpendingParameters) -> Vec<f64> {
    match &params.disbursement {
        Disbursement::Even => {
            let years = params.spending_years.max(1);
            vec![1.0 / years as f64; years]
        }
        Disbursement::Custom(weights) => weights.clone(),
    }
}

/// GDP impact of spending `amount`, by year offset within the window
pub fn tranche_impact(amount: f64, params: &SpendingParameters) -> Vec<f64> {
    let impact = amount * params.weighted_multiplier();
    disbursement_weights(params)
        .into_iter()
        .map(|weight| impact * weight)
        .collect()
}
