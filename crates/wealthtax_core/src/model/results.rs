//! Output types of the cost-benefit integrator

use serde::{Deserialize, Serialize};

use crate::migration::MigrationEstimate;
use crate::revenue::{Collection, RevenueEstimate};
use crate::spending::SpendingEstimate;

/// One projection year. Monetary values are in billions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimelineRow {
    /// Years since enactment
    pub offset: usize,
    /// Calendar year
    pub year: i32,
    /// Installment principal plus interest received this year
    pub revenue_collected: f64,
    /// Interest portion of `revenue_collected`
    pub interest: f64,
    pub spending_impact: f64,
    pub migration_cost: f64,
    pub admin_cost: f64,
    pub net_benefit: f64,
    pub discount_factor: f64,
    pub discounted_net_benefit: f64,
    pub cumulative_net_benefit: f64,
    pub cumulative_npv: f64,
}

impl TimelineRow {
    pub fn total_benefits(&self) -> f64 {
        self.revenue_collected + self.spending_impact
    }

    pub fn total_costs(&self) -> f64 {
        self.migration_cost + self.admin_cost
    }
}

/// Headline aggregates for one scenario run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub scenario: String,
    pub gross_revenue: f64,
    pub net_revenue: f64,
    pub total_revenue_collected: f64,
    pub total_migration_cost: f64,
    pub total_spending_impact: f64,
    pub total_admin_cost: f64,
    pub total_benefits: f64,
    pub total_costs: f64,
    /// Benefits over costs, `None` when there are no costs
    pub benefit_cost_ratio: Option<f64>,
    /// First calendar year with positive cumulative net benefit
    pub breakeven_year: Option<i32>,
    pub departures: f64,
    pub horizon_years: usize,
    pub discount_rate: f64,
    pub npv: f64,
}

/// Complete output of `compute_timeline`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostBenefitResult {
    pub summary: Summary,
    pub rows: Vec<TimelineRow>,
    pub revenue: RevenueEstimate,
    pub collections: Vec<Collection>,
    pub migration: MigrationEstimate,
    pub spending: SpendingEstimate,
}

impl CostBenefitResult {
    pub fn npv(&self) -> f64 {
        self.summary.npv
    }

    /// Row for a calendar year, if inside the horizon
    pub fn row_for_year(&self, year: i32) -> Option<&TimelineRow> {
        self.rows.iter().find(|r| r.year == year)
    }
}
