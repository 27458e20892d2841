//! Parameter groups consumed by the estimators
//!
//! Each group has a `validate` method. `ScenarioBuilder::build` calls all of
//! them before a `ScenarioBundle` can exist, so the estimators can assume
//! valid input.

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result, check_fractions, check_non_negative, check_range};
use super::{Population, WealthHolder};

/// Conversion from the one-time statutory rate to an annual-equivalent rate.
///
/// A one-time levy is treated as roughly equivalent to an annual tax of
/// `rate * 0.2`, i.e. the one-time rate spread over five years. This is a
/// policy assumption with no empirical derivation and the single largest
/// source of uncertainty in the departure estimate. Override it through
/// `MigrationParameters::one_time_to_annual_factor` rather than editing it.
pub const ONE_TIME_TO_ANNUAL_FACTOR: f64 = 0.2;

// ============================================================================
// Revenue
// ============================================================================

/// Statutory tax design and collection assumptions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TaxParameters {
    /// Statutory one-time rate (fraction)
    pub rate: f64,
    /// Net worth at which the phase-in begins (billions)
    pub phase_in_lower: f64,
    /// Net worth at which the full rate applies (billions)
    pub phase_in_upper: f64,
    /// Fraction of wealth held in excluded real estate
    pub real_estate_exclusion: f64,
    /// Fraction of wealth held in excluded pension/retirement accounts
    pub pension_exclusion: f64,
    /// Fraction of assessed tax actually collected
    pub compliance_rate: f64,
    /// Administrative cost (billions)
    pub admin_cost: f64,
}

impl TaxParameters {
    pub fn validate(&self) -> Result<()> {
        check_range("rate", self.rate, 0.0, 1.0)?;
        check_non_negative("phase_in_lower", self.phase_in_lower)?;
        if !self.phase_in_upper.is_finite() || self.phase_in_lower >= self.phase_in_upper {
            return Err(ModelError::invalid(
                "phase_in_upper",
                format!(
                    "phase-in band [{}, {}] must have lower < upper",
                    self.phase_in_lower, self.phase_in_upper
                ),
            ));
        }
        check_range("real_estate_exclusion", self.real_estate_exclusion, 0.0, 1.0)?;
        check_range("pension_exclusion", self.pension_exclusion, 0.0, 1.0)?;
        if self.total_exclusion() >= 1.0 {
            return Err(ModelError::invalid(
                "pension_exclusion",
                format!("exclusions sum to {}, must be < 1", self.total_exclusion()),
            ));
        }
        check_range("compliance_rate", self.compliance_rate, 0.0, 1.0)?;
        check_non_negative("admin_cost", self.admin_cost)
    }

    pub fn total_exclusion(&self) -> f64 {
        self.real_estate_exclusion + self.pension_exclusion
    }

    /// Exclusion share applied to one holder. Their own real estate share
    /// replaces the population-wide exclusion when present.
    pub fn holder_exclusion(&self, holder: &WealthHolder) -> f64 {
        holder
            .real_estate_share
            .unwrap_or(self.real_estate_exclusion)
            + self.pension_exclusion
    }

    /// Every holder must keep part of their wealth taxable
    pub fn validate_population(&self, population: &Population) -> Result<()> {
        for (index, holder) in population.iter().enumerate() {
            let exclusion = self.holder_exclusion(holder);
            if exclusion >= 1.0 {
                return Err(ModelError::invalid(
                    "real_estate_share",
                    format!("holder {index} excludes {exclusion} of net worth, must be < 1"),
                ));
            }
        }
        Ok(())
    }
}

/// Share of net revenue due in each year after enactment.
///
/// Year offset `i` receives `fractions[i]` of net revenue. The `upfront`
/// part of `fractions[0]` is a lump-sum payment and carries no interest.
/// Everything else is an installment balance charged `interest_rate` on
/// what is outstanding at the start of each year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstallmentSchedule {
    pub fractions: Vec<f64>,
    #[serde(default)]
    pub upfront: f64,
    #[serde(default)]
    pub interest_rate: f64,
}

impl InstallmentSchedule {
    /// Entire amount collected in the enactment year
    #[must_use]
    pub fn lump_sum() -> Self {
        Self {
            fractions: vec![1.0],
            upfront: 1.0,
            interest_rate: 0.0,
        }
    }

    /// A share of taxpayers pays in full up front, the rest pays in equal
    /// installments starting in the enactment year.
    #[must_use]
    pub fn lump_sum_with_installments(
        installment_share: f64,
        years: usize,
        interest_rate: f64,
    ) -> Self {
        let years = years.max(1);
        let per_year = installment_share / years as f64;
        let fractions = (0..years)
            .map(|i| {
                if i == 0 {
                    (1.0 - installment_share) + per_year
                } else {
                    per_year
                }
            })
            .collect();
        Self {
            fractions,
            upfront: 1.0 - installment_share,
            interest_rate,
        }
    }

    pub fn years(&self) -> usize {
        self.fractions.len()
    }

    /// Fraction due at `offset`, zero outside the schedule
    pub fn fraction(&self, offset: usize) -> f64 {
        self.fractions.get(offset).copied().unwrap_or(0.0)
    }

    /// Interest-bearing installment balance at the start of `offset`,
    /// before that year's payment
    pub fn outstanding_at(&self, offset: usize) -> f64 {
        let remaining: f64 = self.fractions.iter().skip(offset).sum();
        if offset == 0 {
            (remaining - self.upfront).max(0.0)
        } else {
            remaining
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.fractions.is_empty() {
            return Err(ModelError::invalid(
                "installments",
                "schedule must contain at least one year",
            ));
        }
        check_fractions("installments", &self.fractions)?;
        check_range("installment_upfront", self.upfront, 0.0, self.fractions[0])?;
        check_non_negative("installment_interest_rate", self.interest_rate)
    }
}

// ============================================================================
// Migration
// ============================================================================

/// How the behavioral response scales with the annual-equivalent rate
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseModel {
    /// `elasticity * r`
    #[default]
    Linear,
    /// `elasticity * r / (1 - r)`, the change in the net-of-tax rate
    NetOfTax,
}

/// Behavioral and economic assumptions about departures
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MigrationParameters {
    pub elasticity: f64,
    pub one_time_to_annual_factor: f64,
    pub anti_avoidance_discount: f64,
    #[serde(default)]
    pub response_model: ResponseModel,
    /// Annual income tax paid per holder (billions)
    pub avg_income_tax_per_holder: f64,
    /// Annual firm revenue attributed to a holder, as a share of their wealth
    pub firm_revenue_share: f64,
    /// Fractional loss of firm value added after a departure
    pub value_added_effect: f64,
    /// Fractional loss of firm employment after a departure (informational)
    pub employment_effect: f64,
    /// Discount applied to firm effects for local resilience
    pub firm_effect_discount: f64,
    /// Total annual venture investment in the jurisdiction (billions)
    pub annual_vc_investment: f64,
    /// Share of venture investment supplied by the taxed population
    pub holder_vc_share: f64,
    /// Economic multiplier on lost venture investment (informational)
    pub vc_multiplier: f64,
}

impl MigrationParameters {
    pub fn validate(&self) -> Result<()> {
        check_non_negative("elasticity", self.elasticity)?;
        check_range(
            "one_time_to_annual_factor",
            self.one_time_to_annual_factor,
            0.0,
            1.0,
        )?;
        check_range(
            "anti_avoidance_discount",
            self.anti_avoidance_discount,
            0.0,
            1.0,
        )?;
        check_non_negative("avg_income_tax_per_holder", self.avg_income_tax_per_holder)?;
        check_non_negative("firm_revenue_share", self.firm_revenue_share)?;
        check_range("value_added_effect", self.value_added_effect, 0.0, 1.0)?;
        check_range("employment_effect", self.employment_effect, 0.0, 1.0)?;
        check_range("firm_effect_discount", self.firm_effect_discount, 0.0, 1.0)?;
        check_non_negative("annual_vc_investment", self.annual_vc_investment)?;
        check_range("holder_vc_share", self.holder_vc_share, 0.0, 1.0)?;
        check_non_negative("vc_multiplier", self.vc_multiplier)
    }
}

// ============================================================================
// Spending
// ============================================================================

/// Output unit bought by a category's spending, e.g. one enrollee-year
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitCost {
    pub label: String,
    /// Cost of one unit in currency units (not billions)
    pub cost: f64,
}

/// A spending category with its share of net revenue and fiscal multiplier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpendingCategory {
    pub name: String,
    pub fraction: f64,
    pub multiplier: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit_cost: Option<UnitCost>,
    #[serde(default)]
    pub jobs_per_billion: f64,
}

impl SpendingCategory {
    #[must_use]
    pub fn new(name: impl Into<String>, fraction: f64, multiplier: f64) -> Self {
        Self {
            name: name.into(),
            fraction,
            multiplier,
            unit_cost: None,
            jobs_per_billion: 0.0,
        }
    }

    #[must_use]
    pub fn unit_cost(mut self, label: impl Into<String>, cost: f64) -> Self {
        self.unit_cost = Some(UnitCost {
            label: label.into(),
            cost,
        });
        self
    }

    #[must_use]
    pub fn jobs_per_billion(mut self, jobs: f64) -> Self {
        self.jobs_per_billion = jobs;
        self
    }
}

/// How a tranche of spending is spread over the spending window
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Disbursement {
    #[default]
    Even,
    /// Explicit weights per year of the window; must sum to one
    Custom(Vec<f64>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpendingParameters {
    pub categories: Vec<SpendingCategory>,
    pub spending_years: usize,
    #[serde(default)]
    pub disbursement: Disbursement,
}

impl SpendingParameters {
    pub fn validate(&self) -> Result<()> {
        if self.categories.is_empty() {
            return Err(ModelError::invalid(
                "categories",
                "at least one spending category is required",
            ));
        }
        let fractions: Vec<f64> = self.categories.iter().map(|c| c.fraction).collect();
        check_fractions("categories", &fractions)?;
        for (i, category) in self.categories.iter().enumerate() {
            check_non_negative("multiplier", category.multiplier)?;
            check_non_negative("jobs_per_billion", category.jobs_per_billion)?;
            if let Some(unit) = &category.unit_cost
                && (!unit.cost.is_finite() || unit.cost <= 0.0)
            {
                return Err(ModelError::invalid(
                    "unit_cost",
                    format!("category `{}` has unit cost {}", category.name, unit.cost),
                ));
            }
            if self.categories[..i].iter().any(|c| c.name == category.name) {
                return Err(ModelError::invalid(
                    "categories",
                    format!("duplicate category `{}`", category.name),
                ));
            }
        }
        if self.spending_years == 0 {
            return Err(ModelError::invalid("spending_years", "must be at least 1"));
        }
        if let Disbursement::Custom(weights) = &self.disbursement {
            if weights.len() != self.spending_years {
                return Err(ModelError::invalid(
                    "disbursement",
                    format!(
                        "{} weights given for {} spending years",
                        weights.len(),
                        self.spending_years
                    ),
                ));
            }
            check_fractions("disbursement", weights)?;
        }
        Ok(())
    }

    pub fn category(&self, name: &str) -> Option<&SpendingCategory> {
        self.categories.iter().find(|c| c.name == name)
    }

    /// Revenue-weighted average multiplier
    pub fn weighted_multiplier(&self) -> f64 {
        self.categories
            .iter()
            .map(|c| c.fraction * c.multiplier)
            .sum()
    }
}

// ============================================================================
// Macro / timeline
// ============================================================================

/// When ongoing migration costs start
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CostOnset {
    /// First year offset in which costs are incurred
    pub start_offset: usize,
    /// Fraction of the annual cost incurred in that first year
    pub first_year_fraction: f64,
}

impl Default for CostOnset {
    fn default() -> Self {
        Self {
            start_offset: 0,
            first_year_fraction: 1.0,
        }
    }
}

/// Evolution of ongoing migration costs after onset
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CostTrend {
    #[default]
    Flat,
    /// Costs change by `annual_rate` per year (negative values decay)
    Geometric { annual_rate: f64 },
}

impl CostTrend {
    /// Multiplier applied `years_since_onset` years after costs begin
    pub fn factor(&self, years_since_onset: usize) -> f64 {
        match self {
            CostTrend::Flat => 1.0,
            CostTrend::Geometric { annual_rate } => {
                (1.0 + annual_rate).powi(years_since_onset as i32)
            }
        }
    }
}

/// Parameters shared by the whole projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MacroParameters {
    pub discount_rate: f64,
    pub horizon_years: usize,
    /// Calendar year of enactment (offset 0)
    pub start_year: i32,
    pub installments: InstallmentSchedule,
    #[serde(default)]
    pub cost_onset: CostOnset,
    #[serde(default)]
    pub cost_trend: CostTrend,
}

impl MacroParameters {
    pub fn validate(&self) -> Result<()> {
        if !self.discount_rate.is_finite() || self.discount_rate <= -1.0 {
            return Err(ModelError::invalid(
                "discount_rate",
                format!("{} must be greater than -1", self.discount_rate),
            ));
        }
        if self.horizon_years == 0 {
            return Err(ModelError::invalid("horizon_years", "must be at least 1"));
        }
        self.installments.validate()?;
        if self.installments.years() > self.horizon_years {
            return Err(ModelError::ScheduleBeyondHorizon {
                schedule_years: self.installments.years(),
                horizon_years: self.horizon_years,
            });
        }
        if self.cost_onset.start_offset >= self.horizon_years {
            return Err(ModelError::invalid(
                "cost_onset",
                format!(
                    "onset offset {} is past the horizon",
                    self.cost_onset.start_offset
                ),
            ));
        }
        check_range(
            "first_year_fraction",
            self.cost_onset.first_year_fraction,
            0.0,
            1.0,
        )?;
        if let CostTrend::Geometric { annual_rate } = self.cost_trend
            && (!annual_rate.is_finite() || annual_rate <= -1.0)
        {
            return Err(ModelError::invalid(
                "cost_trend",
                format!("annual rate {annual_rate} must be greater than -1"),
            ));
        }
        Ok(())
    }

    /// Calendar year for a year offset
    pub fn year(&self, offset: usize) -> i32 {
        self.start_year + offset as i32
    }

    pub fn discount_factor(&self, offset: usize) -> f64 {
        1.0 / (1.0 + self.discount_rate).powi(offset as i32)
    }
}
