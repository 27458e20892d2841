//! Scenario Builder
//!
//! `ScenarioBuilder` holds every scenario input as an `Option`. A base
//! configuration is combined with named overrides through `merge`, and
//! `build` validates the result into an immutable `ScenarioBundle`.
//! A field that is still unset at that point is a configuration error, never
//! a silent default.
//!
//! Builders deserialize from partial YAML/JSON, so an override file is just
//! a builder with a few fields set.
//!
//! # Example
//!
//! ```ignore
//! use wealthtax_core::config::{ScenarioBuilder, catalog};
//!
//! let bundle = catalog::common_parameters()
//!     .merge(ScenarioBuilder::named("what-if").elasticity(0.5).compliance_rate(0.8))
//!     .build()?;
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::ScenarioBundle;
use crate::error::{ModelError, Result};
use crate::model::{
    CostOnset, CostTrend, Disbursement, InstallmentSchedule, MacroParameters,
    MigrationParameters, ONE_TIME_TO_ANNUAL_FACTOR, Population, ResponseModel, SpendingCategory,
    SpendingParameters, TaxParameters,
};

/// Builder for scenario bundles with field-by-field overrides
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScenarioBuilder {
    pub name: Option<String>,
    pub description: Option<String>,
    pub population: Option<Population>,

    // Tax design
    pub tax_rate: Option<f64>,
    pub phase_in_lower: Option<f64>,
    pub phase_in_upper: Option<f64>,
    pub real_estate_exclusion: Option<f64>,
    pub pension_exclusion: Option<f64>,
    pub compliance_rate: Option<f64>,
    pub admin_cost: Option<f64>,

    // Migration
    pub elasticity: Option<f64>,
    pub one_time_to_annual_factor: Option<f64>,
    pub anti_avoidance_discount: Option<f64>,
    pub response_model: Option<ResponseModel>,
    pub avg_income_tax_per_holder: Option<f64>,
    pub firm_revenue_share: Option<f64>,
    pub value_added_effect: Option<f64>,
    pub employment_effect: Option<f64>,
    pub firm_effect_discount: Option<f64>,
    pub annual_vc_investment: Option<f64>,
    pub holder_vc_share: Option<f64>,
    pub vc_multiplier: Option<f64>,

    // Spending
    pub categories: Option<Vec<SpendingCategory>>,
    /// Multiplier overrides keyed by category name
    pub category_multipliers: Option<BTreeMap<String, f64>>,
    pub spending_years: Option<usize>,
    pub disbursement: Option<Disbursement>,

    // Timeline
    pub discount_rate: Option<f64>,
    pub horizon_years: Option<usize>,
    pub start_year: Option<i32>,
    /// Explicit schedule; takes precedence over the share/years pair
    pub installments: Option<InstallmentSchedule>,
    pub installment_share: Option<f64>,
    pub installment_years: Option<usize>,
    pub installment_interest_rate: Option<f64>,
    pub cost_onset: Option<CostOnset>,
    pub cost_trend: Option<CostTrend>,
}

macro_rules! setters {
    ($($(#[$doc:meta])* $field:ident: $ty:ty),* $(,)?) => {
        $(
            $(#[$doc])*
            #[must_use]
            pub fn $field(mut self, value: $ty) -> Self {
                self.$field = Some(value);
                self
            }
        )*
    };
}

macro_rules! merge_fields {
    ($base:ident, $overrides:ident; $($field:ident),* $(,)?) => {
        $(
            if $overrides.$field.is_some() {
                $base.$field = $overrides.$field;
            }
        )*
    };
}

impl ScenarioBuilder {
    /// Create an empty builder
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty builder with a scenario name
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    setters! {
        population: Population,
        /// Statutory one-time rate
        tax_rate: f64,
        phase_in_lower: f64,
        phase_in_upper: f64,
        real_estate_exclusion: f64,
        pension_exclusion: f64,
        compliance_rate: f64,
        /// Administrative cost in billions
        admin_cost: f64,
        elasticity: f64,
        one_time_to_annual_factor: f64,
        anti_avoidance_discount: f64,
        response_model: ResponseModel,
        avg_income_tax_per_holder: f64,
        firm_revenue_share: f64,
        value_added_effect: f64,
        employment_effect: f64,
        firm_effect_discount: f64,
        annual_vc_investment: f64,
        holder_vc_share: f64,
        vc_multiplier: f64,
        categories: Vec<SpendingCategory>,
        spending_years: usize,
        disbursement: Disbursement,
        discount_rate: f64,
        horizon_years: usize,
        start_year: i32,
        /// Use an explicit installment schedule
        installments: InstallmentSchedule,
        /// Share of revenue paid in installments rather than up front
        installment_share: f64,
        installment_years: usize,
        installment_interest_rate: f64,
        cost_onset: CostOnset,
        cost_trend: CostTrend,
    }

    /// Override the multiplier of one spending category
    #[must_use]
    pub fn category_multiplier(mut self, category: impl Into<String>, multiplier: f64) -> Self {
        self.category_multipliers
            .get_or_insert_with(BTreeMap::new)
            .insert(category.into(), multiplier);
        self
    }

    /// Apply `overrides` on top of this builder. Every field set in
    /// `overrides` wins; category multiplier overrides are merged by name.
    #[must_use]
    pub fn merge(mut self, overrides: ScenarioBuilder) -> Self {
        if let Some(extra) = overrides.category_multipliers {
            self.category_multipliers
                .get_or_insert_with(BTreeMap::new)
                .extend(extra);
        }
        merge_fields!(self, overrides;
            name, description, population,
            tax_rate, phase_in_lower, phase_in_upper, real_estate_exclusion,
            pension_exclusion, compliance_rate, admin_cost,
            elasticity, one_time_to_annual_factor, anti_avoidance_discount, response_model,
            avg_income_tax_per_holder, firm_revenue_share, value_added_effect,
            employment_effect, firm_effect_discount, annual_vc_investment,
            holder_vc_share, vc_multiplier,
            categories, spending_years, disbursement,
            discount_rate, horizon_years, start_year, installments, installment_share,
            installment_years, installment_interest_rate, cost_onset, cost_trend,
        );
        self
    }

    /// Validate and assemble an immutable `ScenarioBundle`.
    ///
    /// Missing fields yield `ConfigurationInconsistency`; out-of-range values
    /// yield `InvalidParameter` (or one of its specific variants).
    pub fn build(&self) -> Result<ScenarioBundle> {
        let scenario = self.name.clone().unwrap_or_else(|| "unnamed".to_string());
        let required = |value: Option<f64>, field: &'static str| -> Result<f64> {
            value.ok_or_else(|| ModelError::ConfigurationInconsistency {
                scenario: scenario.clone(),
                field,
            })
        };
        let missing = |field: &'static str| ModelError::ConfigurationInconsistency {
            scenario: scenario.clone(),
            field,
        };

        let population = self.population.clone().ok_or_else(|| missing("population"))?;

        let tax = TaxParameters {
            rate: required(self.tax_rate, "tax_rate")?,
            phase_in_lower: required(self.phase_in_lower, "phase_in_lower")?,
            phase_in_upper: required(self.phase_in_upper, "phase_in_upper")?,
            real_estate_exclusion: required(self.real_estate_exclusion, "real_estate_exclusion")?,
            pension_exclusion: required(self.pension_exclusion, "pension_exclusion")?,
            compliance_rate: required(self.compliance_rate, "compliance_rate")?,
            admin_cost: required(self.admin_cost, "admin_cost")?,
        };

        let migration = MigrationParameters {
            elasticity: required(self.elasticity, "elasticity")?,
            one_time_to_annual_factor: self
                .one_time_to_annual_factor
                .unwrap_or(ONE_TIME_TO_ANNUAL_FACTOR),
            anti_avoidance_discount: required(
                self.anti_avoidance_discount,
                "anti_avoidance_discount",
            )?,
            response_model: self.response_model.unwrap_or_default(),
            avg_income_tax_per_holder: required(
                self.avg_income_tax_per_holder,
                "avg_income_tax_per_holder",
            )?,
            firm_revenue_share: required(self.firm_revenue_share, "firm_revenue_share")?,
            value_added_effect: required(self.value_added_effect, "value_added_effect")?,
            employment_effect: self.employment_effect.unwrap_or(0.0),
            firm_effect_discount: required(self.firm_effect_discount, "firm_effect_discount")?,
            annual_vc_investment: required(self.annual_vc_investment, "annual_vc_investment")?,
            holder_vc_share: required(self.holder_vc_share, "holder_vc_share")?,
            vc_multiplier: self.vc_multiplier.unwrap_or(1.0),
        };

        let mut categories = self.categories.clone().ok_or_else(|| missing("categories"))?;
        if let Some(overrides) = &self.category_multipliers {
            for (name, multiplier) in overrides {
                let category = categories
                    .iter_mut()
                    .find(|c| &c.name == name)
                    .ok_or_else(|| {
                        ModelError::invalid(
                            "category_multipliers",
                            format!("unknown spending category `{name}`"),
                        )
                    })?;
                category.multiplier = *multiplier;
            }
        }
        let spending = SpendingParameters {
            categories,
            spending_years: self
                .spending_years
                .ok_or_else(|| missing("spending_years"))?,
            disbursement: self.disbursement.clone().unwrap_or_default(),
        };

        let installments = match &self.installments {
            Some(schedule) => schedule.clone(),
            None => {
                let share = required(self.installment_share, "installment_share")?;
                let years = self
                    .installment_years
                    .ok_or_else(|| missing("installment_years"))?;
                if years == 0 {
                    return Err(ModelError::invalid("installment_years", "must be at least 1"));
                }
                crate::error::check_range("installment_share", share, 0.0, 1.0)?;
                InstallmentSchedule::lump_sum_with_installments(
                    share,
                    years,
                    self.installment_interest_rate.unwrap_or(0.0),
                )
            }
        };

        let macro_params = MacroParameters {
            discount_rate: required(self.discount_rate, "discount_rate")?,
            horizon_years: self
                .horizon_years
                .ok_or_else(|| missing("horizon_years"))?,
            start_year: self.start_year.ok_or_else(|| missing("start_year"))?,
            installments,
            cost_onset: self.cost_onset.unwrap_or_default(),
            cost_trend: self.cost_trend.unwrap_or_default(),
        };

        tax.validate()?;
        tax.validate_population(&population)?;
        migration.validate()?;
        spending.validate()?;
        macro_params.validate()?;

        Ok(ScenarioBundle {
            name: scenario,
            description: self.description.clone(),
            population,
            tax,
            migration,
            spending,
            macro_params,
        })
    }
}
