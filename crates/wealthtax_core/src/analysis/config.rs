//! Configuration types for sensitivity analysis.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::ScenarioBuilder;
use crate::error::{ModelError, Result};

/// A scenario input that can be varied independently
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SensitivityParameter {
    Elasticity,
    ComplianceRate,
    AdminCost,
    /// Fiscal multiplier of the named spending category
    CategoryMultiplier(String),
    AntiAvoidanceDiscount,
    FirmEffectDiscount,
    DiscountRate,
    InstallmentShare,
    TaxRate,
    OneTimeToAnnualFactor,
}

impl SensitivityParameter {
    /// Return `builder` with this parameter set to `value`
    #[must_use]
    pub fn apply(&self, builder: ScenarioBuilder, value: f64) -> ScenarioBuilder {
        match self {
            SensitivityParameter::Elasticity => builder.elasticity(value),
            SensitivityParameter::ComplianceRate => builder.compliance_rate(value),
            SensitivityParameter::AdminCost => builder.admin_cost(value),
            SensitivityParameter::CategoryMultiplier(name) => {
                builder.category_multiplier(name.clone(), value)
            }
            SensitivityParameter::AntiAvoidanceDiscount => builder.anti_avoidance_discount(value),
            SensitivityParameter::FirmEffectDiscount => builder.firm_effect_discount(value),
            SensitivityParameter::DiscountRate => builder.discount_rate(value),
            SensitivityParameter::InstallmentShare => {
                // An explicit schedule would shadow the share
                let mut builder = builder.installment_share(value);
                builder.installments = None;
                builder
            }
            SensitivityParameter::TaxRate => builder.tax_rate(value),
            SensitivityParameter::OneTimeToAnnualFactor => {
                builder.one_time_to_annual_factor(value)
            }
        }
    }

    /// Machine-readable name, accepted back by `FromStr`
    pub fn key(&self) -> String {
        match self {
            SensitivityParameter::Elasticity => "elasticity".into(),
            SensitivityParameter::ComplianceRate => "compliance_rate".into(),
            SensitivityParameter::AdminCost => "admin_cost".into(),
            SensitivityParameter::CategoryMultiplier(name) => format!("{name}_multiplier"),
            SensitivityParameter::AntiAvoidanceDiscount => "anti_avoidance_discount".into(),
            SensitivityParameter::FirmEffectDiscount => "firm_effect_discount".into(),
            SensitivityParameter::DiscountRate => "discount_rate".into(),
            SensitivityParameter::InstallmentShare => "installment_share".into(),
            SensitivityParameter::TaxRate => "tax_rate".into(),
            SensitivityParameter::OneTimeToAnnualFactor => "one_time_to_annual_factor".into(),
        }
    }

    /// Human-readable label for tables
    pub fn label(&self) -> String {
        match self {
            SensitivityParameter::Elasticity => "Migration Elasticity".into(),
            SensitivityParameter::ComplianceRate => "Compliance Rate".into(),
            SensitivityParameter::AdminCost => "Admin Costs ($B)".into(),
            SensitivityParameter::CategoryMultiplier(name) => {
                let mut chars = name.replace('_', " ").chars().collect::<Vec<_>>();
                if let Some(first) = chars.first_mut() {
                    *first = first.to_ascii_uppercase();
                }
                format!("{} Multiplier", chars.into_iter().collect::<String>())
            }
            SensitivityParameter::AntiAvoidanceDiscount => "Anti-Avoidance Effect".into(),
            SensitivityParameter::FirmEffectDiscount => "Firm Effect Discount".into(),
            SensitivityParameter::DiscountRate => "Discount Rate".into(),
            SensitivityParameter::InstallmentShare => "Installment Share".into(),
            SensitivityParameter::TaxRate => "Tax Rate".into(),
            SensitivityParameter::OneTimeToAnnualFactor => "One-Time to Annual Factor".into(),
        }
    }
}

impl fmt::Display for SensitivityParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key())
    }
}

impl FromStr for SensitivityParameter {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self> {
        let key = s.trim().to_ascii_lowercase().replace('-', "_");
        let parameter = match key.as_str() {
            "elasticity" => SensitivityParameter::Elasticity,
            "compliance_rate" | "compliance" => SensitivityParameter::ComplianceRate,
            "admin_cost" => SensitivityParameter::AdminCost,
            "anti_avoidance_discount" => SensitivityParameter::AntiAvoidanceDiscount,
            "firm_effect_discount" => SensitivityParameter::FirmEffectDiscount,
            "discount_rate" => SensitivityParameter::DiscountRate,
            "installment_share" => SensitivityParameter::InstallmentShare,
            "tax_rate" | "rate" => SensitivityParameter::TaxRate,
            "one_time_to_annual_factor" => SensitivityParameter::OneTimeToAnnualFactor,
            other => match other.strip_suffix("_multiplier") {
                Some(category) if !category.is_empty() => {
                    SensitivityParameter::CategoryMultiplier(category.to_string())
                }
                _ => {
                    return Err(ModelError::invalid(
                        "parameter",
                        format!("unknown sensitivity parameter `{s}`"),
                    ));
                }
            },
        };
        Ok(parameter)
    }
}

/// Low and high values for one tornado bar
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensitivityRange {
    pub parameter: SensitivityParameter,
    pub low: f64,
    pub high: f64,
}

impl SensitivityRange {
    pub fn new(parameter: SensitivityParameter, low: f64, high: f64) -> Self {
        Self {
            parameter,
            low,
            high,
        }
    }
}

/// A one-dimensional sweep over evenly spaced values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepParameter {
    pub parameter: SensitivityParameter,
    /// Minimum value for the sweep
    pub min_value: f64,
    /// Maximum value for the sweep
    pub max_value: f64,
    /// Number of steps (points) in the sweep
    pub step_count: usize,
}

impl SweepParameter {
    pub fn new(parameter: SensitivityParameter, min: f64, max: f64, steps: usize) -> Self {
        Self {
            parameter,
            min_value: min,
            max_value: max,
            step_count: steps,
        }
    }

    /// Generate the sweep values
    pub fn sweep_values(&self) -> Vec<f64> {
        if self.step_count <= 1 {
            return vec![self.min_value];
        }
        let step_size = (self.max_value - self.min_value) / (self.step_count - 1) as f64;
        (0..self.step_count)
            .map(|i| self.min_value + step_size * i as f64)
            .collect()
    }
}
