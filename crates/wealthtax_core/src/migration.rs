//! Departure estimate and the ongoing costs of migration
//!
//! Departures are computed once from the full one-time shock. The resulting
//! cost streams (lost income tax, firm-level losses, venture ecosystem
//! losses) are annual and recur for every year of the horizon.

use serde::{Deserialize, Serialize};

use crate::model::{MacroParameters, MigrationParameters, Population, ResponseModel};

/// Departure estimate for the taxed population
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Departures {
    pub population: usize,
    pub statutory_rate: f64,
    /// `statutory_rate * one_time_to_annual_factor`
    pub effective_annual_rate: f64,
    /// Fractional response before the anti-avoidance discount
    pub raw_response: f64,
    pub adjusted_response: f64,
    /// Unclamped headcount before the anti-avoidance discount
    pub raw_departures: f64,
    /// Headcount, clamped to `[0, population]`
    pub departures: f64,
}

impl Departures {
    pub fn departure_rate(&self) -> f64 {
        if self.population == 0 {
            0.0
        } else {
            self.departures / self.population as f64
        }
    }
}

/// Estimate how many holders relocate in response to the tax
pub fn estimate_departures(
    rate: f64,
    params: &MigrationParameters,
    population_count: usize,
) -> Departures {
    let effective_annual_rate = rate * params.one_time_to_annual_factor;
    let raw_response = match params.response_model {
        ResponseModel::Linear => effective_annual_rate * params.elasticity,
        ResponseModel::NetOfTax if effective_annual_rate < 1.0 => {
            params.elasticity * effective_annual_rate / (1.0 - effective_annual_rate)
        }
        // A 100% annual rate: everyone who can respond does
        ResponseModel::NetOfTax => {
            if params.elasticity > 0.0 {
                f64::INFINITY
            } else {
                0.0
            }
        }
    };
    let adjusted_response = raw_response * (1.0 - params.anti_avoidance_discount);
    let count = population_count as f64;
    let headcount = adjusted_response * count;
    let departures = if headcount.is_nan() {
        0.0
    } else {
        headcount.clamp(0.0, count)
    };

    Departures {
        population: population_count,
        statutory_rate: rate,
        effective_annual_rate,
        raw_response,
        adjusted_response,
        raw_departures: raw_response * count,
        departures,
    }
}

/// Firm-level effects of departures
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FirmEffects {
    /// Annual firm revenue attributed to one holder (billions)
    pub firm_revenue_per_holder: f64,
    /// Annual loss per departing holder before the local discount
    pub effect_per_departure: f64,
    /// `1 - firm_effect_discount`
    pub sector_discount: f64,
    pub employment_effect_adjusted: f64,
    pub value_added_effect_adjusted: f64,
    pub annual_loss: f64,
}

/// Venture ecosystem effects of departures
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct VentureEffects {
    /// Annual venture investment supplied by the whole taxed population
    pub population_vc_total: f64,
    pub annual_loss: f64,
    /// `annual_loss * vc_multiplier`, informational only
    pub economic_impact: f64,
}

/// Full migration estimate with annual cost streams (billions per year)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MigrationEstimate {
    pub departures: Departures,
    pub lost_income_tax: f64,
    pub firm: FirmEffects,
    pub venture: VentureEffects,
}

impl MigrationEstimate {
    /// Sum of the three recurring cost streams
    pub fn annual_cost(&self) -> f64 {
        self.lost_income_tax + self.firm.annual_loss + self.venture.annual_loss
    }

    /// Migration cost incurred at a year offset.
    ///
    /// Zero before onset, a fraction of the annual cost in the onset year,
    /// then the annual cost scaled by the configured trend.
    pub fn cost_in_year(&self, offset: usize, macro_params: &MacroParameters) -> f64 {
        let onset = macro_params.cost_onset;
        if offset < onset.start_offset {
            return 0.0;
        }
        let years_since = offset - onset.start_offset;
        let scale = if years_since == 0 {
            onset.first_year_fraction
        } else {
            1.0
        };
        self.annual_cost() * scale * macro_params.cost_trend.factor(years_since)
    }
}

/// Estimate departures and the recurring costs they cause
pub fn estimate_migration(
    rate: f64,
    params: &MigrationParameters,
    population: &Population,
) -> MigrationEstimate {
    let departures = estimate_departures(rate, params, population.len());
    let count = departures.departures;

    let firm_revenue_per_holder = population.average_wealth() * params.firm_revenue_share;
    let effect_per_departure = firm_revenue_per_holder * params.value_added_effect;
    let sector_discount = 1.0 - params.firm_effect_discount;
    let firm = FirmEffects {
        firm_revenue_per_holder,
        effect_per_departure,
        sector_discount,
        employment_effect_adjusted: params.employment_effect * sector_discount,
        value_added_effect_adjusted: params.value_added_effect * sector_discount,
        annual_loss: count * effect_per_departure * sector_discount,
    };

    let population_vc_total = params.annual_vc_investment * params.holder_vc_share;
    let lost_vc = population_vc_total * departures.departure_rate();
    let venture = VentureEffects {
        population_vc_total,
        annual_loss: lost_vc,
        economic_impact: lost_vc * params.vc_multiplier,
    };

    tracing::trace!(
        departures = count,
        annual_cost = count * params.avg_income_tax_per_holder + firm.annual_loss + lost_vc,
        "migration estimate"
    );

    MigrationEstimate {
        departures,
        lost_income_tax: count * params.avg_income_tax_per_holder,
        firm,
        venture,
    }
}
