//! Tornado and sweep evaluation.

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::config::{SensitivityParameter, SensitivityRange, SweepParameter};
use crate::config::ScenarioBuilder;
use crate::config::catalog::HEALTHCARE;
use crate::cost_benefit::compute_timeline;
use crate::error::Result;
use crate::model::Summary;

/// One bar of a tornado chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TornadoRow {
    pub parameter: SensitivityParameter,
    pub label: String,
    pub low_value: f64,
    pub high_value: f64,
    pub low_npv: f64,
    pub high_npv: f64,
    /// `|high_npv - low_npv|`
    pub swing: f64,
}

/// Tornado rows sorted by swing, largest first
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TornadoTable {
    pub scenario: String,
    pub base_npv: f64,
    pub rows: Vec<TornadoRow>,
}

/// Result at one point of a sweep
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepPoint {
    pub value: f64,
    pub npv: f64,
    pub summary: Summary,
}

/// Ranges for the standard tornado chart
pub fn default_ranges() -> Vec<SensitivityRange> {
    vec![
        SensitivityRange::new(SensitivityParameter::Elasticity, 0.06, 1.0),
        SensitivityRange::new(SensitivityParameter::ComplianceRate, 0.70, 0.95),
        SensitivityRange::new(SensitivityParameter::AdminCost, 0.015, 0.30),
        SensitivityRange::new(
            SensitivityParameter::CategoryMultiplier(HEALTHCARE.to_string()),
            1.2,
            1.8,
        ),
        SensitivityRange::new(SensitivityParameter::AntiAvoidanceDiscount, 0.10, 0.50),
        SensitivityRange::new(SensitivityParameter::FirmEffectDiscount, 0.25, 0.75),
        SensitivityRange::new(SensitivityParameter::DiscountRate, 0.01, 0.05),
        SensitivityRange::new(SensitivityParameter::InstallmentShare, 0.20, 0.60),
    ]
}

/// Summary with a single parameter overridden
fn npv_with(
    base: &ScenarioBuilder,
    parameter: &SensitivityParameter,
    value: f64,
) -> Result<Summary> {
    let bundle = parameter.apply(base.clone(), value).build()?;
    Ok(compute_timeline(&bundle).summary)
}

fn tornado_row(base: &ScenarioBuilder, range: &SensitivityRange) -> Result<TornadoRow> {
    let low_npv = npv_with(base, &range.parameter, range.low)?.npv;
    let high_npv = npv_with(base, &range.parameter, range.high)?.npv;
    Ok(TornadoRow {
        parameter: range.parameter.clone(),
        label: range.parameter.label(),
        low_value: range.low,
        high_value: range.high,
        low_npv,
        high_npv,
        swing: (high_npv - low_npv).abs(),
    })
}

/// One-at-a-time sensitivity of NPV around a base scenario.
///
/// Every other input stays at its base value. Fails if the base scenario or
/// any varied scenario does not build.
pub fn tornado(base: &ScenarioBuilder, ranges: &[SensitivityRange]) -> Result<TornadoTable> {
    let bundle = base.build()?;
    let base_npv = compute_timeline(&bundle).summary.npv;

    #[cfg(feature = "parallel")]
    let ranges_iter = ranges.par_iter();
    #[cfg(not(feature = "parallel"))]
    let ranges_iter = ranges.iter();

    let mut rows = ranges_iter
        .map(|range| tornado_row(base, range))
        .collect::<Result<Vec<_>>>()?;
    rows.sort_by(|a, b| b.swing.total_cmp(&a.swing));

    tracing::debug!(
        scenario = bundle.name(),
        parameters = rows.len(),
        "tornado analysis complete"
    );

    Ok(TornadoTable {
        scenario: bundle.name().to_string(),
        base_npv,
        rows,
    })
}

/// Evaluate the scenario at each value of a one-dimensional sweep.
///
/// Points come back in sweep order regardless of evaluation order.
pub fn sweep(base: &ScenarioBuilder, parameter: &SweepParameter) -> Result<Vec<SweepPoint>> {
    let values = parameter.sweep_values();
    let evaluate = |value: f64| -> Result<SweepPoint> {
        let summary = npv_with(base, &parameter.parameter, value)?;
        Ok(SweepPoint {
            value,
            npv: summary.npv,
            summary,
        })
    };

    #[cfg(feature = "parallel")]
    let values = values.into_par_iter();
    #[cfg(not(feature = "parallel"))]
    let values = values.into_iter();

    values.map(evaluate).collect()
}
