use thiserror::Error;

/// Errors raised while validating inputs to the cost-benefit model.
///
/// Every variant is detected before any computation runs. The integrator
/// itself is infallible once it has a validated `ScenarioBundle`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    /// A scalar parameter is outside its allowed range
    #[error("invalid parameter `{field}`: {reason}")]
    InvalidParameter { field: &'static str, reason: String },

    /// A wealth holder with negative (or non-finite) net worth
    #[error("wealth holder #{index} has invalid net worth {value}")]
    NegativeNetWorth { index: usize, value: f64 },

    /// A set of fractions that must sum to 1.0 does not
    #[error("fractions in `{field}` sum to {sum}, expected 1.0")]
    FractionSum { field: &'static str, sum: f64 },

    /// A scenario bundle was assembled without a required field
    #[error("scenario `{scenario}` is missing required field `{field}`")]
    ConfigurationInconsistency {
        scenario: String,
        field: &'static str,
    },

    /// The installment schedule runs past the projection horizon
    #[error("installment schedule spans {schedule_years} years but horizon is {horizon_years}")]
    ScheduleBeyondHorizon {
        schedule_years: usize,
        horizon_years: usize,
    },
}

impl ModelError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        ModelError::InvalidParameter {
            field,
            reason: reason.into(),
        }
    }

    /// Whether this error is a rejected parameter value (as opposed to an
    /// incomplete scenario definition)
    pub fn is_invalid_parameter(&self) -> bool {
        !matches!(
            self,
            ModelError::ConfigurationInconsistency { .. } | ModelError::ScheduleBeyondHorizon { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, ModelError>;

/// Tolerance used when checking that fractions sum to one
pub const FRACTION_TOLERANCE: f64 = 1e-6;

/// Check that `value` lies in `[min, max]`
pub(crate) fn check_range(field: &'static str, value: f64, min: f64, max: f64) -> Result<()> {
    if !value.is_finite() || value < min || value > max {
        return Err(ModelError::invalid(
            field,
            format!("{value} is outside [{min}, {max}]"),
        ));
    }
    Ok(())
}

/// Check that `value` is finite and not negative
pub(crate) fn check_non_negative(field: &'static str, value: f64) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(ModelError::invalid(
            field,
            format!("{value} must be a non-negative number"),
        ));
    }
    Ok(())
}

/// Check that a set of fractions is non-negative and sums to one
pub(crate) fn check_fractions(field: &'static str, fractions: &[f64]) -> Result<()> {
    if let Some(bad) = fractions.iter().find(|f| !f.is_finite() || **f < 0.0) {
        return Err(ModelError::invalid(
            field,
            format!("fraction {bad} must be a non-negative number"),
        ));
    }
    let sum: f64 = fractions.iter().sum();
    if (sum - 1.0).abs() > FRACTION_TOLERANCE {
        return Err(ModelError::FractionSum { field, sum });
    }
    Ok(())
}
