//! One-time wealth tax cost-benefit model
//!
//! This crate projects the fiscal effect of a one-time tax on very large
//! fortunes over a multi-year horizon and reduces it to a net present value.
//! It supports:
//! - Per-holder revenue assessment with a phase-in band, exclusions and compliance
//! - Installment collection with interest on outstanding balances
//! - Behavioral departures and the recurring costs they impose
//! - Spending impact of the revenue through category fiscal multipliers
//! - Four canonical scenarios plus arbitrary overrides
//! - Tornado and sweep sensitivity analysis
//!
//! All monetary amounts are in billions.
//!
//! # Scenarios
//!
//! ```ignore
//! use wealthtax_core::{compute_timeline, config::catalog};
//! use wealthtax_core::config::catalog::ScenarioKind;
//!
//! let bundle = catalog::builder(ScenarioKind::Baseline)
//!     .elasticity(0.5)
//!     .build()?;
//! let result = compute_timeline(&bundle);
//! println!("NPV: {:.1}B", result.npv());
//! ```

#![warn(clippy::all)]

// ============================================================================
// Core modules
// ============================================================================

pub mod analysis;
pub mod cost_benefit;
pub mod error;
pub mod migration;
pub mod revenue;
pub mod spending;

// ============================================================================
// Type definition modules
// ============================================================================

pub mod config;
pub mod model;

// ============================================================================
// Test modules
// ============================================================================

#[cfg(test)]
mod tests;

// ============================================================================
// Public re-exports for convenience
// ============================================================================

pub use config::{ScenarioBuilder, ScenarioBundle};
pub use cost_benefit::{compare_scenarios, compute_timeline};
pub use error::{ModelError, Result};
