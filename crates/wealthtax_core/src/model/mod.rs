//! Core data types for the cost-benefit model
//!
//! - `population` - wealth holders and the static/synthetic baselines
//! - `params` - validated parameter groups for each estimator
//! - `results` - timeline rows and summary aggregates

mod params;
mod population;
mod results;

pub use params::*;
pub use population::*;
pub use results::*;
