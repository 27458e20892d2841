//! Sensitivity analysis around a scenario.
//!
//! Two views are provided:
//!
//! - `tornado` varies each parameter between a low and a high value while
//!   holding the rest at base, and ranks parameters by NPV swing.
//! - `sweep` evaluates one parameter at evenly spaced values.
//!
//! ```ignore
//! use wealthtax_core::analysis::{default_ranges, tornado};
//! use wealthtax_core::config::catalog::{self, ScenarioKind};
//!
//! let table = tornado(&catalog::builder(ScenarioKind::Baseline), &default_ranges())?;
//! for row in &table.rows {
//!     println!("{:<24} {:>8.1}", row.label, row.swing);
//! }
//! ```
//!
//! With the `parallel` feature, points are evaluated on the rayon pool. Each
//! point builds its own scenario, so nothing is shared between them.

mod config;
mod evaluator;

pub use config::*;
pub use evaluator::*;
