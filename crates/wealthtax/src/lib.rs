//! Command-line front end for the wealth tax cost-benefit model
//!
//! Parses arguments, loads override and population files, runs the core
//! model and renders the results as tables, JSON or YAML.

pub mod cli;
pub mod commands;
pub mod format;
pub mod load;
pub mod logging;

pub use logging::init_logging;
