//! Integration tests for the wealth tax cost-benefit model
//!
//! Tests are organized by topic:
//! - `scenarios` - Canonical scenarios, NPV ordering and headline values
//! - `properties` - Monotonicity and determinism across the estimators
//! - `builder` - Scenario builder merging and validation
//! - `sensitivity` - Tornado and sweep analysis on the catalog

mod builder;
mod properties;
mod scenarios;
