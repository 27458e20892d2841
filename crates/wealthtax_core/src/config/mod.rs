//! Scenario configuration
//!
//! - `builder` - `ScenarioBuilder`, the mergeable set of optional inputs
//! - `catalog` - the four canonical scenarios and their shared defaults

mod builder;
pub mod catalog;

pub use builder::ScenarioBuilder;

use serde::Serialize;

use crate::model::{
    MacroParameters, MigrationParameters, Population, SpendingParameters, TaxParameters,
};

/// A complete, validated set of scenario inputs.
///
/// Only `ScenarioBuilder::build` creates one, so every bundle has passed
/// validation. Bundles are immutable; derive a variant by going back
/// through a builder.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScenarioBundle {
    pub(crate) name: String,
    pub(crate) description: Option<String>,
    pub(crate) population: Population,
    pub(crate) tax: TaxParameters,
    pub(crate) migration: MigrationParameters,
    pub(crate) spending: SpendingParameters,
    #[serde(rename = "macro")]
    pub(crate) macro_params: MacroParameters,
}

impl ScenarioBundle {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn population(&self) -> &Population {
        &self.population
    }

    pub fn tax(&self) -> &TaxParameters {
        &self.tax
    }

    pub fn migration(&self) -> &MigrationParameters {
        &self.migration
    }

    pub fn spending(&self) -> &SpendingParameters {
        &self.spending
    }

    pub fn macro_params(&self) -> &MacroParameters {
        &self.macro_params
    }
}
