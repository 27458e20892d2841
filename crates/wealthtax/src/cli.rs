use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use wealthtax_core::analysis::SensitivityParameter;
use wealthtax_core::config::catalog::ScenarioKind;

#[derive(Parser, Debug)]
#[command(name = "wealthtax")]
#[command(about = "Cost-benefit timeline for a one-time wealth tax")]
pub struct Args {
    /// Log level (debug, info, warn, error)
    #[arg(short, long, default_value = "info", global = true)]
    pub log_level: String,

    /// Write logs to `wealthtax.log` in this directory instead of stderr
    #[arg(long, global = true)]
    pub log_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List the catalog scenarios
    List,
    /// Run one scenario and print its timeline
    Run {
        #[command(flatten)]
        scenario: ScenarioArgs,
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
    /// Compare the four catalog scenarios
    Compare {
        /// Population file applied to every scenario
        #[arg(long)]
        population: Option<PathBuf>,
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
    /// Tornado sensitivity of NPV around a scenario
    Sensitivity {
        #[command(flatten)]
        scenario: ScenarioArgs,
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
    /// Evaluate NPV across evenly spaced values of one parameter
    Sweep {
        #[command(flatten)]
        scenario: ScenarioArgs,
        /// Parameter key, e.g. `elasticity` or `healthcare_multiplier`
        #[arg(short, long)]
        parameter: SensitivityParameter,
        #[arg(long)]
        min: f64,
        #[arg(long)]
        max: f64,
        #[arg(long, default_value_t = 11)]
        steps: usize,
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
}

/// Which scenario to start from and what to change about it
#[derive(ClapArgs, Debug, Clone)]
pub struct ScenarioArgs {
    /// Catalog scenario (optimistic, baseline, pessimistic, extreme_flight)
    #[arg(short, long, default_value = "baseline")]
    pub scenario: ScenarioKind,

    /// YAML/JSON file with parameter overrides
    #[arg(long)]
    pub overrides: Option<PathBuf>,

    /// YAML/JSON list of wealth holders; falls back to the tier baseline
    #[arg(long)]
    pub population: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
    Yaml,
}
