//! Subcommand implementations
//!
//! Each command writes its report to the given writer so the binary can pass
//! stdout and tests can pass a buffer.

use std::io::Write;
use std::path::Path;

use color_eyre::eyre::{Context, Result, eyre};
use serde::Serialize;
use wealthtax_core::analysis::{self, SensitivityParameter, SweepParameter};
use wealthtax_core::config::catalog::{self, ScenarioKind};
use wealthtax_core::{ScenarioBuilder, compare_scenarios, compute_timeline};

use crate::cli::{OutputFormat, ScenarioArgs};
use crate::format;
use crate::load;

/// Catalog scenario with file overrides and population applied
pub fn resolve_builder(args: &ScenarioArgs) -> Result<ScenarioBuilder> {
    let mut builder = catalog::builder(args.scenario);

    if let Some(path) = &args.overrides {
        let overrides = load::load_overrides(path)
            .wrap_err_with(|| format!("loading overrides for `{}`", args.scenario))?;
        builder = builder.merge(overrides);
    }

    if let Some(path) = &args.population {
        builder = builder.population(load::load_population_or_baseline(path));
    }

    Ok(builder)
}

fn emit<T: Serialize>(
    out: &mut impl Write,
    format: OutputFormat,
    value: &T,
    table: impl FnOnce() -> String,
) -> Result<()> {
    let text = match format {
        OutputFormat::Table => table(),
        OutputFormat::Json => serde_json::to_string_pretty(value).wrap_err("serializing JSON")?,
        OutputFormat::Yaml => {
            serde_saphyr::to_string(value).map_err(|e| eyre!("serializing YAML: {e}"))?
        }
    };
    writeln!(out, "{text}")?;
    Ok(())
}

pub fn list(out: &mut impl Write) -> Result<()> {
    let (holders, wealth) = catalog::baseline_tier_totals();
    for kind in ScenarioKind::ALL {
        writeln!(out, "{:<16}{:<16}{}", kind.key(), kind.label(), kind.description())?;
    }
    writeln!(
        out,
        "\nBaseline population: {holders} holders, {}",
        format::format_billions(wealth)
    )?;
    Ok(())
}

pub fn run(out: &mut impl Write, args: &ScenarioArgs, output: OutputFormat) -> Result<()> {
    let bundle = resolve_builder(args)?
        .build()
        .wrap_err_with(|| format!("building scenario `{}`", args.scenario))?;
    tracing::info!(
        scenario = bundle.name(),
        holders = bundle.population().len(),
        "running scenario"
    );

    let result = compute_timeline(&bundle);
    tracing::info!(npv = result.npv(), "scenario complete");

    emit(out, output, &result, || format::render_report(&result))
}

pub fn compare(
    out: &mut impl Write,
    population: Option<&Path>,
    output: OutputFormat,
) -> Result<()> {
    let population = population.map(load::load_population_or_baseline);
    let bundles = ScenarioKind::ALL
        .into_iter()
        .map(|kind| {
            let builder = catalog::builder(kind);
            let builder = match &population {
                Some(population) => builder.population(population.clone()),
                None => builder,
            };
            builder
                .build()
                .wrap_err_with(|| format!("building scenario `{kind}`"))
        })
        .collect::<Result<Vec<_>>>()?;

    let summaries = compare_scenarios(&bundles);
    emit(out, output, &summaries, || format::render_comparison(&summaries))
}

pub fn sensitivity(
    out: &mut impl Write,
    args: &ScenarioArgs,
    output: OutputFormat,
) -> Result<()> {
    let builder = resolve_builder(args)?;
    let table = analysis::tornado(&builder, &analysis::default_ranges())
        .wrap_err("running tornado analysis")?;
    tracing::info!(
        scenario = %table.scenario,
        parameters = table.rows.len(),
        "sensitivity complete"
    );
    emit(out, output, &table, || format::render_tornado(&table))
}

pub fn sweep(
    out: &mut impl Write,
    args: &ScenarioArgs,
    parameter: SensitivityParameter,
    min: f64,
    max: f64,
    steps: usize,
    output: OutputFormat,
) -> Result<()> {
    let builder = resolve_builder(args)?;
    let sweep_parameter = SweepParameter::new(parameter, min, max, steps);
    let points = analysis::sweep(&builder, &sweep_parameter)
        .wrap_err_with(|| format!("sweeping `{}`", sweep_parameter.parameter))?;
    emit(out, output, &points, || {
        format::render_sweep(&sweep_parameter.parameter.key(), &points)
    })
}
