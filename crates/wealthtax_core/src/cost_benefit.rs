//! Cost-benefit integrator
//!
//! Runs the three estimators once each and assembles their outputs into a
//! year-indexed cash-flow table:
//!
//! ```text
//! net[t] = collected[t] + spending[t] - migration[t] - admin (t == 0 only)
//! npv    = sum(net[t] / (1 + discount_rate)^t)
//! ```
//!
//! Revenue arrives on the installment schedule. Each year's principal is a
//! tranche that is spent over the disbursement window starting that year;
//! spending that would land past the horizon is dropped.

use crate::config::ScenarioBundle;
use crate::migration::estimate_migration;
use crate::model::{CostBenefitResult, Summary, TimelineRow};
use crate::revenue::{collection_schedule, estimate_revenue};
use crate::spending::{allocate, tranche_impact};

/// Compute the full timeline and summary for a validated scenario.
///
/// The result has exactly `horizon_years` rows. Identical bundles always
/// produce identical results.
pub fn compute_timeline(bundle: &ScenarioBundle) -> CostBenefitResult {
    let tax = bundle.tax();
    let macro_params = bundle.macro_params();
    let horizon = macro_params.horizon_years;

    let revenue = estimate_revenue(bundle.population(), tax);
    let collections = collection_schedule(revenue.net_revenue, &macro_params.installments);
    let migration = estimate_migration(tax.rate, bundle.migration(), bundle.population());
    let spending = allocate(revenue.net_revenue, bundle.spending());

    let mut collected = vec![0.0; horizon];
    let mut interest = vec![0.0; horizon];
    let mut spending_impact = vec![0.0; horizon];
    for collection in &collections {
        // Schedules longer than the horizon are rejected at build time
        collected[collection.offset] += collection.total();
        interest[collection.offset] += collection.interest;

        // A shortfall is not spent
        let impact = tranche_impact(collection.principal.max(0.0), bundle.spending());
        for (i, amount) in impact.into_iter().enumerate() {
            if let Some(slot) = spending_impact.get_mut(collection.offset + i) {
                *slot += amount;
            }
        }
    }

    let mut rows = Vec::with_capacity(horizon);
    let mut cumulative_net_benefit = 0.0;
    let mut cumulative_npv = 0.0;
    for offset in 0..horizon {
        let migration_cost = migration.cost_in_year(offset, macro_params);
        let admin_cost = if offset == 0 { tax.admin_cost } else { 0.0 };
        let net_benefit =
            collected[offset] + spending_impact[offset] - migration_cost - admin_cost;
        let discount_factor = macro_params.discount_factor(offset);
        let discounted_net_benefit = net_benefit * discount_factor;
        cumulative_net_benefit += net_benefit;
        cumulative_npv += discounted_net_benefit;

        rows.push(TimelineRow {
            offset,
            year: macro_params.year(offset),
            revenue_collected: collected[offset],
            interest: interest[offset],
            spending_impact: spending_impact[offset],
            migration_cost,
            admin_cost,
            net_benefit,
            discount_factor,
            discounted_net_benefit,
            cumulative_net_benefit,
            cumulative_npv,
        });
    }

    let total_revenue_collected: f64 = rows.iter().map(|r| r.revenue_collected).sum();
    let total_migration_cost: f64 = rows.iter().map(|r| r.migration_cost).sum();
    let total_spending_impact: f64 = rows.iter().map(|r| r.spending_impact).sum();
    let total_admin_cost: f64 = rows.iter().map(|r| r.admin_cost).sum();
    let total_benefits = total_revenue_collected + total_spending_impact;
    let total_costs = total_migration_cost + total_admin_cost;

    let summary = Summary {
        scenario: bundle.name().to_string(),
        gross_revenue: revenue.gross_tax,
        net_revenue: revenue.net_revenue,
        total_revenue_collected,
        total_migration_cost,
        total_spending_impact,
        total_admin_cost,
        total_benefits,
        total_costs,
        benefit_cost_ratio: (total_costs > 0.0).then(|| total_benefits / total_costs),
        breakeven_year: rows
            .iter()
            .find(|r| r.cumulative_net_benefit > 0.0)
            .map(|r| r.year),
        departures: migration.departures.departures,
        horizon_years: horizon,
        discount_rate: macro_params.discount_rate,
        npv: cumulative_npv,
    };

    tracing::debug!(
        scenario = %summary.scenario,
        net_revenue = summary.net_revenue,
        departures = summary.departures,
        npv = summary.npv,
        "computed timeline"
    );

    CostBenefitResult {
        summary,
        rows,
        revenue,
        collections,
        migration,
        spending,
    }
}

/// Summaries for several scenarios, in input order
pub fn compare_scenarios(bundles: &[ScenarioBundle]) -> Vec<Summary> {
    bundles
        .iter()
        .map(|bundle| compute_timeline(bundle).summary)
        .collect()
}
