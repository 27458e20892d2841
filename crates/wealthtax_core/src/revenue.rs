//! Revenue estimation for the one-time wealth tax
//!
//! Per-holder assessment is a pure mapping over the population followed by
//! a sum. Compliance and administrative cost are applied once, to the
//! aggregate.

use serde::{Deserialize, Serialize};

use crate::model::{InstallmentSchedule, Population, TaxParameters, WealthHolder};

/// Effective tax rate for a given net worth.
///
/// Zero at or below `phase_in_lower`, the full statutory rate at or above
/// `phase_in_upper`, and linear in between. Continuous and non-decreasing.
pub fn effective_rate(net_worth: f64, params: &TaxParameters) -> f64 {
    if net_worth <= params.phase_in_lower {
        0.0
    } else if net_worth >= params.phase_in_upper {
        params.rate
    } else {
        let fraction =
            (net_worth - params.phase_in_lower) / (params.phase_in_upper - params.phase_in_lower);
        params.rate * fraction
    }
}

/// Tax assessed on a single holder (billions)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct HolderAssessment {
    pub net_worth: f64,
    pub exclusion_share: f64,
    pub taxable_wealth: f64,
    pub effective_rate: f64,
    pub tax_owed: f64,
}

impl HolderAssessment {
    pub fn excluded_wealth(&self) -> f64 {
        self.net_worth * self.exclusion_share
    }
}

/// Assess one holder. A holder's own real estate share replaces the
/// population-wide exclusion when present.
///
/// Expects `TaxParameters::validate_population` to have accepted the holder.
pub fn assess_holder(holder: &WealthHolder, params: &TaxParameters) -> HolderAssessment {
    let exclusion_share = params.holder_exclusion(holder);
    let taxable_wealth = holder.net_worth * (1.0 - exclusion_share);
    let rate = effective_rate(holder.net_worth, params);

    HolderAssessment {
        net_worth: holder.net_worth,
        exclusion_share,
        taxable_wealth,
        effective_rate: rate,
        tax_owed: taxable_wealth * rate,
    }
}

/// Aggregate revenue estimate (billions)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RevenueEstimate {
    pub holders: usize,
    pub gross_wealth: f64,
    pub total_exclusions: f64,
    pub taxable_wealth: f64,
    pub tax_rate: f64,
    pub gross_tax: f64,
    pub compliance_rate: f64,
    pub expected_collected: f64,
    pub uncollected: f64,
    pub admin_cost: f64,
    pub net_revenue: f64,
}

/// Estimate gross and net revenue for a population.
///
/// An empty population yields zero gross tax; net revenue is then the
/// negative administrative cost.
pub fn estimate_revenue(population: &Population, params: &TaxParameters) -> RevenueEstimate {
    let (gross_wealth, total_exclusions, taxable_wealth, gross_tax) = population
        .iter()
        .map(|holder| assess_holder(holder, params))
        .fold((0.0, 0.0, 0.0, 0.0), |acc, a| {
            (
                acc.0 + a.net_worth,
                acc.1 + a.excluded_wealth(),
                acc.2 + a.taxable_wealth,
                acc.3 + a.tax_owed,
            )
        });

    let expected_collected = gross_tax * params.compliance_rate;

    RevenueEstimate {
        holders: population.len(),
        gross_wealth,
        total_exclusions,
        taxable_wealth,
        tax_rate: params.rate,
        gross_tax,
        compliance_rate: params.compliance_rate,
        expected_collected,
        uncollected: gross_tax - expected_collected,
        admin_cost: params.admin_cost,
        net_revenue: expected_collected - params.admin_cost,
    }
}

/// Revenue received in one year of the installment schedule
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Collection {
    pub offset: usize,
    pub principal: f64,
    /// Installment balance outstanding at the start of the year
    pub outstanding_balance: f64,
    pub interest: f64,
}

impl Collection {
    pub fn total(&self) -> f64 {
        self.principal + self.interest
    }
}

/// Distribute net revenue over the installment schedule.
///
/// Interest is charged on the installment balance outstanding at the start
/// of each year, before that year's payment. Up-front lump sums carry none.
pub fn collection_schedule(net_revenue: f64, schedule: &InstallmentSchedule) -> Vec<Collection> {
    (0..schedule.years())
        .map(|offset| {
            let principal = net_revenue * schedule.fraction(offset);
            let outstanding_balance = net_revenue * schedule.outstanding_at(offset);
            Collection {
                offset,
                principal,
                outstanding_balance,
                interest: outstanding_balance * schedule.interest_rate,
            }
        })
        .collect()
}

/// Kind of bar in a revenue waterfall
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WaterfallKind {
    Total,
    Subtotal,
    Decrease,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaterfallStep {
    pub label: String,
    pub value: f64,
    pub kind: WaterfallKind,
}

impl RevenueEstimate {
    /// Steps from gross wealth down to net revenue
    pub fn waterfall(&self) -> Vec<WaterfallStep> {
        let step = |label: String, value: f64, kind| WaterfallStep { label, value, kind };
        vec![
            step("Gross Wealth".into(), self.gross_wealth, WaterfallKind::Total),
            step(
                "Exclusions".into(),
                -self.total_exclusions,
                WaterfallKind::Decrease,
            ),
            step(
                "Taxable Wealth".into(),
                self.taxable_wealth,
                WaterfallKind::Subtotal,
            ),
            step(
                format!("Tax @ {:.1}%", self.tax_rate * 100.0),
                -(self.taxable_wealth - self.gross_tax),
                WaterfallKind::Decrease,
            ),
            step("Gross Tax".into(), self.gross_tax, WaterfallKind::Subtotal),
            step(
                "Non-compliance".into(),
                -self.uncollected,
                WaterfallKind::Decrease,
            ),
            step("Admin Costs".into(), -self.admin_cost, WaterfallKind::Decrease),
            step("Net Revenue".into(), self.net_revenue, WaterfallKind::Total),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flat_params() -> TaxParameters {
        TaxParameters {
            rate: 0.05,
            phase_in_lower: 1.0,
            phase_in_upper: 1.1,
            real_estate_exclusion: 0.0,
            pension_exclusion: 0.0,
            compliance_rate: 1.0,
            admin_cost: 0.0,
        }
    }

    #[test]
    fn test_effective_rate_band_edges() {
        let params = flat_params();
        assert_eq!(effective_rate(0.5, &params), 0.0);
        assert_eq!(effective_rate(1.0, &params), 0.0);
        assert_eq!(effective_rate(1.1, &params), 0.05);
        assert_eq!(effective_rate(250.0, &params), 0.05);
    }

    #[test]
    fn test_effective_rate_midpoint() {
        let rate = effective_rate(1.05, &flat_params());
        assert!((rate - 0.025).abs() < 1e-12, "Expected 0.025, got {}", rate);
    }

    #[test]
    fn test_effective_rate_continuous_and_monotone() {
        let params = flat_params();
        let mut previous = 0.0;
        for i in 0..=3000 {
            let worth = 0.9 + i as f64 * 0.0001;
            let rate = effective_rate(worth, &params);
            assert!(rate >= previous, "rate decreased at {}", worth);
            assert!(rate - previous <= 0.05 * 0.0001 / 0.1 + 1e-12);
            previous = rate;
        }
    }

    #[test]
    fn test_two_holder_example() {
        // $1.05B pays 2.5% => $26.25M, $2B pays 5% => $100M
        let population = Population::from_net_worths(&[1.05, 2.0]).unwrap();
        let revenue = estimate_revenue(&population, &flat_params());
        assert!(
            (revenue.gross_tax - 0.12625).abs() < 1e-12,
            "Expected 0.12625, got {}",
            revenue.gross_tax
        );
        assert_eq!(revenue.net_revenue, revenue.gross_tax);

        let first = assess_holder(&population.holders()[0], &flat_params());
        assert!((first.tax_owed - 0.02625).abs() < 1e-12);
    }

    #[test]
    fn test_boundary_holders() {
        let population = Population::from_net_worths(&[1.0, 1.1]).unwrap();
        let at_lower = assess_holder(&population.holders()[0], &flat_params());
        let at_upper = assess_holder(&population.holders()[1], &flat_params());
        assert_eq!(at_lower.tax_owed, 0.0);
        assert_eq!(at_upper.effective_rate, 0.05);
    }

    #[test]
    fn test_exclusions_and_compliance() {
        let params = TaxParameters {
            real_estate_exclusion: 0.10,
            pension_exclusion: 0.01,
            compliance_rate: 0.85,
            admin_cost: 0.15,
            ..flat_params()
        };
        let population = Population::from_net_worths(&[100.0]).unwrap();
        let revenue = estimate_revenue(&population, &params);
        // 100 * 0.89 * 0.05 = 4.45
        assert!((revenue.gross_tax - 4.45).abs() < 1e-9);
        assert!((revenue.total_exclusions - 11.0).abs() < 1e-9);
        // 4.45 * 0.85 - 0.15 = 3.6325
        assert!((revenue.net_revenue - 3.6325).abs() < 1e-9);
        assert!((revenue.uncollected - 0.6675).abs() < 1e-9);
    }

    #[test]
    fn test_holder_real_estate_override() {
        let params = TaxParameters {
            real_estate_exclusion: 0.10,
            ..flat_params()
        };
        let holder = WealthHolder::new(10.0).real_estate_share(0.30);
        let assessment = assess_holder(&holder, &params);
        assert!((assessment.taxable_wealth - 7.0).abs() < 1e-12);
    }

    #[test]
    fn test_empty_population() {
        let params = TaxParameters {
            admin_cost: 0.1,
            ..flat_params()
        };
        let revenue = estimate_revenue(&Population::default(), &params);
        assert_eq!(revenue.gross_tax, 0.0);
        assert_eq!(revenue.holders, 0);
        assert_eq!(revenue.net_revenue, -0.1);
    }

    #[test]
    fn test_collection_schedule_with_interest() {
        let schedule = InstallmentSchedule::lump_sum_with_installments(0.4, 5, 0.05);
        let collections = collection_schedule(100.0, &schedule);
        assert_eq!(collections.len(), 5);

        let principal: f64 = collections.iter().map(|c| c.principal).sum();
        assert!((principal - 100.0).abs() < 1e-9);

        // Year 0: 60 lump + 8 installment; all 40 of installments bear 5%
        assert!((collections[0].principal - 68.0).abs() < 1e-9);
        let interest: Vec<f64> = collections.iter().map(|c| c.interest).collect();
        for (actual, expected) in interest.iter().zip([2.0, 1.6, 1.2, 0.8, 0.4]) {
            assert!(
                (actual - expected).abs() < 1e-9,
                "Expected {}, got {}",
                expected,
                actual
            );
        }
        let total: f64 = interest.iter().sum();
        assert!((total - 6.0).abs() < 1e-9);
    }

    #[test]
    fn test_waterfall_ends_at_net_revenue() {
        let population = Population::from_net_worths(&[5.0, 20.0]).unwrap();
        let revenue = estimate_revenue(&population, &flat_params());
        let steps = revenue.waterfall();
        assert_eq!(steps.len(), 8);
        assert_eq!(steps.last().map(|s| s.value), Some(revenue.net_revenue));
        assert_eq!(steps[0].kind, WaterfallKind::Total);
    }
}
