//! Plain-text rendering of model results

use wealthtax_core::analysis::{SweepPoint, TornadoTable};
use wealthtax_core::model::{CostBenefitResult, Summary};
use wealthtax_core::revenue::{RevenueEstimate, WaterfallKind};
use wealthtax_core::spending::SpendingEstimate;

/// Insert thousands separators into a non-negative integer
fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut result = String::new();
    for (i, c) in digits.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result.chars().rev().collect()
}

/// Format an amount in billions, e.g. `$84.77B` or `-$0.15B`
pub fn format_billions(value: f64) -> String {
    let abs_value = value.abs();
    let whole = abs_value.trunc() as u64;
    let cents = ((abs_value - whole as f64) * 100.0).round() as u64;
    // Rounding can carry into the whole part
    let (whole, cents) = if cents == 100 { (whole + 1, 0) } else { (whole, cents) };
    let sign = if value < 0.0 && (whole > 0 || cents > 0) { "-" } else { "" };
    format!("{sign}${}.{cents:02}B", group_thousands(whole))
}

/// Format a percentage value
pub fn format_percentage(value: f64) -> String {
    format!("{:.2}%", value * 100.0)
}

/// Format a large count with thousands separators
pub fn format_count(value: f64) -> String {
    group_thousands(value.max(0.0).round() as u64)
}

fn rule(width: usize) -> String {
    "-".repeat(width)
}

pub fn render_summary(summary: &Summary) -> String {
    let ratio = summary
        .benefit_cost_ratio
        .map_or_else(|| "n/a".to_string(), |r| format!("{r:.2}"));
    let breakeven = summary
        .breakeven_year
        .map_or_else(|| "never".to_string(), |y| y.to_string());

    let fields = [
        ("Gross revenue", format_billions(summary.gross_revenue)),
        ("Net revenue", format_billions(summary.net_revenue)),
        ("Revenue collected", format_billions(summary.total_revenue_collected)),
        ("Spending impact", format_billions(summary.total_spending_impact)),
        ("Migration cost", format_billions(summary.total_migration_cost)),
        ("Admin cost", format_billions(summary.total_admin_cost)),
        ("Departures", format!("{:.2}", summary.departures)),
        ("Benefit/cost ratio", ratio),
        ("Breakeven year", breakeven),
        ("Discount rate", format_percentage(summary.discount_rate)),
        ("NPV", format_billions(summary.npv)),
    ];

    let mut lines = vec![
        format!(
            "Scenario: {} ({}-year horizon)",
            summary.scenario, summary.horizon_years
        ),
        rule(40),
    ];
    lines.extend(
        fields
            .iter()
            .map(|(label, value)| format!("{label:<22}{value:>18}")),
    );
    lines.join("\n")
}

pub fn render_timeline(result: &CostBenefitResult) -> String {
    let header = format!(
        "{:<6}{:>12}{:>12}{:>12}{:>10}{:>12}{:>12}{:>14}",
        "Year", "Revenue", "Spending", "Migration", "Admin", "Net", "Discounted", "Cumulative NPV"
    );
    let mut lines = vec![header.clone(), rule(header.len())];
    lines.extend(result.rows.iter().map(|row| {
        format!(
            "{:<6}{:>12}{:>12}{:>12}{:>10}{:>12}{:>12}{:>14}",
            row.year,
            format_billions(row.revenue_collected),
            format_billions(row.spending_impact),
            format_billions(-row.migration_cost),
            format_billions(-row.admin_cost),
            format_billions(row.net_benefit),
            format_billions(row.discounted_net_benefit),
            format_billions(row.cumulative_npv),
        )
    }));
    lines.join("\n")
}

pub fn render_waterfall(revenue: &RevenueEstimate) -> String {
    let mut lines = vec!["Revenue waterfall".to_string(), rule(40)];
    lines.extend(revenue.waterfall().iter().map(|step| {
        let marker = match step.kind {
            WaterfallKind::Total => "=",
            WaterfallKind::Subtotal => "~",
            WaterfallKind::Decrease => " ",
        };
        format!("{marker} {:<20}{:>17}", step.label, format_billions(step.value))
    }));
    lines.join("\n")
}

pub fn render_spending(spending: &SpendingEstimate) -> String {
    let header = format!(
        "{:<18}{:>8}{:>12}{:>8}{:>12}{:>14}  {}",
        "Category", "Share", "Allocation", "Mult.", "GDP impact", "Units/year", "Unit"
    );
    let mut lines = vec![
        format!(
            "Spending over {} years (weighted multiplier {:.3})",
            spending.spending_years, spending.weighted_multiplier
        ),
        header.clone(),
        rule(header.len()),
    ];
    lines.extend(spending.categories.iter().map(|c| {
        let (units, label) = c
            .units
            .as_ref()
            .map_or((String::new(), ""), |u| (format_count(u.annual), u.label.as_str()));
        format!(
            "{:<18}{:>8}{:>12}{:>8.2}{:>12}{:>14}  {}",
            c.name,
            format_percentage(c.fraction),
            format_billions(c.allocation),
            c.multiplier,
            format_billions(c.gdp_impact),
            units,
            label
        )
    }));
    if spending.total_annual_jobs > 0.0 {
        lines.push(format!(
            "Direct jobs supported per year: {}",
            format_count(spending.total_annual_jobs)
        ));
    }
    lines.join("\n")
}

/// Full report for one scenario run
pub fn render_report(result: &CostBenefitResult) -> String {
    [
        render_summary(&result.summary),
        render_waterfall(&result.revenue),
        render_spending(&result.spending),
        render_timeline(result),
    ]
    .join("\n\n")
}

pub fn render_comparison(summaries: &[Summary]) -> String {
    let header = format!(
        "{:<16}{:>12}{:>12}{:>12}{:>12}{:>12}",
        "Scenario", "Net rev.", "Departures", "Migration", "Spending", "NPV"
    );
    let mut lines = vec![header.clone(), rule(header.len())];
    lines.extend(summaries.iter().map(|s| {
        format!(
            "{:<16}{:>12}{:>12.2}{:>12}{:>12}{:>12}",
            s.scenario,
            format_billions(s.net_revenue),
            s.departures,
            format_billions(s.total_migration_cost),
            format_billions(s.total_spending_impact),
            format_billions(s.npv),
        )
    }));
    lines.join("\n")
}

pub fn render_tornado(table: &TornadoTable) -> String {
    let header = format!(
        "{:<28}{:>16}{:>12}{:>12}{:>12}",
        "Parameter", "Range", "Low NPV", "High NPV", "Swing"
    );
    let mut lines = vec![
        format!(
            "Sensitivity of {} (base NPV {})",
            table.scenario,
            format_billions(table.base_npv)
        ),
        header.clone(),
        rule(header.len()),
    ];
    lines.extend(table.rows.iter().map(|row| {
        format!(
            "{:<28}{:>16}{:>12}{:>12}{:>12}",
            row.label,
            format!("{} - {}", row.low_value, row.high_value),
            format_billions(row.low_npv),
            format_billions(row.high_npv),
            format_billions(row.swing),
        )
    }));
    lines.join("\n")
}

pub fn render_sweep(label: &str, points: &[SweepPoint]) -> String {
    let header = format!("{:<12}{:>12}{:>12}{:>12}", label, "Departures", "Net rev.", "NPV");
    let mut lines = vec![header.clone(), rule(header.len())];
    lines.extend(points.iter().map(|p| {
        format!(
            "{:<12.4}{:>12.2}{:>12}{:>12}",
            p.value,
            p.summary.departures,
            format_billions(p.summary.net_revenue),
            format_billions(p.npv),
        )
    }));
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use wealthtax_core::compute_timeline;
    use wealthtax_core::config::catalog::{self, ScenarioKind};

    #[test]
    fn test_format_billions() {
        assert_eq!(format_billions(84.7747), "$84.77B");
        assert_eq!(format_billions(-0.15), "-$0.15B");
        assert_eq!(format_billions(2245.2), "$2,245.20B");
        assert_eq!(format_billions(0.999), "$1.00B");
        assert_eq!(format_billions(-0.001), "$0.00B");
    }

    #[test]
    fn test_format_percentage() {
        assert_eq!(format_percentage(0.05), "5.00%");
        assert_eq!(format_percentage(0.855), "85.50%");
    }

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(957_446.8), "957,447");
        assert_eq!(format_count(12.0), "12");
    }

    #[test]
    fn test_report_sections() {
        let result = compute_timeline(&catalog::scenario(ScenarioKind::Baseline).unwrap());
        let report = render_report(&result);
        assert!(report.starts_with("Scenario: baseline (20-year horizon)"));
        assert!(report.contains("Revenue waterfall"));
        assert!(report.contains("enrollee-years"));
        // Header, rule and one line per year
        assert_eq!(render_timeline(&result).lines().count(), 22);
    }

    #[test]
    fn test_comparison_has_row_per_scenario() {
        let summaries =
            wealthtax_core::compare_scenarios(&catalog::all_scenarios().unwrap());
        let table = render_comparison(&summaries);
        assert_eq!(table.lines().count(), 6);
        assert!(table.lines().nth(5).unwrap().starts_with("extreme_flight"));
    }
}
