use super::types::{Assumptions, ChartPoint, DashboardCharts, DerivedMetrics};

const MONTHLY_FILL: &str = "#3b82f6";
const YEARLY_FILL: &str = "#10b981";
const REVENUE_FILL: &str = "#f59e0b";
const CLV_FILL: &str = "#ef4444";
const PROFIT_FILL: &str = "#10b981";

/// Maps the assumptions to the six derived values.
///
/// Inputs are expected to be clamped already; the function is defined for any
/// finite record and never fails.
pub fn derive_metrics(assumptions: &Assumptions) -> DerivedMetrics {
    let total_subscribers = assumptions.impressions as f64 * assumptions.conversion_rate;
    let monthly_subs = total_subscribers * (1.0 - assumptions.yearly_ratio);
    let yearly_subs = total_subscribers * assumptions.yearly_ratio;

    let clv = lifetime_value(assumptions, monthly_subs, yearly_subs);
    let revenue = clv * (1.0 - assumptions.app_store_cut);
    let profit = revenue * assumptions.profit_margin;

    DerivedMetrics {
        total_subscribers,
        monthly_subs,
        yearly_subs,
        revenue,
        clv,
        profit,
    }
}

fn lifetime_value(assumptions: &Assumptions, monthly_subs: f64, yearly_subs: f64) -> f64 {
    let monthly_cohort =
        monthly_subs * assumptions.monthly_price * assumptions.retention_months as f64;
    let yearly_cohort =
        yearly_subs * assumptions.yearly_price * assumptions.yearly_retention_years as f64;
    monthly_cohort + yearly_cohort
}

pub fn build_charts(metrics: &DerivedMetrics) -> DashboardCharts {
    let pie_total = metrics.monthly_subs + metrics.yearly_subs;
    let share = |value: f64| {
        if pie_total > 0.0 {
            value / pie_total
        } else {
            0.0
        }
    };

    DashboardCharts {
        subscribers: vec![
            ChartPoint {
                name: "Monthly",
                value: metrics.monthly_subs,
                fill: MONTHLY_FILL,
                percent: Some(share(metrics.monthly_subs)),
            },
            ChartPoint {
                name: "Yearly",
                value: metrics.yearly_subs,
                fill: YEARLY_FILL,
                percent: Some(share(metrics.yearly_subs)),
            },
        ],
        revenue: vec![
            bar_point("Revenue", metrics.revenue, REVENUE_FILL),
            bar_point("CLV", metrics.clv, CLV_FILL),
        ],
        profit: vec![bar_point("Profit", metrics.profit, PROFIT_FILL)],
    }
}

fn bar_point(name: &'static str, value: f64, fill: &'static str) -> ChartPoint {
    ChartPoint {
        name,
        value,
        fill,
        percent: None,
    }
}
