use super::types::{Assumptions, Card, ControlCaptions, DerivedMetrics, FormulaLine};

/// Groups the integer digits with commas: `1234567` -> `1,234,567`.
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Fixed-point text with halves rounded away from zero.
fn fixed(value: f64, decimals: usize) -> String {
    let factor = 10f64.powi(decimals as i32);
    let rounded = (value * factor).round() / factor;
    let text = format!("{rounded:.decimals$}");
    // "-0" and "-0.00" read badly next to a count that rounded away.
    if text.starts_with('-') && text[1..].chars().all(|c| c == '0' || c == '.') {
        text[1..].to_string()
    } else {
        text
    }
}

fn money(value: f64) -> String {
    format!("${}", fixed(value, 2))
}

fn percent(fraction: f64, decimals: usize) -> String {
    format!("{}%", fixed(fraction * 100.0, decimals))
}

pub fn build_captions(assumptions: &Assumptions) -> ControlCaptions {
    ControlCaptions {
        conversion_rate: percent(assumptions.conversion_rate, 2),
        yearly_ratio: percent(assumptions.yearly_ratio, 0),
        monthly_retention: format!(
            "Monthly users cancel their sub after {} months",
            assumptions.retention_months
        ),
        yearly_retention: format!(
            "Yearly users cancel their sub after {} years",
            assumptions.yearly_retention_years
        ),
    }
}

/// Builds the worked formulas shown under each chart.
pub fn build_breakdown(assumptions: &Assumptions, metrics: &DerivedMetrics) -> Vec<FormulaLine> {
    let a = assumptions;
    let m = metrics;
    let total = fixed(m.total_subscribers, 0);
    let monthly = fixed(m.monthly_subs, 0);
    let yearly = fixed(m.yearly_subs, 0);
    let ratio = fixed(a.yearly_ratio, 2);

    vec![
        FormulaLine {
            card: Card::Subscribers,
            title: "Total Subscribers",
            formula: "Total Subscribers = Impressions × Conversion Rate",
            evaluation: format!(
                "Total Subscribers = {} × {} = {total}",
                group_thousands(a.impressions),
                percent(a.conversion_rate, 2),
            ),
        },
        FormulaLine {
            card: Card::Subscribers,
            title: "Monthly Subs",
            formula: "Monthly Subs = Total Subscribers × (1 - Yearly Ratio)",
            evaluation: format!("Monthly Subs = {total} × (1 - {ratio}) = {monthly}"),
        },
        FormulaLine {
            card: Card::Subscribers,
            title: "Yearly Subs",
            formula: "Yearly Subs = Total Subscribers × Yearly Ratio",
            evaluation: format!("Yearly Subs = {total} × {ratio} = {yearly}"),
        },
        FormulaLine {
            card: Card::Revenue,
            title: "Revenue",
            formula: "Revenue = (Monthly Subs × Monthly Price × Monthly Retention + Yearly Subs × Yearly Price × Yearly Retention) × (1 - App Store Cut)",
            evaluation: format!(
                "Revenue = ({monthly} × ${} × {} + {yearly} × ${} × {}) × (1 - {}) = {}",
                a.monthly_price,
                a.retention_months,
                a.yearly_price,
                a.yearly_retention_years,
                fixed(a.app_store_cut, 2),
                money(m.revenue),
            ),
        },
        FormulaLine {
            card: Card::Revenue,
            title: "CLV",
            formula: "CLV = (Monthly Subs × Monthly Price × Monthly Retention) + (Yearly Subs × Yearly Price × Yearly Retention)",
            evaluation: format!(
                "CLV = ({monthly} × ${} × {}) + ({yearly} × ${} × {}) = {}",
                a.monthly_price,
                a.retention_months,
                a.yearly_price,
                a.yearly_retention_years,
                money(m.clv),
            ),
        },
        FormulaLine {
            card: Card::Profit,
            title: "Profit",
            formula: "Profit = Revenue × Profit Margin",
            evaluation: format!(
                "Profit = {} × {} = {}",
                money(m.revenue),
                fixed(a.profit_margin, 2),
                money(m.profit),
            ),
        },
    ]
}
