use serde::Serialize;

pub const DEFAULT_MONTHLY_PRICE: f64 = 5.0;
pub const DEFAULT_YEARLY_PRICE: f64 = 30.0;
pub const DEFAULT_CONVERSION_RATE: f64 = 0.0005;
pub const DEFAULT_PROFIT_MARGIN: f64 = 0.7;
pub const DEFAULT_RETENTION_MONTHS: u32 = 1;
pub const DEFAULT_YEARLY_RETENTION_YEARS: u32 = 1;
pub const DEFAULT_YEARLY_RATIO: f64 = 0.6;
pub const DEFAULT_IMPRESSIONS: u64 = 1000;
pub const DEFAULT_APP_STORE_CUT: f64 = 0.3;

/// The nine business assumptions behind the dashboard.
///
/// Fractions (`conversion_rate`, `profit_margin`, `yearly_ratio`,
/// `app_store_cut`) are stored as 0..=1 values, not percentages.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Assumptions {
    pub monthly_price: f64,
    pub yearly_price: f64,
    pub conversion_rate: f64,
    pub profit_margin: f64,
    pub retention_months: u32,
    pub yearly_retention_years: u32,
    pub yearly_ratio: f64,
    pub impressions: u64,
    pub app_store_cut: f64,
}

impl Default for Assumptions {
    fn default() -> Self {
        Self {
            monthly_price: DEFAULT_MONTHLY_PRICE,
            yearly_price: DEFAULT_YEARLY_PRICE,
            conversion_rate: DEFAULT_CONVERSION_RATE,
            profit_margin: DEFAULT_PROFIT_MARGIN,
            retention_months: DEFAULT_RETENTION_MONTHS,
            yearly_retention_years: DEFAULT_YEARLY_RETENTION_YEARS,
            yearly_ratio: DEFAULT_YEARLY_RATIO,
            impressions: DEFAULT_IMPRESSIONS,
            app_store_cut: DEFAULT_APP_STORE_CUT,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum AssumptionField {
    MonthlyPrice,
    YearlyPrice,
    ConversionRate,
    ProfitMargin,
    RetentionMonths,
    YearlyRetentionYears,
    YearlyRatio,
    Impressions,
    AppStoreCut,
}

impl AssumptionField {
    pub const ALL: [AssumptionField; 9] = [
        AssumptionField::MonthlyPrice,
        AssumptionField::YearlyPrice,
        AssumptionField::ConversionRate,
        AssumptionField::ProfitMargin,
        AssumptionField::RetentionMonths,
        AssumptionField::YearlyRetentionYears,
        AssumptionField::YearlyRatio,
        AssumptionField::Impressions,
        AssumptionField::AppStoreCut,
    ];

    /// Wire key used by the web front-end.
    pub fn key(self) -> &'static str {
        match self {
            AssumptionField::MonthlyPrice => "monthlyPrice",
            AssumptionField::YearlyPrice => "yearlyPrice",
            AssumptionField::ConversionRate => "conversionRate",
            AssumptionField::ProfitMargin => "profitMargin",
            AssumptionField::RetentionMonths => "retentionMonths",
            AssumptionField::YearlyRetentionYears => "yearlyRetentionYears",
            AssumptionField::YearlyRatio => "yearlyRatio",
            AssumptionField::Impressions => "impressions",
            AssumptionField::AppStoreCut => "appStoreCut",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AssumptionField::MonthlyPrice => "Monthly Subscription Price ($)",
            AssumptionField::YearlyPrice => "Yearly Subscription Price ($)",
            AssumptionField::ConversionRate => "Conversion Rate (%)",
            AssumptionField::ProfitMargin => "Profit Margin (%)",
            AssumptionField::RetentionMonths => "Retention (months) for Monthly Plan",
            AssumptionField::YearlyRetentionYears => "Retention (years) for Yearly Plan",
            AssumptionField::YearlyRatio => "Yearly to Monthly Ratio (%)",
            AssumptionField::Impressions => "Impressions",
            AssumptionField::AppStoreCut => "App Store Cut (%)",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedMetrics {
    pub total_subscribers: f64,
    pub monthly_subs: f64,
    pub yearly_subs: f64,
    pub revenue: f64,
    pub clv: f64,
    pub profit: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartPoint {
    pub name: &'static str,
    pub value: f64,
    pub fill: &'static str,
    /// Share of the pie, only set for the subscriber split.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub percent: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardCharts {
    pub subscribers: Vec<ChartPoint>,
    pub revenue: Vec<ChartPoint>,
    pub profit: Vec<ChartPoint>,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Card {
    Subscribers,
    Revenue,
    Profit,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormulaLine {
    pub card: Card,
    pub title: &'static str,
    pub formula: &'static str,
    pub evaluation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ControlCaptions {
    pub conversion_rate: String,
    pub yearly_ratio: String,
    pub monthly_retention: String,
    pub yearly_retention: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSnapshot {
    pub assumptions: Assumptions,
    pub metrics: DerivedMetrics,
    pub charts: DashboardCharts,
    pub captions: ControlCaptions,
    pub breakdown: Vec<FormulaLine>,
}
