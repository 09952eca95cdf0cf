mod breakdown;
mod dashboard;
mod engine;
mod inputs;
mod types;

pub use breakdown::{build_breakdown, build_captions, group_thousands};
pub use dashboard::{Dashboard, snapshot_of};
pub use engine::{build_charts, derive_metrics};
pub use inputs::{CONVERSION_RATE_MAX, CONVERSION_RATE_MIN, MIN_FRACTION, parse_leading_int};
pub use types::{
    AssumptionField, Assumptions, Card, ChartPoint, ControlCaptions, DashboardCharts,
    DashboardSnapshot, DerivedMetrics, FormulaLine,
};
