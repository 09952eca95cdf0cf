use tracing::debug;

use super::breakdown::{build_breakdown, build_captions};
use super::engine::{build_charts, derive_metrics};
use super::types::{AssumptionField, Assumptions, DashboardSnapshot};

/// Input state of one dashboard. Derived values are never stored; every
/// `snapshot` recomputes them from the current assumptions.
#[derive(Debug, Clone, Default)]
pub struct Dashboard {
    assumptions: Assumptions,
}

impl Dashboard {
    pub fn new(assumptions: Assumptions) -> Self {
        Self {
            assumptions: assumptions.clamped(),
        }
    }

    pub fn assumptions(&self) -> &Assumptions {
        &self.assumptions
    }

    pub fn set(&mut self, field: AssumptionField, raw: &str) {
        self.assumptions.apply(field, raw);
        debug!(field = field.key(), raw, "assumption updated");
    }

    pub fn snapshot(&self) -> DashboardSnapshot {
        snapshot_of(&self.assumptions)
    }
}

pub fn snapshot_of(assumptions: &Assumptions) -> DashboardSnapshot {
    let metrics = derive_metrics(assumptions);
    DashboardSnapshot {
        assumptions: *assumptions,
        charts: build_charts(&metrics),
        captions: build_captions(assumptions),
        breakdown: build_breakdown(assumptions, &metrics),
        metrics,
    }
}
