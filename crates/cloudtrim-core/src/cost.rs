//! Cost analysis domain models.

use serde::{Deserialize, Serialize};

/// Cost for a single day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyCost {
    pub date: String,
    pub cost: f64,
}

/// Cost attributed to a single cloud service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceCost {
    pub service: String,
    pub cost: f64,
}

impl ServiceCost {
    pub fn new(service: impl Into<String>, cost: f64) -> Self {
        Self {
            service: service.into(),
            cost,
        }
    }
}

/// A cost analysis for the current month or a trailing window.
///
/// Snapshots are always replaced wholesale; nothing merges two of them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CostSnapshot {
    pub total_cost: f64,
    #[serde(default)]
    pub daily_costs: Vec<DailyCost>,
    /// `breakdown_by_service` is the name the Python backend uses.
    #[serde(default, alias = "breakdown_by_service")]
    pub service_costs: Vec<ServiceCost>,
    #[serde(default)]
    pub trend_percentage: f64,
}

impl CostSnapshot {
    /// Sum of the per-service breakdown.
    pub fn service_total(&self) -> f64 {
        self.service_costs.iter().map(|s| s.cost).sum()
    }

    /// The most expensive service, if any is listed.
    pub fn top_service(&self) -> Option<&ServiceCost> {
        self.service_costs
            .iter()
            .max_by(|a, b| a.cost.total_cmp(&b.cost))
    }
}
