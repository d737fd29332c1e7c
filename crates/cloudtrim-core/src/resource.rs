//! Cloud resource domain models.

use serde::{Deserialize, Serialize};

/// Status string the backend uses for a live resource.
pub const STATUS_RUNNING: &str = "Running";

/// A single cloud resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceRecord {
    pub id: String,
    #[serde(rename = "type")]
    pub resource_type: String,
    pub name: String,
    pub status: String,
    pub cost: f64,
    pub region: String,
    #[serde(default, alias = "utilization")]
    pub utilization_percent: f64,
}

impl ResourceRecord {
    pub fn is_running(&self) -> bool {
        self.status == STATUS_RUNNING
    }
}

/// Aggregates derived from a full resource collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourceTotals {
    pub total_count: usize,
    pub active_count: usize,
    pub total_cost: f64,
}

impl ResourceTotals {
    /// Recomputes every aggregate from scratch.
    pub fn from_records(records: &[ResourceRecord]) -> Self {
        Self {
            total_count: records.len(),
            active_count: records.iter().filter(|r| r.is_running()).count(),
            total_cost: records.iter().map(|r| r.cost).sum(),
        }
    }
}

/// Account-wide utilization summary.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourceUtilization {
    pub cpu_usage: f64,
    pub memory_usage: f64,
    pub storage_usage: f64,
    pub total_memory: f64,
    pub total_storage: f64,
}

impl ResourceUtilization {
    /// Memory in use as a percentage of the total, 0 when the total is unknown.
    pub fn memory_percent(&self) -> f64 {
        percent_of(self.memory_usage, self.total_memory)
    }

    pub fn storage_percent(&self) -> f64 {
        percent_of(self.storage_usage, self.total_storage)
    }
}

fn percent_of(value: f64, total: f64) -> f64 {
    if total > 0.0 {
        value / total * 100.0
    } else {
        0.0
    }
}

/// A resource the backend considers underused.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnderutilizedResource {
    pub resource_id: String,
    pub resource_type: String,
    pub average_utilization: f64,
    pub peak_utilization: f64,
    pub cost_per_month: f64,
    #[serde(default)]
    pub last_used: Option<String>,
}
