//! Example data shown when the backend cannot be reached.

use cloudtrim_core::cost::{CostSnapshot, ServiceCost};
use cloudtrim_core::fallback::FallbackProvider;
use cloudtrim_core::resource::{ResourceRecord, STATUS_RUNNING};

/// Note rendered under any view that shows demo data.
pub const DEMO_DATA_NOTE: &str = "* This is example data. The actual dashboard will show your AWS \
resources and costs once you connect your account.";

/// Substitutes a fixed two-instance AWS account.
#[derive(Debug, Clone, Copy, Default)]
pub struct DemoFallback;

impl DemoFallback {
    pub fn new() -> Self {
        Self
    }

    fn service_costs() -> Vec<ServiceCost> {
        vec![
            ServiceCost::new("EC2", 45.20),
            ServiceCost::new("RDS", 125.80),
            ServiceCost::new("S3", 25.50),
        ]
    }
}

impl FallbackProvider for DemoFallback {
    fn current_costs(&self) -> Option<CostSnapshot> {
        let service_costs = Self::service_costs();
        Some(CostSnapshot {
            total_cost: service_costs.iter().map(|s| s.cost).sum(),
            daily_costs: Vec::new(),
            service_costs,
            trend_percentage: 0.0,
        })
    }

    fn resources(&self) -> Option<Vec<ResourceRecord>> {
        Some(vec![
            ResourceRecord {
                id: "i-123456".to_string(),
                resource_type: "EC2".to_string(),
                name: "web-server-1".to_string(),
                status: STATUS_RUNNING.to_string(),
                cost: 45.20,
                region: "us-west-2".to_string(),
                utilization_percent: 15.0,
            },
            ResourceRecord {
                id: "i-789012".to_string(),
                resource_type: "RDS".to_string(),
                name: "db-server-1".to_string(),
                status: STATUS_RUNNING.to_string(),
                cost: 125.80,
                region: "us-west-2".to_string(),
                utilization_percent: 65.0,
            },
        ])
    }
}
