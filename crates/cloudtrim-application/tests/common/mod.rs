//! In-memory `CloudTrimApi` used by the use case tests.

#![allow(dead_code)]

use async_trait::async_trait;
use cloudtrim_core::api::{CloudTrimApi, HealthStatus};
use cloudtrim_core::auth::{Credentials, SessionPayload, SignupCredentials, User};
use cloudtrim_core::cost::{CostSnapshot, ServiceCost};
use cloudtrim_core::error::{ApiError, Result};
use cloudtrim_core::recommendation::{Recommendation, SavingsForecast};
use cloudtrim_core::resource::{ResourceRecord, ResourceUtilization, UnderutilizedResource};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Canned responses, one per endpoint.
pub struct FakeApi {
    pub session: Result<SessionPayload>,
    pub logout: Result<()>,
    pub costs: Result<CostSnapshot>,
    pub historical: Result<CostSnapshot>,
    pub resources: Result<Vec<ResourceRecord>>,
    pub utilization: Result<ResourceUtilization>,
    pub recommendations: Result<Vec<Recommendation>>,
    pub applied: Result<Recommendation>,
    /// Each call waits this long before answering.
    pub delay: Option<Duration>,
    /// Answer after `delay` even if the token fired, like a response that
    /// was already on the wire.
    pub ignore_cancel: bool,
    pub calls: AtomicUsize,
}

impl Default for FakeApi {
    fn default() -> Self {
        Self {
            session: Ok(SessionPayload::new(
                Some("tok-1".to_string()),
                User {
                    email: "ops@acme.io".to_string(),
                    company_name: "Acme".to_string(),
                    plan: "Pro".to_string(),
                },
            )),
            logout: Ok(()),
            costs: Ok(cost_snapshot(8200.0)),
            historical: Ok(cost_snapshot(24600.0)),
            resources: Ok(vec![
                resource("i-1", "Running", 120.0),
                resource("i-2", "Stopped", 30.0),
            ]),
            utilization: Ok(ResourceUtilization {
                cpu_usage: 42.0,
                memory_usage: 8.0,
                storage_usage: 250.0,
                total_memory: 16.0,
                total_storage: 1000.0,
            }),
            recommendations: Ok(vec![
                recommendation("r-1", 120.0, "Open"),
                recommendation("r-2", 80.0, "Open"),
            ]),
            applied: Ok(recommendation("r-2", 0.0, "Applied")),
            delay: None,
            ignore_cancel: false,
            calls: AtomicUsize::new(0),
        }
    }
}

impl FakeApi {
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    async fn respond<T: Clone>(&self, cancel: &CancellationToken, canned: &Result<T>) -> Result<T> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            if self.ignore_cancel {
                tokio::time::sleep(delay).await;
            } else {
                tokio::select! {
                    _ = cancel.cancelled() => return Err(ApiError::Cancelled),
                    _ = tokio::time::sleep(delay) => {}
                }
            }
        }
        canned.clone()
    }
}

#[async_trait]
impl CloudTrimApi for FakeApi {
    async fn login(&self, cancel: &CancellationToken, _: &Credentials) -> Result<SessionPayload> {
        self.respond(cancel, &self.session).await
    }

    async fn signup(
        &self,
        cancel: &CancellationToken,
        _: &SignupCredentials,
    ) -> Result<SessionPayload> {
        self.respond(cancel, &self.session).await
    }

    async fn logout(&self, cancel: &CancellationToken) -> Result<()> {
        self.respond(cancel, &self.logout).await
    }

    async fn get_current_costs(&self, cancel: &CancellationToken) -> Result<CostSnapshot> {
        self.respond(cancel, &self.costs).await
    }

    async fn get_historical_costs(
        &self,
        cancel: &CancellationToken,
        _days: u32,
    ) -> Result<CostSnapshot> {
        self.respond(cancel, &self.historical).await
    }

    async fn get_optimization_recommendations(
        &self,
        cancel: &CancellationToken,
    ) -> Result<Vec<Recommendation>> {
        self.respond(cancel, &self.recommendations).await
    }

    async fn get_resource_utilization(
        &self,
        cancel: &CancellationToken,
    ) -> Result<ResourceUtilization> {
        self.respond(cancel, &self.utilization).await
    }

    async fn get_resources(&self, cancel: &CancellationToken) -> Result<Vec<ResourceRecord>> {
        self.respond(cancel, &self.resources).await
    }

    async fn apply_recommendation(
        &self,
        cancel: &CancellationToken,
        _id: &str,
    ) -> Result<Recommendation> {
        self.respond(cancel, &self.applied).await
    }

    async fn get_underutilized_resources(
        &self,
        cancel: &CancellationToken,
    ) -> Result<Vec<UnderutilizedResource>> {
        self.respond(
            cancel,
            &Ok(vec![UnderutilizedResource {
                resource_id: "i-2".to_string(),
                resource_type: "EC2".to_string(),
                average_utilization: 4.0,
                peak_utilization: 11.0,
                cost_per_month: 30.0,
                last_used: None,
            }]),
        )
        .await
    }

    async fn get_savings_forecast(&self, cancel: &CancellationToken) -> Result<SavingsForecast> {
        self.respond(
            cancel,
            &Ok(SavingsForecast {
                total_potential_savings: 200.0,
                recommendations_count: 2,
                ..Default::default()
            }),
        )
        .await
    }

    async fn health_check(&self, cancel: &CancellationToken) -> Result<HealthStatus> {
        self.respond(
            cancel,
            &Ok(HealthStatus {
                status: "healthy".to_string(),
                timestamp: None,
            }),
        )
        .await
    }
}

pub fn cost_snapshot(total: f64) -> CostSnapshot {
    CostSnapshot {
        total_cost: total,
        daily_costs: Vec::new(),
        service_costs: vec![ServiceCost::new("EC2", total * 0.6), ServiceCost::new("S3", total * 0.4)],
        trend_percentage: -8.5,
    }
}

pub fn resource(id: &str, status: &str, cost: f64) -> ResourceRecord {
    ResourceRecord {
        id: id.to_string(),
        resource_type: "EC2".to_string(),
        name: format!("server-{id}"),
        status: status.to_string(),
        cost,
        region: "us-east-1".to_string(),
        utilization_percent: 20.0,
    }
}

pub fn recommendation(id: &str, savings: f64, status: &str) -> Recommendation {
    Recommendation {
        id: id.to_string(),
        resource_type: "EC2".to_string(),
        resource_id: format!("i-{id}"),
        current_config: "m5.xlarge".to_string(),
        recommended_config: "m5.large".to_string(),
        potential_savings: savings,
        priority: "High".to_string(),
        status: status.to_string(),
    }
}

pub fn server_error() -> ApiError {
    ApiError::request(500, "Internal Server Error")
}
