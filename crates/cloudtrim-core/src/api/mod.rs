//! The CloudTrim backend API seam.
//!
//! `CloudTrimApi` is implemented over HTTP by `cloudtrim-interaction` and by
//! in-memory fakes in tests. Every call takes the caller's cancellation token
//! and must give up with [`ApiError::Cancelled`](crate::error::ApiError) once
//! it fires.

mod token;

pub use token::{MemoryTokenStore, TOKEN_KEY, TokenStore};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;

use crate::auth::{Credentials, SessionPayload, SignupCredentials};
use crate::cost::CostSnapshot;
use crate::error::Result;
use crate::recommendation::{Recommendation, SavingsForecast};
use crate::resource::{ResourceRecord, ResourceUtilization, UnderutilizedResource};

/// Backend liveness report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub timestamp: Option<String>,
}

impl HealthStatus {
    pub fn is_healthy(&self) -> bool {
        self.status.eq_ignore_ascii_case("healthy") || self.status.eq_ignore_ascii_case("ok")
    }
}

/// Typed operations against the CloudTrim backend.
#[async_trait]
pub trait CloudTrimApi: Send + Sync {
    async fn login(
        &self,
        cancel: &CancellationToken,
        credentials: &Credentials,
    ) -> Result<SessionPayload>;

    async fn signup(
        &self,
        cancel: &CancellationToken,
        credentials: &SignupCredentials,
    ) -> Result<SessionPayload>;

    /// Best effort; callers clear their local session regardless of the outcome.
    async fn logout(&self, cancel: &CancellationToken) -> Result<()>;

    async fn get_current_costs(&self, cancel: &CancellationToken) -> Result<CostSnapshot>;

    /// Cost analysis for the trailing `days` days. `days` must be positive.
    async fn get_historical_costs(
        &self,
        cancel: &CancellationToken,
        days: u32,
    ) -> Result<CostSnapshot>;

    async fn get_optimization_recommendations(
        &self,
        cancel: &CancellationToken,
    ) -> Result<Vec<Recommendation>>;

    async fn get_resource_utilization(
        &self,
        cancel: &CancellationToken,
    ) -> Result<ResourceUtilization>;

    async fn get_resources(&self, cancel: &CancellationToken) -> Result<Vec<ResourceRecord>>;

    /// Applies a recommendation and returns its updated form.
    async fn apply_recommendation(
        &self,
        cancel: &CancellationToken,
        id: &str,
    ) -> Result<Recommendation>;

    async fn get_underutilized_resources(
        &self,
        cancel: &CancellationToken,
    ) -> Result<Vec<UnderutilizedResource>>;

    async fn get_savings_forecast(&self, cancel: &CancellationToken) -> Result<SavingsForecast>;

    async fn health_check(&self, cancel: &CancellationToken) -> Result<HealthStatus>;
}
