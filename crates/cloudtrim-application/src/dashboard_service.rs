//! Cost and resource loading for the dashboard views.

use crate::tracking::{reject, track};
use cloudtrim_core::api::{CloudTrimApi, HealthStatus};
use cloudtrim_core::cost::CostSnapshot;
use cloudtrim_core::error::{ApiError, Result};
use cloudtrim_core::fallback::FallbackProvider;
use cloudtrim_core::resource::{ResourceRecord, ResourceUtilization};
use cloudtrim_core::store::{Action, Operation, Store};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Outcome of each fetch issued by [`DashboardService::load_dashboard`].
#[derive(Debug)]
pub struct DashboardLoad {
    pub costs: Result<CostSnapshot>,
    pub utilization: Result<ResourceUtilization>,
    pub resources: Result<Vec<ResourceRecord>>,
}

impl DashboardLoad {
    /// True when any of the fetches was cancelled.
    pub fn was_cancelled(&self) -> bool {
        [
            self.costs.as_ref().err(),
            self.utilization.as_ref().err(),
            self.resources.as_ref().err(),
        ]
        .into_iter()
        .flatten()
        .any(ApiError::is_cancelled)
    }
}

/// Loads costs, resources and utilization into the store.
///
/// The current cost snapshot and the resource list fall back to the
/// configured [`FallbackProvider`] when the live request fails. Fallback
/// data is returned as `Ok`; the store still records the error.
pub struct DashboardService {
    store: Arc<Store>,
    api: Arc<dyn CloudTrimApi>,
    fallback: Arc<dyn FallbackProvider>,
}

impl DashboardService {
    pub fn new(
        store: Arc<Store>,
        api: Arc<dyn CloudTrimApi>,
        fallback: Arc<dyn FallbackProvider>,
    ) -> Self {
        Self {
            store,
            api,
            fallback,
        }
    }

    /// Issues the cost, utilization and resource fetches concurrently.
    pub async fn load_dashboard(&self, cancel: &CancellationToken) -> DashboardLoad {
        let (costs, utilization, resources) = tokio::join!(
            self.load_current_costs(cancel),
            self.load_utilization(cancel),
            self.load_resources(cancel),
        );
        DashboardLoad {
            costs,
            utilization,
            resources,
        }
    }

    pub async fn load_current_costs(&self, cancel: &CancellationToken) -> Result<CostSnapshot> {
        let operation = Operation::CurrentCosts;
        match track(&self.store, cancel, operation, self.api.get_current_costs(cancel)).await {
            Ok(snapshot) => {
                self.store.dispatch(Action::CurrentCostsFulfilled {
                    snapshot: snapshot.clone(),
                });
                Ok(snapshot)
            }
            Err(ApiError::Cancelled) => Err(ApiError::Cancelled),
            Err(err) => match self.fallback.current_costs() {
                Some(snapshot) => {
                    tracing::warn!(
                        "[DashboardService] Current costs unavailable ({}), showing fallback data",
                        err
                    );
                    self.store.dispatch(Action::CurrentCostsFallback {
                        error: err.user_message(),
                        snapshot: snapshot.clone(),
                    });
                    Ok(snapshot)
                }
                None => Err(reject(&self.store, operation, err)),
            },
        }
    }

    pub async fn load_historical_costs(
        &self,
        cancel: &CancellationToken,
        days: u32,
    ) -> Result<CostSnapshot> {
        let operation = Operation::HistoricalCosts;
        if days == 0 {
            let err = ApiError::invalid_input("days must be a positive integer");
            return Err(reject(&self.store, operation, err));
        }

        match track(
            &self.store,
            cancel,
            operation,
            self.api.get_historical_costs(cancel, days),
        )
        .await
        {
            Ok(snapshot) => {
                self.store.dispatch(Action::HistoricalCostsFulfilled {
                    days,
                    snapshot: snapshot.clone(),
                });
                Ok(snapshot)
            }
            Err(ApiError::Cancelled) => Err(ApiError::Cancelled),
            Err(err) => Err(reject(&self.store, operation, err)),
        }
    }

    pub async fn load_resources(&self, cancel: &CancellationToken) -> Result<Vec<ResourceRecord>> {
        let operation = Operation::Resources;
        match track(&self.store, cancel, operation, self.api.get_resources(cancel)).await {
            Ok(items) => {
                self.store
                    .dispatch(Action::ResourcesFulfilled { items: items.clone() });
                Ok(items)
            }
            Err(ApiError::Cancelled) => Err(ApiError::Cancelled),
            Err(err) => match self.fallback.resources() {
                Some(items) => {
                    tracing::warn!(
                        "[DashboardService] Resources unavailable ({}), showing fallback data",
                        err
                    );
                    self.store.dispatch(Action::ResourcesFallback {
                        error: err.user_message(),
                        items: items.clone(),
                    });
                    Ok(items)
                }
                None => Err(reject(&self.store, operation, err)),
            },
        }
    }

    pub async fn load_utilization(&self, cancel: &CancellationToken) -> Result<ResourceUtilization> {
        let operation = Operation::Utilization;
        match track(
            &self.store,
            cancel,
            operation,
            self.api.get_resource_utilization(cancel),
        )
        .await
        {
            Ok(utilization) => {
                self.store.dispatch(Action::UtilizationFulfilled {
                    utilization: utilization.clone(),
                });
                Ok(utilization)
            }
            Err(ApiError::Cancelled) => Err(ApiError::Cancelled),
            Err(err) => Err(reject(&self.store, operation, err)),
        }
    }

    /// Backend liveness; not tracked by the store.
    pub async fn health_check(&self, cancel: &CancellationToken) -> Result<HealthStatus> {
        let status = self.api.health_check(cancel).await?;
        tracing::debug!("[DashboardService] Backend health: {}", status.status);
        Ok(status)
    }
}
