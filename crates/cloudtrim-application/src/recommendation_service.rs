//! Optimization recommendations: listing, applying and forecasting.

use crate::tracking::{reject, track};
use cloudtrim_core::api::CloudTrimApi;
use cloudtrim_core::error::{ApiError, Result};
use cloudtrim_core::recommendation::{Recommendation, SavingsForecast};
use cloudtrim_core::resource::UnderutilizedResource;
use cloudtrim_core::store::{Action, Operation, Store};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Result of applying a recommendation.
#[derive(Debug, Clone, PartialEq)]
pub enum ApplyOutcome {
    /// The updated recommendation replaced the held entry with the same ID.
    Applied(Recommendation),
    /// The backend accepted the apply but the ID is not in the held
    /// collection, so nothing was replaced.
    NotInCollection(Recommendation),
}

impl ApplyOutcome {
    pub fn recommendation(&self) -> &Recommendation {
        match self {
            Self::Applied(rec) | Self::NotInCollection(rec) => rec,
        }
    }
}

pub struct RecommendationService {
    store: Arc<Store>,
    api: Arc<dyn CloudTrimApi>,
}

impl RecommendationService {
    pub fn new(store: Arc<Store>, api: Arc<dyn CloudTrimApi>) -> Self {
        Self { store, api }
    }

    pub async fn load_recommendations(
        &self,
        cancel: &CancellationToken,
    ) -> Result<Vec<Recommendation>> {
        let operation = Operation::Recommendations;
        match track(
            &self.store,
            cancel,
            operation,
            self.api.get_optimization_recommendations(cancel),
        )
        .await
        {
            Ok(items) => {
                self.store
                    .dispatch(Action::RecommendationsFulfilled { items: items.clone() });
                Ok(items)
            }
            Err(ApiError::Cancelled) => Err(ApiError::Cancelled),
            Err(err) => Err(reject(&self.store, operation, err)),
        }
    }

    /// Applies one recommendation and folds the result into the collection.
    pub async fn apply_recommendation(
        &self,
        cancel: &CancellationToken,
        id: &str,
    ) -> Result<ApplyOutcome> {
        let operation = Operation::ApplyRecommendation;
        let recommendation = match track(
            &self.store,
            cancel,
            operation,
            self.api.apply_recommendation(cancel, id),
        )
        .await
        {
            Ok(recommendation) => recommendation,
            Err(ApiError::Cancelled) => return Err(ApiError::Cancelled),
            Err(err) => return Err(reject(&self.store, operation, err)),
        };

        let state = self.store.dispatch(Action::RecommendationApplied {
            recommendation: recommendation.clone(),
        });

        if state.recommendations.apply_miss.as_deref() == Some(recommendation.id.as_str()) {
            tracing::warn!(
                "[RecommendationService] Applied recommendation {} is not in the loaded list",
                recommendation.id
            );
            return Ok(ApplyOutcome::NotInCollection(recommendation));
        }

        tracing::info!(
            "[RecommendationService] Applied recommendation {} ({})",
            recommendation.id,
            recommendation.status
        );
        Ok(ApplyOutcome::Applied(recommendation))
    }

    /// Not tracked by the store.
    pub async fn underutilized_resources(
        &self,
        cancel: &CancellationToken,
    ) -> Result<Vec<UnderutilizedResource>> {
        self.api.get_underutilized_resources(cancel).await
    }

    /// Not tracked by the store.
    pub async fn savings_forecast(&self, cancel: &CancellationToken) -> Result<SavingsForecast> {
        self.api.get_savings_forecast(cancel).await
    }
}
