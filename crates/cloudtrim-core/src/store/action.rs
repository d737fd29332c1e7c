use serde::{Deserialize, Serialize};

use super::state::Operation;
use crate::auth::User;
use crate::cost::CostSnapshot;
use crate::recommendation::Recommendation;
use crate::resource::{ResourceRecord, ResourceUtilization};

/// A discrete, named mutation of the store.
///
/// Lifecycle events (`Pending`, `Rejected`, `Cancelled`) are shared by all
/// operations; completions carry the operation-specific payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    /// Request started: loading on, prior error cleared.
    Pending { operation: Operation },
    /// Request failed: error recorded, loading off, data kept.
    Rejected { operation: Operation, error: String },
    /// The caller gave up: an in-flight operation goes back to idle, data kept.
    Cancelled { operation: Operation },

    LoginSucceeded { user: User },
    LoggedOut,

    CurrentCostsFulfilled { snapshot: CostSnapshot },
    /// Live request failed and the fallback provider supplied a snapshot.
    CurrentCostsFallback { error: String, snapshot: CostSnapshot },
    HistoricalCostsFulfilled { days: u32, snapshot: CostSnapshot },

    ResourcesFulfilled { items: Vec<ResourceRecord> },
    /// Live request failed and the fallback provider supplied rows.
    ResourcesFallback {
        error: String,
        items: Vec<ResourceRecord>,
    },
    UtilizationFulfilled { utilization: ResourceUtilization },

    RecommendationsFulfilled { items: Vec<Recommendation> },
    RecommendationApplied { recommendation: Recommendation },
}

impl Action {
    pub fn pending(operation: Operation) -> Self {
        Self::Pending { operation }
    }

    pub fn rejected(operation: Operation, error: impl Into<String>) -> Self {
        Self::Rejected {
            operation,
            error: error.into(),
        }
    }

    pub fn cancelled(operation: Operation) -> Self {
        Self::Cancelled { operation }
    }

    /// Stable name for logging.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Pending { .. } => "pending",
            Self::Rejected { .. } => "rejected",
            Self::Cancelled { .. } => "cancelled",
            Self::LoginSucceeded { .. } => "login_succeeded",
            Self::LoggedOut => "logged_out",
            Self::CurrentCostsFulfilled { .. } => "current_costs_fulfilled",
            Self::CurrentCostsFallback { .. } => "current_costs_fallback",
            Self::HistoricalCostsFulfilled { .. } => "historical_costs_fulfilled",
            Self::ResourcesFulfilled { .. } => "resources_fulfilled",
            Self::ResourcesFallback { .. } => "resources_fallback",
            Self::UtilizationFulfilled { .. } => "utilization_fulfilled",
            Self::RecommendationsFulfilled { .. } => "recommendations_fulfilled",
            Self::RecommendationApplied { .. } => "recommendation_applied",
        }
    }

    /// The operation whose lifecycle this action moves.
    pub fn operation(&self) -> Operation {
        match self {
            Self::Pending { operation }
            | Self::Rejected { operation, .. }
            | Self::Cancelled { operation } => *operation,
            Self::LoginSucceeded { .. } | Self::LoggedOut => Operation::Authenticate,
            Self::CurrentCostsFulfilled { .. } | Self::CurrentCostsFallback { .. } => {
                Operation::CurrentCosts
            }
            Self::HistoricalCostsFulfilled { .. } => Operation::HistoricalCosts,
            Self::ResourcesFulfilled { .. } | Self::ResourcesFallback { .. } => {
                Operation::Resources
            }
            Self::UtilizationFulfilled { .. } => Operation::Utilization,
            Self::RecommendationsFulfilled { .. } => Operation::Recommendations,
            Self::RecommendationApplied { .. } => Operation::ApplyRecommendation,
        }
    }
}
