//! Snapshot types held by the store.

use serde::{Deserialize, Serialize};

use crate::auth::Session;
use crate::cost::CostSnapshot;
use crate::recommendation::Recommendation;
use crate::resource::{ResourceRecord, ResourceTotals, ResourceUtilization};

/// Every asynchronous operation the store tracks independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    Authenticate,
    CurrentCosts,
    HistoricalCosts,
    Resources,
    Utilization,
    Recommendations,
    ApplyRecommendation,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Authenticate => "authenticate",
            Self::CurrentCosts => "current_costs",
            Self::HistoricalCosts => "historical_costs",
            Self::Resources => "resources",
            Self::Utilization => "utilization",
            Self::Recommendations => "recommendations",
            Self::ApplyRecommendation => "apply_recommendation",
        }
    }
}

/// Where an operation is in its Pending/Fulfilled/Rejected cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FetchStatus {
    #[default]
    Idle,
    Pending,
    Fulfilled,
    Rejected,
}

/// Status plus the last error of one operation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchLifecycle {
    pub status: FetchStatus,
    pub error: Option<String>,
}

impl FetchLifecycle {
    pub fn is_loading(&self) -> bool {
        self.status == FetchStatus::Pending
    }

    pub(crate) fn start(&mut self) {
        self.status = FetchStatus::Pending;
        self.error = None;
    }

    pub(crate) fn fulfill(&mut self) {
        self.status = FetchStatus::Fulfilled;
        self.error = None;
    }

    pub(crate) fn reject(&mut self, error: String) {
        self.status = FetchStatus::Rejected;
        self.error = Some(error);
    }

    /// Only an in-flight operation can be cancelled.
    pub(crate) fn cancel(&mut self) {
        if self.status == FetchStatus::Pending {
            self.status = FetchStatus::Idle;
        }
    }
}

/// Whether displayed data came from the backend or the fallback provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataOrigin {
    #[default]
    Live,
    Fallback,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuthState {
    pub session: Session,
    pub fetch: FetchLifecycle,
}

/// A historical snapshot together with the window it covers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoricalCosts {
    pub days: u32,
    pub snapshot: CostSnapshot,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CostState {
    pub current: Option<CostSnapshot>,
    pub current_origin: DataOrigin,
    pub current_fetch: FetchLifecycle,
    pub historical: Option<HistoricalCosts>,
    pub historical_fetch: FetchLifecycle,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourcesState {
    pub items: Vec<ResourceRecord>,
    /// Always recomputed from `items`.
    pub totals: ResourceTotals,
    pub origin: DataOrigin,
    pub list_fetch: FetchLifecycle,
    pub utilization: Option<ResourceUtilization>,
    pub utilization_fetch: FetchLifecycle,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecommendationsState {
    pub items: Vec<Recommendation>,
    /// Always recomputed from `items`.
    pub total_potential_savings: f64,
    pub list_fetch: FetchLifecycle,
    pub apply_fetch: FetchLifecycle,
    /// ID of the last applied recommendation that was not in `items`.
    pub apply_miss: Option<String>,
}

impl RecommendationsState {
    pub fn find(&self, id: &str) -> Option<&Recommendation> {
        self.items.iter().find(|r| r.id == id)
    }
}

/// The whole client state at one instant.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppState {
    pub auth: AuthState,
    pub costs: CostState,
    pub resources: ResourcesState,
    pub recommendations: RecommendationsState,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lifecycle(&self, operation: Operation) -> &FetchLifecycle {
        match operation {
            Operation::Authenticate => &self.auth.fetch,
            Operation::CurrentCosts => &self.costs.current_fetch,
            Operation::HistoricalCosts => &self.costs.historical_fetch,
            Operation::Resources => &self.resources.list_fetch,
            Operation::Utilization => &self.resources.utilization_fetch,
            Operation::Recommendations => &self.recommendations.list_fetch,
            Operation::ApplyRecommendation => &self.recommendations.apply_fetch,
        }
    }

    pub(crate) fn lifecycle_mut(&mut self, operation: Operation) -> &mut FetchLifecycle {
        match operation {
            Operation::Authenticate => &mut self.auth.fetch,
            Operation::CurrentCosts => &mut self.costs.current_fetch,
            Operation::HistoricalCosts => &mut self.costs.historical_fetch,
            Operation::Resources => &mut self.resources.list_fetch,
            Operation::Utilization => &mut self.resources.utilization_fetch,
            Operation::Recommendations => &mut self.recommendations.list_fetch,
            Operation::ApplyRecommendation => &mut self.recommendations.apply_fetch,
        }
    }

    /// True while any tracked operation is in flight.
    pub fn is_loading(&self) -> bool {
        [
            Operation::Authenticate,
            Operation::CurrentCosts,
            Operation::HistoricalCosts,
            Operation::Resources,
            Operation::Utilization,
            Operation::Recommendations,
            Operation::ApplyRecommendation,
        ]
        .into_iter()
        .any(|op| self.lifecycle(op).is_loading())
    }
}
