//! Pure state transitions.

use super::action::Action;
use super::state::{AppState, DataOrigin, HistoricalCosts};
use crate::auth::Session;
use crate::recommendation::total_potential_savings;
use crate::resource::ResourceTotals;

/// Computes the next state from the previous one and an action.
///
/// No I/O happens here and no action is ever derived from another.
pub fn reduce(state: &AppState, action: Action) -> AppState {
    let mut next = state.clone();
    apply(&mut next, action);
    next
}

fn apply(state: &mut AppState, action: Action) {
    match action {
        Action::Pending { operation } => state.lifecycle_mut(operation).start(),
        Action::Rejected { operation, error } => state.lifecycle_mut(operation).reject(error),
        Action::Cancelled { operation } => state.lifecycle_mut(operation).cancel(),

        Action::LoginSucceeded { user } => {
            state.auth.session = Session::authenticated(user);
            state.auth.fetch.fulfill();
        }
        Action::LoggedOut => {
            state.auth = Default::default();
        }

        Action::CurrentCostsFulfilled { snapshot } => {
            state.costs.current = Some(snapshot);
            state.costs.current_origin = DataOrigin::Live;
            state.costs.current_fetch.fulfill();
        }
        Action::CurrentCostsFallback { error, snapshot } => {
            state.costs.current = Some(snapshot);
            state.costs.current_origin = DataOrigin::Fallback;
            state.costs.current_fetch.reject(error);
        }
        Action::HistoricalCostsFulfilled { days, snapshot } => {
            state.costs.historical = Some(HistoricalCosts { days, snapshot });
            state.costs.historical_fetch.fulfill();
        }

        Action::ResourcesFulfilled { items } => {
            state.resources.totals = ResourceTotals::from_records(&items);
            state.resources.items = items;
            state.resources.origin = DataOrigin::Live;
            state.resources.list_fetch.fulfill();
        }
        Action::ResourcesFallback { error, items } => {
            state.resources.totals = ResourceTotals::from_records(&items);
            state.resources.items = items;
            state.resources.origin = DataOrigin::Fallback;
            state.resources.list_fetch.reject(error);
        }
        Action::UtilizationFulfilled { utilization } => {
            state.resources.utilization = Some(utilization);
            state.resources.utilization_fetch.fulfill();
        }

        Action::RecommendationsFulfilled { items } => {
            state.recommendations.total_potential_savings = total_potential_savings(&items);
            state.recommendations.items = items;
            state.recommendations.apply_miss = None;
            state.recommendations.list_fetch.fulfill();
        }
        Action::RecommendationApplied { recommendation } => {
            let recs = &mut state.recommendations;
            match recs.items.iter_mut().find(|r| r.id == recommendation.id) {
                Some(slot) => {
                    *slot = recommendation;
                    recs.apply_miss = None;
                    recs.total_potential_savings = total_potential_savings(&recs.items);
                }
                None => recs.apply_miss = Some(recommendation.id),
            }
            recs.apply_fetch.fulfill();
        }
    }
}
