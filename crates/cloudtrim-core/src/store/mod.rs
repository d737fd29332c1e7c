//! Client state store.
//!
//! Holds the last known value of every entity collection and changes only
//! through [`Store::dispatch`]. The store is an explicit container: build one
//! per application instance and share it by `Arc`. Views subscribe to a
//! `watch` channel and re-render from each new snapshot.

mod action;
mod reducer;
mod state;

pub use action::Action;
pub use reducer::reduce;
pub use state::{
    AppState, AuthState, CostState, DataOrigin, FetchLifecycle, FetchStatus, HistoricalCosts,
    Operation, RecommendationsState, ResourcesState,
};

use tokio::sync::watch;

/// Reactive container around [`AppState`].
#[derive(Debug)]
pub struct Store {
    sender: watch::Sender<AppState>,
}

impl Store {
    /// Creates a store holding the initial state.
    pub fn new() -> Self {
        Self::with_state(AppState::default())
    }

    pub fn with_state(state: AppState) -> Self {
        let (sender, _receiver) = watch::channel(state);
        Self { sender }
    }

    /// Applies `action` and returns the resulting snapshot.
    ///
    /// The reducer runs under the channel lock, so concurrent dispatches
    /// never interleave and every subscriber sees each new snapshot.
    pub fn dispatch(&self, action: Action) -> AppState {
        tracing::debug!(
            "[Store] dispatch {} ({})",
            action.name(),
            action.operation().as_str()
        );
        let mut next = None;
        self.sender.send_modify(|state| {
            *state = reduce(state, action);
            next = Some(state.clone());
        });
        next.unwrap_or_else(|| self.snapshot())
    }

    /// A copy of the current state.
    pub fn snapshot(&self) -> AppState {
        self.sender.borrow().clone()
    }

    /// Observes every snapshot from now on.
    ///
    /// The receiver reports the channel as closed once the store is dropped.
    pub fn subscribe(&self) -> watch::Receiver<AppState> {
        self.sender.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}
