//! Substitute data shown when a live dashboard request fails.

use crate::cost::CostSnapshot;
use crate::resource::ResourceRecord;

/// Supplies the data a dashboard shows in place of a failed live request.
///
/// Only the cost snapshot and resource list are covered. Returning `None`
/// leaves the view with just the error message.
pub trait FallbackProvider: Send + Sync {
    fn current_costs(&self) -> Option<CostSnapshot>;

    fn resources(&self) -> Option<Vec<ResourceRecord>>;
}

/// Production provider: never substitutes anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoFallback;

impl FallbackProvider for NoFallback {
    fn current_costs(&self) -> Option<CostSnapshot> {
        None
    }

    fn resources(&self) -> Option<Vec<ResourceRecord>> {
        None
    }
}
