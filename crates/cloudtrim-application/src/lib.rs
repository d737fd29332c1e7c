//! Application layer for the CloudTrim client.
//!
//! Use cases that drive the store: each one dispatches `Pending`, calls the
//! API client and settles the operation as fulfilled, rejected or cancelled.

pub mod auth_service;
pub mod dashboard_service;
pub mod demo_fallback;
pub mod recommendation_service;
mod tracking;

pub use auth_service::AuthService;
pub use dashboard_service::{DashboardLoad, DashboardService};
pub use demo_fallback::DemoFallback;
pub use recommendation_service::{ApplyOutcome, RecommendationService};
