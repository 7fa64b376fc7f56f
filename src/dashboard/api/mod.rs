//! Dashboard API routers

pub mod health;
pub mod stats;

pub use health::{health_router, AppState};
pub use stats::{stats_router, PatientSummary, StatsResponse};
