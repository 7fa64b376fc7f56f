//! Operator dashboard
//!
//! Local-first web interface over the profile store: live patient list,
//! BMI distribution and adherence counts. Read-only: the dashboard
//! re-reads the store on every request and never writes.
//!
//! ```text
//! GET /              → embedded static page
//! GET /api/health    → health check
//! GET /api/healthz   → liveness probe
//! GET /api/stats     → aggregate stats + patient list
//! ```

pub mod api;
pub mod config;
pub mod server;

pub use api::{health_router, stats_router, AppState, PatientSummary, StatsResponse};
pub use config::DashboardConfig;
pub use server::DashboardServer;
