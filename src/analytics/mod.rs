//! Derived reporting views over ticket data
//!
//! Everything in this module is a pure, synchronous computation over an
//! already-fetched ticket slice and a reporting window. Nothing here
//! performs I/O or mutates tickets; callers recompute on every read.
//!
//! # Layout
//!
//! - `sla` — lifecycle-stage derivation, MTTR / first-response / breach /
//!   compliance calculators
//! - `kpi` — windowed KPI snapshots with previous-period deltas and
//!   per-day trend arrays
//! - `funnel` — SLA funnel by priority and lifecycle-stage funnel
//! - `issues` — naive title-keyword clustering of recurring issues
//! - `team` — team queue/load rollups and per-agent workload rows
//! - `forecast` — daily predicted-volume series with demo anomaly injection
//! - `access` — access-request approval queue, approver performance and
//!   rule-based insights
//! - `sample` — clearly-labeled demo data (agent roster, anomaly templates,
//!   live-event seeds); never consulted by the aggregation functions
//!   themselves

mod error;
mod window;

pub mod access;
pub mod forecast;
pub mod funnel;
pub mod issues;
pub mod kpi;
pub mod sample;
pub mod sla;
pub mod team;

pub use error::{AnalyticsError, AnalyticsResult};
pub use window::ReportWindow;

/// Round a percentage or hour value to two decimals for the wire
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
