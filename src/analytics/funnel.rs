//! SLA funnel by priority and lifecycle-stage funnel

use crate::analytics::{round2, sla};
use crate::models::{LifecycleStage, Priority, Ticket};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Stage order the lifecycle funnel walks. `waiting_for_user` is a holding
/// state, not a conversion step, and is deliberately absent.
const FUNNEL_STAGES: [LifecycleStage; 5] = [
    LifecycleStage::New,
    LifecycleStage::Triage,
    LifecycleStage::InProgress,
    LifecycleStage::Resolved,
    LifecycleStage::Closed,
];

/// One priority bucket of the SLA funnel
#[derive(Debug, Clone, Serialize)]
pub struct SlaFunnelRow {
    pub priority: Priority,
    pub total: usize,
    /// Tickets currently breached per `sla::is_breached`
    pub breached: usize,
    /// Compliance over resolved/closed tickets carrying a deadline;
    /// `None` when the bucket has none
    pub compliance_pct: Option<f64>,
}

/// SLA funnel rows in high / medium / low order
pub fn sla_funnel(tickets: &[Ticket], now: DateTime<Utc>) -> Vec<SlaFunnelRow> {
    [Priority::High, Priority::Medium, Priority::Low]
        .into_iter()
        .map(|priority| {
            let bucket: Vec<Ticket> = tickets
                .iter()
                .filter(|t| t.priority == priority)
                .cloned()
                .collect();

            SlaFunnelRow {
                priority,
                total: bucket.len(),
                breached: bucket.iter().filter(|t| sla::is_breached(t, now)).count(),
                compliance_pct: sla::sla_compliance(&bucket),
            }
        })
        .collect()
}

/// One stage of the lifecycle funnel
#[derive(Debug, Clone, Serialize)]
pub struct LifecycleFunnelStage {
    pub stage: LifecycleStage,
    pub count: usize,
    /// `count / previous-stage count * 100`; the first stage converts
    /// against the full ticket count. `None` when the previous stage is
    /// empty.
    pub conversion_pct: Option<f64>,
}

/// Walk the fixed stage order, counting tickets via the stage derivation
pub fn lifecycle_funnel(tickets: &[Ticket]) -> Vec<LifecycleFunnelStage> {
    let mut previous_count = tickets.len();
    let mut stages = Vec::with_capacity(FUNNEL_STAGES.len());

    for stage in FUNNEL_STAGES {
        let count = tickets
            .iter()
            .filter(|t| sla::lifecycle_stage(t) == stage)
            .count();

        let conversion_pct = if previous_count == 0 {
            None
        } else {
            Some(round2(count as f64 / previous_count as f64 * 100.0))
        };

        stages.push(LifecycleFunnelStage {
            stage,
            count,
            conversion_pct,
        });
        previous_count = count;
    }

    stages
}
