//! Demo/presentation sample data
//!
//! Everything in this module exists for demo deployments only and is
//! wired in behind the `demo.sample_data` configuration flag. The
//! aggregation functions never reach into this module themselves.

use crate::analytics::forecast::{AnomalyKind, Confidence, ForecastAnomaly, Impact};
use crate::events::{LiveEventKind, LiveEventLog};
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Demo agent roster used for per-agent workload rows when no real
/// assignee data is available
static AGENT_ROSTER: Lazy<Vec<String>> = Lazy::new(|| {
    [
        "maya.patel",
        "jordan.reyes",
        "sam.okafor",
        "lena.fischer",
        "derek.chan",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
});

pub fn agent_roster() -> Vec<String> {
    AGENT_ROSTER.clone()
}

/// The two hardcoded demo anomalies, keyed by days-out offset: a detected
/// access-request surge tomorrow and a forecasted VPN surge in three days
pub fn demo_forecast_anomalies() -> HashMap<u32, ForecastAnomaly> {
    let mut anomalies = HashMap::new();

    anomalies.insert(
        1,
        ForecastAnomaly {
            kind: AnomalyKind::Detected,
            headline: "Access-request surge in progress".to_string(),
            reasons: vec![
                "Access-request volume is 2.4x the trailing average".to_string(),
                "Most requests target the same two applications".to_string(),
                "New-hire onboarding wave started this week".to_string(),
            ],
            confidence: Confidence::High,
            impact: Impact::Medium,
            suggested_actions: vec![
                "Pre-stage role bundles for the onboarding cohort".to_string(),
                "Add a temporary delegate approver for IAM".to_string(),
            ],
        },
    );

    anomalies.insert(
        3,
        ForecastAnomaly {
            kind: AnomalyKind::Forecasted,
            headline: "VPN ticket surge expected".to_string(),
            reasons: vec![
                "Gateway certificate rotation lands that morning".to_string(),
                "Previous rotations produced a 3x spike in VPN tickets".to_string(),
            ],
            confidence: Confidence::Medium,
            impact: Impact::High,
            suggested_actions: vec![
                "Publish a self-service reconnect guide before the rotation".to_string(),
                "Put the Network team on an early shift".to_string(),
            ],
        },
    );

    anomalies
}

/// Seed the live-activity feed so a demo deployment does not start blank
pub fn seed_live_events(log: &LiveEventLog) {
    let seeds = [
        (
            LiveEventKind::System,
            "Helpdesk console connected to ticket store",
        ),
        (
            LiveEventKind::TicketCreated,
            "New incident: VPN connection dropping for remote users",
        ),
        (
            LiveEventKind::TicketUpdated,
            "Access request for Okta admin role moved to IAM queue",
        ),
        (
            LiveEventKind::SlaBreached,
            "High-priority incident exceeded its 24h resolution window",
        ),
    ];

    for (kind, message) in seeds {
        log.record(kind, message, None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_anomalies_cover_both_kinds() {
        let anomalies = demo_forecast_anomalies();
        assert_eq!(anomalies.len(), 2);
        assert_eq!(anomalies.get(&1).map(|a| a.kind), Some(AnomalyKind::Detected));
        assert_eq!(
            anomalies.get(&3).map(|a| a.kind),
            Some(AnomalyKind::Forecasted)
        );
    }

    #[test]
    fn test_seeding_populates_the_feed() {
        let log = LiveEventLog::new(100);
        seed_live_events(&log);
        assert_eq!(log.recent(10).len(), 4);
    }
}
