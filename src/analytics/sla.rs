//! Lifecycle-stage derivation and SLA calculators
//!
//! Pure functions over tickets. Tickets missing the timestamps a metric
//! needs are excluded rather than treated as errors; when every ticket is
//! excluded the metric is undefined and the functions return `None`.
//! `Some(0.0)` always means a real measurement.

use crate::analytics::round2;
use crate::models::{LifecycleStage, Ticket, TicketStatus};
use chrono::{DateTime, Utc};

/// Mean time to resolution in hours (MTTR) over tickets that carry a
/// `resolved_at`. `None` when no ticket qualifies.
pub fn mean_resolution_hours(tickets: &[Ticket]) -> Option<f64> {
    mean_hours(tickets.iter().filter_map(|ticket| {
        ticket
            .resolved_at
            .map(|resolved_at| resolved_at - ticket.created_at)
    }))
}

/// Mean time to first response in hours. `None` when no ticket carries a
/// `first_response_at`.
pub fn mean_first_response_hours(tickets: &[Ticket]) -> Option<f64> {
    mean_hours(tickets.iter().filter_map(|ticket| {
        ticket
            .first_response_at
            .map(|first_response_at| first_response_at - ticket.created_at)
    }))
}

fn mean_hours(durations: impl Iterator<Item = chrono::Duration>) -> Option<f64> {
    let mut total_seconds = 0i64;
    let mut count = 0usize;
    for duration in durations {
        total_seconds += duration.num_seconds();
        count += 1;
    }
    if count == 0 {
        return None;
    }
    Some(round2(total_seconds as f64 / count as f64 / 3600.0))
}

/// Whether a ticket has breached its SLA deadline.
///
/// Resolved/closed tickets breach iff `resolved_at` is strictly after
/// `sla_due_at` (resolution exactly at the deadline is compliant). Open
/// tickets breach once `now` passes the deadline. A ticket without an
/// `sla_due_at` is never breached.
pub fn is_breached(ticket: &Ticket, now: DateTime<Utc>) -> bool {
    let Some(due) = ticket.sla_due_at else {
        return false;
    };

    if ticket.is_resolved() {
        match ticket.resolved_at {
            Some(resolved_at) => resolved_at > due,
            None => false,
        }
    } else {
        now > due
    }
}

/// Percentage of resolved/closed tickets (that carry an `sla_due_at`)
/// whose effective resolution timestamp — `resolved_at`, falling back to
/// `updated_at` — is at or before the deadline. `None` when no ticket
/// qualifies: compliance is undefined, not zero.
pub fn sla_compliance(tickets: &[Ticket]) -> Option<f64> {
    let mut qualifying = 0usize;
    let mut compliant = 0usize;

    for ticket in tickets {
        if !ticket.is_resolved() {
            continue;
        }
        let Some(due) = ticket.sla_due_at else {
            continue;
        };
        qualifying += 1;
        let effective = ticket.resolved_at.unwrap_or(ticket.updated_at);
        if effective <= due {
            compliant += 1;
        }
    }

    if qualifying == 0 {
        return None;
    }
    Some(round2(compliant as f64 / qualifying as f64 * 100.0))
}

/// The funnel-reporting stage of a ticket: the explicit `lifecycle_stage`
/// when set, otherwise a fixed mapping from `status`. Triage and
/// waiting_for_user only arise when set explicitly.
pub fn lifecycle_stage(ticket: &Ticket) -> LifecycleStage {
    if let Some(stage) = ticket.lifecycle_stage {
        return stage;
    }
    match ticket.status {
        TicketStatus::Open => LifecycleStage::New,
        TicketStatus::InProgress => LifecycleStage::InProgress,
        TicketStatus::Resolved => LifecycleStage::Resolved,
        TicketStatus::Closed => LifecycleStage::Closed,
    }
}
