//! Access-request approval analytics
//!
//! Derived views over `access_request` tickets: the pending-approval
//! queue, per-approver performance, per-application volume, and
//! rule-based insights with suggested actions.

use crate::analytics::{round2, sla};
use crate::models::{Ticket, TicketType};
use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use std::collections::HashMap;

/// Default approval SLA for access requests
pub const APPROVAL_SLA_HOURS: i64 = 24;

/// Overdue by more than this counts as breached
pub const BREACH_OVERDUE_HOURS: i64 = 48;

/// Insight threshold: a slowest approver averaging above this is called out
const SLOW_APPROVER_HOURS: f64 = 48.0;

/// Insight threshold: application request volume above this is called out
const HIGH_VOLUME_REQUESTS: usize = 15;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ApprovalState {
    Pending,
    Overdue,
    Breached,
}

/// One row of the pending-approval queue
#[derive(Debug, Clone, Serialize)]
pub struct PendingApproval {
    pub ticket_id: String,
    pub requester: String,
    pub application: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub approver: Option<String>,
    pub created_at: DateTime<Utc>,
    pub due_at: DateTime<Utc>,
    /// Negative once the approval is overdue
    pub hours_remaining: f64,
    pub state: ApprovalState,
}

/// Aggregate performance of one approver
#[derive(Debug, Clone, Serialize)]
pub struct ApproverPerformance {
    pub approver: String,
    pub handled: usize,
    pub avg_approval_hours: Option<f64>,
    pub overdue: usize,
    pub overdue_pct: Option<f64>,
}

/// Request volume and SLA rollup for one application
#[derive(Debug, Clone, Serialize)]
pub struct ApplicationVolume {
    pub application: String,
    pub requests: usize,
    pub pending: usize,
    pub sla_compliance_pct: Option<f64>,
}

/// A rule-based insight with its suggested action
#[derive(Debug, Clone, Serialize)]
pub struct AccessInsight {
    pub headline: String,
    pub suggested_action: String,
}

/// The full access-request analytics bundle
#[derive(Debug, Clone, Serialize)]
pub struct AccessRequestAnalytics {
    pub pending: Vec<PendingApproval>,
    pub approvers: Vec<ApproverPerformance>,
    pub applications: Vec<ApplicationVolume>,
    pub insights: Vec<AccessInsight>,
}

/// Build the bundle from the full ticket collection. Only
/// `access_request` tickets participate.
pub fn access_request_analytics(tickets: &[Ticket], now: DateTime<Utc>) -> AccessRequestAnalytics {
    let requests: Vec<&Ticket> = tickets
        .iter()
        .filter(|t| t.ticket_type == TicketType::AccessRequest)
        .collect();

    let pending = pending_approvals(&requests, now);
    let approvers = approver_performance(&requests);
    let applications = application_volume(&requests, now);
    let insights = build_insights(&pending, &approvers, &applications);

    AccessRequestAnalytics {
        pending,
        approvers,
        applications,
        insights,
    }
}

fn pending_approvals(requests: &[&Ticket], now: DateTime<Utc>) -> Vec<PendingApproval> {
    let mut rows: Vec<PendingApproval> = requests
        .iter()
        .filter(|t| !t.is_resolved())
        .map(|ticket| {
            let due_at = ticket.created_at + Duration::hours(APPROVAL_SLA_HOURS);
            let remaining = due_at - now;
            let hours_remaining = round2(remaining.num_seconds() as f64 / 3600.0);

            let state = if now <= due_at {
                ApprovalState::Pending
            } else if now - due_at > Duration::hours(BREACH_OVERDUE_HOURS) {
                ApprovalState::Breached
            } else {
                ApprovalState::Overdue
            };

            PendingApproval {
                ticket_id: ticket.id.clone(),
                requester: ticket.user_name.clone(),
                application: ticket.app_or_system.clone(),
                approver: ticket.assignee.clone(),
                created_at: ticket.created_at,
                due_at,
                hours_remaining,
                state,
            }
        })
        .collect();

    // most urgent first
    rows.sort_by(|a, b| {
        a.hours_remaining
            .partial_cmp(&b.hours_remaining)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    rows
}

fn approver_performance(requests: &[&Ticket]) -> Vec<ApproverPerformance> {
    let mut by_approver: HashMap<String, Vec<&Ticket>> = HashMap::new();
    for ticket in requests {
        if let Some(ref approver) = ticket.assignee {
            if ticket.is_resolved() && ticket.resolved_at.is_some() {
                by_approver.entry(approver.clone()).or_default().push(ticket);
            }
        }
    }

    let mut rows: Vec<ApproverPerformance> = by_approver
        .into_iter()
        .map(|(approver, handled)| {
            let owned: Vec<Ticket> = handled.iter().map(|t| (*t).clone()).collect();
            let overdue = handled
                .iter()
                .filter(|t| match t.resolved_at {
                    Some(resolved_at) => {
                        resolved_at > t.created_at + Duration::hours(APPROVAL_SLA_HOURS)
                    }
                    None => false,
                })
                .count();

            let overdue_pct = if handled.is_empty() {
                None
            } else {
                Some(round2(overdue as f64 / handled.len() as f64 * 100.0))
            };

            ApproverPerformance {
                approver,
                handled: handled.len(),
                avg_approval_hours: sla::mean_resolution_hours(&owned),
                overdue,
                overdue_pct,
            }
        })
        .collect();

    rows.sort_by(|a, b| b.handled.cmp(&a.handled).then_with(|| a.approver.cmp(&b.approver)));
    rows
}

fn application_volume(requests: &[&Ticket], _now: DateTime<Utc>) -> Vec<ApplicationVolume> {
    let mut by_app: HashMap<String, Vec<&Ticket>> = HashMap::new();
    for ticket in requests {
        by_app
            .entry(ticket.app_or_system.clone())
            .or_default()
            .push(ticket);
    }

    let mut rows: Vec<ApplicationVolume> = by_app
        .into_iter()
        .map(|(application, members)| {
            let pending = members.iter().filter(|t| !t.is_resolved()).count();

            let decided: Vec<&&Ticket> = members
                .iter()
                .filter(|t| t.is_resolved() && t.resolved_at.is_some())
                .collect();
            let sla_compliance_pct = if decided.is_empty() {
                None
            } else {
                let on_time = decided
                    .iter()
                    .filter(|t| {
                        t.resolved_at.map_or(false, |resolved_at| {
                            resolved_at <= t.created_at + Duration::hours(APPROVAL_SLA_HOURS)
                        })
                    })
                    .count();
                Some(round2(on_time as f64 / decided.len() as f64 * 100.0))
            };

            ApplicationVolume {
                application,
                requests: members.len(),
                pending,
                sla_compliance_pct,
            }
        })
        .collect();

    rows.sort_by(|a, b| {
        b.requests
            .cmp(&a.requests)
            .then_with(|| a.application.cmp(&b.application))
    });
    rows
}

fn build_insights(
    pending: &[PendingApproval],
    approvers: &[ApproverPerformance],
    applications: &[ApplicationVolume],
) -> Vec<AccessInsight> {
    let mut insights = Vec::new();

    let overdue = pending
        .iter()
        .filter(|p| p.state != ApprovalState::Pending)
        .count();
    let breached = pending
        .iter()
        .filter(|p| p.state == ApprovalState::Breached)
        .count();
    if overdue > 0 {
        let mut headline = format!("{} access approvals are past their SLA", overdue);
        if breached > 0 {
            headline.push_str(&format!(
                ", {} overdue by more than {}h",
                breached, BREACH_OVERDUE_HOURS
            ));
        }
        insights.push(AccessInsight {
            headline,
            suggested_action: "Escalate overdue approvals to the owning managers".to_string(),
        });
    }

    let slowest = approvers
        .iter()
        .filter_map(|a| a.avg_approval_hours.map(|avg| (a, avg)))
        .max_by(|(_, x), (_, y)| x.partial_cmp(y).unwrap_or(std::cmp::Ordering::Equal));
    if let Some((approver, avg)) = slowest {
        if avg > SLOW_APPROVER_HOURS {
            insights.push(AccessInsight {
                headline: format!(
                    "{} averages {:.1}h per approval, above the {}h target",
                    approver.approver, avg, SLOW_APPROVER_HOURS as i64
                ),
                suggested_action: "Rebalance approval routing or add a delegate approver"
                    .to_string(),
            });
        }
    }

    if let Some(top) = applications.first() {
        if top.requests > HIGH_VOLUME_REQUESTS {
            insights.push(AccessInsight {
                headline: format!(
                    "{} drove {} access requests this period",
                    top.application, top.requests
                ),
                suggested_action: "Consider an auto-approval rule for low-risk roles in this application"
                    .to_string(),
            });
        }
    }

    insights
}
