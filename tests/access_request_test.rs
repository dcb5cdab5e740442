//! Integration tests for access-request analytics and the activity feeds

use chrono::{Duration, Utc};
use helpdesk_manager::analytics::access::{self, ApprovalState};
use helpdesk_manager::analytics::{forecast, sample};
use helpdesk_manager::events::{AuditLog, LiveEventKind, LiveEventLog};
use helpdesk_manager::models::{NewTicket, Team, Ticket, TicketStatus, TicketType};
use serde_json::json;

fn access_request(app: &str, approver: Option<&str>, hours_ago: i64) -> Ticket {
    let mut ticket = Ticket::new(NewTicket {
        ticket_type: TicketType::AccessRequest,
        title: format!("Access to {}", app),
        description: "Role request".to_string(),
        owner_id: None,
        priority: None,
        suggested_team: Some(Team::Iam),
        user_name: Some("casey.morgan".to_string()),
        app_or_system: Some(app.to_string()),
        collected_details: None,
        assignee: approver.map(str::to_string),
        source: None,
        asset_id: None,
    });
    ticket.created_at = Utc::now() - Duration::hours(hours_ago);
    ticket.updated_at = ticket.created_at;
    ticket
}

fn approve_after(ticket: &mut Ticket, hours: i64) {
    ticket.status = TicketStatus::Resolved;
    ticket.resolved_at = Some(ticket.created_at + Duration::hours(hours));
}

#[test]
fn test_pending_queue_orders_most_urgent_first() {
    let tickets = vec![
        access_request("GitHub", None, 2),   // 22h remaining
        access_request("Okta", None, 30),    // 6h overdue
        access_request("Jira", None, 100),   // 76h overdue -> breached
    ];

    let bundle = access::access_request_analytics(&tickets, Utc::now());

    assert_eq!(bundle.pending.len(), 3);
    assert_eq!(bundle.pending[0].application, "Jira");
    assert_eq!(bundle.pending[0].state, ApprovalState::Breached);
    assert_eq!(bundle.pending[1].state, ApprovalState::Overdue);
    assert_eq!(bundle.pending[2].state, ApprovalState::Pending);
}

#[test]
fn test_resolved_requests_leave_the_queue() {
    let mut approved = access_request("GitHub", Some("maya.patel"), 50);
    approve_after(&mut approved, 8);

    let bundle = access::access_request_analytics(&[approved], Utc::now());

    assert!(bundle.pending.is_empty());
    assert_eq!(bundle.approvers.len(), 1);
    assert_eq!(bundle.approvers[0].avg_approval_hours, Some(8.0));
    assert_eq!(bundle.approvers[0].overdue, 0);
}

#[test]
fn test_slow_approver_insight() {
    // two approvals averaging 60h, well above the 48h target
    let mut a = access_request("Workday", Some("derek.chan"), 200);
    approve_after(&mut a, 50);
    let mut b = access_request("Workday", Some("derek.chan"), 200);
    approve_after(&mut b, 70);

    let bundle = access::access_request_analytics(&[a, b], Utc::now());

    assert!(bundle
        .insights
        .iter()
        .any(|i| i.headline.contains("derek.chan")));
}

#[test]
fn test_application_rollup_counts_pending_and_compliance() {
    let mut on_time = access_request("Salesforce", Some("lena.fischer"), 80);
    approve_after(&mut on_time, 20);
    let mut late = access_request("Salesforce", Some("lena.fischer"), 80);
    approve_after(&mut late, 30);
    let open = access_request("Salesforce", None, 3);

    let bundle = access::access_request_analytics(&[on_time, late, open], Utc::now());

    let app = &bundle.applications[0];
    assert_eq!(app.application, "Salesforce");
    assert_eq!(app.requests, 3);
    assert_eq!(app.pending, 1);
    assert_eq!(app.sla_compliance_pct, Some(50.0));
}

#[test]
fn test_forecast_attaches_demo_anomalies() {
    let points = forecast::forecast_series(
        Utc::now().date_naive(),
        12,
        7,
        20260101,
        sample::demo_forecast_anomalies(),
    )
    .unwrap();

    assert_eq!(points.len(), 7);
    assert!(points[0].anomaly.is_some()); // detected surge, 1 day out
    assert!(points[2].anomaly.is_some()); // forecasted surge, 3 days out
    assert_eq!(
        points.iter().filter(|p| p.anomaly.is_some()).count(),
        2,
        "only the two demo anomalies are injected"
    );
}

#[test]
fn test_live_feed_and_audit_log_are_bounded() {
    let live = LiveEventLog::new(100);
    let audit = AuditLog::new(500);

    for i in 0..120 {
        live.record(LiveEventKind::TicketCreated, format!("ticket {}", i), None);
    }
    for i in 0..510 {
        audit.record("admin", "ticket.delete", json!({ "n": i }));
    }

    assert_eq!(live.len(), 100);
    assert_eq!(audit.len(), 500);

    // newest first, oldest evicted
    let newest = &live.recent(1)[0];
    assert_eq!(newest.message, "ticket 119");
    assert_eq!(audit.recent(1)[0].details, json!({ "n": 509 }));
}

#[test]
fn test_sample_roster_is_only_a_default() {
    // demo roster feeds agent rows without leaking into the analytics:
    // an empty roster yields no rows at all
    let tickets: Vec<Ticket> = vec![access_request("GitHub", Some("maya.patel"), 2)];
    let rows = helpdesk_manager::analytics::team::agent_performance(&tickets, &[]);
    assert!(rows.is_empty());

    let roster = sample::agent_roster();
    let rows = helpdesk_manager::analytics::team::agent_performance(&tickets, &roster);
    assert_eq!(rows.len(), roster.len());
}
