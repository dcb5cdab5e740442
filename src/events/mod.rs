//! Bounded in-process live-event and audit logs
//!
//! Append-only services with a fixed capacity; the oldest entries fall
//! off once the cap is reached. State is process-lifetime only and resets
//! on restart — these feed the activity/audit UI, they are not a durable
//! record. The lists are shared across request handlers, so they sit
//! behind an `RwLock`.

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::Serialize;
use std::collections::VecDeque;
use strum::Display;

/// Default capacity of the live-activity feed
pub const DEFAULT_LIVE_CAPACITY: usize = 100;

/// Default capacity of the audit log
pub const DEFAULT_AUDIT_CAPACITY: usize = 500;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum LiveEventKind {
    TicketCreated,
    TicketUpdated,
    TicketDeleted,
    SlaBreached,
    System,
}

/// One entry in the live-activity feed
#[derive(Debug, Clone, Serialize)]
pub struct LiveEvent {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub kind: LiveEventKind,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ticket_id: Option<String>,
}

/// One entry in the admin audit log
#[derive(Debug, Clone, Serialize)]
pub struct AuditEntry {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub actor: String,
    pub action: String,
    pub details: serde_json::Value,
}

/// Bounded, newest-first live-event feed
pub struct LiveEventLog {
    entries: RwLock<VecDeque<LiveEvent>>,
    capacity: usize,
}

impl LiveEventLog {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: RwLock::new(VecDeque::with_capacity(capacity.min(1024))),
            capacity: capacity.max(1),
        }
    }

    /// Record an event, assigning its id and timestamp. The oldest entry
    /// is evicted once the log is at capacity.
    pub fn record(
        &self,
        kind: LiveEventKind,
        message: impl Into<String>,
        ticket_id: Option<String>,
    ) -> LiveEvent {
        let now = Utc::now();
        let event = LiveEvent {
            id: entry_id("event", now),
            timestamp: now,
            kind,
            message: message.into(),
            ticket_id,
        };

        let mut entries = self.entries.write();
        entries.push_front(event.clone());
        entries.truncate(self.capacity);
        event
    }

    /// The newest `n` events, newest first
    pub fn recent(&self, n: usize) -> Vec<LiveEvent> {
        self.entries.read().iter().take(n).cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

impl Default for LiveEventLog {
    fn default() -> Self {
        Self::new(DEFAULT_LIVE_CAPACITY)
    }
}

/// Bounded, newest-first audit log of admin actions
pub struct AuditLog {
    entries: RwLock<VecDeque<AuditEntry>>,
    capacity: usize,
}

impl AuditLog {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: RwLock::new(VecDeque::with_capacity(capacity.min(1024))),
            capacity: capacity.max(1),
        }
    }

    pub fn record(
        &self,
        actor: impl Into<String>,
        action: impl Into<String>,
        details: serde_json::Value,
    ) -> AuditEntry {
        let now = Utc::now();
        let entry = AuditEntry {
            id: entry_id("audit", now),
            timestamp: now,
            actor: actor.into(),
            action: action.into(),
            details,
        };

        let mut entries = self.entries.write();
        entries.push_front(entry.clone());
        entries.truncate(self.capacity);
        entry
    }

    pub fn recent(&self, n: usize) -> Vec<AuditEntry> {
        self.entries.read().iter().take(n).cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

impl Default for AuditLog {
    fn default() -> Self {
        Self::new(DEFAULT_AUDIT_CAPACITY)
    }
}

fn entry_id(prefix: &str, now: DateTime<Utc>) -> String {
    format!(
        "{}-{}-{}",
        prefix,
        now.timestamp_millis(),
        crate::models::ticket::random_suffix(4)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_live_log_caps_and_orders_newest_first() {
        let log = LiveEventLog::new(3);
        for i in 0..5 {
            log.record(LiveEventKind::System, format!("event {}", i), None);
        }

        let recent = log.recent(10);
        assert_eq!(recent.len(), 3);
        assert_eq!(recent[0].message, "event 4");
        assert_eq!(recent[2].message, "event 2");
    }

    #[test]
    fn test_event_id_format() {
        let log = LiveEventLog::default();
        let event = log.record(LiveEventKind::TicketCreated, "created", None);
        assert!(event.id.starts_with("event-"));
        assert_eq!(event.id.split('-').count(), 3);
    }

    #[test]
    fn test_audit_log_records_details() {
        let log = AuditLog::new(2);
        log.record("admin@corp", "ticket.delete", json!({"ticket_id": "TKT-1"}));
        log.record("admin@corp", "config.update", json!({"section": "sla"}));
        log.record("admin@corp", "ticket.delete", json!({"ticket_id": "TKT-2"}));

        let recent = log.recent(10);
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].action, "ticket.delete");
        assert!(recent[0].id.starts_with("audit-"));
        // oldest entry evicted
        assert!(recent
            .iter()
            .all(|e| e.details != json!({"ticket_id": "TKT-1"})));
    }

    #[test]
    fn test_recent_takes_at_most_n() {
        let log = LiveEventLog::default();
        for i in 0..10 {
            log.record(LiveEventKind::System, format!("event {}", i), None);
        }
        assert_eq!(log.recent(4).len(), 4);
        assert_eq!(log.len(), 10);
    }
}
