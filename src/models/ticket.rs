use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use strum::{Display, EnumString};
use uuid::Uuid;
use validator::Validate;

/// Represents a helpdesk ticket
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ticket {
    /// Unique identifier (`TKT-<base36 millis>-<4 char suffix>`), immutable
    pub id: String,

    /// Owner scope for multi-tenant queries
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<String>,

    /// Ticket classification
    pub ticket_type: TicketType,

    /// Priority in effect; drives the SLA window at creation time only
    pub priority: Priority,

    /// Team the ticket was routed to
    pub suggested_team: Team,

    /// Current status
    pub status: TicketStatus,

    /// Optional funnel-reporting refinement of `status`; when unset the
    /// stage is derived from `status` (triage / waiting_for_user only
    /// exist when set explicitly)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lifecycle_stage: Option<LifecycleStage>,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last update timestamp, bumped on every mutation
    pub updated_at: DateTime<Utc>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_response_at: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolved_at: Option<DateTime<Utc>>,

    /// Resolution deadline, frozen at creation from the priority then in
    /// effect; later priority changes do not recompute it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sla_due_at: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub sla_breached_at: Option<DateTime<Utc>>,

    /// Human-readable title
    pub title: String,

    /// Detailed description
    pub description: String,

    /// Reporting user
    pub user_name: String,

    /// Affected application or system
    pub app_or_system: String,

    /// Free-form details gathered during intake
    #[serde(default)]
    pub collected_details: HashMap<String, String>,

    /// Integration name -> external ticket id
    #[serde(default)]
    pub external_ids: HashMap<String, String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee: Option<String>,

    /// Where the ticket came from
    pub source: TicketSource,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub asset_id: Option<String>,

    /// How many times the ticket was reopened
    #[serde(default)]
    pub reopened_count: u32,

    /// Binary satisfaction score (0 or 1), set after resolution
    #[serde(skip_serializing_if = "Option::is_none")]
    pub csat_score: Option<u8>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub csat_comment: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub csat_submitted_at: Option<DateTime<Utc>>,
}

impl Ticket {
    /// Create a new ticket from a creation request, applying defaults and
    /// computing the SLA deadline from the priority in effect right now
    pub fn new(request: NewTicket) -> Self {
        let now = Utc::now();
        let priority = request.priority.unwrap_or(Priority::Medium);

        Self {
            id: generate_ticket_id(now),
            owner_id: request.owner_id,
            ticket_type: request.ticket_type,
            priority,
            suggested_team: request.suggested_team.unwrap_or(Team::ApplicationSupport),
            status: TicketStatus::Open,
            lifecycle_stage: Some(LifecycleStage::New),
            created_at: now,
            updated_at: now,
            first_response_at: None,
            resolved_at: None,
            sla_due_at: Some(now + priority.sla_window()),
            sla_breached_at: None,
            title: request.title,
            description: request.description,
            user_name: request.user_name.unwrap_or_else(|| "unknown".to_string()),
            app_or_system: request
                .app_or_system
                .unwrap_or_else(|| "general".to_string()),
            collected_details: request.collected_details.unwrap_or_default(),
            external_ids: HashMap::new(),
            assignee: request.assignee,
            source: request.source.unwrap_or(TicketSource::Manual),
            asset_id: request.asset_id,
            reopened_count: 0,
            csat_score: None,
            csat_comment: None,
            csat_submitted_at: None,
        }
    }

    /// Check if the ticket is still in a working state
    pub fn is_open(&self) -> bool {
        matches!(self.status, TicketStatus::Open | TicketStatus::InProgress)
    }

    /// Check if the ticket reached a terminal status
    pub fn is_resolved(&self) -> bool {
        matches!(self.status, TicketStatus::Resolved | TicketStatus::Closed)
    }

    /// Apply a partial patch onto this ticket. Absent fields are left
    /// untouched, so a patch can never clear `resolved_at` by omission.
    /// `updated_at` is re-stamped unconditionally.
    pub fn apply_patch(&mut self, patch: TicketPatch) {
        if let Some(ticket_type) = patch.ticket_type {
            self.ticket_type = ticket_type;
        }
        if let Some(priority) = patch.priority {
            // sla_due_at intentionally stays frozen at its creation value
            self.priority = priority;
        }
        if let Some(team) = patch.suggested_team {
            self.suggested_team = team;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(stage) = patch.lifecycle_stage {
            self.lifecycle_stage = Some(stage);
        }
        if let Some(first_response_at) = patch.first_response_at {
            self.first_response_at = Some(first_response_at);
        }
        if let Some(resolved_at) = patch.resolved_at {
            self.resolved_at = Some(resolved_at);
        }
        if let Some(sla_breached_at) = patch.sla_breached_at {
            self.sla_breached_at = Some(sla_breached_at);
        }
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(user_name) = patch.user_name {
            self.user_name = user_name;
        }
        if let Some(app_or_system) = patch.app_or_system {
            self.app_or_system = app_or_system;
        }
        if let Some(details) = patch.collected_details {
            self.collected_details.extend(details);
        }
        if let Some(external_ids) = patch.external_ids {
            self.external_ids.extend(external_ids);
        }
        if let Some(assignee) = patch.assignee {
            self.assignee = Some(assignee);
        }
        if let Some(source) = patch.source {
            self.source = source;
        }
        if let Some(asset_id) = patch.asset_id {
            self.asset_id = Some(asset_id);
        }
        if let Some(reopened_count) = patch.reopened_count {
            self.reopened_count = reopened_count;
        }
        if let Some(csat_score) = patch.csat_score {
            self.csat_score = Some(csat_score.min(1));
        }
        if let Some(csat_comment) = patch.csat_comment {
            self.csat_comment = Some(csat_comment);
        }
        if let Some(csat_submitted_at) = patch.csat_submitted_at {
            self.csat_submitted_at = Some(csat_submitted_at);
        }

        self.updated_at = Utc::now();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum TicketType {
    Incident,
    AccessRequest,
    Request,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    /// Resolution SLA window granted at creation time
    pub fn sla_window(&self) -> Duration {
        match self {
            Priority::High => Duration::hours(24),
            Priority::Medium => Duration::hours(48),
            Priority::Low => Duration::hours(72),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum TicketStatus {
    Open,
    InProgress,
    Resolved,
    Closed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum LifecycleStage {
    New,
    Triage,
    InProgress,
    WaitingForUser,
    Resolved,
    Closed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, Display)]
pub enum Team {
    #[serde(rename = "Network")]
    #[strum(serialize = "Network")]
    Network,
    #[serde(rename = "Endpoint Support")]
    #[strum(serialize = "Endpoint Support")]
    EndpointSupport,
    #[serde(rename = "Application Support")]
    #[strum(serialize = "Application Support")]
    ApplicationSupport,
    #[serde(rename = "IAM")]
    #[strum(serialize = "IAM")]
    Iam,
    #[serde(rename = "Security")]
    #[strum(serialize = "Security")]
    Security,
    #[serde(rename = "DevOps")]
    #[strum(serialize = "DevOps")]
    DevOps,
}

impl Team {
    /// All routable teams, in reporting order
    pub const ALL: [Team; 6] = [
        Team::Network,
        Team::EndpointSupport,
        Team::ApplicationSupport,
        Team::Iam,
        Team::Security,
        Team::DevOps,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum TicketSource {
    Chat,
    Email,
    Integration,
    Manual,
}

/// Creation request. Only `ticket_type`, `title` and `description` are
/// required; everything else falls back to the documented defaults.
/// Enum membership is enforced at deserialization, not here.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewTicket {
    pub ticket_type: TicketType,
    #[validate(length(min = 1, max = 500))]
    pub title: String,
    #[validate(length(min = 1))]
    pub description: String,
    pub owner_id: Option<String>,
    pub priority: Option<Priority>,
    pub suggested_team: Option<Team>,
    pub user_name: Option<String>,
    pub app_or_system: Option<String>,
    pub collected_details: Option<HashMap<String, String>>,
    pub assignee: Option<String>,
    pub source: Option<TicketSource>,
    pub asset_id: Option<String>,
}

/// Partial update. `None` means "leave the stored value alone" — there is
/// deliberately no way to null out a timestamp that was already set.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TicketPatch {
    pub ticket_type: Option<TicketType>,
    pub priority: Option<Priority>,
    pub suggested_team: Option<Team>,
    pub status: Option<TicketStatus>,
    pub lifecycle_stage: Option<LifecycleStage>,
    pub first_response_at: Option<DateTime<Utc>>,
    pub resolved_at: Option<DateTime<Utc>>,
    pub sla_breached_at: Option<DateTime<Utc>>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub user_name: Option<String>,
    pub app_or_system: Option<String>,
    pub collected_details: Option<HashMap<String, String>>,
    pub external_ids: Option<HashMap<String, String>>,
    pub assignee: Option<String>,
    pub source: Option<TicketSource>,
    pub asset_id: Option<String>,
    pub reopened_count: Option<u32>,
    pub csat_score: Option<u8>,
    pub csat_comment: Option<String>,
    pub csat_submitted_at: Option<DateTime<Utc>>,
}

/// Generate a ticket id: `TKT-<base36 unix millis>-<4 char random suffix>`
pub fn generate_ticket_id(now: DateTime<Utc>) -> String {
    let millis = now.timestamp_millis().max(0) as u64;
    format!("TKT-{}-{}", to_base36(millis), random_suffix(4))
}

fn to_base36(mut value: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if value == 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while value > 0 {
        out.push(DIGITS[(value % 36) as usize]);
        value /= 36;
    }
    out.reverse();
    String::from_utf8(out).expect("base36 digits are ascii")
}

pub(crate) fn random_suffix(len: usize) -> String {
    Uuid::new_v4().simple().to_string()[..len].to_string()
}
