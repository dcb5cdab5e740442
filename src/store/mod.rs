pub mod memory;

pub use memory::InMemoryStore;

use crate::error::Result;
use crate::models::{NewTicket, Priority, Team, Ticket, TicketPatch, TicketStatus, TicketType};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Trait for ticket storage operations.
///
/// Not-found is a sentinel (`None` / `false`), never an error; `Err` is
/// reserved for backing-store failures, which propagate unmodified.
#[async_trait]
pub trait TicketStore: Send + Sync {
    /// Create a ticket, assigning id, timestamps and the SLA deadline
    async fn create(&self, request: NewTicket) -> Result<Ticket>;

    /// Get a ticket by id
    async fn get(&self, id: &str) -> Result<Option<Ticket>>;

    /// Merge a partial patch onto a stored ticket, re-stamping `updated_at`.
    /// Returns `None` if the id is unknown.
    async fn update(&self, id: &str, patch: TicketPatch) -> Result<Option<Ticket>>;

    /// Delete a ticket. Returns `false` if the id is unknown.
    async fn delete(&self, id: &str) -> Result<bool>;

    /// List tickets with filtering and pagination, newest first
    async fn list(&self, filter: &TicketFilter) -> Result<TicketPage>;

    /// Case-insensitive substring search across title, description,
    /// user_name and app_or_system
    async fn search(&self, query: &str, owner_id: Option<&str>) -> Result<Vec<Ticket>>;

    /// Store-wide counts by status, scoped only by owner
    async fn counts(&self, owner_id: Option<&str>) -> Result<StatusCounts>;
}

/// Shared handle to a ticket store
pub type SharedStore = Arc<dyn TicketStore>;

/// Filter for querying tickets
#[derive(Debug, Clone, Default)]
pub struct TicketFilter {
    pub status: Option<TicketStatus>,
    pub priority: Option<Priority>,
    pub ticket_type: Option<TicketType>,
    pub suggested_team: Option<Team>,
    pub owner_id: Option<String>,
    pub offset: Option<usize>,
    pub limit: Option<usize>,
}

impl TicketFilter {
    pub const DEFAULT_LIMIT: usize = 50;

    /// Check a ticket against every exact-match criterion
    pub fn matches(&self, ticket: &Ticket) -> bool {
        if let Some(status) = self.status {
            if ticket.status != status {
                return false;
            }
        }
        if let Some(priority) = self.priority {
            if ticket.priority != priority {
                return false;
            }
        }
        if let Some(ticket_type) = self.ticket_type {
            if ticket.ticket_type != ticket_type {
                return false;
            }
        }
        if let Some(team) = self.suggested_team {
            if ticket.suggested_team != team {
                return false;
            }
        }
        if let Some(ref owner) = self.owner_id {
            if ticket.owner_id.as_deref() != Some(owner.as_str()) {
                return false;
            }
        }
        true
    }
}

/// One page of list results. `total` is the filtered count before
/// pagination was applied.
#[derive(Debug, Clone, Serialize)]
pub struct TicketPage {
    pub tickets: Vec<Ticket>,
    pub total: usize,
}

/// Aggregate ticket counts by status
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatusCounts {
    pub total: usize,
    pub open: usize,
    pub in_progress: usize,
    pub resolved: usize,
    pub closed: usize,
}
