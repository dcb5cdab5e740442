use crate::error::Result;
use crate::models::{NewTicket, Ticket, TicketPatch, TicketStatus};
use crate::store::{StatusCounts, TicketFilter, TicketPage, TicketStore};
use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Arc;

/// In-memory ticket store (for the MVP deployment and testing)
#[derive(Clone)]
pub struct InMemoryStore {
    tickets: Arc<DashMap<String, Ticket>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            tickets: Arc::new(DashMap::new()),
        }
    }

    fn snapshot(&self, owner_id: Option<&str>) -> Vec<Ticket> {
        self.tickets
            .iter()
            .map(|entry| entry.value().clone())
            .filter(|ticket| match owner_id {
                Some(owner) => ticket.owner_id.as_deref() == Some(owner),
                None => true,
            })
            .collect()
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TicketStore for InMemoryStore {
    async fn create(&self, request: NewTicket) -> Result<Ticket> {
        let ticket = Ticket::new(request);
        self.tickets.insert(ticket.id.clone(), ticket.clone());
        tracing::debug!(ticket_id = %ticket.id, priority = %ticket.priority, "Ticket created");
        Ok(ticket)
    }

    async fn get(&self, id: &str) -> Result<Option<Ticket>> {
        Ok(self.tickets.get(id).map(|entry| entry.clone()))
    }

    async fn update(&self, id: &str, patch: TicketPatch) -> Result<Option<Ticket>> {
        let updated = match self.tickets.get_mut(id) {
            Some(mut entry) => {
                entry.apply_patch(patch);
                Some(entry.clone())
            }
            None => None,
        };

        match updated {
            Some(ticket) => {
                tracing::debug!(ticket_id = %id, "Ticket updated");
                Ok(Some(ticket))
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, id: &str) -> Result<bool> {
        let removed = self.tickets.remove(id).is_some();
        if removed {
            tracing::debug!(ticket_id = %id, "Ticket deleted");
        }
        Ok(removed)
    }

    async fn list(&self, filter: &TicketFilter) -> Result<TicketPage> {
        let mut tickets: Vec<Ticket> = self
            .tickets
            .iter()
            .map(|entry| entry.value().clone())
            .filter(|ticket| filter.matches(ticket))
            .collect();

        // Sort by creation time (newest first)
        tickets.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let total = tickets.len();
        let offset = filter.offset.unwrap_or(0);
        let limit = filter.limit.unwrap_or(TicketFilter::DEFAULT_LIMIT);

        let tickets = tickets.into_iter().skip(offset).take(limit).collect();

        Ok(TicketPage { tickets, total })
    }

    async fn search(&self, query: &str, owner_id: Option<&str>) -> Result<Vec<Ticket>> {
        let needle = query.to_lowercase();

        let mut tickets: Vec<Ticket> = self
            .snapshot(owner_id)
            .into_iter()
            .filter(|ticket| {
                ticket.title.to_lowercase().contains(&needle)
                    || ticket.description.to_lowercase().contains(&needle)
                    || ticket.user_name.to_lowercase().contains(&needle)
                    || ticket.app_or_system.to_lowercase().contains(&needle)
            })
            .collect();

        tickets.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(tickets)
    }

    async fn counts(&self, owner_id: Option<&str>) -> Result<StatusCounts> {
        let mut counts = StatusCounts::default();
        for ticket in self.snapshot(owner_id) {
            counts.total += 1;
            match ticket.status {
                TicketStatus::Open => counts.open += 1,
                TicketStatus::InProgress => counts.in_progress += 1,
                TicketStatus::Resolved => counts.resolved += 1,
                TicketStatus::Closed => counts.closed += 1,
            }
        }
        Ok(counts)
    }
}
