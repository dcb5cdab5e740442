//! IT helpdesk ticket lifecycle, SLA tracking, and analytics service
//!
//! The core of the crate is three layers:
//!
//! - [`models`] — the ticket entity, its enumerations, and ID generation
//! - [`store`] — owner-scoped ticket CRUD/search behind the
//!   [`store::TicketStore`] trait, with an in-memory implementation
//! - [`analytics`] — pure derived-reporting functions: lifecycle/SLA
//!   calculators, KPI snapshots, funnels, issue clustering, team and
//!   access-request analytics, and a demo forecast series
//!
//! Around those sit the ambient pieces: [`events`] (bounded live-event
//! and audit feeds), [`api`] (the HTTP surface), [`config`] and
//! [`error`].
//!
//! # Example
//!
//! ```no_run
//! use helpdesk_manager::analytics::{kpi, ReportWindow};
//! use helpdesk_manager::models::{NewTicket, TicketType};
//! use helpdesk_manager::store::{InMemoryStore, TicketFilter, TicketStore};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = InMemoryStore::new();
//!
//!     store
//!         .create(NewTicket {
//!             ticket_type: TicketType::Incident,
//!             title: "VPN connection dropping".to_string(),
//!             description: "Drops every few minutes".to_string(),
//!             owner_id: None,
//!             priority: None,
//!             suggested_team: None,
//!             user_name: None,
//!             app_or_system: None,
//!             collected_details: None,
//!             assignee: None,
//!             source: None,
//!             asset_id: None,
//!         })
//!         .await?;
//!
//!     let page = store.list(&TicketFilter::default()).await?;
//!     let snapshot = kpi::kpi_snapshot(&page.tickets, &ReportWindow::default());
//!     println!("{} tickets this week", snapshot.total.current);
//!
//!     Ok(())
//! }
//! ```

pub mod analytics;
pub mod api;
pub mod config;
pub mod error;
pub mod events;
pub mod models;
pub mod store;
