pub mod handlers;
pub mod routes;

pub use routes::*;

use crate::config::Config;
use crate::events::{AuditLog, LiveEventLog};
use crate::store::SharedStore;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub store: SharedStore,
    pub live_events: Arc<LiveEventLog>,
    pub audit: Arc<AuditLog>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(
        store: SharedStore,
        live_events: Arc<LiveEventLog>,
        audit: Arc<AuditLog>,
        config: Arc<Config>,
    ) -> Self {
        Self {
            store,
            live_events,
            audit,
            config,
        }
    }
}
