use helpdesk_manager::{
    analytics::sample,
    api::{build_router, AppState},
    config::Config,
    events::{AuditLog, LiveEventLog},
    store::InMemoryStore,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "helpdesk_manager=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::load().unwrap_or_else(|e| {
        eprintln!("Failed to load configuration: {}", e);
        eprintln!("Using default configuration");
        Config::default()
    });

    tracing::info!("Starting Helpdesk Manager v{}", env!("CARGO_PKG_VERSION"));

    // Initialize the ticket store
    let store = Arc::new(InMemoryStore::new());
    tracing::info!("Ticket store initialized");

    // Initialize the bounded activity/audit feeds
    let live_events = Arc::new(LiveEventLog::new(config.events.live_capacity));
    let audit = Arc::new(AuditLog::new(config.events.audit_capacity));

    if config.demo.sample_data {
        sample::seed_live_events(&live_events);
        tracing::info!("Demo sample data enabled");
    }

    let addr = format!("{}:{}", config.server.host, config.server.http_port);
    let state = AppState::new(store, live_events, audit, Arc::new(config));
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("HTTP server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
