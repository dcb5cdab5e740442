use crate::api::{handlers, AppState};
use axum::{
    routing::{delete, get, post, put},
    Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};

/// Build the main API router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health endpoints
        .route("/health", get(handlers::health_check))
        .route("/health/live", get(handlers::health_check))
        .route("/health/ready", get(handlers::health_check))
        // Ticket management
        .route("/v1/tickets", post(handlers::create_ticket))
        .route("/v1/tickets", get(handlers::list_tickets))
        .route("/v1/tickets/search", get(handlers::search_tickets))
        .route("/v1/tickets/counts", get(handlers::ticket_counts))
        .route("/v1/tickets/:id", get(handlers::get_ticket))
        .route("/v1/tickets/:id", put(handlers::update_ticket))
        .route("/v1/tickets/:id", delete(handlers::delete_ticket))
        // Analytics views
        .route("/v1/analytics/kpis", get(handlers::kpi_report))
        .route("/v1/analytics/sla-funnel", get(handlers::sla_funnel_report))
        .route(
            "/v1/analytics/lifecycle-funnel",
            get(handlers::lifecycle_funnel_report),
        )
        .route("/v1/analytics/top-issues", get(handlers::top_issues_report))
        .route("/v1/analytics/teams", get(handlers::team_performance_report))
        .route("/v1/analytics/forecast", get(handlers::forecast_report))
        .route(
            "/v1/analytics/access-requests",
            get(handlers::access_request_report),
        )
        // Activity feeds
        .route("/v1/events", get(handlers::activity_feed))
        .route("/v1/audit", get(handlers::audit_feed))
        // Add state
        .with_state(state)
        // Add middleware
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().include_headers(true))
                .on_response(DefaultOnResponse::new().include_headers(true)),
        )
        .layer(CorsLayer::permissive())
}
