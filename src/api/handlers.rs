use crate::analytics::{access, forecast, funnel, issues, kpi, sample, team, ReportWindow};
use crate::api::AppState;
use crate::error::{AppError, Result};
use crate::events::{AuditEntry, LiveEvent, LiveEventKind};
use crate::models::*;
use crate::store::{StatusCounts, TicketFilter, TicketPage};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use validator::Validate;

/// Health check endpoint
pub async fn health_check() -> Result<Json<HealthResponse>> {
    Ok(Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    }))
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Create a ticket
pub async fn create_ticket(
    State(state): State<AppState>,
    Json(request): Json<NewTicket>,
) -> Result<(StatusCode, Json<Ticket>)> {
    request.validate()?;

    let ticket = state.store.create(request).await?;

    state.live_events.record(
        LiveEventKind::TicketCreated,
        format!("{}: {}", ticket.id, ticket.title),
        Some(ticket.id.clone()),
    );

    Ok((StatusCode::CREATED, Json(ticket)))
}

/// Get a ticket by id
pub async fn get_ticket(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Ticket>> {
    match state.store.get(&id).await? {
        Some(ticket) => Ok(Json(ticket)),
        None => Err(AppError::NotFound(format!("Ticket {} not found", id))),
    }
}

/// List tickets with filtering and pagination
pub async fn list_tickets(
    State(state): State<AppState>,
    Query(params): Query<ListTicketsQuery>,
) -> Result<Json<TicketPage>> {
    let filter = TicketFilter {
        status: params.status,
        priority: params.priority,
        ticket_type: params.ticket_type,
        suggested_team: params.suggested_team,
        owner_id: params.owner_id,
        offset: params.offset,
        limit: params.limit,
    };

    let page = state.store.list(&filter).await?;
    Ok(Json(page))
}

#[derive(Debug, Deserialize)]
pub struct ListTicketsQuery {
    pub status: Option<TicketStatus>,
    pub priority: Option<Priority>,
    pub ticket_type: Option<TicketType>,
    pub suggested_team: Option<Team>,
    pub owner_id: Option<String>,
    pub offset: Option<usize>,
    pub limit: Option<usize>,
}

/// Update a ticket with a partial patch
pub async fn update_ticket(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(patch): Json<TicketPatch>,
) -> Result<Json<Ticket>> {
    match state.store.update(&id, patch).await? {
        Some(ticket) => {
            state.live_events.record(
                LiveEventKind::TicketUpdated,
                format!("{}: {}", ticket.id, ticket.title),
                Some(ticket.id.clone()),
            );
            Ok(Json(ticket))
        }
        None => Err(AppError::NotFound(format!("Ticket {} not found", id))),
    }
}

/// Delete a ticket
pub async fn delete_ticket(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    if state.store.delete(&id).await? {
        state.live_events.record(
            LiveEventKind::TicketDeleted,
            format!("{} deleted", id),
            Some(id.clone()),
        );
        state
            .audit
            .record("api", "ticket.delete", json!({ "ticket_id": id }));
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!("Ticket {} not found", id)))
    }
}

/// Search tickets by substring
pub async fn search_tickets(
    State(state): State<AppState>,
    Query(params): Query<SearchQuery>,
) -> Result<Json<Vec<Ticket>>> {
    let tickets = state
        .store
        .search(&params.q, params.owner_id.as_deref())
        .await?;
    Ok(Json(tickets))
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub q: String,
    pub owner_id: Option<String>,
}

/// Store-wide counts by status
pub async fn ticket_counts(
    State(state): State<AppState>,
    Query(params): Query<OwnerQuery>,
) -> Result<Json<StatusCounts>> {
    let counts = state.store.counts(params.owner_id.as_deref()).await?;
    Ok(Json(counts))
}

#[derive(Debug, Deserialize)]
pub struct OwnerQuery {
    pub owner_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct WindowQuery {
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
    pub owner_id: Option<String>,
}

impl WindowQuery {
    fn window(&self, default_days: i64) -> Result<ReportWindow> {
        match (self.start, self.end) {
            (Some(start), Some(end)) => Ok(ReportWindow::new(start, end)?),
            _ => Ok(ReportWindow::last_days(default_days)),
        }
    }
}

/// KPI snapshot for the requested window (default: last 7 days)
pub async fn kpi_report(
    State(state): State<AppState>,
    Query(params): Query<WindowQuery>,
) -> Result<Json<kpi::KpiSnapshot>> {
    let window = params.window(state.config.analytics.kpi_window_days)?;
    let tickets = all_tickets(&state, params.owner_id).await?;
    Ok(Json(kpi::kpi_snapshot(&tickets, &window)))
}

/// SLA funnel by priority
pub async fn sla_funnel_report(
    State(state): State<AppState>,
    Query(params): Query<OwnerQuery>,
) -> Result<Json<Vec<funnel::SlaFunnelRow>>> {
    let tickets = all_tickets(&state, params.owner_id).await?;
    Ok(Json(funnel::sla_funnel(&tickets, Utc::now())))
}

/// Lifecycle-stage funnel
pub async fn lifecycle_funnel_report(
    State(state): State<AppState>,
    Query(params): Query<OwnerQuery>,
) -> Result<Json<Vec<funnel::LifecycleFunnelStage>>> {
    let tickets = all_tickets(&state, params.owner_id).await?;
    Ok(Json(funnel::lifecycle_funnel(&tickets)))
}

/// Recurring-issue clusters
pub async fn top_issues_report(
    State(state): State<AppState>,
    Query(params): Query<TopIssuesQuery>,
) -> Result<Json<Vec<issues::IssueCluster>>> {
    let limit = params
        .limit
        .unwrap_or(state.config.analytics.top_issue_limit);
    let tickets = all_tickets(&state, params.owner_id).await?;
    Ok(Json(issues::top_issues(&tickets, limit, Utc::now())))
}

#[derive(Debug, Deserialize)]
pub struct TopIssuesQuery {
    pub limit: Option<usize>,
    pub owner_id: Option<String>,
}

/// Team and agent performance
pub async fn team_performance_report(
    State(state): State<AppState>,
    Query(params): Query<OwnerQuery>,
) -> Result<Json<TeamPerformanceResponse>> {
    let tickets = all_tickets(&state, params.owner_id).await?;

    let roster = if state.config.demo.sample_data {
        sample::agent_roster()
    } else {
        team::observed_roster(&tickets)
    };

    Ok(Json(TeamPerformanceResponse {
        teams: team::team_performance(&tickets),
        agents: team::agent_performance(&tickets, &roster),
    }))
}

#[derive(Debug, Serialize)]
pub struct TeamPerformanceResponse {
    pub teams: Vec<team::TeamPerformance>,
    pub agents: Vec<team::AgentPerformance>,
}

/// Daily predicted-volume forecast
pub async fn forecast_report(
    State(state): State<AppState>,
    Query(params): Query<ForecastQuery>,
) -> Result<Json<Vec<forecast::ForecastPoint>>> {
    let settings = &state.config.analytics;
    let horizon = params.days.unwrap_or(settings.forecast_horizon_days);

    let anomalies = if state.config.demo.sample_data {
        sample::demo_forecast_anomalies()
    } else {
        Default::default()
    };

    let points = forecast::forecast_series(
        Utc::now().date_naive(),
        settings.forecast_baseline,
        horizon,
        settings.forecast_seed,
        anomalies,
    )?;
    Ok(Json(points))
}

#[derive(Debug, Deserialize)]
pub struct ForecastQuery {
    pub days: Option<u32>,
}

/// Access-request approval analytics
pub async fn access_request_report(
    State(state): State<AppState>,
    Query(params): Query<OwnerQuery>,
) -> Result<Json<access::AccessRequestAnalytics>> {
    let tickets = all_tickets(&state, params.owner_id).await?;
    Ok(Json(access::access_request_analytics(&tickets, Utc::now())))
}

/// Live-activity feed
pub async fn activity_feed(
    State(state): State<AppState>,
    Query(params): Query<FeedQuery>,
) -> Result<Json<Vec<LiveEvent>>> {
    Ok(Json(state.live_events.recent(params.limit.unwrap_or(50))))
}

/// Admin audit feed
pub async fn audit_feed(
    State(state): State<AppState>,
    Query(params): Query<FeedQuery>,
) -> Result<Json<Vec<AuditEntry>>> {
    Ok(Json(state.audit.recent(params.limit.unwrap_or(50))))
}

#[derive(Debug, Deserialize)]
pub struct FeedQuery {
    pub limit: Option<usize>,
}

/// Fetch the full (owner-scoped) ticket set for the aggregator. The
/// aggregation functions take materialized slices; they never query the
/// store themselves.
async fn all_tickets(state: &AppState, owner_id: Option<String>) -> Result<Vec<Ticket>> {
    let page = state
        .store
        .list(&TicketFilter {
            owner_id,
            limit: Some(usize::MAX),
            ..Default::default()
        })
        .await?;
    Ok(page.tickets)
}
