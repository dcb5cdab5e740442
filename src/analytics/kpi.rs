//! Windowed KPI snapshots with previous-period deltas and daily trends

use crate::analytics::{round2, sla, ReportWindow};
use crate::models::{Ticket, TicketStatus};
use chrono::{Duration, NaiveDate};
use serde::Serialize;
use std::collections::HashMap;

/// Number of calendar days in the trend arrays
const TREND_DAYS: i64 = 7;

/// A counted KPI with its previous-window value and relative delta
#[derive(Debug, Clone, Serialize)]
pub struct KpiCount {
    pub current: u64,
    pub previous: u64,
    /// `(current - previous) / previous * 100`; a zero previous count
    /// yields +100 when the metric grew and 0 when it stayed flat
    pub delta_pct: Option<f64>,
}

impl KpiCount {
    fn new(current: u64, previous: u64) -> Self {
        Self {
            current,
            previous,
            delta_pct: count_delta(current, previous),
        }
    }
}

/// A measured KPI (hours or percentage). `None` means the metric was
/// undefined for that window, and an undefined comparison point makes the
/// delta undefined too — never "infinite growth".
#[derive(Debug, Clone, Serialize)]
pub struct KpiMetric {
    pub current: Option<f64>,
    pub previous: Option<f64>,
    pub delta_pct: Option<f64>,
}

impl KpiMetric {
    fn new(current: Option<f64>, previous: Option<f64>) -> Self {
        Self {
            current,
            previous,
            delta_pct: metric_delta(current, previous),
        }
    }
}

/// One day of a trend array
#[derive(Debug, Clone, Serialize)]
pub struct TrendPoint {
    pub day: NaiveDate,
    pub value: Option<f64>,
}

/// Seven-day daily trend arrays, one point per calendar day, computed by
/// the same formulas as the headline metrics restricted to that day
#[derive(Debug, Clone, Serialize)]
pub struct KpiTrends {
    pub created: Vec<TrendPoint>,
    pub mttr_hours: Vec<TrendPoint>,
    pub first_response_hours: Vec<TrendPoint>,
    pub sla_compliance_pct: Vec<TrendPoint>,
    pub csat_pct: Vec<TrendPoint>,
}

/// KPI snapshot for a reporting window and its immediately preceding
/// window of equal length
#[derive(Debug, Clone, Serialize)]
pub struct KpiSnapshot {
    pub window: ReportWindow,
    pub total: KpiCount,
    /// Counts keyed by status wire name
    pub by_status: HashMap<String, KpiCount>,
    pub mttr_hours: KpiMetric,
    pub first_response_hours: KpiMetric,
    pub sla_compliance_pct: KpiMetric,
    pub csat_pct: KpiMetric,
    pub trends: KpiTrends,
}

/// Build the KPI snapshot for `window` from the full ticket collection.
/// Tickets are bucketed by `created_at`.
pub fn kpi_snapshot(tickets: &[Ticket], window: &ReportWindow) -> KpiSnapshot {
    let previous_window = window.previous();

    let current: Vec<&Ticket> = tickets
        .iter()
        .filter(|t| window.contains(t.created_at))
        .collect();
    let previous: Vec<&Ticket> = tickets
        .iter()
        .filter(|t| previous_window.contains(t.created_at))
        .collect();

    let current_owned: Vec<Ticket> = current.iter().map(|t| (*t).clone()).collect();
    let previous_owned: Vec<Ticket> = previous.iter().map(|t| (*t).clone()).collect();

    let mut by_status = HashMap::new();
    for status in [
        TicketStatus::Open,
        TicketStatus::InProgress,
        TicketStatus::Resolved,
        TicketStatus::Closed,
    ] {
        let cur = current.iter().filter(|t| t.status == status).count() as u64;
        let prev = previous.iter().filter(|t| t.status == status).count() as u64;
        by_status.insert(status.to_string(), KpiCount::new(cur, prev));
    }

    KpiSnapshot {
        window: *window,
        total: KpiCount::new(current.len() as u64, previous.len() as u64),
        by_status,
        mttr_hours: KpiMetric::new(
            sla::mean_resolution_hours(&current_owned),
            sla::mean_resolution_hours(&previous_owned),
        ),
        first_response_hours: KpiMetric::new(
            sla::mean_first_response_hours(&current_owned),
            sla::mean_first_response_hours(&previous_owned),
        ),
        sla_compliance_pct: KpiMetric::new(
            sla::sla_compliance(&current_owned),
            sla::sla_compliance(&previous_owned),
        ),
        csat_pct: KpiMetric::new(
            csat_percentage(&current_owned),
            csat_percentage(&previous_owned),
        ),
        trends: daily_trends(tickets, window),
    }
}

/// Share of rated tickets scored 1, or `None` when nothing was rated
pub fn csat_percentage(tickets: &[Ticket]) -> Option<f64> {
    let rated: Vec<&Ticket> = tickets.iter().filter(|t| t.csat_score.is_some()).collect();
    if rated.is_empty() {
        return None;
    }
    let satisfied = rated.iter().filter(|t| t.csat_score == Some(1)).count();
    Some(round2(satisfied as f64 / rated.len() as f64 * 100.0))
}

/// Delta convention for counts: previous 0 means +100 on growth, 0 when flat
pub fn count_delta(current: u64, previous: u64) -> Option<f64> {
    if previous == 0 {
        return Some(if current > 0 { 100.0 } else { 0.0 });
    }
    Some(round2(
        (current as f64 - previous as f64) / previous as f64 * 100.0,
    ))
}

/// Delta convention for measured metrics: an undefined side makes the
/// comparison undefined
pub fn metric_delta(current: Option<f64>, previous: Option<f64>) -> Option<f64> {
    let (current, previous) = match (current, previous) {
        (Some(c), Some(p)) => (c, p),
        _ => return None,
    };
    if previous == 0.0 {
        return Some(if current > 0.0 { 100.0 } else { 0.0 });
    }
    Some(round2((current - previous) / previous * 100.0))
}

fn daily_trends(tickets: &[Ticket], window: &ReportWindow) -> KpiTrends {
    let last_day = window.end.date_naive();

    let mut created = Vec::with_capacity(TREND_DAYS as usize);
    let mut mttr_hours = Vec::with_capacity(TREND_DAYS as usize);
    let mut first_response_hours = Vec::with_capacity(TREND_DAYS as usize);
    let mut sla_compliance_pct = Vec::with_capacity(TREND_DAYS as usize);
    let mut csat_pct = Vec::with_capacity(TREND_DAYS as usize);

    for offset in (0..TREND_DAYS).rev() {
        let day = last_day - Duration::days(offset);
        let day_tickets: Vec<Ticket> = tickets
            .iter()
            .filter(|t| t.created_at.date_naive() == day)
            .cloned()
            .collect();

        created.push(TrendPoint {
            day,
            value: Some(day_tickets.len() as f64),
        });
        mttr_hours.push(TrendPoint {
            day,
            value: sla::mean_resolution_hours(&day_tickets),
        });
        first_response_hours.push(TrendPoint {
            day,
            value: sla::mean_first_response_hours(&day_tickets),
        });
        sla_compliance_pct.push(TrendPoint {
            day,
            value: sla::sla_compliance(&day_tickets),
        });
        csat_pct.push(TrendPoint {
            day,
            value: csat_percentage(&day_tickets),
        });
    }

    KpiTrends {
        created,
        mttr_hours,
        first_response_hours,
        sla_compliance_pct,
        csat_pct,
    }
}
