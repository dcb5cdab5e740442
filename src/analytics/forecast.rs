//! Daily predicted-volume series with anomaly injection
//!
//! Presentation data for the dashboard, not a statistical model: points
//! sit around a constant baseline with deterministic seeded jitter, and
//! anomaly templates are attached at caller-chosen day offsets.

use crate::analytics::error::{AnalyticsError, AnalyticsResult};
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::HashMap;

/// Longest horizon the dashboard will ask for
const MAX_HORIZON_DAYS: u32 = 90;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AnomalyKind {
    /// Predicted to happen at the attached day
    Forecasted,
    /// Already visible in current data
    Detected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Confidence {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Impact {
    Low,
    Medium,
    High,
}

/// An anomaly attached to one forecast day
#[derive(Debug, Clone, Serialize)]
pub struct ForecastAnomaly {
    pub kind: AnomalyKind,
    pub headline: String,
    pub reasons: Vec<String>,
    pub confidence: Confidence,
    pub impact: Impact,
    pub suggested_actions: Vec<String>,
}

/// One day of the forecast series
#[derive(Debug, Clone, Serialize)]
pub struct ForecastPoint {
    pub day: NaiveDate,
    pub predicted_volume: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub anomaly: Option<ForecastAnomaly>,
}

/// Generate `horizon_days` daily points starting the day after `from`,
/// each `baseline` plus seeded jitter. `anomalies` maps a days-out offset
/// (1 = tomorrow) to the anomaly to attach there.
pub fn forecast_series(
    from: NaiveDate,
    baseline: u32,
    horizon_days: u32,
    seed: u64,
    anomalies: HashMap<u32, ForecastAnomaly>,
) -> AnalyticsResult<Vec<ForecastPoint>> {
    if horizon_days == 0 || horizon_days > MAX_HORIZON_DAYS {
        return Err(AnalyticsError::InvalidParameter(format!(
            "forecast horizon must be between 1 and {} days",
            MAX_HORIZON_DAYS
        )));
    }

    let span = (baseline / 5).max(1) as i64;
    let mut state = seed.wrapping_add(0x9e3779b97f4a7c15);
    let mut points = Vec::with_capacity(horizon_days as usize);

    for days_out in 1..=horizon_days {
        state = next_state(state);
        let jitter = (state >> 33) as i64 % (2 * span + 1) - span;
        let predicted_volume = (baseline as i64 + jitter).max(0) as u32;

        points.push(ForecastPoint {
            day: from + chrono::Duration::days(days_out as i64),
            predicted_volume,
            anomaly: anomalies.get(&days_out).cloned(),
        });
    }

    Ok(points)
}

// splitmix-style step; deterministic so the same seed replays the same series
fn next_state(state: u64) -> u64 {
    let mut z = state.wrapping_add(0x9e3779b97f4a7c15);
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58476d1ce4e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d049bb133111eb);
    z ^ (z >> 31)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::sample;

    fn monday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 2).unwrap()
    }

    #[test]
    fn test_series_is_deterministic_for_a_seed() {
        let a = forecast_series(monday(), 12, 14, 42, HashMap::new()).unwrap();
        let b = forecast_series(monday(), 12, 14, 42, HashMap::new()).unwrap();

        assert_eq!(a.len(), 14);
        for (left, right) in a.iter().zip(&b) {
            assert_eq!(left.day, right.day);
            assert_eq!(left.predicted_volume, right.predicted_volume);
        }
    }

    #[test]
    fn test_jitter_stays_near_baseline() {
        let points = forecast_series(monday(), 20, 30, 7, HashMap::new()).unwrap();
        for point in &points {
            assert!(point.predicted_volume >= 16 && point.predicted_volume <= 24);
        }
    }

    #[test]
    fn test_anomalies_attach_at_requested_offsets() {
        let points =
            forecast_series(monday(), 12, 7, 1, sample::demo_forecast_anomalies()).unwrap();

        let detected = &points[0]; // 1 day out
        let forecasted = &points[2]; // 3 days out

        assert_eq!(
            detected.anomaly.as_ref().map(|a| a.kind),
            Some(AnomalyKind::Detected)
        );
        assert_eq!(
            forecasted.anomaly.as_ref().map(|a| a.kind),
            Some(AnomalyKind::Forecasted)
        );
        assert!(points[4].anomaly.is_none());
    }

    #[test]
    fn test_horizon_bounds() {
        assert!(forecast_series(monday(), 12, 0, 1, HashMap::new()).is_err());
        assert!(forecast_series(monday(), 12, 91, 1, HashMap::new()).is_err());
    }
}
