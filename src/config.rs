use serde::{Deserialize, Serialize};

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server configuration
    pub server: ServerConfig,

    /// Analytics defaults
    #[serde(default)]
    pub analytics: AnalyticsSettings,

    /// Event/audit log capacities
    #[serde(default)]
    pub events: EventLogSettings,

    /// Demo configuration
    #[serde(default)]
    pub demo: DemoSettings,
}

impl Config {
    /// Load configuration from file and environment
    pub fn load() -> Result<Self, config::ConfigError> {
        let config_path =
            std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config/default.toml".to_string());

        config::Config::builder()
            // Start with default values
            .add_source(config::File::from_str(
                include_str!("../config/default.toml"),
                config::FileFormat::Toml,
            ))
            // Override with config file if it exists
            .add_source(config::File::with_name(&config_path).required(false))
            // Override with environment variables (prefix: HELPDESK_)
            .add_source(
                config::Environment::with_prefix("HELPDESK")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            analytics: AnalyticsSettings::default(),
            events: EventLogSettings::default(),
            demo: DemoSettings::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// HTTP server host
    #[serde(default = "default_host")]
    pub host: String,

    /// HTTP server port
    #[serde(default = "default_http_port")]
    pub http_port: u16,

    /// Request timeout (seconds)
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            http_port: default_http_port(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyticsSettings {
    /// Default KPI reporting window (days)
    #[serde(default = "default_kpi_window_days")]
    pub kpi_window_days: i64,

    /// Default top-issue list length
    #[serde(default = "default_top_issue_limit")]
    pub top_issue_limit: usize,

    /// Default forecast horizon (days)
    #[serde(default = "default_forecast_horizon")]
    pub forecast_horizon_days: u32,

    /// Constant forecast baseline (tickets per day)
    #[serde(default = "default_forecast_baseline")]
    pub forecast_baseline: u32,

    /// Seed for the forecast jitter, so a deployment replays the same series
    #[serde(default = "default_forecast_seed")]
    pub forecast_seed: u64,
}

impl Default for AnalyticsSettings {
    fn default() -> Self {
        Self {
            kpi_window_days: default_kpi_window_days(),
            top_issue_limit: default_top_issue_limit(),
            forecast_horizon_days: default_forecast_horizon(),
            forecast_baseline: default_forecast_baseline(),
            forecast_seed: default_forecast_seed(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventLogSettings {
    /// Live-activity feed capacity
    #[serde(default = "default_live_capacity")]
    pub live_capacity: usize,

    /// Audit log capacity
    #[serde(default = "default_audit_capacity")]
    pub audit_capacity: usize,
}

impl Default for EventLogSettings {
    fn default() -> Self {
        Self {
            live_capacity: default_live_capacity(),
            audit_capacity: default_audit_capacity(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DemoSettings {
    /// Seed sample data (demo roster, forecast anomalies, live-event
    /// seeds) at startup
    #[serde(default)]
    pub sample_data: bool,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_http_port() -> u16 {
    8080
}

fn default_request_timeout() -> u64 {
    30
}

fn default_kpi_window_days() -> i64 {
    7
}

fn default_top_issue_limit() -> usize {
    5
}

fn default_forecast_horizon() -> u32 {
    7
}

fn default_forecast_baseline() -> u32 {
    12
}

fn default_forecast_seed() -> u64 {
    20260101
}

fn default_live_capacity() -> usize {
    crate::events::DEFAULT_LIVE_CAPACITY
}

fn default_audit_capacity() -> usize {
    crate::events::DEFAULT_AUDIT_CAPACITY
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.server.http_port, 8080);
        assert_eq!(config.analytics.kpi_window_days, 7);
        assert_eq!(config.events.live_capacity, 100);
        assert_eq!(config.events.audit_capacity, 500);
        assert!(!config.demo.sample_data);
    }

    #[test]
    fn test_embedded_defaults_parse() {
        let parsed: Config = toml::from_str(include_str!("../config/default.toml"))
            .expect("embedded default.toml must deserialize");
        assert_eq!(parsed.server.host, "0.0.0.0");
    }
}
