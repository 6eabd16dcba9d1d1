use serde::Deserialize;
use std::net::SocketAddr;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub security: SecurityConfig,
    #[serde(default)]
    pub tracking: TrackingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SecurityConfig {
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

/// Live-tracking runtime configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct TrackingConfig {
    /// Grace period after a perimeter exit before the automatic clock-out.
    #[serde(default = "default_grace_period")]
    pub grace_period_secs: u64,

    /// Samples with worse reported accuracy are still processed, but logged.
    #[serde(default = "default_accuracy_warn_threshold")]
    pub accuracy_warn_threshold_m: f64,

    /// Capacity of the per-session event broadcast channel.
    #[serde(default = "default_event_buffer")]
    pub event_buffer: usize,
}

// Default value functions
fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    8080
}
fn default_request_timeout() -> u64 {
    30
}
fn default_log_level() -> String {
    "info".to_string()
}
fn default_log_format() -> String {
    "json".to_string()
}
fn default_grace_period() -> u64 {
    60
}
fn default_accuracy_warn_threshold() -> f64 {
    50.0
}
fn default_event_buffer() -> usize {
    128
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            cors_origins: Vec::new(),
        }
    }
}

impl Default for TrackingConfig {
    fn default() -> Self {
        Self {
            grace_period_secs: default_grace_period(),
            accuracy_warn_threshold_m: default_accuracy_warn_threshold(),
            event_buffer: default_event_buffer(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            logging: LoggingConfig::default(),
            security: SecurityConfig::default(),
            tracking: TrackingConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from files and environment variables.
    ///
    /// Loading order (later sources override earlier):
    /// 1. config/default.toml - base configuration (optional)
    /// 2. config/local.toml - local overrides (optional, not in git)
    /// 3. Environment variables with WZ__ prefix
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(config::Environment::with_prefix("WZ").separator("__"))
            .build()?;

        config.try_deserialize()
    }

    /// Socket address the server binds to.
    pub fn socket_addr(&self) -> SocketAddr {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .unwrap_or_else(|_| SocketAddr::from(([0, 0, 0, 0], self.server.port)))
    }
}
