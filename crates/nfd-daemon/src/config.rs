//! Configuration for nfd-daemon

use serde::{Deserialize, Serialize};
use std::net::SocketAddr;

/// Main daemon configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DaemonConfig {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Service registry endpoint
    #[serde(default)]
    pub registry: EndpointConfig,

    /// Workflow-execution backend endpoint
    #[serde(default)]
    pub workflow: EndpointConfig,

    /// Completion poller tuning
    #[serde(default)]
    pub poller: PollerSettings,

    /// Path to the static locations table (JSON)
    #[serde(default)]
    pub locations_file: Option<String>,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Listen address
    pub listen_addr: SocketAddr,

    /// Enable CORS
    #[serde(default = "default_true")]
    pub enable_cors: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:8443".parse().unwrap(),
            enable_cors: true,
        }
    }
}

/// An outbound collaborator endpoint with optional basic auth
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EndpointConfig {
    /// Base URL
    #[serde(default)]
    pub url: String,

    /// Basic-auth user
    #[serde(default)]
    pub user: Option<String>,

    /// Basic-auth password
    #[serde(default)]
    pub password: Option<String>,
}

/// Completion poller tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollerSettings {
    /// Seconds between workflow status checks
    #[serde(default = "default_poll_interval")]
    pub interval_secs: u64,

    /// Maximum status checks before giving up
    #[serde(default = "default_poll_attempts")]
    pub max_attempts: u32,
}

impl Default for PollerSettings {
    fn default() -> Self {
        Self {
            interval_secs: default_poll_interval(),
            max_attempts: default_poll_attempts(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub level: String,

    /// JSON format
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

// Default value helpers
fn default_true() -> bool {
    true
}

fn default_poll_interval() -> u64 {
    15
}

fn default_poll_attempts() -> u32 {
    240
}

fn default_log_level() -> String {
    "info".to_string()
}

impl DaemonConfig {
    /// Load configuration: defaults, then an optional file, then
    /// `NFD_`-prefixed environment variables
    pub fn load(path: Option<&str>) -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder();

        builder = builder.add_source(config::Config::try_from(&DaemonConfig::default())?);

        if let Some(path) = path {
            builder = builder.add_source(config::File::with_name(path).required(false));
        }

        builder = builder.add_source(
            config::Environment::with_prefix("NFD")
                .separator("__")
                .try_parsing(true),
        );

        builder.build()?.try_deserialize()
    }

    /// Fail unless both collaborator URLs are set
    pub fn validate(&self) -> Result<(), String> {
        let mut missing = Vec::new();
        if self.registry.url.is_empty() {
            missing.push("registry.url");
        }
        if self.workflow.url.is_empty() {
            missing.push("workflow.url");
        }
        if missing.is_empty() {
            Ok(())
        } else {
            Err(format!(
                "Required configuration elements missing: {}",
                missing.join(",")
            ))
        }
    }
}
