use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

use crate::advisor::BlendStrategy;

const DEFAULT_REMOTE_TIMEOUT_MS: u64 = 10_000;
const DEFAULT_BASE_WEIGHT: f64 = 0.5;

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub advisor: AdvisorConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            advisor: AdvisorConfig::from_env()?,
        })
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Scoring and recommendation source settings.
#[derive(Debug, Clone, PartialEq)]
pub struct AdvisorConfig {
    /// JSON catalog replacing the built-in country table.
    pub catalog_path: Option<PathBuf>,
    pub remote: Option<RemoteConfig>,
    pub blend: BlendStrategy,
}

impl AdvisorConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let catalog_path = non_empty_var("ADVISOR_CATALOG_PATH").map(PathBuf::from);

        let remote = match non_empty_var("ADVISOR_REMOTE_URL") {
            Some(url) => {
                let timeout_ms = match non_empty_var("ADVISOR_REMOTE_TIMEOUT_MS") {
                    Some(raw) => raw
                        .parse::<u64>()
                        .map_err(|_| ConfigError::InvalidRemoteTimeout)?,
                    None => DEFAULT_REMOTE_TIMEOUT_MS,
                };
                Some(RemoteConfig {
                    url,
                    api_key: non_empty_var("ADVISOR_REMOTE_API_KEY"),
                    timeout: Duration::from_millis(timeout_ms),
                })
            }
            None => None,
        };

        let base_weight = match non_empty_var("ADVISOR_BASE_WEIGHT") {
            Some(raw) => raw
                .parse::<f64>()
                .ok()
                .filter(|weight| (0.0..=1.0).contains(weight))
                .ok_or(ConfigError::InvalidBaseWeight)?,
            None => DEFAULT_BASE_WEIGHT,
        };

        let blend = match non_empty_var("ADVISOR_BLEND")
            .map(|raw| raw.to_ascii_lowercase())
            .as_deref()
        {
            None | Some("average") => BlendStrategy::Average { base_weight },
            Some("additive") => BlendStrategy::Additive,
            Some(other) => return Err(ConfigError::InvalidBlend(other.to_string())),
        };

        Ok(Self {
            catalog_path,
            remote,
            blend,
        })
    }
}

impl Default for AdvisorConfig {
    fn default() -> Self {
        Self {
            catalog_path: None,
            remote: None,
            blend: BlendStrategy::default(),
        }
    }
}

/// Endpoint of the optional remote recommendation function.
#[derive(Debug, Clone, PartialEq)]
pub struct RemoteConfig {
    pub url: String,
    pub api_key: Option<String>,
    pub timeout: Duration,
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidRemoteTimeout,
    InvalidBaseWeight,
    InvalidBlend(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidRemoteTimeout => {
                write!(f, "ADVISOR_REMOTE_TIMEOUT_MS must be a whole number of milliseconds")
            }
            ConfigError::InvalidBaseWeight => {
                write!(f, "ADVISOR_BASE_WEIGHT must be a number between 0 and 1")
            }
            ConfigError::InvalidBlend(value) => write!(
                f,
                "ADVISOR_BLEND must be 'average' or 'additive' (found '{value}')"
            ),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            _ => None,
        }
    }
}
