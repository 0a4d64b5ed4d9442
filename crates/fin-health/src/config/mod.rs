use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use crate::leads::ReviewPolicy;
use crate::scoring::{Benchmarks, ScoringVariant};

const DEFAULT_MAX_MONTHLY_INVESTMENT: f64 = 1_500.0;

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
    pub scoring: ScoringConfig,
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

        let variant = match env::var("APP_SCORING_VARIANT") {
            Ok(value) => ScoringVariant::parse(&value).ok_or(ConfigError::InvalidVariant(value))?,
            Err(_) => ScoringVariant::default(),
        };

        let benchmarks_path = env::var("APP_BENCHMARKS_PATH")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from);

        let max_monthly_investment = match env::var("APP_REVIEW_MAX_MONTHLY_INVESTMENT") {
            Ok(value) => parse_threshold(&value)?,
            Err(_) => DEFAULT_MAX_MONTHLY_INVESTMENT,
        };

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            scoring: ScoringConfig {
                variant,
                benchmarks_path,
                max_monthly_investment,
            },
        })
    }
}

fn parse_threshold(value: &str) -> Result<f64, ConfigError> {
    match value.trim().parse::<f64>() {
        Ok(parsed) if parsed.is_finite() && parsed > 0.0 => Ok(parsed),
        _ => Err(ConfigError::InvalidThreshold(value.to_string())),
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

/// Which rule set scores submissions and when advice is held for review.
#[derive(Debug, Clone)]
pub struct ScoringConfig {
    pub variant: ScoringVariant,
    /// JSON file overriding the built-in benchmark table.
    pub benchmarks_path: Option<PathBuf>,
    pub max_monthly_investment: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            variant: ScoringVariant::default(),
            benchmarks_path: None,
            max_monthly_investment: DEFAULT_MAX_MONTHLY_INVESTMENT,
        }
    }
}

impl ScoringConfig {
    pub fn benchmarks(&self) -> Result<Benchmarks, ConfigError> {
        let Some(path) = &self.benchmarks_path else {
            return Ok(Benchmarks::default());
        };

        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::BenchmarksIo {
            path: path.clone(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| ConfigError::BenchmarksFormat {
            path: path.clone(),
            source,
        })
    }

    pub fn review_policy(&self) -> ReviewPolicy {
        ReviewPolicy::new(self.max_monthly_investment)
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost {
        source: std::net::AddrParseError,
    },
    InvalidVariant(String),
    InvalidThreshold(String),
    BenchmarksIo {
        path: PathBuf,
        source: std::io::Error,
    },
    BenchmarksFormat {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidVariant(value) => write!(
                f,
                "APP_SCORING_VARIANT '{}' is not one of full, simple",
                value
            ),
            ConfigError::InvalidThreshold(value) => write!(
                f,
                "APP_REVIEW_MAX_MONTHLY_INVESTMENT '{}' must be a positive number",
                value
            ),
            ConfigError::BenchmarksIo { path, .. } => {
                write!(f, "could not read benchmarks file {}", path.display())
            }
            ConfigError::BenchmarksFormat { path, .. } => {
                write!(f, "benchmarks file {} is not valid JSON", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidPort
            | ConfigError::InvalidVariant(_)
            | ConfigError::InvalidThreshold(_) => None,
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::BenchmarksIo { source, .. } => Some(source),
            ConfigError::BenchmarksFormat { source, .. } => Some(source),
        }
    }
}
