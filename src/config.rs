//! Configuration management for the duty list.
//!
//! Loads configuration from environment variables (and a `.env` file when
//! present). Only the listening port has a fallback; store parameters must
//! be supplied.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::db::RetryPolicy;
use crate::{Error, Result};

/// Port used when `PORT` is not set.
pub const DEFAULT_PORT: u16 = 8000;

/// How long browsers may cache preflight results, in seconds.
pub const CORS_MAX_AGE_SECS: u64 = 84600;

#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub bootstrap: RetryPolicy,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub cors_max_age: Duration,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub path: String,
    pub max_connections: u32,
}

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pretty" | "text" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            _ => Err(format!("Unknown log format: {}", s)),
        }
    }
}

/// Settings for the duty list client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Backend base URL, e.g. `http://localhost:8000`.
    pub base_url: String,
    pub timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut bootstrap = RetryPolicy::fixed(Duration::from_secs(parse_or(
            &lookup,
            "INIT_RETRY_DELAY_SECS",
            5u64,
        )?));
        if let Some(max) = parse_opt::<u32>(&lookup, "INIT_MAX_ATTEMPTS")? {
            bootstrap = bootstrap.with_max_attempts(max);
        }
        let multiplier = parse_or(&lookup, "INIT_BACKOFF_MULTIPLIER", 1.0f64)?;
        let max_delay = Duration::from_secs(parse_or(&lookup, "INIT_MAX_DELAY_SECS", 60u64)?);
        bootstrap = bootstrap.with_backoff(multiplier, max_delay);

        Ok(Self {
            server: ServerConfig {
                host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
                port: parse_or(&lookup, "PORT", DEFAULT_PORT)?,
                cors_max_age: Duration::from_secs(CORS_MAX_AGE_SECS),
            },
            database: DatabaseConfig {
                path: require(&lookup, "DATABASE_PATH")?,
                max_connections: parse_or(&lookup, "DATABASE_MAX_CONNECTIONS", 10u32)?,
            },
            bootstrap,
            logging: LoggingConfig {
                format: parse_or(&lookup, "LOG_FORMAT", LogFormat::default())?,
            },
        })
    }
}

impl ClientConfig {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        Ok(Self {
            base_url: require(&lookup, "API_BASE_URL")?,
            timeout: Duration::from_secs(parse_or(&lookup, "API_TIMEOUT_SECS", 30u64)?),
        })
    }

    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: Duration::from_secs(30),
        }
    }
}

fn require(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Result<String> {
    lookup(key)
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| Error::Config(format!("{} must be set", key)))
}

fn parse_opt<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e| Error::Config(format!("Invalid {}: {}", key, e))),
        _ => Ok(None),
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    Ok(parse_opt(lookup, key)?.unwrap_or(default))
}
