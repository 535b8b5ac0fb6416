//! Configuration module for Syllabus.
//!
//! Loads configuration from environment variables (and `.env`, if present).
//! Values are read once at process start and never reloaded.

use std::env;
use std::time::Duration;

use thiserror::Error;
use tracing::warn;

/// Default lifetime of a cached resource list.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(5 * 60);

/// Default interval between expiry sweeps.
pub const DEFAULT_CACHE_SWEEP: Duration = Duration::from_secs(10 * 60);

/// Configuration errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{key} must be a positive number of seconds, got {value:?}")]
    InvalidDuration { key: &'static str, value: String },
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    // Remote datastore
    pub db_service_endpoint: String,
    pub db_service_token: String,

    // Cache
    pub cache_ttl: Duration,
    pub cache_sweep_interval: Duration,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let db_service_endpoint = lookup("DB_SERVICE_ENDPOINT")
            .filter(|s| !s.trim().is_empty())
            .ok_or(ConfigError::Missing("DB_SERVICE_ENDPOINT"))?;

        let db_service_token = lookup("DB_SERVICE_TOKEN").unwrap_or_default();
        if db_service_token.is_empty() {
            warn!("DB_SERVICE_TOKEN is empty, requests will carry an empty bearer token");
        }

        Ok(Self {
            db_service_endpoint,
            db_service_token,
            cache_ttl: duration_secs(&lookup, "CACHE_TTL_SECS", DEFAULT_CACHE_TTL)?,
            cache_sweep_interval: duration_secs(&lookup, "CACHE_SWEEP_SECS", DEFAULT_CACHE_SWEEP)?,
        })
    }
}

fn duration_secs<F>(lookup: &F, key: &'static str, default: Duration) -> Result<Duration, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(key) else {
        return Ok(default);
    };

    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(ConfigError::InvalidDuration { key, value: raw }),
    }
}
