//! Configuration loaded from environment variables
//!
//! Store credentials are required; report limits fall back to the
//! operational defaults carried over from the original deployment.

use super::error::BaselineError;
use std::env;

/// Connection settings for the ZoneMinder event store.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub database: String,
}

impl StoreConfig {
    pub fn from_env() -> Result<Self, BaselineError> {
        Ok(Self {
            host: require_env("ZM_DB_HOST")?,
            port: env::var("ZM_DB_PORT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(3306),
            user: require_env("ZM_DB_USER")?,
            password: require_env("ZM_DB_PASS")?,
            database: env::var("ZM_DB_NAME").unwrap_or_else(|_| "zm".to_string()),
        })
    }
}

fn require_env(name: &str) -> Result<String, BaselineError> {
    env::var(name)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| BaselineError::Configuration(format!("{} must be set", name)))
}

/// Artifact caps and terminal preview sizes.
///
/// The caps are operational choices, not derived constants, so they stay
/// overridable from the environment.
#[derive(Debug, Clone, Copy)]
pub struct ReportLimits {
    pub zone_rows: usize,
    pub top_events: usize,
    pub zone_preview: usize,
    pub top_preview: usize,
}

impl Default for ReportLimits {
    fn default() -> Self {
        Self {
            zone_rows: 200,
            top_events: 30,
            zone_preview: 15,
            top_preview: 10,
        }
    }
}

impl ReportLimits {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            zone_rows: env_limit("BASELINE_ZONE_ROWS", defaults.zone_rows),
            top_events: env_limit("BASELINE_TOP_EVENTS", defaults.top_events),
            zone_preview: env_limit("BASELINE_ZONE_PREVIEW", defaults.zone_preview),
            top_preview: env_limit("BASELINE_TOP_PREVIEW", defaults.top_preview),
        }
    }
}

fn env_limit(name: &str, default: usize) -> usize {
    env::var(name)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_limits() {
        let limits = ReportLimits::default();
        assert_eq!(limits.zone_rows, 200);
        assert_eq!(limits.top_events, 30);
        assert_eq!(limits.zone_preview, 15);
        assert_eq!(limits.top_preview, 10);
    }
}
