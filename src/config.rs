//! Minimal runtime configuration helpers.

use std::time::Duration;

use crate::constants::{DEFAULT_BASE_URL, DEFAULT_THROTTLE_SECS};

#[derive(Debug, Clone)]
pub struct Config {
    pub username: String,
    pub password: String,
    /// Gateway API endpoint; override for test servers.
    pub base_url: String,
    /// Minimum spacing between device-list fetches; callers inside the
    /// window are served from the cached copy.
    pub throttle: Duration,
}

impl Config {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Config {
        Config {
            username: username.into(),
            password: password.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            throttle: Duration::from_secs(DEFAULT_THROTTLE_SECS),
        }
    }

    pub fn from_env() -> Result<Config, String> {
        let username = match std::env::var("COZYTOUCH_USERNAME") {
            Ok(v) if !v.trim().is_empty() => v,
            _ => return Err("Missing credentials: set COZYTOUCH_USERNAME".to_string()),
        };
        let password = match std::env::var("COZYTOUCH_PASSWORD") {
            Ok(v) if !v.trim().is_empty() => v,
            _ => return Err("Missing credentials: set COZYTOUCH_PASSWORD".to_string()),
        };

        let base_url = std::env::var("COZYTOUCH_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        let throttle_secs = std::env::var("COZYTOUCH_THROTTLE_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(DEFAULT_THROTTLE_SECS);

        Ok(Config {
            username,
            password,
            base_url,
            throttle: Duration::from_secs(throttle_secs),
        })
    }
}
