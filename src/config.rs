// SPDX-License-Identifier: MIT
// Copyright 2026 UASD Client Contributors

//! Client configuration loaded from environment variables.
//!
//! A `.env` file is honored for local development.

use std::env;
use std::path::PathBuf;

/// Default API host for the student services backend.
pub const DEFAULT_BASE_URL: &str = "https://uasdapi.ia3x.com";

const DEFAULT_SESSION_FILE: &str = ".uasd-session.json";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Client configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the REST API (no trailing slash)
    pub base_url: String,
    /// Where the file-backed session store keeps `authToken` / `userData`
    pub session_file: PathBuf,
    /// Per-request timeout
    pub request_timeout_secs: u64,
    /// Fixed token attached to registration calls, if configured.
    /// Kept only for parity with an older backend deployment.
    pub bootstrap_token: Option<String>,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            session_file: PathBuf::from(DEFAULT_SESSION_FILE),
            request_timeout_secs: 5,
            bootstrap_token: None,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let base_url = env::var("UASD_API_BASE_URL")
            .map(|v| v.trim().to_string())
            .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        Ok(Self {
            base_url: normalize_base_url(&base_url)?,
            session_file: env::var("UASD_SESSION_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_SESSION_FILE)),
            request_timeout_secs: env::var("UASD_REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|secs| *secs > 0)
                .unwrap_or(DEFAULT_TIMEOUT_SECS),
            bootstrap_token: env::var("UASD_BOOTSTRAP_TOKEN")
                .ok()
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty()),
        })
    }

    /// Config pointing at an arbitrary base URL (mock servers in tests).
    pub fn for_base_url(base_url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: normalize_base_url(base_url)?,
            ..Self::default()
        })
    }
}

/// Validate the scheme and strip trailing slashes.
fn normalize_base_url(raw: &str) -> Result<String, ConfigError> {
    if !(raw.starts_with("https://") || raw.starts_with("http://")) {
        return Err(ConfigError::Invalid {
            name: "UASD_API_BASE_URL",
            value: raw.to_string(),
        });
    }
    Ok(raw.trim_end_matches('/').to_string())
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {name}: {value}")]
    Invalid { name: &'static str, value: String },
}
