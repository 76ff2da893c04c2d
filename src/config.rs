// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Client configuration loaded from environment variables.
//!
//! A `.env` file in the working directory is honored for local development.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::services::gateway::HeaderPolicy;

/// Default API server when `JUNKSTOP_API_URL` is unset.
pub const DEFAULT_API_URL: &str = "http://localhost:5000";

/// Client configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL every request path is appended to (no trailing slash)
    pub api_base_url: String,
    /// Credential file location; `None` uses the platform data directory
    pub storage_path: Option<PathBuf>,
    /// Per-request timeout; `None` waits indefinitely
    pub http_timeout: Option<Duration>,
    /// Whether caller headers may replace the bearer header
    pub header_policy: HeaderPolicy,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_string(),
            storage_path: None,
            http_timeout: None,
            header_policy: HeaderPolicy::default(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let http_timeout = match env::var("JUNKSTOP_HTTP_TIMEOUT_SECS") {
            Ok(raw) => {
                let secs: u64 = raw
                    .trim()
                    .parse()
                    .map_err(|_| ConfigError::Invalid("JUNKSTOP_HTTP_TIMEOUT_SECS", raw.clone()))?;
                Some(Duration::from_secs(secs))
            }
            Err(_) => None,
        };

        let header_policy = match env::var("JUNKSTOP_HEADER_POLICY") {
            Ok(raw) => raw
                .parse()
                .map_err(|_| ConfigError::Invalid("JUNKSTOP_HEADER_POLICY", raw.clone()))?,
            Err(_) => HeaderPolicy::default(),
        };

        Ok(Self {
            api_base_url: env::var("JUNKSTOP_API_URL")
                .map(|v| v.trim().trim_end_matches('/').to_string())
                .unwrap_or_else(|_| DEFAULT_API_URL.to_string()),
            storage_path: env::var("JUNKSTOP_STORAGE_PATH").ok().map(PathBuf::from),
            http_timeout,
            header_policy,
        })
    }

    /// Config pointing at a specific server, everything else default.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            api_base_url: base_url.into(),
            ..Self::default()
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}: {1:?}")]
    Invalid(&'static str, String),

    #[error("No data directory available for credential storage")]
    NoDataDir,
}
