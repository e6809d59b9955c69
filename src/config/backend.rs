use crate::core::{AppError, Result};
use serde::Deserialize;
use std::env;
use std::time::Duration;

/// Connection settings for the Multi Stock Sync REST backend
#[derive(Debug, Clone, Deserialize)]
pub struct BackendConfig {
    pub base_url: String,
    /// Bearer token sent with every request, if set
    pub api_token: Option<String>,
    pub timeout_secs: u64,
}

impl BackendConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_token: None,
            timeout_secs: 30,
        }
    }

    pub fn from_env() -> Result<Self> {
        Ok(BackendConfig {
            base_url: env::var("BACKEND_BASE_URL")
                .map_err(|_| AppError::Configuration("BACKEND_BASE_URL not set".to_string()))?,
            api_token: env::var("BACKEND_API_TOKEN").ok().filter(|t| !t.is_empty()),
            timeout_secs: env::var("BACKEND_TIMEOUT_SECS")
                .unwrap_or_else(|_| "30".to_string())
                .parse()
                .map_err(|_| {
                    AppError::Configuration("Invalid BACKEND_TIMEOUT_SECS".to_string())
                })?,
        })
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
