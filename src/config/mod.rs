use crate::core::{AppError, Currency, Result};
use serde::Deserialize;
use std::env;

pub mod backend;
pub mod server;
pub mod store_mapping;

pub use backend::BackendConfig;
pub use server::ServerConfig;
pub use store_mapping::{StoreEntry, StoreMapping};

/// Main application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub server: ServerConfig,
    pub backend: BackendConfig,
    pub reports: ReportsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub env: String,
    /// Level of this crate's logs when `RUST_LOG` is unset
    pub log_level: String,
    /// `json` switches the log output to JSON lines
    pub log_format: String,
}

/// Report generation and export settings
#[derive(Debug, Clone, Deserialize)]
pub struct ReportsConfig {
    pub currency: Currency,
    /// Rows per page in PDF exports
    pub rows_per_page: usize,
    /// Number of products in the top-products ranking
    pub top_limit: usize,
    /// Brand string printed in export footers
    pub footer: String,
    pub store_mapping_path: Option<String>,
    /// JSON file backing the session store; in-memory when unset
    pub session_store_path: Option<String>,
    /// Report views kept in memory; the least recently used is dropped first
    pub max_views: usize,
}

impl Default for ReportsConfig {
    fn default() -> Self {
        Self {
            currency: Currency::CLP,
            rows_per_page: 35,
            top_limit: 10,
            footer: "Multi Stock Sync".to_string(),
            store_mapping_path: None,
            session_store_path: None,
            max_views: 256,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        let defaults = ReportsConfig::default();

        let config = Config {
            app: AppConfig {
                env: env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
                log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
                log_format: env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string()),
            },
            server: ServerConfig::from_env()?,
            backend: BackendConfig::from_env()?,
            reports: ReportsConfig {
                currency: match env::var("REPORT_CURRENCY") {
                    Ok(raw) => raw.parse().map_err(AppError::Configuration)?,
                    Err(_) => defaults.currency,
                },
                rows_per_page: env::var("REPORT_ROWS_PER_PAGE")
                    .unwrap_or_else(|_| defaults.rows_per_page.to_string())
                    .parse()
                    .map_err(|_| {
                        AppError::Configuration("Invalid REPORT_ROWS_PER_PAGE".to_string())
                    })?,
                top_limit: env::var("REPORT_TOP_LIMIT")
                    .unwrap_or_else(|_| defaults.top_limit.to_string())
                    .parse()
                    .map_err(|_| {
                        AppError::Configuration("Invalid REPORT_TOP_LIMIT".to_string())
                    })?,
                footer: env::var("REPORT_FOOTER").unwrap_or(defaults.footer),
                store_mapping_path: env::var("STORE_MAPPING_PATH").ok(),
                session_store_path: env::var("SESSION_STORE_PATH").ok(),
                max_views: env::var("REPORT_MAX_VIEWS")
                    .unwrap_or_else(|_| defaults.max_views.to_string())
                    .parse()
                    .map_err(|_| {
                        AppError::Configuration("Invalid REPORT_MAX_VIEWS".to_string())
                    })?,
            },
        };

        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if !self.backend.base_url.starts_with("http://")
            && !self.backend.base_url.starts_with("https://")
        {
            return Err(AppError::Configuration(format!(
                "BACKEND_BASE_URL must be an http(s) URL, got {}",
                self.backend.base_url
            )));
        }

        if self.backend.timeout_secs == 0 {
            return Err(AppError::Configuration(
                "Backend timeout must be greater than 0".to_string(),
            ));
        }

        if self.reports.rows_per_page == 0 {
            return Err(AppError::Configuration(
                "Rows per page must be greater than 0".to_string(),
            ));
        }

        if self.reports.top_limit == 0 {
            return Err(AppError::Configuration(
                "Top products limit must be greater than 0".to_string(),
            ));
        }

        if self.reports.max_views == 0 {
            return Err(AppError::Configuration(
                "Report view limit must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }

    /// Default `EnvFilter` directives, used when `RUST_LOG` is unset
    pub fn log_filter(&self) -> String {
        format!("multistock_reports={},actix_web=info", self.app.log_level)
    }

    /// Store mapping from `STORE_MAPPING_PATH`, empty when not configured
    pub fn load_store_mapping(&self) -> Result<StoreMapping> {
        match &self.reports.store_mapping_path {
            Some(path) => StoreMapping::load(path),
            None => Ok(StoreMapping::default()),
        }
    }
}
