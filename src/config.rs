//! Configuration constants and utilities for catalog-browser
//!
//! Everything here is resolved once at startup: command line flags win over
//! environment variables, which win over the compiled-in defaults.

use crate::browser::models::StatusFilter;
use crate::cmd_args::CommandLineArgs;
use std::time::Duration;

/// Default base URL of the character catalog API
pub const DEFAULT_BASE_URL: &str = "https://rickandmortyapi.com/api";

/// Environment variable name for overriding the API base URL
pub const BASE_URL_ENV_VAR: &str = "CATALOG_API_URL";

/// Environment variable name for the tracing filter
pub const LOG_LEVEL_ENV_VAR: &str = "CATALOG_LOG_LEVEL";

/// Quiet interval a search term must survive before it is sent
pub const DEFAULT_DEBOUNCE_MS: u64 = 400;

/// Number of records the API returns per page
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Get the API base URL, checking environment variable first, then falling back to default
pub fn get_base_url() -> String {
    std::env::var_os(BASE_URL_ENV_VAR)
        .and_then(|val| val.into_string().ok())
        .filter(|val| !val.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
}

/// Get the log filter directive, defaulting to `warn`
pub fn get_log_level(verbose: bool) -> String {
    if verbose {
        return "debug".to_string();
    }
    std::env::var(LOG_LEVEL_ENV_VAR)
        .map(|level| level.to_lowercase())
        .unwrap_or_else(|_| "warn".to_string())
}

/// Fully resolved runtime settings
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub base_url: String,
    pub debounce: Duration,
    pub page_size: usize,
    pub initial_status: StatusFilter,
}

impl AppConfig {
    /// Resolve settings from parsed command line arguments
    pub fn from_args(args: &CommandLineArgs) -> Self {
        let base_url = args
            .base_url()
            .map(str::to_string)
            .unwrap_or_else(get_base_url);

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            debounce: Duration::from_millis(args.debounce_ms()),
            page_size: DEFAULT_PAGE_SIZE,
            initial_status: args.status(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            debounce: Duration::from_millis(DEFAULT_DEBOUNCE_MS),
            page_size: DEFAULT_PAGE_SIZE,
            initial_status: StatusFilter::Any,
        }
    }
}
