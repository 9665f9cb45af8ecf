use crate::error::{Error, Result};
use crate::search::FailurePolicy;
use crate::utils::validation;
use serde::{Deserialize, Serialize};

pub const DEFAULT_API_URL: &str = "https://www.themealdb.com/api/json/v1/1";

/// Page sizes offered when `PAGE_SIZE_OPTIONS` is unset
pub const DEFAULT_PAGE_SIZE_OPTIONS: [usize; 3] = [5, 10, 25];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub api: ApiConfig,
    pub search: SearchConfig,
    pub pagination: PaginationConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_seconds: u64,
    pub user_agent: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    pub failure_policy: FailurePolicy,
    pub skip_empty_queries: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginationConfig {
    pub default_page_size: usize,
    pub page_size_options: Vec<usize>,
    pub preview_length: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            api: ApiConfig {
                base_url: DEFAULT_API_URL.to_string(),
                timeout_seconds: 30,
                user_agent: default_user_agent(),
            },
            search: SearchConfig {
                failure_policy: FailurePolicy::default(),
                skip_empty_queries: true,
            },
            pagination: PaginationConfig {
                default_page_size: 10,
                page_size_options: DEFAULT_PAGE_SIZE_OPTIONS.to_vec(),
                preview_length: 100,
            },
        }
    }
}

fn default_user_agent() -> String {
    format!("mealsearch/{}", env!("CARGO_PKG_VERSION"))
}

impl Settings {
    /// Load settings from environment variables
    pub fn from_env() -> Result<Self> {
        let base_url =
            std::env::var("MEALDB_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());

        let timeout_seconds = std::env::var("MEALDB_TIMEOUT")
            .unwrap_or_else(|_| "30".to_string())
            .parse()
            .map_err(|_| Error::Config("Invalid MEALDB_TIMEOUT value".to_string()))?;

        let failure_policy = std::env::var("SEARCH_FAILURE_POLICY")
            .unwrap_or_else(|_| "best-effort".to_string())
            .parse()?;

        let skip_empty_queries = std::env::var("SEARCH_SKIP_EMPTY")
            .unwrap_or_else(|_| "true".to_string())
            .parse()
            .map_err(|_| Error::Config("Invalid SEARCH_SKIP_EMPTY value".to_string()))?;

        let default_page_size = std::env::var("RESULTS_PER_PAGE")
            .unwrap_or_else(|_| "10".to_string())
            .parse()
            .map_err(|_| Error::Config("Invalid RESULTS_PER_PAGE value".to_string()))?;

        let page_size_options = match std::env::var("PAGE_SIZE_OPTIONS") {
            Ok(raw) => parse_page_sizes(&raw)?,
            Err(_) => DEFAULT_PAGE_SIZE_OPTIONS.to_vec(),
        };

        let preview_length = std::env::var("PREVIEW_LENGTH")
            .unwrap_or_else(|_| "100".to_string())
            .parse()
            .map_err(|_| Error::Config("Invalid PREVIEW_LENGTH value".to_string()))?;

        Ok(Settings {
            api: ApiConfig {
                base_url,
                timeout_seconds,
                user_agent: default_user_agent(),
            },
            search: SearchConfig {
                failure_policy,
                skip_empty_queries,
            },
            pagination: PaginationConfig {
                default_page_size,
                page_size_options,
                preview_length,
            },
        })
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        validation::validate_url(&self.api.base_url)
            .map_err(|e| Error::Config(format!("MEALDB_API_URL: {e}")))?;

        if self.api.timeout_seconds == 0 {
            return Err(Error::Config("Timeout must be non-zero".to_string()));
        }

        if self.pagination.page_size_options.is_empty() {
            return Err(Error::Config(
                "At least one page size option is required".to_string(),
            ));
        }

        for size in &self.pagination.page_size_options {
            validation::validate_page_size(*size)
                .map_err(|e| Error::Config(format!("Page size {size}: {e}")))?;
        }

        validation::validate_page_size_option(
            self.pagination.default_page_size,
            &self.pagination.page_size_options,
        )
        .map_err(|e| Error::Config(format!("RESULTS_PER_PAGE: {e}")))?;

        Ok(())
    }
}

/// Parse a comma separated list of page sizes such as `5,10,25`
fn parse_page_sizes(raw: &str) -> Result<Vec<usize>> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<usize>()
                .map_err(|_| Error::Config(format!("Invalid PAGE_SIZE_OPTIONS entry: {s}")))
        })
        .collect()
}
