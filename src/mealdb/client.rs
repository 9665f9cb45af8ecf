use crate::config::ApiConfig;
use crate::mealdb::{models::parse_meals, MealRecord, MealSearch};
use crate::utils::validation;
use crate::{Error, Result};
use reqwest::{header, Client};
use std::time::Duration;
use tracing::{debug, error};

/// TheMealDB API client
#[derive(Clone)]
pub struct MealDbClient {
    client: Client,
    base_url: String,
}

impl MealDbClient {
    /// Create a new client for the configured API base URL
    pub fn new(config: &ApiConfig) -> Result<Self> {
        validation::validate_url(&config.base_url)?;

        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json"),
        );

        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| Error::Internal(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Look up a single meal by its identifier
    pub async fn lookup_by_id(&self, id: &str) -> Result<Option<MealRecord>> {
        let id = validation::validate_meal_id(id)?;
        let url = format!("{}/lookup.php?i={}", self.base_url, id);

        let mut meals = self.get_meals(&url).await?;
        if meals.is_empty() {
            return Ok(None);
        }
        Ok(Some(meals.swap_remove(0)))
    }

    /// GET a TheMealDB endpoint and parse the `meals` envelope
    async fn get_meals(&self, url: &str) -> Result<Vec<MealRecord>> {
        debug!("TheMealDB request: GET {}", url);

        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            error!("TheMealDB error: {} for {}", status, url);
            return Err(Error::Lookup(format!("HTTP {status}")));
        }

        let body = response.text().await?;
        parse_meals(&body)
    }
}

impl MealSearch for MealDbClient {
    async fn search_by_name(&self, name: &str) -> Result<Vec<MealRecord>> {
        let url = format!(
            "{}/search.php?s={}",
            self.base_url,
            urlencoding::encode(name)
        );

        let meals = self.get_meals(&url).await.map_err(|e| match e {
            Error::Lookup(msg) => Error::Lookup(format!("{msg} for query {name:?}")),
            Error::MalformedResponse(msg) => {
                Error::MalformedResponse(format!("{msg} for query {name:?}"))
            }
            other => other,
        })?;

        debug!("Query {:?} matched {} meals", name, meals.len());
        Ok(meals)
    }
}
