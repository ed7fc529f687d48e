//! # Recipe Provider Module
//!
//! This module wraps the public recipe database (TheMealDB JSON API) behind
//! the [`RecipeProvider`] trait.
//!
//! ## Features
//!
//! - Filter by ingredient and by area, lookup by identifier, list areas
//! - Responses memoized by request URL in a bounded LRU cache
//! - Fixed per-request timeout; failures surface as [`ProviderError`] and are
//!   never cached

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, ClientBuilder, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, trace};

use crate::config::ProviderConfig;
use crate::errors::ProviderError;
use crate::memo_cache::MemoCache;
use crate::recipe_model::{AreaEntry, MealSummary, MealsEnvelope, RawMeal, Recipe};

/// Source of recipe data
///
/// Implementations must not panic on bad input or bad responses: every
/// failure is reported as a [`ProviderError`] so callers can skip the item.
#[async_trait]
pub trait RecipeProvider: Send + Sync {
    /// Recipes listing the given ingredient
    async fn filter_by_ingredient(&self, ingredient: &str) -> Result<Vec<MealSummary>, ProviderError>;

    /// Recipes of the given cuisine/area
    async fn filter_by_area(&self, area: &str) -> Result<Vec<MealSummary>, ProviderError>;

    /// Full recipe record, `None` when the identifier is unknown
    async fn lookup(&self, id: &str) -> Result<Option<Recipe>, ProviderError>;

    /// Every cuisine/area the provider knows, in provider order
    async fn list_areas(&self) -> Result<Vec<String>, ProviderError>;
}

/// HTTP client for a TheMealDB-compatible API
pub struct MealDbClient {
    client: Client,
    base_url: String,
    responses: MemoCache<String, Value>,
}

impl MealDbClient {
    /// Create a client with the configured timeout and cache capacity
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chefmatch::config::ProviderConfig;
    /// use chefmatch::provider::MealDbClient;
    ///
    /// let client = MealDbClient::new(&ProviderConfig::default())?;
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    pub fn new(config: &ProviderConfig) -> Result<Self> {
        let client = ClientBuilder::new()
            .timeout(config.request_timeout())
            .build()
            .context("Failed to build recipe provider HTTP client")?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            responses: MemoCache::new(config.cache_capacity),
        })
    }

    /// Number of memoized responses
    pub fn cached_responses(&self) -> usize {
        self.responses.len()
    }

    fn endpoint(&self, path: &str, params: &[(&str, &str)]) -> Result<Url, ProviderError> {
        Url::parse_with_params(&format!("{}/{}", self.base_url, path), params)
            .map_err(|e| ProviderError::Transport(format!("Invalid request URL: {e}")))
    }

    /// GET a URL as JSON, consulting the response cache first
    async fn fetch_json(&self, url: Url) -> Result<Value, ProviderError> {
        let key = url.to_string();
        if let Some(cached) = self.responses.get(&key) {
            trace!(url = %key, "Provider response served from cache");
            return Ok(cached);
        }

        debug!(url = %key, "Requesting recipe provider");
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::Status {
                status: status.as_u16(),
                url: key,
            });
        }

        let body: Value = response.json().await?;
        self.responses.insert(key, body.clone());
        Ok(body)
    }

    async fn fetch_meals<T: DeserializeOwned>(&self, url: Url) -> Result<Vec<T>, ProviderError> {
        let body = self.fetch_json(url).await?;
        let envelope: MealsEnvelope<T> = serde_json::from_value(body)?;
        Ok(envelope.into_meals())
    }
}

#[async_trait]
impl RecipeProvider for MealDbClient {
    async fn filter_by_ingredient(&self, ingredient: &str) -> Result<Vec<MealSummary>, ProviderError> {
        let url = self.endpoint("filter.php", &[("i", ingredient.trim())])?;
        self.fetch_meals(url).await
    }

    async fn filter_by_area(&self, area: &str) -> Result<Vec<MealSummary>, ProviderError> {
        let url = self.endpoint("filter.php", &[("a", area.trim())])?;
        self.fetch_meals(url).await
    }

    async fn lookup(&self, id: &str) -> Result<Option<Recipe>, ProviderError> {
        let url = self.endpoint("lookup.php", &[("i", id.trim())])?;
        let meals: Vec<RawMeal> = self.fetch_meals(url).await?;
        meals.into_iter().next().map(Recipe::try_from).transpose()
    }

    async fn list_areas(&self) -> Result<Vec<String>, ProviderError> {
        let url = self.endpoint("list.php", &[("a", "list")])?;
        let entries: Vec<AreaEntry> = self.fetch_meals(url).await?;
        Ok(entries
            .into_iter()
            .filter_map(|entry| entry.area)
            .map(|area| area.trim().to_string())
            .filter(|area| !area.is_empty())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> MealDbClient {
        MealDbClient::new(&ProviderConfig {
            base_url: "http://127.0.0.1:9/api/json/v1/1/".to_string(),
            request_timeout_secs: 1,
            cache_capacity: 8,
        })
        .unwrap()
    }

    #[test]
    fn test_endpoint_encodes_parameters() {
        let url = client()
            .endpoint("filter.php", &[("i", "chicken breast")])
            .unwrap();
        assert_eq!(
            url.as_str(),
            "http://127.0.0.1:9/api/json/v1/1/filter.php?i=chicken+breast"
        );
    }

    #[tokio::test]
    async fn test_cached_response_skips_network() {
        let client = client();
        let url = client.endpoint("lookup.php", &[("i", "52772")]).unwrap();
        client.responses.insert(
            url.to_string(),
            serde_json::json!({"meals": [{"idMeal": "52772", "strMeal": "Teriyaki Chicken Casserole"}]}),
        );

        let recipe = client.lookup("52772").await.unwrap().unwrap();
        assert_eq!(recipe.name, "Teriyaki Chicken Casserole");
    }

    #[tokio::test]
    async fn test_null_meals_is_unknown_id() {
        let client = client();
        let url = client.endpoint("lookup.php", &[("i", "0")]).unwrap();
        client
            .responses
            .insert(url.to_string(), serde_json::json!({"meals": null}));

        assert!(client.lookup("0").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_unreachable_provider_is_an_error() {
        // Port 9 (discard) is closed on test hosts; the request fails fast
        let result = client().filter_by_ingredient("rice").await;
        assert!(result.is_err());
    }

    /// Local HTTP server answering every request with `503 Service Unavailable`
    async fn unavailable_server() -> String {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            while let Ok((mut socket, _)) = listener.accept().await {
                let mut buf = [0u8; 1024];
                let _ = socket.read(&mut buf).await;
                let _ = socket
                    .write_all(b"HTTP/1.1 503 Service Unavailable\r\ncontent-length: 0\r\nconnection: close\r\n\r\n")
                    .await;
            }
        });
        format!("http://{addr}/api/json/v1/1")
    }

    #[tokio::test]
    async fn test_error_status_is_reported_and_not_cached() {
        let client = MealDbClient::new(&ProviderConfig {
            base_url: unavailable_server().await,
            request_timeout_secs: 5,
            cache_capacity: 8,
        })
        .unwrap();

        for _ in 0..2 {
            let err = client.lookup("52772").await.unwrap_err();
            assert!(matches!(err, ProviderError::Status { status: 503, .. }));
        }
        assert_eq!(client.cached_responses(), 0);
    }

    #[tokio::test]
    async fn test_list_areas_skips_blank_entries() {
        let client = client();
        let url = client.endpoint("list.php", &[("a", "list")]).unwrap();
        client.responses.insert(
            url.to_string(),
            serde_json::json!({"meals": [{"strArea": "Italian"}, {"strArea": ""}, {"strArea": null}, {"strArea": "Thai"}]}),
        );

        assert_eq!(client.list_areas().await.unwrap(), vec!["Italian", "Thai"]);
    }
}
