use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use shared::{DaysResponse, Location, Route};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{url} answered {status}")]
    Status { url: String, status: StatusCode },
}

/// The itinerary data API the viewer reads from.
#[async_trait]
pub trait TravelApi: Send + Sync {
    async fn total_days(&self) -> Result<u32, ApiError>;

    async fn routes(&self) -> Result<Vec<Route>, ApiError>;

    async fn locations(&self) -> Result<Vec<Location>, ApiError>;

    /// Pre-rendered HTML for the photo detail panel.
    async fn location_photos(&self, id: i64) -> Result<String, ApiError>;
}

#[derive(Debug, Clone)]
pub struct BackendClient {
    client: reqwest::Client,
    base_url: String,
}

impl BackendClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get(&self, path: &str, query: &[(&str, String)]) -> Result<reqwest::Response, ApiError> {
        let url = self.url(path);
        tracing::debug!("GET {url}");
        let response = self
            .client
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|source| ApiError::Request {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status { url, status });
        }
        Ok(response)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self.get(path, &[]).await?;
        response.json().await.map_err(|source| ApiError::Request {
            url: self.url(path),
            source,
        })
    }
}

#[async_trait]
impl TravelApi for BackendClient {
    async fn total_days(&self) -> Result<u32, ApiError> {
        let days: DaysResponse = self.get_json("/api/days").await?;
        Ok(days.total_days)
    }

    async fn routes(&self) -> Result<Vec<Route>, ApiError> {
        self.get_json("/api/routes").await
    }

    async fn locations(&self) -> Result<Vec<Location>, ApiError> {
        self.get_json("/api/locations").await
    }

    async fn location_photos(&self, id: i64) -> Result<String, ApiError> {
        let path = "/api/location-photos";
        let response = self.get(path, &[("id", id.to_string())]).await?;
        response.text().await.map_err(|source| ApiError::Request {
            url: self.url(path),
            source,
        })
    }
}
