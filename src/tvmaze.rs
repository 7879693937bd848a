use std::sync::Arc;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::{debug, info};

use crate::settings::AppSettings;
use crate::show::{ApiError, Show};

fn url_encode(s: &str) -> String {
    let mut result = String::with_capacity(s.len() * 3);
    for byte in s.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                result.push(byte as char);
            }
            _ => {
                result.push_str(&format!("%{:02X}", byte));
            }
        }
    }
    result
}

/// Source of show records. The application talks to TVmaze; tests swap in
/// an in-memory catalog.
#[async_trait]
pub trait ShowCatalog: Send + Sync {
    async fn list_shows(&self) -> Result<Vec<Show>, ApiError>;

    async fn show(&self, id: &str) -> Result<Show, ApiError>;
}

pub async fn fetch_image_bytes(url: String) -> Result<Vec<u8>, String> {
    reqwest::get(&url)
        .await
        .map_err(|e| e.to_string())?
        .error_for_status()
        .map_err(|e| e.to_string())?
        .bytes()
        .await
        .map(|b| b.to_vec())
        .map_err(|e| e.to_string())
}

#[derive(Clone)]
pub struct TvMazeClient {
    base_url: String,
    http_client: Arc<reqwest::Client>,
}

impl TvMazeClient {
    pub fn new(base_url: String) -> Self {
        Self {
            base_url,
            http_client: Arc::new(reqwest::Client::new()),
        }
    }

    pub fn from_settings(settings: &AppSettings) -> Self {
        Self::new(settings.api_base_url.clone())
    }

    pub fn shows_url(&self) -> String {
        format!("{}/shows", self.base_url)
    }

    pub fn show_url(&self, id: &str) -> String {
        format!("{}/shows/{}", self.base_url, url_encode(id))
    }

    async fn fetch_response(&self, url: &str) -> Result<reqwest::Response, ApiError> {
        let response = self
            .http_client
            .get(url)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        match response.status().as_u16() {
            404 => Err(ApiError::NotFound(url.to_string())),
            s if !response.status().is_success() => Err(ApiError::Status(s)),
            _ => Ok(response),
        }
    }

    async fn fetch_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, ApiError> {
        let body = self
            .fetch_response(url)
            .await?
            .text()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        parse_json(&body)
    }
}

fn parse_json<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::Parse(e.to_string()))
}

#[async_trait]
impl ShowCatalog for TvMazeClient {
    async fn list_shows(&self) -> Result<Vec<Show>, ApiError> {
        let url = self.shows_url();
        debug!("GET {}", url);
        self.fetch_json(&url).await
    }

    async fn show(&self, id: &str) -> Result<Show, ApiError> {
        let url = self.show_url(id);
        debug!("GET {}", url);
        self.fetch_json(&url).await
    }
}

/// Fetches the catalog and keeps the first `limit` records in response order.
pub async fn load_show_list(
    catalog: Arc<dyn ShowCatalog>,
    limit: usize,
) -> Result<Vec<Show>, ApiError> {
    info!("Fetching shows from catalog");
    let shows = catalog.list_shows().await?;
    info!("Shows fetched successfully: {}", shows.len());
    Ok(shows.into_iter().take(limit).collect())
}

pub async fn load_show(catalog: Arc<dyn ShowCatalog>, id: String) -> Result<Show, ApiError> {
    info!("Fetching show details for ID: {}", id);
    let show = catalog.show(&id).await?;
    info!("Show details fetched: {} ({})", show.name, show.id);
    Ok(show)
}
