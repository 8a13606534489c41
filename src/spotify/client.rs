//! Spotify Web API client.
//!
//! Uses the client credentials flow. A fresh token is requested for every
//! search, nothing is cached between requests.

use super::models::{SearchResponse, TokenResponse};
use crate::recommend::Candidate;
use crate::server::metrics::record_upstream_call;
use async_trait::async_trait;
use reqwest::Client;
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::debug;

pub const SPOTIFY_ACCOUNTS_URL: &str = "https://accounts.spotify.com";
pub const SPOTIFY_API_URL: &str = "https://api.spotify.com";

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("SPOTIFY_CLIENT_ID or SPOTIFY_CLIENT_SECRET is missing")]
    MissingCredentials,

    #[error("Spotify token error: {0}")]
    Token(String),

    #[error("Spotify search error: {0}")]
    Search(String),
}

/// Searches a music catalog for tracks.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TrackCatalog: Send + Sync {
    async fn search_tracks(&self, query: &str) -> Result<Vec<Candidate>, CatalogError>;
}

#[derive(Debug, Clone)]
pub struct SpotifyConfig {
    pub client_id: String,
    pub client_secret: String,
    pub accounts_url: String,
    pub api_url: String,
    /// Market code passed to the search endpoint.
    pub market: String,
    pub page_size: u32,
    pub timeout: Duration,
}

impl SpotifyConfig {
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            accounts_url: SPOTIFY_ACCOUNTS_URL.to_string(),
            api_url: SPOTIFY_API_URL.to_string(),
            market: "UA".to_string(),
            page_size: 50,
            timeout: Duration::from_secs(15),
        }
    }
}

pub struct SpotifyClient {
    client: Client,
    config: SpotifyConfig,
}

impl SpotifyClient {
    pub fn new(mut config: SpotifyConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(config.timeout).build()?;
        config.accounts_url = config.accounts_url.trim_end_matches('/').to_string();
        config.api_url = config.api_url.trim_end_matches('/').to_string();
        Ok(Self { client, config })
    }

    async fn fetch_token(&self) -> Result<String, CatalogError> {
        if self.config.client_id.is_empty() || self.config.client_secret.is_empty() {
            return Err(CatalogError::MissingCredentials);
        }

        let url = format!("{}/api/token", self.config.accounts_url);
        let start = Instant::now();
        let response = self
            .client
            .post(&url)
            .basic_auth(&self.config.client_id, Some(&self.config.client_secret))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await
            .map_err(|e| CatalogError::Token(e.to_string()))?;

        let status = response.status();
        record_upstream_call("spotify_token", status.as_u16(), start.elapsed());
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CatalogError::Token(body));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| CatalogError::Token(format!("invalid token response: {}", e)))?;
        Ok(token.access_token)
    }
}

#[async_trait]
impl TrackCatalog for SpotifyClient {
    async fn search_tracks(&self, query: &str) -> Result<Vec<Candidate>, CatalogError> {
        let token = self.fetch_token().await?;

        let url = format!("{}/v1/search", self.config.api_url);
        let page_size = self.config.page_size.to_string();
        let start = Instant::now();
        let response = self
            .client
            .get(&url)
            .bearer_auth(token)
            .query(&[
                ("q", query),
                ("type", "track"),
                ("limit", page_size.as_str()),
                ("market", self.config.market.as_str()),
            ])
            .send()
            .await
            .map_err(|e| CatalogError::Search(e.to_string()))?;

        let status = response.status();
        record_upstream_call("spotify_search", status.as_u16(), start.elapsed());
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CatalogError::Search(body));
        }

        let body: SearchResponse = response
            .json()
            .await
            .map_err(|e| CatalogError::Search(format!("invalid search response: {}", e)))?;

        let candidates: Vec<Candidate> = body
            .tracks
            .unwrap_or_default()
            .items
            .into_iter()
            .map(Candidate::from)
            .collect();
        debug!(query = %query, results = candidates.len(), "Spotify search completed");
        Ok(candidates)
    }
}
