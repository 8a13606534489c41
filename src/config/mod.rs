mod file_config;

pub use file_config::{CatalogConfig, FileConfig, LlmConfig, PolicyConfig, RankingConfig};

use crate::llm::{CompletionOptions, DEFAULT_MODEL, GROQ_BASE_URL};
use crate::policy::ContentPolicy;
use crate::recommend::DEFAULT_TOP_K;
use crate::server::{RequestsLoggingLevel, ServerConfig};
use crate::spotify::{SpotifyConfig, SPOTIFY_ACCOUNTS_URL, SPOTIFY_API_URL};
use anyhow::{bail, Result};
use clap::ValueEnum;
use std::time::Duration;

/// Largest page the Spotify search endpoint accepts.
const MAX_PAGE_SIZE: u32 = 50;

/// CLI arguments that can be used for config resolution.
/// Secrets only ever come from here (flags or environment), never from TOML.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    pub port: u16,
    pub metrics_port: u16,
    pub logging_level: RequestsLoggingLevel,
    pub frontend_dir_path: Option<String>,
    pub spotify_client_id: Option<String>,
    pub spotify_client_secret: Option<String>,
    pub llm_api_key: Option<String>,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub metrics_port: u16,
    pub logging_level: RequestsLoggingLevel,
    pub frontend_dir_path: Option<String>,

    pub catalog: CatalogSettings,
    pub llm: LlmSettings,
    pub policy: ContentPolicy,
    pub top_k: usize,
}

#[derive(Debug, Clone)]
pub struct CatalogSettings {
    pub client_id: String,
    pub client_secret: String,
    pub accounts_url: String,
    pub api_url: String,
    pub market: String,
    pub page_size: u32,
    pub timeout_sec: u64,
}

impl CatalogSettings {
    pub fn spotify_config(&self) -> SpotifyConfig {
        SpotifyConfig {
            accounts_url: self.accounts_url.clone(),
            api_url: self.api_url.clone(),
            market: self.market.clone(),
            page_size: self.page_size,
            timeout: Duration::from_secs(self.timeout_sec),
            ..SpotifyConfig::new(&self.client_id, &self.client_secret)
        }
    }
}

#[derive(Debug, Clone)]
pub struct LlmSettings {
    /// True only when enabled in config and an API key is available.
    pub enabled: bool,
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub timeout_sec: u64,
}

impl LlmSettings {
    pub fn completion_options(&self) -> CompletionOptions {
        CompletionOptions {
            temperature: self.temperature,
            max_tokens: Some(self.max_tokens),
            timeout: Duration::from_secs(self.timeout_sec),
        }
    }
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

impl AppConfig {
    /// Resolve configuration from CLI arguments and optional TOML file config.
    /// TOML values override CLI values where present.
    pub fn resolve(cli: &CliConfig, file_config: Option<FileConfig>) -> Result<Self> {
        let file = file_config.unwrap_or_default();

        let port = file.port.unwrap_or(cli.port);
        let metrics_port = file.metrics_port.unwrap_or(cli.metrics_port);
        if port != 0 && port == metrics_port {
            bail!("port and metrics_port must differ (both are {})", port);
        }

        let logging_level = file
            .logging_level
            .and_then(|s| parse_logging_level(&s))
            .unwrap_or_else(|| cli.logging_level.clone());
        let frontend_dir_path = file
            .frontend_dir_path
            .or_else(|| cli.frontend_dir_path.clone());

        let (Some(client_id), Some(client_secret)) = (
            non_empty(&cli.spotify_client_id),
            non_empty(&cli.spotify_client_secret),
        ) else {
            bail!("SPOTIFY_CLIENT_ID and SPOTIFY_CLIENT_SECRET must both be set");
        };

        let catalog_file = file.catalog.unwrap_or_default();
        let catalog = CatalogSettings {
            client_id,
            client_secret,
            accounts_url: catalog_file
                .accounts_url
                .unwrap_or_else(|| SPOTIFY_ACCOUNTS_URL.to_string()),
            api_url: catalog_file
                .api_url
                .unwrap_or_else(|| SPOTIFY_API_URL.to_string()),
            market: catalog_file.market.unwrap_or_else(|| "UA".to_string()),
            page_size: catalog_file.page_size.unwrap_or(MAX_PAGE_SIZE),
            timeout_sec: catalog_file.timeout_sec.unwrap_or(15),
        };
        if catalog.page_size == 0 || catalog.page_size > MAX_PAGE_SIZE {
            bail!(
                "catalog.page_size must be between 1 and {}, got {}",
                MAX_PAGE_SIZE,
                catalog.page_size
            );
        }

        let llm_file = file.llm.unwrap_or_default();
        let api_key = non_empty(&cli.llm_api_key);
        let defaults = CompletionOptions::default();
        let llm = LlmSettings {
            enabled: llm_file.enabled.unwrap_or(true) && api_key.is_some(),
            api_key,
            base_url: llm_file
                .base_url
                .unwrap_or_else(|| GROQ_BASE_URL.to_string()),
            model: llm_file.model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            temperature: llm_file.temperature.unwrap_or(defaults.temperature),
            max_tokens: llm_file
                .max_tokens
                .or(defaults.max_tokens)
                .unwrap_or(60),
            timeout_sec: llm_file
                .timeout_sec
                .unwrap_or(defaults.timeout.as_secs()),
        };
        if !(0.0..=2.0).contains(&llm.temperature) {
            bail!("llm.temperature must be between 0 and 2, got {}", llm.temperature);
        }

        let policy = ContentPolicy {
            strict_orthography: file
                .policy
                .and_then(|p| p.strict_orthography)
                .unwrap_or(false),
        };

        let top_k = file
            .ranking
            .and_then(|r| r.top_k)
            .unwrap_or(DEFAULT_TOP_K);
        if top_k == 0 {
            bail!("ranking.top_k must be at least 1");
        }

        Ok(Self {
            port,
            metrics_port,
            logging_level,
            frontend_dir_path,
            catalog,
            llm,
            policy,
            top_k,
        })
    }

    pub fn server_config(&self) -> ServerConfig {
        ServerConfig {
            requests_logging_level: self.logging_level.clone(),
            port: self.port,
            metrics_port: self.metrics_port,
            frontend_dir_path: self.frontend_dir_path.clone(),
        }
    }
}

/// Parses a logging level string into RequestsLoggingLevel.
/// Uses clap's ValueEnum trait for parsing.
fn parse_logging_level(s: &str) -> Option<RequestsLoggingLevel> {
    RequestsLoggingLevel::from_str(s, true).ok()
}
