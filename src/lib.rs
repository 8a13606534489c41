//! Mood Recommender Library
//!
//! Turns mood quiz answers into a single track recommendation. The modules
//! are exposed for the binaries and for end-to-end tests.

pub mod config;
pub mod llm;
pub mod policy;
pub mod quiz;
pub mod recommend;
pub mod server;
pub mod signals;
pub mod spotify;

use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::info;

// Re-export commonly used types for convenience
pub use config::AppConfig;
pub use quiz::QuizAnswers;
pub use recommend::{Recommendation, RecommendError, Recommender};
pub use server::{make_app, run_server, RequestsLoggingLevel};

/// Wires the Spotify client and the optional query generator into a
/// [`Recommender`] according to the resolved configuration.
pub fn build_recommender(config: &AppConfig) -> Result<Recommender> {
    let catalog = spotify::SpotifyClient::new(config.catalog.spotify_config())
        .context("Failed to build Spotify HTTP client")?;

    let strategy = if config.llm.enabled {
        let provider = llm::OpenAIProvider::new(
            config.llm.base_url.clone(),
            config.llm.model.clone(),
            config.llm.api_key.clone(),
        );
        info!(
            "Query generation enabled with model {} at {}",
            config.llm.model, config.llm.base_url
        );
        recommend::QueryStrategy::Generated(recommend::QueryGenerator::new(
            Arc::new(provider),
            config.policy.clone(),
            config.llm.completion_options(),
        ))
    } else {
        info!("Query generation disabled, using deterministic queries");
        recommend::QueryStrategy::Deterministic
    };

    Ok(Recommender::new(Arc::new(catalog), strategy, config.policy.clone()).with_top_k(config.top_k))
}
