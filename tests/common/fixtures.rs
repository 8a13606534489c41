//! Test doubles for the external services and request builders

#![allow(dead_code)]

use async_trait::async_trait;
use mood_recommender::llm::{CompletionOptions, CompletionResponse, LlmError, LlmProvider, Message};
use mood_recommender::recommend::Candidate;
use mood_recommender::spotify::{CatalogError, TrackCatalog};
use serde_json::{json, Value};
use std::sync::Mutex;

enum CatalogOutcome {
    Tracks(Vec<Candidate>),
    TokenFailure(String),
    SearchFailure(String),
}

/// In-memory catalog that records every query it receives.
pub struct FakeCatalog {
    outcome: CatalogOutcome,
    queries: Mutex<Vec<String>>,
}

impl FakeCatalog {
    pub fn returning(tracks: Vec<Candidate>) -> Self {
        Self::with_outcome(CatalogOutcome::Tracks(tracks))
    }

    pub fn failing_token(body: &str) -> Self {
        Self::with_outcome(CatalogOutcome::TokenFailure(body.to_string()))
    }

    pub fn failing_search(body: &str) -> Self {
        Self::with_outcome(CatalogOutcome::SearchFailure(body.to_string()))
    }

    fn with_outcome(outcome: CatalogOutcome) -> Self {
        Self {
            outcome,
            queries: Mutex::new(vec![]),
        }
    }

    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }

    pub fn last_query(&self) -> String {
        self.queries()
            .last()
            .cloned()
            .expect("Catalog was never searched")
    }
}

#[async_trait]
impl TrackCatalog for FakeCatalog {
    async fn search_tracks(&self, query: &str) -> Result<Vec<Candidate>, CatalogError> {
        self.queries.lock().unwrap().push(query.to_string());
        match &self.outcome {
            CatalogOutcome::Tracks(tracks) => Ok(tracks.clone()),
            CatalogOutcome::TokenFailure(body) => Err(CatalogError::Token(body.clone())),
            CatalogOutcome::SearchFailure(body) => Err(CatalogError::Search(body.clone())),
        }
    }
}

/// Chat completion provider with a canned reply, or a failure.
pub struct FakeLlm {
    reply: Option<String>,
    calls: Mutex<usize>,
}

impl FakeLlm {
    pub fn replying(content: &str) -> Self {
        Self {
            reply: Some(content.to_string()),
            calls: Mutex::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            reply: None,
            calls: Mutex::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        *self.calls.lock().unwrap()
    }
}

#[async_trait]
impl LlmProvider for FakeLlm {
    fn name(&self) -> &str {
        "fake"
    }

    async fn complete(
        &self,
        _messages: &[Message],
        _options: &CompletionOptions,
    ) -> Result<CompletionResponse, LlmError> {
        *self.calls.lock().unwrap() += 1;
        match &self.reply {
            Some(content) => Ok(CompletionResponse {
                message: Message::assistant(content.clone()),
            }),
            None => Err(LlmError::Api {
                status: 503,
                message: "model overloaded".to_string(),
            }),
        }
    }
}

pub fn track(id: &str, title: &str, album: &str, popularity: u32) -> Candidate {
    Candidate {
        id: id.to_string(),
        title: Some(title.to_string()),
        artists: vec!["Test Artist".to_string()],
        album: Some(album.to_string()),
        release_year: None,
        popularity,
        external_url: None,
    }
}

/// Builds a recommend request body with fixed mood, tone and context.
pub fn quiz_body(note: &str, genres: &[&str], era: &str, exclude: &[&str]) -> Value {
    json!({
        "moodLevel": "Medium",
        "tone": "Calm",
        "context": "Alone",
        "note": note,
        "genres": genres,
        "era": era,
        "excludeTrackIds": exclude,
    })
}
