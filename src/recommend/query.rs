//! Search query construction.
//!
//! The query always starts from a deterministic builder. When a text
//! generation provider is configured, its output replaces the deterministic
//! query, but any failure on that path falls back silently.

use crate::llm::{CompletionOptions, LlmError, LlmProvider, Message};
use crate::policy::ContentPolicy;
use crate::quiz::{Era, GenreTag, QuizAnswers};
use crate::signals::{effective_era, TextClassifier};
use lazy_static::lazy_static;
use regex::Regex;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

const DEFAULT_QUERY: &str = "chill music";
const MIN_GENERATED_QUERY_CHARS: usize = 3;

/// Signals derived from the quiz answers, shared by query building and
/// ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuerySignals {
    pub inferred_era: Option<Era>,
    pub effective_era: Era,
    pub ukrainian_requested: bool,
    pub american_requested: bool,
    pub note_violates_policy: bool,
}

impl QuerySignals {
    pub fn derive(answers: &QuizAnswers, classifier: &dyn TextClassifier) -> Self {
        let text = classifier.classify(&answers.note);
        Self {
            inferred_era: text.era,
            effective_era: effective_era(answers.era, text.era),
            ukrainian_requested: text.ukrainian_requested,
            american_requested: text.american_requested,
            note_violates_policy: text.policy_violation,
        }
    }
}

fn genre_phrase(genre: GenreTag) -> &'static str {
    match genre {
        GenreTag::Classical => "classical piano orchestra",
        GenreTag::Chill => "chill relax",
        GenreTag::Instrumental => "instrumental",
        GenreTag::Ambient => "ambient",
        GenreTag::Jazz => "jazz",
        GenreTag::Metal => "metal",
        GenreTag::HipHop => "hip hop rap",
        GenreTag::DrumAndBass => "drum and bass dnb",
        GenreTag::Techno => "techno",
        GenreTag::House => "house",
        GenreTag::Electronic => "electronic",
        GenreTag::Pop => "pop",
        GenreTag::Rock => "rock",
    }
}

/// Builds the deterministic query. Part order is the priority order: genres
/// first, then region hints, then the note, mood and context, then era.
pub fn build_fallback_query(answers: &QuizAnswers, signals: &QuerySignals) -> String {
    let mut parts: Vec<String> = answers
        .genres
        .iter()
        .map(|g| genre_phrase(*g).to_string())
        .collect();

    if signals.american_requested {
        parts.push("american us".to_string());
    }
    if signals.ukrainian_requested {
        parts.push("ukrainian ua".to_string());
    }

    let note = answers.note.trim();
    if !note.is_empty() {
        parts.push(note.to_lowercase());
    }

    parts.push(answers.tone.as_str().to_lowercase());
    parts.push(answers.mood_level.as_str().to_lowercase());
    parts.push(answers.context.query_descriptor().to_string());

    if signals.effective_era != Era::Any {
        parts.push(signals.effective_era.as_str().to_lowercase());
    }

    let query = parts.join(" ").trim().to_string();
    if query.is_empty() {
        DEFAULT_QUERY.to_string()
    } else {
        query
    }
}

const SYSTEM_PROMPT: &str = "You build Spotify search queries for music recommendations.
- The user's note may be in ANY language. Interpret it.
- Genre selection from the UI is the top priority. Never override it. If no genres are provided, infer a reasonable genre/era from the note.
- Ukrainian language alone does NOT mean the user wants Ukrainian music. Only prioritize Ukrainian artists/tracks if the explicit Ukrainian request flag is true.
- If the explicit American/US intent flag is true, favor American/US results and do not bias toward Ukrainian unless the Ukrainian request flag is also true.
- Detect and use era hints in the note (80s/90s/00s/2010s/2020s) when the era is Any.
- Do NOT produce Russian-language or Russia-related results.
- Use mood level, tone, and context: Alone / In pair / With company.
- Output ONLY a short plain text Spotify query (a few words). No quotes, no explanations.";

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "yes"
    } else {
        "no"
    }
}

fn user_prompt(answers: &QuizAnswers, signals: &QuerySignals) -> String {
    let note = answers.note.trim();
    let genres = answers
        .genres
        .iter()
        .map(|g| g.label())
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "Mood level: {}\n\
         Tone: {}\n\
         Context: {}\n\
         User note: {}\n\
         Explicit Ukrainian request: {}\n\
         Explicit American request: {}\n\
         Preferred genres: {}\n\
         Preferred era: {}\n\
         Era hint from note: {}\n\
         Era to use (after hint): {}",
        answers.mood_level.as_str(),
        answers.tone.as_str(),
        answers.context.as_str(),
        if note.is_empty() { "no extra details" } else { note },
        yes_no(signals.ukrainian_requested),
        yes_no(signals.american_requested),
        if genres.is_empty() { "none" } else { genres.as_str() },
        answers.era,
        signals.inferred_era.map(|e| e.as_str()).unwrap_or("none"),
        signals.effective_era,
    )
}

lazy_static! {
    static ref QUOTES_AND_NEWLINES: Regex = Regex::new(r#"["'\n\r]+"#).unwrap();
}

#[derive(Debug, Error)]
pub enum QueryGenerationError {
    #[error("text generation failed: {0}")]
    Provider(#[from] LlmError),

    #[error("generated query too short: {0:?}")]
    TooShort(String),

    #[error("generated query violates content policy")]
    Blocked,
}

/// Turns quiz answers into a search query through a chat completion.
pub struct QueryGenerator {
    provider: Arc<dyn LlmProvider>,
    policy: ContentPolicy,
    options: CompletionOptions,
}

impl QueryGenerator {
    pub fn new(
        provider: Arc<dyn LlmProvider>,
        policy: ContentPolicy,
        options: CompletionOptions,
    ) -> Self {
        Self {
            provider,
            policy,
            options,
        }
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    pub async fn generate(
        &self,
        answers: &QuizAnswers,
        signals: &QuerySignals,
    ) -> Result<String, QueryGenerationError> {
        let messages = [
            Message::system(SYSTEM_PROMPT),
            Message::user(user_prompt(answers, signals)),
        ];
        let response = self.provider.complete(&messages, &self.options).await?;

        let content = response.message.content.trim();
        let cleaned = QUOTES_AND_NEWLINES
            .replace_all(content, " ")
            .trim()
            .to_string();
        if cleaned.chars().count() < MIN_GENERATED_QUERY_CHARS {
            return Err(QueryGenerationError::TooShort(cleaned));
        }
        if self.policy.is_blocked_query(&cleaned) {
            return Err(QueryGenerationError::Blocked);
        }
        Ok(cleaned)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuerySource {
    Generated,
    Fallback,
}

impl QuerySource {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuerySource::Generated => "generated",
            QuerySource::Fallback => "fallback",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedQuery {
    pub text: String,
    pub source: QuerySource,
}

/// How the search query is produced.
pub enum QueryStrategy {
    Deterministic,
    /// Try the generator, use the deterministic query on any error.
    Generated(QueryGenerator),
}

impl QueryStrategy {
    pub async fn resolve(&self, answers: &QuizAnswers, signals: &QuerySignals) -> ResolvedQuery {
        let fallback = build_fallback_query(answers, signals);
        let generator = match self {
            QueryStrategy::Deterministic => {
                return ResolvedQuery {
                    text: fallback,
                    source: QuerySource::Fallback,
                }
            }
            QueryStrategy::Generated(generator) => generator,
        };

        match generator.generate(answers, signals).await {
            Ok(text) => {
                debug!(query = %text, provider = generator.provider_name(), "Using generated query");
                ResolvedQuery {
                    text,
                    source: QuerySource::Generated,
                }
            }
            Err(err) => {
                warn!(error = %err, fallback = %fallback, "Query generation failed, using fallback");
                ResolvedQuery {
                    text: fallback,
                    source: QuerySource::Fallback,
                }
            }
        }
    }

    pub fn is_generated(&self) -> bool {
        matches!(self, QueryStrategy::Generated(_))
    }
}
