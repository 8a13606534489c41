//! Content policy: Russian-language and Russia-related content is never
//! recommended.
//!
//! The filter runs on every candidate list before scoring and there is no
//! quiz input that can turn it off.

use crate::recommend::Candidate;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Substrings that block a candidate when found in its gathered text.
pub const BLOCKED_TOKENS: &[&str] = &[
    "russian",
    "\u{0440}\u{043e}\u{0441}\u{0441}\u{0438}", // росси
    "\u{0440}\u{043e}\u{0441}\u{0456}\u{0439}", // росій
    "\u{0440}\u{043e}\u{0441}\u{0456}\u{044f}", // росія
    "\u{043c}\u{043e}\u{0441}\u{043a}\u{0432}", // москв
];

/// Extra substrings rejected in generated search queries.
const BLOCKED_QUERY_TOKENS: &[&str] = &[
    "\u{0440}\u{043e}\u{0441}\u{0441}\u{0438}\u{044f}", // россия
    "moscow",
];

/// Letters used by Russian orthography and absent from Ukrainian.
pub const RUSSIAN_ONLY_LETTERS: &[char] = &['ё', 'ы', 'э', 'ъ'];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentPolicy {
    /// Also block any text containing [`RUSSIAN_ONLY_LETTERS`].
    ///
    /// Other Cyrillic-script languages use some of these letters too, so this
    /// is off unless explicitly configured.
    #[serde(default)]
    pub strict_orthography: bool,
}

impl ContentPolicy {
    pub fn strict() -> Self {
        Self {
            strict_orthography: true,
        }
    }

    /// Checks a piece of free text. The text is case-folded here.
    pub fn is_blocked_text(&self, text: &str) -> bool {
        let text = text.to_lowercase();
        self.is_blocked_lowercase(&text)
    }

    fn is_blocked_lowercase(&self, text: &str) -> bool {
        if BLOCKED_TOKENS.iter().any(|token| text.contains(token)) {
            return true;
        }
        self.strict_orthography && text.chars().any(|c| RUSSIAN_ONLY_LETTERS.contains(&c))
    }

    pub fn is_blocked_candidate(&self, candidate: &Candidate) -> bool {
        self.is_blocked_lowercase(&candidate.gathered_text())
    }

    /// Drops every blocked candidate, keeping the order of the rest.
    pub fn filter_blocked(&self, candidates: Vec<Candidate>) -> Vec<Candidate> {
        let before = candidates.len();
        let kept: Vec<Candidate> = candidates
            .into_iter()
            .filter(|c| !self.is_blocked_candidate(c))
            .collect();
        if kept.len() < before {
            debug!(
                blocked = before - kept.len(),
                kept = kept.len(),
                "Content policy removed candidates"
            );
        }
        kept
    }

    /// Generated search queries are checked against a slightly wider list.
    pub fn is_blocked_query(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        self.is_blocked_lowercase(&query)
            || BLOCKED_QUERY_TOKENS.iter().any(|token| query.contains(token))
    }
}
