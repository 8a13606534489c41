//! Signals extracted from the free-text quiz note.
//!
//! The note can be written in any language, so everything here is plain
//! keyword and pattern matching on the lowercased text. The matching sits
//! behind [`TextClassifier`] so a language-aware implementation can replace
//! it without touching query building or ranking.

mod era;
mod keywords;

pub use era::{effective_era, infer_era};
pub use keywords::{is_explicit_american_request, is_explicit_ukrainian_request};

use crate::policy::ContentPolicy;
use crate::quiz::Era;

/// Everything the recommender needs to know about a note.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TextSignals {
    /// Era mentioned in the text, if any.
    pub era: Option<Era>,
    pub ukrainian_requested: bool,
    pub american_requested: bool,
    /// The text itself mentions blocked content.
    pub policy_violation: bool,
}

pub trait TextClassifier: Send + Sync {
    fn classify(&self, text: &str) -> TextSignals;
}

/// Default classifier backed by fixed keyword lists and era patterns.
#[derive(Debug, Clone, Default)]
pub struct KeywordClassifier {
    policy: ContentPolicy,
}

impl KeywordClassifier {
    pub fn new(policy: ContentPolicy) -> Self {
        Self { policy }
    }
}

impl TextClassifier for KeywordClassifier {
    fn classify(&self, text: &str) -> TextSignals {
        TextSignals {
            era: infer_era(text),
            ukrainian_requested: is_explicit_ukrainian_request(text),
            american_requested: is_explicit_american_request(text),
            policy_violation: self.policy.is_blocked_text(text),
        }
    }
}
