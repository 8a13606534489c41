use super::query::{QuerySignals, QueryStrategy, ResolvedQuery};
use super::ranking::{apply_exclusions, filter_by_era, pick_top_k, rank, DEFAULT_TOP_K};
use super::{RankedCandidate, Recommendation, RecommendError};
use crate::policy::ContentPolicy;
use crate::quiz::QuizAnswers;
use crate::server::metrics;
use crate::signals::{KeywordClassifier, TextClassifier};
use crate::spotify::TrackCatalog;
use rand::Rng;
use std::sync::Arc;
use tracing::{debug, info, warn, Instrument};

/// Result of the ranking phase of a request.
#[derive(Debug, Clone)]
pub struct RankedResults {
    pub query: ResolvedQuery,
    pub signals: QuerySignals,
    /// Ranked candidates with excluded tracks already removed.
    pub ranked: Vec<RankedCandidate>,
}

/// Turns quiz answers into one recommended track.
///
/// Holds no per-request state, a single instance serves all requests.
pub struct Recommender {
    catalog: Arc<dyn TrackCatalog>,
    classifier: Arc<dyn TextClassifier>,
    strategy: QueryStrategy,
    policy: ContentPolicy,
    top_k: usize,
}

impl Recommender {
    pub fn new(
        catalog: Arc<dyn TrackCatalog>,
        strategy: QueryStrategy,
        policy: ContentPolicy,
    ) -> Self {
        Self {
            catalog,
            classifier: Arc::new(KeywordClassifier::new(policy.clone())),
            strategy,
            policy,
            top_k: DEFAULT_TOP_K,
        }
    }

    pub fn with_classifier(mut self, classifier: Arc<dyn TextClassifier>) -> Self {
        self.classifier = classifier;
        self
    }

    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k.max(1);
        self
    }

    pub fn uses_generated_queries(&self) -> bool {
        self.strategy.is_generated()
    }

    pub fn signals(&self, answers: &QuizAnswers) -> QuerySignals {
        QuerySignals::derive(answers, self.classifier.as_ref())
    }

    /// Resolves the search query without touching the catalog.
    pub async fn resolve_query(&self, answers: &QuizAnswers) -> (QuerySignals, ResolvedQuery) {
        let signals = self.signals(answers);
        if signals.note_violates_policy {
            info!("Quiz note mentions blocked content, results will still be filtered");
        }
        let query = self.strategy.resolve(answers, &signals).await;
        metrics::record_query_source(query.source.as_str());
        (signals, query)
    }

    /// Searches the catalog and returns the ranked, policy-filtered candidates.
    pub async fn rank_candidates(
        &self,
        answers: &QuizAnswers,
    ) -> Result<RankedResults, RecommendError> {
        let (signals, query) = self.resolve_query(answers).await;
        info!(query = %query.text, source = query.source.as_str(), "Searching catalog");

        let found = self.catalog.search_tracks(&query.text).await?;
        if found.is_empty() {
            return Err(RecommendError::NoTracks);
        }

        let found_count = found.len();
        let allowed = self.policy.filter_blocked(found);
        metrics::record_blocked_candidates(found_count - allowed.len());
        if allowed.is_empty() {
            warn!(found = found_count, "Every candidate was blocked by the content policy");
            return Err(RecommendError::AllBlocked);
        }

        let in_era = filter_by_era(allowed, signals.effective_era);
        let ranked = rank(in_era, &answers.genres, signals.ukrainian_requested);
        let ranked = apply_exclusions(ranked, &answers.exclude_ids);
        debug!(
            candidates = ranked.len(),
            era = %signals.effective_era,
            ukrainian_requested = signals.ukrainian_requested,
            "Ranked candidates"
        );

        Ok(RankedResults {
            query,
            signals,
            ranked,
        })
    }

    /// Picks among the top ranked candidates with the given source of
    /// randomness.
    pub fn select<R: Rng + ?Sized>(
        &self,
        results: &RankedResults,
        rng: &mut R,
    ) -> Result<Recommendation, RecommendError> {
        let picked = pick_top_k(&results.ranked, self.top_k, rng).ok_or(RecommendError::NoTracks)?;
        Ok(Recommendation::from(&picked.candidate))
    }

    pub async fn recommend(&self, answers: &QuizAnswers) -> Result<Recommendation, RecommendError> {
        let span = tracing::info_span!("recommend", request_id = %uuid::Uuid::new_v4());
        async {
            let result = self
                .rank_candidates(answers)
                .await
                .and_then(|results| self.select(&results, &mut rand::rng()));
            match &result {
                Ok(rec) => {
                    info!(track_id = %rec.id, title = %rec.title, "Recommended track");
                    metrics::record_recommendation("success");
                }
                Err(err) => {
                    warn!(error = %err, "Recommendation failed");
                    metrics::record_recommendation(err.kind());
                }
            }
            result
        }
        .instrument(span)
        .await
    }
}
