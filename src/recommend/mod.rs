//! Recommendation pipeline: query building, catalog search, policy
//! filtering, ranking and the final randomized pick.

mod error;
mod models;
mod query;
mod ranking;
mod recommender;
mod scoring;

pub use error::{ErrorBody, RecommendError};
pub use models::{Candidate, RankedCandidate, Recommendation};
pub use query::{
    build_fallback_query, QueryGenerationError, QueryGenerator, QuerySignals, QuerySource,
    QueryStrategy, ResolvedQuery,
};
pub use ranking::{apply_exclusions, filter_by_era, pick_top_k, rank, DEFAULT_TOP_K};
pub use recommender::{RankedResults, Recommender};
pub use scoring::{genre_score, region_signal_score};
