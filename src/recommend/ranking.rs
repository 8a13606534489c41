//! Ordering and final selection of candidates.

use super::scoring::{genre_score, region_signal_score};
use super::{Candidate, RankedCandidate};
use crate::quiz::{Era, GenreTag};
use rand::seq::IndexedRandom;
use rand::Rng;
use std::cmp::Ordering;
use std::collections::HashSet;

pub const DEFAULT_TOP_K: usize = 5;

/// Keeps candidates released inside `era`. Candidates without a known year
/// always pass. If nothing survives, the input is returned unchanged.
pub fn filter_by_era(candidates: Vec<Candidate>, era: Era) -> Vec<Candidate> {
    if era == Era::Any {
        return candidates;
    }
    let in_era: Vec<Candidate> = candidates
        .iter()
        .filter(|c| era.contains_year(c.release_year))
        .cloned()
        .collect();
    if in_era.is_empty() {
        candidates
    } else {
        in_era
    }
}

fn compare(a: &RankedCandidate, b: &RankedCandidate, use_region: bool) -> Ordering {
    b.genre_score
        .cmp(&a.genre_score)
        .then_with(|| {
            if use_region {
                b.region_score.cmp(&a.region_score)
            } else {
                Ordering::Equal
            }
        })
        .then_with(|| b.popularity.cmp(&a.popularity))
}

/// Sorts by genre score, then Ukrainian affinity (only when it was
/// explicitly requested), then popularity. All keys descending; the sort is
/// stable so full ties keep catalog order.
pub fn rank(
    candidates: Vec<Candidate>,
    genres: &[GenreTag],
    ukrainian_requested: bool,
) -> Vec<RankedCandidate> {
    let mut ranked: Vec<RankedCandidate> = candidates
        .into_iter()
        .map(|candidate| RankedCandidate {
            genre_score: genre_score(&candidate, genres),
            region_score: if ukrainian_requested {
                region_signal_score(&candidate)
            } else {
                0
            },
            popularity: candidate.popularity,
            candidate,
        })
        .collect();
    ranked.sort_by(|a, b| compare(a, b, ukrainian_requested));
    ranked
}

/// Removes previously seen tracks, unless that would leave nothing.
pub fn apply_exclusions(
    ranked: Vec<RankedCandidate>,
    excluded: &HashSet<String>,
) -> Vec<RankedCandidate> {
    if excluded.is_empty() {
        return ranked;
    }
    let remaining: Vec<RankedCandidate> = ranked
        .iter()
        .filter(|r| !excluded.contains(&r.candidate.id))
        .cloned()
        .collect();
    if remaining.is_empty() {
        ranked
    } else {
        remaining
    }
}

/// Picks uniformly among the best `k` entries.
pub fn pick_top_k<'a, R: Rng + ?Sized>(
    ranked: &'a [RankedCandidate],
    k: usize,
    rng: &mut R,
) -> Option<&'a RankedCandidate> {
    let top = &ranked[..ranked.len().min(k.max(1))];
    top.choose(rng)
}
