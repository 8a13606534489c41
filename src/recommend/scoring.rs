//! Keyword scores computed from a candidate's gathered text.
//!
//! Scores are plain sums with no normalization: a candidate matching more
//! keywords of more selected genres ranks higher.

use super::Candidate;
use crate::quiz::GenreTag;

/// Adds `weight` once if the text contains any of `any_of`.
struct KeywordWeight {
    any_of: &'static [&'static str],
    weight: i32,
}

const fn kw(any_of: &'static [&'static str], weight: i32) -> KeywordWeight {
    KeywordWeight { any_of, weight }
}

const CLASSICAL: &[KeywordWeight] = &[
    kw(&["classical"], 10),
    kw(&["piano"], 6),
    kw(&["orchestra"], 6),
    kw(&["symphony"], 6),
    kw(&["concerto"], 6),
    kw(&["instrumental"], 4),
];

const CHILL: &[KeywordWeight] = &[
    kw(&["chill"], 10),
    kw(&["relax"], 8),
    kw(&["lofi", "lo-fi"], 7),
    kw(&["ambient"], 5),
    kw(&["downtempo"], 5),
];

const INSTRUMENTAL: &[KeywordWeight] = &[kw(&["instrumental"], 8), kw(&["piano"], 4)];
const AMBIENT: &[KeywordWeight] = &[kw(&["ambient"], 9)];
const HIP_HOP: &[KeywordWeight] = &[kw(&["hip hop", "hip-hop"], 9), kw(&["rap"], 7)];
const DRUM_AND_BASS: &[KeywordWeight] = &[
    kw(&["drum and bass", "drum & bass", "dnb"], 9),
    kw(&["liquid"], 5),
];
const TECHNO: &[KeywordWeight] = &[kw(&["techno"], 9)];
const HOUSE: &[KeywordWeight] = &[kw(&["house"], 9)];
const ELECTRONIC: &[KeywordWeight] = &[kw(&["electronic"], 7), kw(&["edm"], 5)];
const ROCK: &[KeywordWeight] = &[kw(&["rock"], 8)];
const POP: &[KeywordWeight] = &[kw(&["pop"], 7)];
const JAZZ: &[KeywordWeight] = &[kw(&["jazz"], 9)];
const METAL: &[KeywordWeight] = &[kw(&["metal"], 9)];

fn genre_keywords(genre: GenreTag) -> &'static [KeywordWeight] {
    match genre {
        GenreTag::Classical => CLASSICAL,
        GenreTag::Chill => CHILL,
        GenreTag::Instrumental => INSTRUMENTAL,
        GenreTag::Ambient => AMBIENT,
        GenreTag::HipHop => HIP_HOP,
        GenreTag::DrumAndBass => DRUM_AND_BASS,
        GenreTag::Techno => TECHNO,
        GenreTag::House => HOUSE,
        GenreTag::Electronic => ELECTRONIC,
        GenreTag::Rock => ROCK,
        GenreTag::Pop => POP,
        GenreTag::Jazz => JAZZ,
        GenreTag::Metal => METAL,
    }
}

fn genre_score_for_text(text: &str, genres: &[GenreTag]) -> i32 {
    genres
        .iter()
        .flat_map(|g| genre_keywords(*g))
        .filter(|k| k.any_of.iter().any(|word| text.contains(word)))
        .map(|k| k.weight)
        .sum()
}

/// Genre affinity of a candidate. Unselected genres contribute nothing.
pub fn genre_score(candidate: &Candidate, genres: &[GenreTag]) -> i32 {
    if genres.is_empty() {
        return 0;
    }
    genre_score_for_text(&candidate.gathered_text(), genres)
}

const UKRAINIAN_LETTERS: &[char] = &['і', 'ї', 'ґ'];

fn region_score_for_text(text: &str) -> i32 {
    let mut score = 0;
    if text.contains("ukrain") {
        score += 6;
    }
    if text.contains("\u{0443}\u{043a}\u{0440}\u{0430}\u{0457}\u{043d}") {
        // україн
        score += 6;
    }
    if text.chars().any(|c| UKRAINIAN_LETTERS.contains(&c)) {
        score += 3;
    }
    score
}

/// Textual Ukrainian affinity of a candidate.
///
/// Only meaningful when the note explicitly asked for Ukrainian music; the
/// ranking ignores it otherwise.
pub fn region_signal_score(candidate: &Candidate) -> i32 {
    region_score_for_text(&candidate.gathered_text())
}
