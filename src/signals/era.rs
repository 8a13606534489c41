use crate::quiz::Era;
use lazy_static::lazy_static;
use regex::Regex;

fn compile(patterns: &[&str]) -> Vec<Regex> {
    patterns
        .iter()
        .map(|p| Regex::new(p).expect("invalid era pattern"))
        .collect()
}

lazy_static! {
    // Checked in order, the first group with a match wins.
    static ref ERA_PATTERNS: Vec<(Era, Vec<Regex>)> = vec![
        (
            Era::Eighties,
            compile(&[r"\b80s\b", r"\b1980s?\b", r"\b198\d\b", r"\b80-х\b", r"\b80х\b"]),
        ),
        (
            Era::Nineties,
            compile(&[r"\b90s\b", r"\b1990s?\b", r"\b199\d\b", r"\b90-х\b", r"\b90х\b"]),
        ),
        (
            Era::TwoThousands,
            compile(&[
                r"\b00s\b",
                r"\b2000s?\b",
                r"\b200\d\b",
                r"\b00-х\b",
                r"\b00х\b",
                r"\b2000-х\b",
                r"\b2000х\b",
            ]),
        ),
        (
            Era::TwentyTens,
            compile(&[r"\b2010s?\b", r"\b201\d\b", r"\b2010-х\b", r"\b2010х\b"]),
        ),
        (
            Era::TwentyTwenties,
            compile(&[r"\b2020s?\b", r"\b202\d\b", r"\b2020-х\b", r"\b2020х\b"]),
        ),
    ];
}

/// Finds a decade mentioned in the note.
pub fn infer_era(note: &str) -> Option<Era> {
    let note = note.to_lowercase();
    ERA_PATTERNS
        .iter()
        .find(|(_, patterns)| patterns.iter().any(|p| p.is_match(&note)))
        .map(|(era, _)| *era)
}

/// The era actually used for filtering: an explicit choice always wins,
/// the note is consulted only when the user picked `Any`.
pub fn effective_era(explicit: Era, inferred: Option<Era>) -> Era {
    match explicit {
        Era::Any => inferred.unwrap_or(Era::Any),
        explicit => explicit,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn infers_shorthand_decades() {
        assert_eq!(infer_era("some 80s synthwave"), Some(Era::Eighties));
        assert_eq!(infer_era("90s hip hop"), Some(Era::Nineties));
        assert_eq!(infer_era("00s pop punk"), Some(Era::TwoThousands));
    }

    #[test]
    fn infers_years() {
        assert_eq!(infer_era("like in 1994"), Some(Era::Nineties));
        assert_eq!(infer_era("the 1980s"), Some(Era::Eighties));
        assert_eq!(infer_era("summer 2015"), Some(Era::TwentyTens));
        assert_eq!(infer_era("2020s bangers"), Some(Era::TwentyTwenties));
    }

    #[test]
    fn infers_cyrillic_shorthand() {
        assert_eq!(infer_era("музика 90-х"), Some(Era::Nineties));
        assert_eq!(infer_era("щось з 80х"), Some(Era::Eighties));
        assert_eq!(infer_era("хіти 2000-х"), Some(Era::TwoThousands));
    }

    #[test]
    fn first_group_wins() {
        assert_eq!(infer_era("from 2021 back to 1985"), Some(Era::Eighties));
    }

    #[test]
    fn no_era_in_plain_text() {
        assert_eq!(infer_era("something calm"), None);
        assert_eq!(infer_era("track 1900"), None);
        assert_eq!(infer_era("190s"), None);
    }

    #[test]
    fn explicit_era_always_wins() {
        for explicit in [
            Era::Eighties,
            Era::Nineties,
            Era::TwoThousands,
            Era::TwentyTens,
            Era::TwentyTwenties,
        ] {
            assert_eq!(effective_era(explicit, infer_era("90s")), explicit);
            assert_eq!(effective_era(explicit, None), explicit);
        }
    }

    #[test]
    fn any_era_resolves_from_note() {
        assert_eq!(effective_era(Era::Any, infer_era("90s")), Era::Nineties);
        assert_eq!(effective_era(Era::Any, None), Era::Any);
    }
}
