use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashSet;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoodLevel {
    Low,
    Medium,
    High,
}

impl MoodLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            MoodLevel::Low => "Low",
            MoodLevel::Medium => "Medium",
            MoodLevel::High => "High",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tone {
    Happy,
    Sad,
    Angry,
    Calm,
}

impl Tone {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tone::Happy => "Happy",
            Tone::Sad => "Sad",
            Tone::Angry => "Angry",
            Tone::Calm => "Calm",
        }
    }
}

/// Who the user is listening with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SocialContext {
    Alone,
    #[serde(rename = "In pair")]
    InPair,
    #[serde(rename = "With company")]
    WithCompany,
}

impl SocialContext {
    pub fn as_str(&self) -> &'static str {
        match self {
            SocialContext::Alone => "Alone",
            SocialContext::InPair => "In pair",
            SocialContext::WithCompany => "With company",
        }
    }

    /// Descriptor appended to search queries.
    pub fn query_descriptor(&self) -> &'static str {
        match self {
            SocialContext::Alone => "solo",
            SocialContext::InPair => "romantic",
            SocialContext::WithCompany => "party",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GenreTag {
    Electronic,
    Techno,
    House,
    #[serde(rename = "Drum & Bass")]
    DrumAndBass,
    #[serde(rename = "Hip-Hop")]
    HipHop,
    Pop,
    Rock,
    Classical,
    Instrumental,
    Ambient,
    Jazz,
    Metal,
    Chill,
}

impl GenreTag {
    pub const ALL: [GenreTag; 13] = [
        GenreTag::Electronic,
        GenreTag::Techno,
        GenreTag::House,
        GenreTag::DrumAndBass,
        GenreTag::HipHop,
        GenreTag::Pop,
        GenreTag::Rock,
        GenreTag::Classical,
        GenreTag::Instrumental,
        GenreTag::Ambient,
        GenreTag::Jazz,
        GenreTag::Metal,
        GenreTag::Chill,
    ];

    /// The label used by the quiz UI.
    pub fn label(&self) -> &'static str {
        match self {
            GenreTag::Electronic => "Electronic",
            GenreTag::Techno => "Techno",
            GenreTag::House => "House",
            GenreTag::DrumAndBass => "Drum & Bass",
            GenreTag::HipHop => "Hip-Hop",
            GenreTag::Pop => "Pop",
            GenreTag::Rock => "Rock",
            GenreTag::Classical => "Classical",
            GenreTag::Instrumental => "Instrumental",
            GenreTag::Ambient => "Ambient",
            GenreTag::Jazz => "Jazz",
            GenreTag::Metal => "Metal",
            GenreTag::Chill => "Chill",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        Self::ALL
            .into_iter()
            .find(|g| g.label().eq_ignore_ascii_case(label))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Era {
    #[default]
    Any,
    #[serde(rename = "1980s")]
    Eighties,
    #[serde(rename = "1990s")]
    Nineties,
    #[serde(rename = "2000s")]
    TwoThousands,
    #[serde(rename = "2010s")]
    TwentyTens,
    #[serde(rename = "2020s")]
    TwentyTwenties,
}

impl Era {
    pub fn as_str(&self) -> &'static str {
        match self {
            Era::Any => "Any",
            Era::Eighties => "1980s",
            Era::Nineties => "1990s",
            Era::TwoThousands => "2000s",
            Era::TwentyTens => "2010s",
            Era::TwentyTwenties => "2020s",
        }
    }

    /// Inclusive year range covered by the era, `None` for `Any`.
    pub fn year_range(&self) -> Option<(i32, i32)> {
        match self {
            Era::Any => None,
            Era::Eighties => Some((1980, 1989)),
            Era::Nineties => Some((1990, 1999)),
            Era::TwoThousands => Some((2000, 2009)),
            Era::TwentyTens => Some((2010, 2019)),
            Era::TwentyTwenties => Some((2020, 2029)),
        }
    }

    /// Unknown years always match.
    pub fn contains_year(&self, year: Option<i32>) -> bool {
        match (self.year_range(), year) {
            (Some((from, to)), Some(year)) => year >= from && year <= to,
            _ => true,
        }
    }
}

impl std::fmt::Display for Era {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Answers submitted through the mood quiz.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizAnswers {
    pub mood_level: MoodLevel,
    pub tone: Tone,
    pub context: SocialContext,
    #[serde(default, deserialize_with = "null_as_default")]
    pub note: String,
    #[serde(default, deserialize_with = "deserialize_genres")]
    pub genres: Vec<GenreTag>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub era: Era,
    #[serde(
        default,
        rename = "excludeTrackIds",
        deserialize_with = "null_as_default"
    )]
    pub exclude_ids: HashSet<String>,
}

impl QuizAnswers {
    pub fn new(mood_level: MoodLevel, tone: Tone, context: SocialContext) -> Self {
        Self {
            mood_level,
            tone,
            context,
            note: String::new(),
            genres: vec![],
            era: Era::Any,
            exclude_ids: HashSet::new(),
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = note.into();
        self
    }

    pub fn with_genres(mut self, genres: impl IntoIterator<Item = GenreTag>) -> Self {
        self.genres = dedup_genres(genres);
        self
    }

    pub fn with_era(mut self, era: Era) -> Self {
        self.era = era;
        self
    }

    pub fn with_excluded<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude_ids = ids.into_iter().map(Into::into).collect();
        self
    }
}

fn dedup_genres(genres: impl IntoIterator<Item = GenreTag>) -> Vec<GenreTag> {
    let mut seen = HashSet::new();
    genres.into_iter().filter(|g| seen.insert(*g)).collect()
}

/// Treats an explicit `null` the same as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Unknown genre labels are dropped rather than failing the whole request.
fn deserialize_genres<'de, D>(deserializer: D) -> Result<Vec<GenreTag>, D::Error>
where
    D: Deserializer<'de>,
{
    let labels = Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default();
    let genres = labels.iter().filter_map(|label| {
        let genre = GenreTag::from_label(label);
        if genre.is_none() {
            debug!(label = %label, "Ignoring unknown genre");
        }
        genre
    });
    Ok(dedup_genres(genres))
}
