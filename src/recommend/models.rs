use serde::Serialize;

const TRACK_URL_BASE: &str = "https://open.spotify.com/track/";

/// A track returned by the catalog search, eligible for ranking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub id: String,
    pub title: Option<String>,
    pub artists: Vec<String>,
    pub album: Option<String>,
    pub release_year: Option<i32>,
    pub popularity: u32,
    pub external_url: Option<String>,
}

impl Candidate {
    /// Title, album and artist names, lowercased and space separated.
    pub fn gathered_text(&self) -> String {
        let mut parts: Vec<&str> = Vec::with_capacity(self.artists.len() + 2);
        if let Some(title) = self.title.as_deref() {
            parts.push(title);
        }
        if let Some(album) = self.album.as_deref() {
            parts.push(album);
        }
        parts.extend(self.artists.iter().map(String::as_str));
        parts.join(" ").to_lowercase()
    }
}

/// A candidate together with the keys it was ranked by.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedCandidate {
    pub candidate: Candidate,
    pub genre_score: i32,
    pub region_score: i32,
    pub popularity: u32,
}

/// Response body of a successful recommendation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub id: String,
    pub title: String,
    pub artist: String,
    pub spotify_url: String,
}

impl From<&Candidate> for Recommendation {
    fn from(candidate: &Candidate) -> Self {
        let artist = candidate
            .artists
            .iter()
            .filter(|name| !name.is_empty())
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ");
        Recommendation {
            id: candidate.id.clone(),
            title: candidate
                .title
                .clone()
                .filter(|title| !title.is_empty())
                .unwrap_or_else(|| "Unknown title".to_string()),
            artist,
            spotify_url: candidate
                .external_url
                .clone()
                .filter(|url| !url.is_empty())
                .unwrap_or_else(|| format!("{}{}", TRACK_URL_BASE, candidate.id)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bare(id: &str) -> Candidate {
        Candidate {
            id: id.to_string(),
            title: None,
            artists: vec![],
            album: None,
            release_year: None,
            popularity: 0,
            external_url: None,
        }
    }

    #[test]
    fn gathered_text_joins_and_lowercases() {
        let candidate = Candidate {
            title: Some("Night DRIVE".to_string()),
            album: Some("Techno Tales".to_string()),
            artists: vec!["DJ One".to_string(), "MC Two".to_string()],
            ..bare("1")
        };
        assert_eq!(candidate.gathered_text(), "night drive techno tales dj one mc two");
        assert_eq!(bare("2").gathered_text(), "");
    }

    #[test]
    fn recommendation_defaults() {
        let rec = Recommendation::from(&bare("abc"));
        assert_eq!(rec.title, "Unknown title");
        assert_eq!(rec.artist, "");
        assert_eq!(rec.spotify_url, "https://open.spotify.com/track/abc");

        let json = serde_json::to_value(&rec).unwrap();
        assert!(json.get("spotifyUrl").is_some());
    }

    #[test]
    fn empty_title_and_url_use_defaults() {
        let candidate = Candidate {
            title: Some(String::new()),
            external_url: Some(String::new()),
            ..bare("xyz")
        };
        let rec = Recommendation::from(&candidate);
        assert_eq!(rec.title, "Unknown title");
        assert_eq!(rec.spotify_url, "https://open.spotify.com/track/xyz");
    }

    #[test]
    fn recommendation_joins_artists() {
        let candidate = Candidate {
            title: Some("Song".to_string()),
            artists: vec!["A".to_string(), String::new(), "B".to_string()],
            external_url: Some("https://example.com/t/1".to_string()),
            ..bare("1")
        };
        let rec = Recommendation::from(&candidate);
        assert_eq!(rec.artist, "A, B");
        assert_eq!(rec.spotify_url, "https://example.com/t/1");
    }
}
