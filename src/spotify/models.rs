//! Wire types of the Spotify Web API, reduced to the fields we read.

use crate::recommend::Candidate;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub(super) struct TokenResponse {
    pub access_token: String,
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct SearchResponse {
    #[serde(default)]
    pub tracks: Option<TrackPage>,
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct TrackPage {
    #[serde(default)]
    pub items: Vec<SpotifyTrack>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SpotifyTrack {
    pub id: String,
    pub name: Option<String>,
    pub popularity: Option<u32>,
    #[serde(default)]
    pub artists: Vec<SpotifyArtist>,
    pub album: Option<SpotifyAlbum>,
    pub external_urls: Option<ExternalUrls>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SpotifyArtist {
    pub name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SpotifyAlbum {
    pub name: Option<String>,
    /// "YYYY", "YYYY-MM" or "YYYY-MM-DD" depending on precision.
    pub release_date: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExternalUrls {
    pub spotify: Option<String>,
}

/// Year prefix of a release date, `None` when missing or malformed.
/// Spotify uses "0000" for unknown dates.
pub(crate) fn parse_release_year(date: &str) -> Option<i32> {
    date.get(..4)?.parse::<i32>().ok().filter(|year| *year > 0)
}

impl From<SpotifyTrack> for Candidate {
    fn from(track: SpotifyTrack) -> Self {
        let (album, release_year) = match track.album {
            Some(album) => {
                let year = album.release_date.as_deref().and_then(parse_release_year);
                (album.name, year)
            }
            None => (None, None),
        };
        Candidate {
            id: track.id,
            title: track.name,
            artists: track.artists.into_iter().filter_map(|a| a.name).collect(),
            album,
            release_year,
            popularity: track.popularity.unwrap_or(0),
            external_url: track.external_urls.and_then(|u| u.spotify),
        }
    }
}
