//! Track search against the Spotify Web API.

mod client;
mod models;

#[cfg(test)]
pub use client::MockTrackCatalog;
pub use client::{
    CatalogError, SpotifyClient, SpotifyConfig, TrackCatalog, SPOTIFY_ACCOUNTS_URL,
    SPOTIFY_API_URL,
};
pub use models::{ExternalUrls, SpotifyAlbum, SpotifyArtist, SpotifyTrack};
