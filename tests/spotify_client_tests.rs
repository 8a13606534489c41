//! Tests for the Spotify client against a local stub of the Web API

use axum::{
    extract::{Form, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use mood_recommender::spotify::{CatalogError, SpotifyClient, SpotifyConfig, TrackCatalog};
use serde_json::json;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

// base64("client-id:client-secret")
const EXPECTED_BASIC_AUTH: &str = "Basic Y2xpZW50LWlkOmNsaWVudC1zZWNyZXQ=";
const ACCESS_TOKEN: &str = "tok-123";

#[derive(Clone, Default)]
struct StubState {
    token_calls: Arc<Mutex<usize>>,
    searches: Arc<Mutex<Vec<HashMap<String, String>>>>,
    search_status: Option<StatusCode>,
    empty_results: bool,
}

async fn token(
    State(state): State<StubState>,
    headers: HeaderMap,
    Form(form): Form<HashMap<String, String>>,
) -> Response {
    *state.token_calls.lock().unwrap() += 1;
    let auth = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    if auth != EXPECTED_BASIC_AUTH {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": "invalid_client"})),
        )
            .into_response();
    }
    assert_eq!(form.get("grant_type").map(String::as_str), Some("client_credentials"));
    Json(json!({
        "access_token": ACCESS_TOKEN,
        "token_type": "Bearer",
        "expires_in": 3600
    }))
    .into_response()
}

async fn search(
    State(state): State<StubState>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let auth = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    assert_eq!(auth, format!("Bearer {}", ACCESS_TOKEN));
    state.searches.lock().unwrap().push(params);

    if let Some(status) = state.search_status {
        return (status, "API rate limit exceeded").into_response();
    }
    if state.empty_results {
        return Json(json!({})).into_response();
    }
    Json(json!({
        "tracks": {
            "items": [
                {
                    "id": "t1",
                    "name": "Night Drive",
                    "popularity": 71,
                    "artists": [{"name": "Synth Band"}, {"name": "Guest"}],
                    "album": {"name": "Neon", "release_date": "1987-06-01"},
                    "external_urls": {"spotify": "https://open.spotify.com/track/t1"}
                },
                {
                    "id": "t2",
                    "name": "Untitled",
                    "artists": [],
                    "album": {"name": "Demo", "release_date": "unknown"}
                }
            ]
        }
    }))
    .into_response()
}

async fn spawn_stub(state: StubState) -> String {
    let router = Router::new()
        .route("/api/token", post(token))
        .route("/v1/search", get(search))
        .with_state(state);
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

fn client_for(base_url: &str, client_id: &str) -> SpotifyClient {
    let mut config = SpotifyConfig::new(client_id, "client-secret");
    config.accounts_url = format!("{}/", base_url);
    config.api_url = base_url.to_string();
    SpotifyClient::new(config).unwrap()
}

#[tokio::test]
async fn test_search_maps_tracks_to_candidates() {
    let base_url = spawn_stub(StubState::default()).await;
    let client = client_for(&base_url, "client-id");

    let candidates = client.search_tracks("synthwave night").await.unwrap();
    assert_eq!(candidates.len(), 2);

    let first = &candidates[0];
    assert_eq!(first.id, "t1");
    assert_eq!(first.title.as_deref(), Some("Night Drive"));
    assert_eq!(first.artists, vec!["Synth Band", "Guest"]);
    assert_eq!(first.album.as_deref(), Some("Neon"));
    assert_eq!(first.release_year, Some(1987));
    assert_eq!(first.popularity, 71);
    assert_eq!(
        first.external_url.as_deref(),
        Some("https://open.spotify.com/track/t1")
    );

    let second = &candidates[1];
    assert_eq!(second.popularity, 0);
    assert_eq!(second.release_year, None);
    assert!(second.artists.is_empty());
    assert!(second.external_url.is_none());
}

#[tokio::test]
async fn test_search_sends_expected_parameters() {
    let state = StubState::default();
    let base_url = spawn_stub(state.clone()).await;
    let client = client_for(&base_url, "client-id");

    client.search_tracks("hip hop rap ukrainian ua").await.unwrap();

    let searches = state.searches.lock().unwrap();
    assert_eq!(searches.len(), 1);
    let params = &searches[0];
    assert_eq!(params["q"], "hip hop rap ukrainian ua");
    assert_eq!(params["type"], "track");
    assert_eq!(params["limit"], "50");
    assert_eq!(params["market"], "UA");
}

#[tokio::test]
async fn test_fresh_token_for_every_search() {
    let state = StubState::default();
    let base_url = spawn_stub(state.clone()).await;
    let client = client_for(&base_url, "client-id");

    client.search_tracks("one").await.unwrap();
    client.search_tracks("two").await.unwrap();

    assert_eq!(*state.token_calls.lock().unwrap(), 2);
}

#[tokio::test]
async fn test_token_failure_includes_upstream_body() {
    let state = StubState::default();
    let base_url = spawn_stub(state.clone()).await;
    let client = client_for(&base_url, "wrong-id");

    let err = client.search_tracks("anything").await.unwrap_err();
    match &err {
        CatalogError::Token(body) => assert!(body.contains("invalid_client")),
        other => panic!("unexpected error {:?}", other),
    }
    assert!(err.to_string().starts_with("Spotify token error"));
    assert!(state.searches.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_search_failure_includes_upstream_body() {
    let base_url = spawn_stub(StubState {
        search_status: Some(StatusCode::TOO_MANY_REQUESTS),
        ..Default::default()
    })
    .await;
    let client = client_for(&base_url, "client-id");

    let err = client.search_tracks("anything").await.unwrap_err();
    assert!(matches!(err, CatalogError::Search(_)));
    assert_eq!(
        err.to_string(),
        "Spotify search error: API rate limit exceeded"
    );
}

#[tokio::test]
async fn test_missing_tracks_object_is_empty() {
    let base_url = spawn_stub(StubState {
        empty_results: true,
        ..Default::default()
    })
    .await;
    let client = client_for(&base_url, "client-id");

    assert!(client.search_tracks("nothing").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_missing_credentials_fail_before_any_call() {
    let state = StubState::default();
    let base_url = spawn_stub(state.clone()).await;
    let client = client_for(&base_url, "");

    let err = client.search_tracks("anything").await.unwrap_err();
    assert!(matches!(err, CatalogError::MissingCredentials));
    assert_eq!(*state.token_calls.lock().unwrap(), 0);
}

#[tokio::test]
async fn test_transport_failure_is_token_error() {
    // Nothing listens on the discard port.
    let client = client_for("http://127.0.0.1:9", "client-id");

    let err = client.search_tracks("anything").await.unwrap_err();
    assert!(matches!(err, CatalogError::Token(_)));
}
