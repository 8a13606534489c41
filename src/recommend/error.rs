use crate::spotify::CatalogError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RecommendError {
    #[error("{0}")]
    Configuration(String),

    #[error("{0}")]
    Upstream(String),

    #[error("No tracks found for this mood")]
    NoTracks,

    #[error("No non-blocked tracks found for this query")]
    AllBlocked,
}

impl RecommendError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            RecommendError::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
            RecommendError::Upstream(_) => StatusCode::BAD_GATEWAY,
            RecommendError::NoTracks | RecommendError::AllBlocked => StatusCode::NOT_FOUND,
        }
    }

    /// Label used for metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            RecommendError::Configuration(_) => "configuration",
            RecommendError::Upstream(_) => "upstream",
            RecommendError::NoTracks => "no_tracks",
            RecommendError::AllBlocked => "all_blocked",
        }
    }
}

impl From<CatalogError> for RecommendError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::MissingCredentials => RecommendError::Configuration(err.to_string()),
            CatalogError::Token(_) | CatalogError::Search(_) => {
                RecommendError::Upstream(err.to_string())
            }
        }
    }
}

/// JSON body of every error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

impl IntoResponse for RecommendError {
    fn into_response(self) -> Response {
        (self.status_code(), Json(ErrorBody::new(self.to_string()))).into_response()
    }
}
