use anyhow::{Context, Result};
use std::future::IntoFuture;
use std::time::Duration;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use tower_http::services::ServeDir;
use tracing::{debug, info};

use super::{log_requests, metrics::metrics_handler, state::*, ServerConfig};
use crate::quiz::QuizAnswers;
use crate::recommend::ErrorBody;

#[derive(Serialize)]
struct ServerStats {
    pub uptime: String,
    pub version: &'static str,
    pub llm_enabled: bool,
}

fn format_uptime(duration: Duration) -> String {
    let total_seconds = duration.as_secs();

    let days = total_seconds / 86_400;
    let hours = (total_seconds % 86_400) / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    format!("{}d {:02}:{:02}:{:02}", days, hours, minutes, seconds)
}

async fn home(State(state): State<ServerState>) -> impl IntoResponse {
    Json(ServerStats {
        uptime: format_uptime(state.start_time.elapsed()),
        version: env!("CARGO_PKG_VERSION"),
        llm_enabled: state.recommender.uses_generated_queries(),
    })
}

async fn health() -> StatusCode {
    StatusCode::OK
}

async fn recommend(
    State(recommender): State<GuardedRecommender>,
    payload: Result<Json<QuizAnswers>, JsonRejection>,
) -> Response {
    let answers = match payload {
        Ok(Json(answers)) => answers,
        Err(rejection) => {
            debug!("Rejected recommend body: {}", rejection.body_text());
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorBody::new(rejection.body_text())),
            )
                .into_response();
        }
    };

    match recommender.recommend(&answers).await {
        Ok(recommendation) => Json(recommendation).into_response(),
        Err(err) => err.into_response(),
    }
}

pub fn make_app(config: ServerConfig, recommender: GuardedRecommender) -> Router {
    let state = ServerState::new(config.clone(), recommender);

    let recommend_routes: Router = Router::new()
        .route("/v1/recommend", post(recommend))
        .route("/api/recommend", post(recommend))
        .route("/health", get(health))
        .with_state(state.clone());

    let home_router: Router = match config.frontend_dir_path {
        Some(frontend_path) => {
            let static_files_service =
                ServeDir::new(frontend_path).append_index_html_on_directories(true);
            Router::new().fallback_service(static_files_service)
        }
        None => Router::new().route("/", get(home)).with_state(state.clone()),
    };

    home_router
        .merge(recommend_routes)
        .layer(middleware::from_fn_with_state(state, log_requests))
}

fn make_metrics_app() -> Router {
    Router::new().route("/metrics", get(metrics_handler))
}

pub async fn run_server(config: ServerConfig, recommender: GuardedRecommender) -> Result<()> {
    let port = config.port;
    let metrics_port = config.metrics_port;
    let app = make_app(config, recommender);

    let listener = tokio::net::TcpListener::bind(format!("127.0.0.1:{}", port))
        .await
        .with_context(|| format!("Failed to bind port {}", port))?;
    let metrics_listener = tokio::net::TcpListener::bind(format!("127.0.0.1:{}", metrics_port))
        .await
        .with_context(|| format!("Failed to bind metrics port {}", metrics_port))?;

    info!("Ready to serve at port {}!", port);
    info!("Metrics available at port {}!", metrics_port);

    tokio::select! {
        result = axum::serve(listener, app).into_future() => result.context("HTTP server stopped")?,
        result = axum::serve(metrics_listener, make_metrics_app()).into_future() => {
            result.context("Metrics server stopped")?
        }
    }
    Ok(())
}
