//! Test server lifecycle management
//!
//! Each test gets an isolated server on a random port, backed by fake
//! catalog and text generation services.

use super::constants::*;
use super::fixtures::{FakeCatalog, FakeLlm};
use mood_recommender::llm::CompletionOptions;
use mood_recommender::policy::ContentPolicy;
use mood_recommender::recommend::{QueryGenerator, QueryStrategy, Recommender};
use mood_recommender::server::{make_app, RequestsLoggingLevel, ServerConfig};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;

/// When dropped, the server gracefully shuts down.
pub struct TestServer {
    /// Base URL for making requests (e.g., "http://127.0.0.1:12345")
    pub base_url: String,

    pub port: u16,

    /// The catalog the server searches, for inspecting received queries
    pub catalog: Arc<FakeCatalog>,

    _shutdown_tx: Option<tokio::sync::oneshot::Sender<()>>,
}

impl TestServer {
    /// Spawns a server that always builds queries deterministically.
    pub async fn spawn(catalog: FakeCatalog) -> Self {
        Self::spawn_with_strategy(Arc::new(catalog), |_| QueryStrategy::Deterministic).await
    }

    /// Spawns a server that asks `llm` for the search query first.
    pub async fn spawn_with_llm(catalog: FakeCatalog, llm: Arc<FakeLlm>) -> Self {
        Self::spawn_with_strategy(Arc::new(catalog), move |policy| {
            QueryStrategy::Generated(QueryGenerator::new(
                llm,
                policy,
                CompletionOptions::default(),
            ))
        })
        .await
    }

    async fn spawn_with_strategy<F>(catalog: Arc<FakeCatalog>, strategy: F) -> Self
    where
        F: FnOnce(ContentPolicy) -> QueryStrategy,
    {
        let policy = ContentPolicy::default();
        let recommender = Recommender::new(catalog.clone(), strategy(policy.clone()), policy);

        // Bind to random port
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to random port");
        let port = listener
            .local_addr()
            .expect("Failed to get local address")
            .port();
        let base_url = format!("http://127.0.0.1:{}", port);

        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();

        let config = ServerConfig {
            port,
            metrics_port: 0,
            requests_logging_level: RequestsLoggingLevel::None,
            frontend_dir_path: None,
        };
        let app = make_app(config, Arc::new(recommender));

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    shutdown_rx.await.ok();
                })
                .await
                .expect("Server failed");
        });

        let server = Self {
            base_url,
            port,
            catalog,
            _shutdown_tx: Some(shutdown_tx),
        };

        server.wait_for_ready().await;

        server
    }

    /// Waits for the server to become ready by polling the /health endpoint
    async fn wait_for_ready(&self) {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(100))
            .build()
            .expect("Failed to build reqwest client");

        let start = std::time::Instant::now();
        let timeout = Duration::from_millis(SERVER_READY_TIMEOUT_MS);

        loop {
            if start.elapsed() > timeout {
                panic!(
                    "Server did not become ready within {}ms",
                    SERVER_READY_TIMEOUT_MS
                );
            }

            match client.get(format!("{}/health", self.base_url)).send().await {
                Ok(response) if response.status().is_success() => return,
                _ => {
                    tokio::time::sleep(Duration::from_millis(SERVER_READY_POLL_INTERVAL_MS)).await;
                }
            }
        }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(tx) = self._shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}
