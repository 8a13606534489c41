//! Common test infrastructure
//!
//! Tests should only import from this module, not from internal submodules.
//!
//! # Example
//!
//! ```no_run
//! mod common;
//! use common::{quiz_body, track, FakeCatalog, TestClient, TestServer};
//! use reqwest::StatusCode;
//!
//! #[tokio::test]
//! async fn test_recommend() {
//!     let catalog = FakeCatalog::returning(vec![track("1", "Song", "Album", 10)]);
//!     let server = TestServer::spawn(catalog).await;
//!     let client = TestClient::new(server.base_url.clone());
//!
//!     let response = client.recommend(&quiz_body("", &[], "Any", &[])).await;
//!     assert_eq!(response.status(), StatusCode::OK);
//! }
//! ```

mod client;
mod constants;
mod fixtures;
mod server;

// Public API - this is what tests import
#[allow(unused_imports)]
pub use client::TestClient;
#[allow(unused_imports)]
pub use constants::*;
#[allow(unused_imports)]
pub use fixtures::{quiz_body, track, FakeCatalog, FakeLlm};
#[allow(unused_imports)]
pub use server::TestServer;
