//! REST API for submitting solve requests.
//!
//! Provides two endpoints:
//! - `POST /solve` — accepts a [`crate::config::RequestDocument`] body, returns
//!   a [`crate::report::SolveReport`]
//! - `GET /health` — static liveness payload
//!
//! Stateless: each request builds and solves its own model, consistent with
//! this crate having no process-wide mutable state.

mod handlers;
mod types;

use std::net::SocketAddr;

use axum::Router;
use axum::routing::{get, post};

/// Builds the axum router with all API routes.
pub fn router() -> Router {
    Router::new()
        .route("/health", get(handlers::get_health))
        .route("/solve", post(handlers::post_solve))
}

/// Binds to the given address and serves the API.
///
/// # Panics
///
/// Panics if the TCP listener cannot bind to `addr`.
pub async fn serve(addr: SocketAddr) {
    let app = router();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind to {addr}: {e}"));
    eprintln!("API server listening on http://{addr}");
    axum::serve(listener, app)
        .await
        .unwrap_or_else(|e| panic!("server error: {e}"));
}
