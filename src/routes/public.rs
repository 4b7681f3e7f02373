use crate::{AppState, handlers};
use axum::{Router, routing::get};

/// Public Router Module
///
/// Defines endpoints that are **unauthenticated** and accessible to any client
/// (anonymous or logged-in). These routes handle read-only data access plus the
/// health probe.
pub fn public_routes() -> Router<AppState> {
    Router::new()
        // GET /health
        // A simple, unauthenticated endpoint used for monitoring and load balancer checks.
        // Returns "ok" immediately to verify the service is running and responsive.
        .route("/health", get(|| async { "ok" }))
        // GET /comments
        // Lists every comment. No pagination or filtering; order is unspecified.
        .route("/comments", get(handlers::list_comments))
        // GET /comments/{id}
        // Retrieves a single comment; 404 with the standard body when absent.
        .route("/comments/{id}", get(handlers::get_comment))
}
