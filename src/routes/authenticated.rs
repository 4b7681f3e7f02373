use crate::{AppState, handlers};
use axum::{
    Router,
    routing::{delete, post, put},
};

/// Authenticated Router Module
///
/// Defines the mutating routes of the comment resource. This module must be wrapped
/// in the `auth_middleware` route layer (see `create_router`), which runs the
/// `AuthUser` extractor before any of these handlers execute. An unauthenticated
/// request is therefore rejected with 401 before the repository is ever touched.
pub fn authenticated_routes() -> Router<AppState> {
    Router::<AppState>::new()
        // POST /comments
        // Persists a new comment after payload validation; returns the created record.
        .route("/comments", post(handlers::create_comment))
        // PUT /comments/{id}
        // Replaces the comment text. Validation runs before the existence check.
        .route("/comments/{id}", put(handlers::update_comment))
        // DELETE /comments/{id}
        // Permanently removes the comment.
        .route("/comments/{id}", delete(handlers::delete_comment))
}
