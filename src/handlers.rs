use crate::{
    AppState,
    models::{Comment, CommentPayload, NotFoundBody, ValidationErrorBody},
    repository::RepositoryError,
};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};

/// repo_failure
///
/// Maps an unhandled persistence fault to a bodyless 500. The underlying error is
/// logged with full detail; the client receives only the status.
fn repo_failure(op: &str, e: RepositoryError) -> Response {
    tracing::error!("{} error: {:?}", op, e);
    StatusCode::INTERNAL_SERVER_ERROR.into_response()
}

// --- Handlers ---

/// list_comments
///
/// [Public Route] Lists every comment record. No pagination, filtering, or explicit
/// ordering: the response sequence is whatever the repository returns.
#[utoipa::path(
    get,
    path = "/comments",
    responses(
        (status = 200, description = "All comments", body = [Comment]),
        (status = 500, description = "Gateway fault")
    )
)]
pub async fn list_comments(State(state): State<AppState>) -> Response {
    match state.repo.list_comments().await {
        Ok(comments) => Json(comments).into_response(),
        Err(e) => repo_failure("list_comments", e),
    }
}

/// get_comment
///
/// [Public Route] Retrieves a single comment by ID.
///
/// A missing id yields a 404 with the standard not-found body, matching the
/// update/delete handlers (one consistent not-found policy across all by-id routes).
#[utoipa::path(
    get,
    path = "/comments/{id}",
    params(("id" = i64, Path, description = "Comment ID")),
    responses(
        (status = 200, description = "Found", body = Comment),
        (status = 404, description = "Not Found", body = NotFoundBody)
    )
)]
pub async fn get_comment(State(state): State<AppState>, Path(id): Path<i64>) -> Response {
    match state.repo.get_comment(id).await {
        Ok(Some(comment)) => Json(comment).into_response(),
        Ok(None) => (StatusCode::NOT_FOUND, Json(NotFoundBody::comment())).into_response(),
        Err(e) => repo_failure("get_comment", e),
    }
}

/// create_comment
///
/// [Authenticated Route] Persists a new comment and returns the created record,
/// including the server-assigned identifier.
///
/// *Validation*: The typed payload is validated before any repository call; a missing,
/// null, or empty `comment` field produces a 400 with the message list.
#[utoipa::path(
    post,
    path = "/comments",
    request_body = CommentPayload,
    responses(
        (status = 201, description = "Created", body = Comment),
        (status = 400, description = "Validation failure", body = ValidationErrorBody),
        (status = 401, description = "Unauthenticated")
    )
)]
pub async fn create_comment(
    State(state): State<AppState>,
    Json(payload): Json<CommentPayload>,
) -> Response {
    let text = match payload.validate() {
        Ok(text) => text,
        Err(errors) => {
            return (StatusCode::BAD_REQUEST, Json(ValidationErrorBody { errors }))
                .into_response();
        }
    };

    match state.repo.create_comment(text).await {
        Ok(comment) => (StatusCode::CREATED, Json(comment)).into_response(),
        Err(e) => repo_failure("create_comment", e),
    }
}

/// update_comment
///
/// [Authenticated Route] Replaces the comment text of an existing record.
///
/// *Ordering*: Validation runs before the existence check, so an invalid payload
/// against a missing id returns 400, and a valid payload against a missing id
/// returns 404 without touching the row.
#[utoipa::path(
    put,
    path = "/comments/{id}",
    params(("id" = i64, Path, description = "Comment ID")),
    request_body = CommentPayload,
    responses(
        (status = 204, description = "Updated"),
        (status = 400, description = "Validation failure", body = ValidationErrorBody),
        (status = 401, description = "Unauthenticated"),
        (status = 404, description = "Not Found", body = NotFoundBody)
    )
)]
pub async fn update_comment(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<CommentPayload>,
) -> Response {
    let text = match payload.validate() {
        Ok(text) => text,
        Err(errors) => {
            return (StatusCode::BAD_REQUEST, Json(ValidationErrorBody { errors }))
                .into_response();
        }
    };

    match state.repo.update_comment(id, text).await {
        Ok(true) => StatusCode::NO_CONTENT.into_response(),
        Ok(false) => (StatusCode::NOT_FOUND, Json(NotFoundBody::comment())).into_response(),
        Err(e) => repo_failure("update_comment", e),
    }
}

/// delete_comment
///
/// [Authenticated Route] Permanently removes a comment. No soft-delete.
#[utoipa::path(
    delete,
    path = "/comments/{id}",
    params(("id" = i64, Path, description = "Comment ID")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 401, description = "Unauthenticated"),
        (status = 404, description = "Not Found", body = NotFoundBody)
    )
)]
pub async fn delete_comment(State(state): State<AppState>, Path(id): Path<i64>) -> Response {
    match state.repo.delete_comment(id).await {
        Ok(true) => StatusCode::NO_CONTENT.into_response(),
        Ok(false) => (StatusCode::NOT_FOUND, Json(NotFoundBody::comment())).into_response(),
        Err(e) => repo_failure("delete_comment", e),
    }
}
