use crate::models::{Comment, User};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

/// RepositoryError
///
/// Carries persistence gateway faults (connectivity loss, constraint violations, etc.)
/// up to the handler layer, where they are logged and mapped to a 500 response.
/// No retry logic exists anywhere; every operation is a single-attempt call.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Repository Trait
///
/// Defines the abstract contract for all persistence operations. This is the core
/// of the Repository Abstraction pattern, allowing the handlers to interact with
/// the data layer without knowing the specific implementation (Postgres, in-memory, mock).
///
/// **Send + Sync + async_trait** are required to make the trait object (`Arc<dyn Repository>`)
/// safely shareable and usable across Axum's asynchronous task boundaries.
#[async_trait]
pub trait Repository: Send + Sync {
    // --- Comment Resource ---
    // Retrieves every comment, in whatever order the store returns them.
    async fn list_comments(&self) -> Result<Vec<Comment>, RepositoryError>;
    async fn get_comment(&self, id: i64) -> Result<Option<Comment>, RepositoryError>;
    // The store assigns the identifier and timestamps.
    async fn create_comment(&self, text: String) -> Result<Comment, RepositoryError>;
    // Returns true if a row was updated, false if the id had no matching record.
    async fn update_comment(&self, id: i64, text: String) -> Result<bool, RepositoryError>;
    // Returns true if a row was removed, false if the id had no matching record.
    async fn delete_comment(&self, id: i64) -> Result<bool, RepositoryError>;

    // --- User/Auth ---
    // Existence of the user row is the final authentication criterion.
    async fn get_user(&self, id: Uuid) -> Option<User>;
}

/// RepositoryState
///
/// The concrete type used to share the persistence layer access across the application state.
pub type RepositoryState = Arc<dyn Repository>;

/// PostgresRepository
///
/// The concrete implementation of the `Repository` trait, backed by the PostgreSQL database.
pub struct PostgresRepository {
    pool: PgPool,
}

impl PostgresRepository {
    /// Creates a new repository instance using the initialized connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Repository for PostgresRepository {
    /// list_comments
    ///
    /// Retrieves all comment records. No ORDER BY clause: the listing endpoint makes
    /// no ordering guarantee, so the store's natural order is returned as-is.
    async fn list_comments(&self) -> Result<Vec<Comment>, RepositoryError> {
        let comments =
            sqlx::query_as::<_, Comment>("SELECT id, comment, created_at, updated_at FROM comments")
                .fetch_all(&self.pool)
                .await?;
        Ok(comments)
    }

    /// get_comment
    ///
    /// Simple retrieval of a comment by primary key.
    async fn get_comment(&self, id: i64) -> Result<Option<Comment>, RepositoryError> {
        let comment = sqlx::query_as::<_, Comment>(
            "SELECT id, comment, created_at, updated_at FROM comments WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(comment)
    }

    /// create_comment
    ///
    /// Inserts a new comment; the database assigns the BIGSERIAL id and both timestamps.
    /// RETURNING hands the full assigned row back in the same round-trip.
    async fn create_comment(&self, text: String) -> Result<Comment, RepositoryError> {
        let comment = sqlx::query_as::<_, Comment>(
            "INSERT INTO comments (comment, created_at, updated_at) VALUES ($1, NOW(), NOW()) RETURNING id, comment, created_at, updated_at",
        )
        .bind(text)
        .fetch_one(&self.pool)
        .await?;
        Ok(comment)
    }

    /// update_comment
    ///
    /// Replaces the comment text in place and bumps `updated_at`. The id is immutable.
    /// `rows_affected` distinguishes a successful update from a missing record.
    async fn update_comment(&self, id: i64, text: String) -> Result<bool, RepositoryError> {
        let result =
            sqlx::query("UPDATE comments SET comment = $2, updated_at = NOW() WHERE id = $1")
                .bind(id)
                .bind(text)
                .execute(&self.pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    /// delete_comment
    ///
    /// Permanently removes the record. No soft-delete.
    async fn delete_comment(&self, id: i64) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM comments WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// get_user
    ///
    /// Retrieves the user record needed by the authentication extractor. A database
    /// fault here is treated the same as a missing user: the request is rejected.
    async fn get_user(&self, id: Uuid) -> Option<User> {
        sqlx::query_as::<_, User>("SELECT id, email FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .unwrap_or_else(|e| {
                tracing::error!("get_user error: {:?}", e);
                None
            })
    }
}

/// InMemoryRepository
///
/// A HashMap-backed implementation used by the integration tests and available for
/// local development without a Postgres instance. Identifiers are assigned from a
/// monotonically increasing counter, mirroring the BIGSERIAL column.
///
/// Authentication note: `get_user` accepts any id, fabricating a matching user
/// record. This keeps the auth flow exercisable without seeding a users table.
#[derive(Default)]
pub struct InMemoryRepository {
    inner: Mutex<InMemoryState>,
}

#[derive(Default)]
struct InMemoryState {
    comments: HashMap<i64, Comment>,
    next_id: i64,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Repository for InMemoryRepository {
    async fn list_comments(&self) -> Result<Vec<Comment>, RepositoryError> {
        let state = self.inner.lock().unwrap();
        Ok(state.comments.values().cloned().collect())
    }

    async fn get_comment(&self, id: i64) -> Result<Option<Comment>, RepositoryError> {
        let state = self.inner.lock().unwrap();
        Ok(state.comments.get(&id).cloned())
    }

    async fn create_comment(&self, text: String) -> Result<Comment, RepositoryError> {
        let mut state = self.inner.lock().unwrap();
        state.next_id += 1;
        let now = Utc::now();
        let comment = Comment {
            id: state.next_id,
            comment: text,
            created_at: now,
            updated_at: now,
        };
        state.comments.insert(comment.id, comment.clone());
        Ok(comment)
    }

    async fn update_comment(&self, id: i64, text: String) -> Result<bool, RepositoryError> {
        let mut state = self.inner.lock().unwrap();
        match state.comments.get_mut(&id) {
            Some(comment) => {
                comment.comment = text;
                comment.updated_at = Utc::now();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_comment(&self, id: i64) -> Result<bool, RepositoryError> {
        let mut state = self.inner.lock().unwrap();
        Ok(state.comments.remove(&id).is_some())
    }

    async fn get_user(&self, id: Uuid) -> Option<User> {
        Some(User {
            id,
            email: format!("user-{}@local.test", id),
        })
    }
}
