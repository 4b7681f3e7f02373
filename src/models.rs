use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use ts_rs::TS;
use utoipa::ToSchema;
use uuid::Uuid;

// --- Core Application Schemas (Mapped to Database) ---

/// User
///
/// Represents the user's canonical identity record stored in the `public.users` table.
/// This structure includes the minimal required data resolved during authentication.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, FromRow, Default)]
#[ts(export)]
pub struct User {
    // Primary Key, also the subject carried in the JWT `sub` claim.
    pub id: Uuid,
    // The user's primary identifier.
    pub email: String,
}

/// Comment
///
/// Represents a comment record from the `public.comments` table.
/// This is the primary data structure for the resource controller.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, FromRow, Default)]
#[ts(export)]
pub struct Comment {
    // Using BigInt (i64) for comment ID due to the high volume potential.
    pub id: i64,
    pub comment: String,

    // Timestamp handling for database integration and JSON serialization.
    #[ts(type = "string")]
    pub created_at: DateTime<Utc>,
    #[ts(type = "string")]
    pub updated_at: DateTime<Utc>,
}

/// --- Request Payloads (Input Schemas) ---

/// CommentPayload
///
/// Typed request body for creating or updating a comment (POST /comments, PUT /comments/{id}).
///
/// The field is deliberately `Option<String>` so that an absent key and an explicit
/// `null` both deserialize without a rejection; presence is then enforced by
/// `validate()`, which produces the user-facing message list instead of a serde error.
/// Unknown body fields are dropped during deserialization and never reach the
/// repository (explicit field allow-list).
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct CommentPayload {
    #[serde(default)]
    pub comment: Option<String>,
}

impl CommentPayload {
    /// validate
    ///
    /// Enforces the single validation rule of this resource: the `comment` field must
    /// be present and non-empty. An absent key, an explicit `null`, and an empty string
    /// all fail the same rule; whitespace-only strings pass (presence check only).
    ///
    /// Returns the comment text on success, or the list of human-readable messages
    /// (one per failed rule) used to build the 400 response body.
    pub fn validate(&self) -> Result<String, Vec<String>> {
        match self.comment.as_deref() {
            Some(text) if !text.is_empty() => Ok(text.to_string()),
            _ => Err(vec![r#"Please provide a value for "comment""#.to_string()]),
        }
    }
}

/// --- Error Bodies (Output Schemas) ---

/// ValidationErrorBody
///
/// Output schema for a 400 response: one message per failed validation rule.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct ValidationErrorBody {
    pub errors: Vec<String>,
}

/// NotFoundBody
///
/// Output schema for a 404 response on the by-id routes.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct NotFoundBody {
    pub message: String,
}

impl NotFoundBody {
    /// The single descriptive message used by all by-id routes.
    pub fn comment() -> Self {
        Self {
            message: "Comment not found".to_string(),
        }
    }
}
