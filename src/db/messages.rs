//! Message database queries.
//!
//! Messages are the journal entries themselves. They are never hard-deleted;
//! the archived flag is a soft marker and the pinned flag marks importance.
//! Both are toggled in place; content and timestamp never change after
//! creation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::{Error, Result};

use super::DbPool;

// ============================================================================
// Types
// ============================================================================

/// Author of a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
}

impl MessageRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "user" => Some(Self::User),
            "assistant" => Some(Self::Assistant),
            _ => None,
        }
    }
}

/// Message record from the database.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Message {
    pub id: i64,
    pub content: String,
    pub role: String,
    pub project_id: Option<i64>,
    pub timestamp: DateTime<Utc>,
    pub pinned: bool,
    pub archived: bool,
}

/// Input for appending a new message.
#[derive(Debug, Clone)]
pub struct CreateMessage {
    pub content: String,
    pub role: MessageRole,
    pub project_id: Option<i64>,
}

// ============================================================================
// Queries
// ============================================================================

/// Append a new message.
///
/// The timestamp is set at creation and never changed; pinned and archived
/// start false. A project reference, if given, must point at an existing
/// project.
pub async fn create_message(pool: &DbPool, input: CreateMessage) -> Result<Message> {
    if input.content.trim().is_empty() {
        return Err(Error::Validation("Message content must not be empty".into()));
    }

    sqlx::query_as::<_, Message>(
        r#"
        INSERT INTO messages (content, role, project_id, timestamp, pinned, archived)
        VALUES (?, ?, ?, ?, 0, 0)
        RETURNING *
        "#,
    )
    .bind(&input.content)
    .bind(input.role.as_str())
    .bind(input.project_id)
    .bind(Utc::now())
    .fetch_one(pool)
    .await
    .map_err(|e| match e {
        sqlx::Error::Database(ref db_err) if db_err.is_foreign_key_violation() => {
            Error::Validation("project_id does not reference an existing project".into())
        }
        _ => Error::Database(e),
    })
}

/// Get a message by ID.
pub async fn get_message(pool: &DbPool, id: i64) -> Result<Message> {
    sqlx::query_as::<_, Message>("SELECT * FROM messages WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| Error::NotFound(format!("Message not found: {}", id)))
}

/// Set the pinned flag on a message. Idempotent.
pub async fn set_pinned(pool: &DbPool, id: i64, pinned: bool) -> Result<Message> {
    sqlx::query_as::<_, Message>(
        r#"
        UPDATE messages SET pinned = ?
        WHERE id = ?
        RETURNING *
        "#,
    )
    .bind(pinned)
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| Error::NotFound(format!("Message not found: {}", id)))
}

/// Set the archived flag on a message. Idempotent.
pub async fn set_archived(pool: &DbPool, id: i64, archived: bool) -> Result<Message> {
    sqlx::query_as::<_, Message>(
        r#"
        UPDATE messages SET archived = ?
        WHERE id = ?
        RETURNING *
        "#,
    )
    .bind(archived)
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| Error::NotFound(format!("Message not found: {}", id)))
}

/// List all messages in insertion order.
///
/// This is the full collection the filter engine works on; ordering here is
/// what makes its timestamp sort tie-break stable.
pub async fn list_messages(pool: &DbPool) -> Result<Vec<Message>> {
    sqlx::query_as::<_, Message>("SELECT * FROM messages ORDER BY id ASC")
        .fetch_all(pool)
        .await
        .map_err(Error::Database)
}

/// Count total messages.
pub async fn count_messages(pool: &DbPool) -> Result<i64> {
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM messages")
        .fetch_one(pool)
        .await?;
    Ok(count)
}
