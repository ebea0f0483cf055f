//! Note database queries.
//!
//! A note is a memo attached to a scope: either a date (YYYY-MM-DD string)
//! or a project. At most one note exists per scope; writing again overwrites
//! the previous content. Notes are written by the summary requester and
//! read-only to the rest of the system.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::{Error, Result};

use super::DbPool;

/// Note record from the database. Exactly one of `date` and `project_id`
/// is set.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Note {
    pub id: i64,
    pub date: Option<String>,
    pub project_id: Option<i64>,
    pub content: String,
    pub updated_at: DateTime<Utc>,
}

/// Create or overwrite the note for a date.
///
/// Runs as a single transaction so the overwrite is atomic: either the new
/// content is fully in place or the old note is untouched.
pub async fn upsert_date_note(pool: &DbPool, date: NaiveDate, content: &str) -> Result<Note> {
    let key = date.format("%Y-%m-%d").to_string();
    let now = Utc::now();

    let mut tx = pool.begin().await?;

    let updated = sqlx::query("UPDATE notes SET content = ?, updated_at = ? WHERE date = ?")
        .bind(content)
        .bind(now)
        .bind(&key)
        .execute(&mut *tx)
        .await?;

    if updated.rows_affected() == 0 {
        sqlx::query("INSERT INTO notes (date, project_id, content, updated_at) VALUES (?, NULL, ?, ?)")
            .bind(&key)
            .bind(content)
            .bind(now)
            .execute(&mut *tx)
            .await?;
    }

    tx.commit().await?;

    get_note_for_date(pool, date)
        .await?
        .ok_or_else(|| Error::Internal(format!("Note for date {} vanished after upsert", key)))
}

/// Create or overwrite the note for a project.
pub async fn upsert_project_note(pool: &DbPool, project_id: i64, content: &str) -> Result<Note> {
    let now = Utc::now();

    let mut tx = pool.begin().await?;

    let updated = sqlx::query("UPDATE notes SET content = ?, updated_at = ? WHERE project_id = ?")
        .bind(content)
        .bind(now)
        .bind(project_id)
        .execute(&mut *tx)
        .await?;

    if updated.rows_affected() == 0 {
        sqlx::query("INSERT INTO notes (date, project_id, content, updated_at) VALUES (NULL, ?, ?, ?)")
            .bind(project_id)
            .bind(content)
            .bind(now)
            .execute(&mut *tx)
            .await
            .map_err(|e| match e {
                sqlx::Error::Database(ref db_err) if db_err.is_foreign_key_violation() => {
                    Error::NotFound(format!("Project not found: {}", project_id))
                }
                _ => Error::Database(e),
            })?;
    }

    tx.commit().await?;

    get_note_for_project(pool, project_id).await?.ok_or_else(|| {
        Error::Internal(format!(
            "Note for project {} vanished after upsert",
            project_id
        ))
    })
}

/// Get the note for a date, if any.
pub async fn get_note_for_date(pool: &DbPool, date: NaiveDate) -> Result<Option<Note>> {
    sqlx::query_as::<_, Note>("SELECT * FROM notes WHERE date = ?")
        .bind(date.format("%Y-%m-%d").to_string())
        .fetch_optional(pool)
        .await
        .map_err(Error::Database)
}

/// Get the note for a project, if any.
pub async fn get_note_for_project(pool: &DbPool, project_id: i64) -> Result<Option<Note>> {
    sqlx::query_as::<_, Note>("SELECT * FROM notes WHERE project_id = ?")
        .bind(project_id)
        .fetch_optional(pool)
        .await
        .map_err(Error::Database)
}

/// List all notes, most recently updated first.
pub async fn list_notes(pool: &DbPool) -> Result<Vec<Note>> {
    sqlx::query_as::<_, Note>("SELECT * FROM notes ORDER BY updated_at DESC, id DESC")
        .fetch_all(pool)
        .await
        .map_err(Error::Database)
}
