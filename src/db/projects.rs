//! Project database queries.
//!
//! Projects are the organizational unit journal entries can be filed under.
//! They are created explicitly by the user and never deleted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::{Error, Result};

use super::DbPool;

/// Project record from the database.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Project {
    pub id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// Create a new project.
///
/// The id is assigned by the database and immutable afterwards.
pub async fn create_project(pool: &DbPool, name: &str) -> Result<Project> {
    if name.trim().is_empty() {
        return Err(Error::Validation("Project name must not be empty".into()));
    }

    sqlx::query_as::<_, Project>(
        r#"
        INSERT INTO projects (name, created_at)
        VALUES (?, ?)
        RETURNING *
        "#,
    )
    .bind(name)
    .bind(Utc::now())
    .fetch_one(pool)
    .await
    .map_err(Error::Database)
}

/// Get a project by ID.
pub async fn get_project(pool: &DbPool, id: i64) -> Result<Project> {
    sqlx::query_as::<_, Project>("SELECT * FROM projects WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| Error::NotFound(format!("Project not found: {}", id)))
}

/// List all projects, most recently created first.
pub async fn list_projects(pool: &DbPool) -> Result<Vec<Project>> {
    sqlx::query_as::<_, Project>("SELECT * FROM projects ORDER BY created_at DESC, id DESC")
        .fetch_all(pool)
        .await
        .map_err(Error::Database)
}

/// Count total projects.
pub async fn count_projects(pool: &DbPool) -> Result<i64> {
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM projects")
        .fetch_one(pool)
        .await?;
    Ok(count)
}
