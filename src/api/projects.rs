//! Projects Routes
//!
//! Routes:
//! - GET /projects - List all projects (most recently created first)
//! - POST /projects - Create a new project
//! - GET /projects/:id - Get project details
//!
//! Projects are never deleted; the data model treats message references to
//! them as weak, so removal is deliberately not exposed.

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{db, AppState, Result};

/// Build project routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_projects).post(create_project))
        .route("/:id", get(get_project))
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Request to create a new project.
#[derive(Debug, Deserialize)]
pub struct CreateProjectRequest {
    /// Human-readable name; must be non-empty.
    pub name: String,
}

/// Project response.
#[derive(Debug, Serialize)]
pub struct ProjectResponse {
    pub id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl From<db::Project> for ProjectResponse {
    fn from(p: db::Project) -> Self {
        Self {
            id: p.id,
            name: p.name,
            created_at: p.created_at,
        }
    }
}

/// List of projects response.
#[derive(Debug, Serialize)]
pub struct ListProjectsResponse {
    pub projects: Vec<ProjectResponse>,
    pub total: u32,
}

// ============================================================================
// Handlers
// ============================================================================

/// List all projects.
///
/// GET /projects
#[axum::debug_handler]
async fn list_projects(State(state): State<AppState>) -> Result<Json<ListProjectsResponse>> {
    let projects = db::list_projects(&state.db).await?;

    let projects: Vec<ProjectResponse> = projects.into_iter().map(Into::into).collect();
    let total = projects.len() as u32;

    Ok(Json(ListProjectsResponse { projects, total }))
}

/// Create a new project.
///
/// POST /projects
#[axum::debug_handler]
async fn create_project(
    State(state): State<AppState>,
    Json(request): Json<CreateProjectRequest>,
) -> Result<Json<ProjectResponse>> {
    let project = db::create_project(&state.db, &request.name).await?;
    Ok(Json(project.into()))
}

/// Get a project by ID.
///
/// GET /projects/:id
#[axum::debug_handler]
async fn get_project(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ProjectResponse>> {
    let project = db::get_project(&state.db, id).await?;
    Ok(Json(project.into()))
}
