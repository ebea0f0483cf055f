//! Notes Routes
//!
//! Routes:
//! - GET /notes - List all notes
//! - GET /notes/lookup - Get the note for a date or a project
//!
//! Notes are written only by the summary requester; this is the read side.

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::{db, AppState, Error, Result};

/// Build note routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_notes))
        .route("/lookup", get(lookup_note))
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Query parameters for looking up a note by scope.
#[derive(Debug, Deserialize)]
pub struct LookupNoteQuery {
    pub date: Option<NaiveDate>,
    pub project_id: Option<i64>,
}

/// Note response.
#[derive(Debug, Serialize)]
pub struct NoteResponse {
    pub id: i64,
    pub date: Option<String>,
    pub project_id: Option<i64>,
    pub content: String,
    pub updated_at: DateTime<Utc>,
}

impl From<db::Note> for NoteResponse {
    fn from(n: db::Note) -> Self {
        Self {
            id: n.id,
            date: n.date,
            project_id: n.project_id,
            content: n.content,
            updated_at: n.updated_at,
        }
    }
}

/// List of notes response.
#[derive(Debug, Serialize)]
pub struct ListNotesResponse {
    pub notes: Vec<NoteResponse>,
    pub total: u32,
}

// ============================================================================
// Handlers
// ============================================================================

/// List all notes, most recently updated first.
///
/// GET /notes
#[axum::debug_handler]
async fn list_notes(State(state): State<AppState>) -> Result<Json<ListNotesResponse>> {
    let notes = db::list_notes(&state.db).await?;

    let notes: Vec<NoteResponse> = notes.into_iter().map(Into::into).collect();
    let total = notes.len() as u32;

    Ok(Json(ListNotesResponse { notes, total }))
}

/// Get the note for a scope.
///
/// GET /notes/lookup?date=YYYY-MM-DD or GET /notes/lookup?project_id=N
#[axum::debug_handler]
async fn lookup_note(
    State(state): State<AppState>,
    Query(query): Query<LookupNoteQuery>,
) -> Result<Json<NoteResponse>> {
    let note = match (query.date, query.project_id) {
        (Some(_), Some(_)) | (None, None) => {
            return Err(Error::Validation(
                "Provide exactly one of date or project_id".into(),
            ))
        }
        (Some(date), None) => db::get_note_for_date(&state.db, date).await?,
        (None, Some(project_id)) => db::get_note_for_project(&state.db, project_id).await?,
    };

    note.map(|n| Json(n.into()))
        .ok_or_else(|| Error::NotFound("No note for this scope".into()))
}
