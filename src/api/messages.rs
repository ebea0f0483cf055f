//! Messages Routes
//!
//! Routes:
//! - GET /messages - Filtered journal view (messages + applicable note)
//! - POST /messages - Append a new entry
//! - PUT /messages/:id/pinned - Toggle the pinned flag
//! - PUT /messages/:id/archived - Toggle the archived flag
//!
//! The GET endpoint is the filter engine's front door: the query parameters
//! form the filter selection, and the response carries the visible entries
//! (most recent first) together with the note that applies to the scope.

use axum::{
    extract::{Path, Query, State},
    routing::{get, put},
    Json, Router,
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::services::filter::{self, FilterMode, FilterSelection};
use crate::{db, AppState, Error, Result};

use super::notes::NoteResponse;

/// Build message routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_messages).post(append_message))
        .route("/:id/pinned", put(set_pinned))
        .route("/:id/archived", put(set_archived))
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Query parameters for the filtered journal view.
///
/// When both `project_id` and `date` are given the project wins, matching the
/// note-selection order of the journal UI. When neither is given the view is
/// deliberately empty.
#[derive(Debug, Deserialize, Default)]
pub struct ListMessagesQuery {
    /// Filter to entries whose timestamp falls on this date (YYYY-MM-DD, UTC).
    pub date: Option<NaiveDate>,
    /// Filter to entries filed under this project.
    pub project_id: Option<i64>,
    /// Restrict to pinned entries.
    #[serde(default)]
    pub pinned_only: bool,
    /// Include archived entries (hidden by default).
    #[serde(default)]
    pub show_archived: bool,
}

impl ListMessagesQuery {
    fn selection(&self) -> FilterSelection {
        let mode = match (self.project_id, self.date) {
            (Some(p), _) => FilterMode::ByProject(p),
            (None, Some(d)) => FilterMode::ByDate(d),
            (None, None) => FilterMode::None,
        };

        FilterSelection {
            mode,
            pinned_only: self.pinned_only,
            show_archived: self.show_archived,
        }
    }
}

/// Request to append a new entry.
#[derive(Debug, Deserialize)]
pub struct AppendMessageRequest {
    pub content: String,
    /// "user" (default) or "assistant".
    pub role: Option<String>,
    pub project_id: Option<i64>,
}

/// Request to set the pinned flag.
#[derive(Debug, Deserialize)]
pub struct SetPinnedRequest {
    pub pinned: bool,
}

/// Request to set the archived flag.
#[derive(Debug, Deserialize)]
pub struct SetArchivedRequest {
    pub archived: bool,
}

/// Message response.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub id: i64,
    pub content: String,
    pub role: String,
    pub project_id: Option<i64>,
    pub timestamp: DateTime<Utc>,
    pub pinned: bool,
    pub archived: bool,
}

impl From<db::Message> for MessageResponse {
    fn from(m: db::Message) -> Self {
        Self {
            id: m.id,
            content: m.content,
            role: m.role,
            project_id: m.project_id,
            timestamp: m.timestamp,
            pinned: m.pinned,
            archived: m.archived,
        }
    }
}

/// Filtered journal view response.
#[derive(Debug, Serialize)]
pub struct ListMessagesResponse {
    pub messages: Vec<MessageResponse>,
    /// The memo for the selected scope, if one has been generated.
    pub note: Option<NoteResponse>,
    pub total: u32,
}

// ============================================================================
// Handlers
// ============================================================================

/// Filtered journal view.
///
/// GET /messages
#[axum::debug_handler]
async fn list_messages(
    State(state): State<AppState>,
    Query(query): Query<ListMessagesQuery>,
) -> Result<Json<ListMessagesResponse>> {
    let selection = query.selection();

    let messages = db::list_messages(&state.db).await?;
    let visible = filter::visible_messages(&messages, &selection);

    // One indexed load of all notes per request; the filter engine picks the
    // applicable one.
    let notes = db::list_notes(&state.db).await?;
    let note = filter::applicable_note(&notes, &selection.mode).map(Into::into);

    let messages: Vec<MessageResponse> = visible.into_iter().map(Into::into).collect();
    let total = messages.len() as u32;

    Ok(Json(ListMessagesResponse {
        messages,
        note,
        total,
    }))
}

/// Append a new entry.
///
/// POST /messages
#[axum::debug_handler]
async fn append_message(
    State(state): State<AppState>,
    Json(request): Json<AppendMessageRequest>,
) -> Result<Json<MessageResponse>> {
    let role = match request.role.as_deref() {
        None => db::MessageRole::User,
        Some(s) => db::MessageRole::from_str(s)
            .ok_or_else(|| Error::Validation(format!("Unknown role: {}", s)))?,
    };

    let message = db::create_message(
        &state.db,
        db::CreateMessage {
            content: request.content,
            role,
            project_id: request.project_id,
        },
    )
    .await?;

    Ok(Json(message.into()))
}

/// Set the pinned flag on an entry.
///
/// PUT /messages/:id/pinned
#[axum::debug_handler]
async fn set_pinned(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<SetPinnedRequest>,
) -> Result<Json<MessageResponse>> {
    let message = db::set_pinned(&state.db, id, request.pinned).await?;
    Ok(Json(message.into()))
}

/// Set the archived flag on an entry.
///
/// PUT /messages/:id/archived
#[axum::debug_handler]
async fn set_archived(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<SetArchivedRequest>,
) -> Result<Json<MessageResponse>> {
    let message = db::set_archived(&state.db, id, request.archived).await?;
    Ok(Json(message.into()))
}
