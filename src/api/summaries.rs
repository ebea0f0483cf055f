//! Summaries Routes
//!
//! Routes:
//! - POST /summaries - Generate a summary for a date or a project
//!
//! The generated summary is persisted as the scope's note (overwriting any
//! previous one) and returned. If the external call fails or there is
//! nothing to summarize, nothing is written and the request fails; the user
//! may simply retry.

use axum::{extract::State, routing::post, Json, Router};
use chrono::NaiveDate;
use serde::Deserialize;

use crate::services::SummaryScope;
use crate::{AppState, Error, Result};

use super::notes::NoteResponse;

/// Build summary routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/", post(generate_summary))
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Request to generate a summary. Exactly one scope key must be set.
#[derive(Debug, Deserialize)]
pub struct GenerateSummaryRequest {
    pub date: Option<NaiveDate>,
    pub project_id: Option<i64>,
}

// ============================================================================
// Handlers
// ============================================================================

/// Generate a summary and persist it as the scope's note.
///
/// POST /summaries
#[axum::debug_handler]
async fn generate_summary(
    State(state): State<AppState>,
    Json(request): Json<GenerateSummaryRequest>,
) -> Result<Json<NoteResponse>> {
    let scope = match (request.date, request.project_id) {
        (Some(_), Some(_)) | (None, None) => {
            return Err(Error::Validation(
                "Provide exactly one of date or project_id".into(),
            ))
        }
        (Some(date), None) => SummaryScope::Date(date),
        (None, Some(project_id)) => SummaryScope::Project(project_id),
    };

    let note = state.summary.generate(scope).await?;
    Ok(Json(note.into()))
}
