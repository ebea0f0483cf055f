//! API Routes for DagBok
//!
//! This module combines all API routes into a single router.
//!
//! Route structure:
//! - /health, /status - Health checks (public)
//! - /projects - Project listing and creation
//! - /messages - Journal entries: filtered listing, append, pin/archive
//! - /notes - Per-date and per-project memos (read side)
//! - /summaries - Summary generation
//!
//! The app assumes a single interactive user per deployment, so there is no
//! authentication layer.

mod messages;
mod notes;
mod projects;
pub mod status;
mod summaries;

use axum::Router;

use crate::AppState;

/// Build the complete API router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(status::routes())
        .nest("/projects", projects::routes())
        .nest("/messages", messages::routes())
        .nest("/notes", notes::routes())
        .nest("/summaries", summaries::routes())
}
