//! Application state for DagBok.
//!
//! Contains the shared state that is passed to all handlers.

use std::sync::Arc;

use crate::db::DbPool;
use crate::services::{LlmService, SummaryService};
use crate::{config, Result};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub db: DbPool,
    /// Summarization API client.
    pub llm: Arc<LlmService>,
    /// Summary generation service.
    pub summary: SummaryService,
}

impl AppState {
    /// Create a new application state from the global config.
    pub async fn new() -> Result<Self> {
        let config = config::config();

        let db = crate::db::init_pool(&config.database.path).await?;
        crate::db::initialize_schema(&db).await?;

        let llm = Arc::new(LlmService::new(&config.llm));

        Ok(Self::from_parts(db, llm, config.llm.max_tokens))
    }

    /// Assemble state from already-initialized parts. Used by tests to run
    /// against an in-memory database and a mock summarization endpoint.
    pub fn from_parts(db: DbPool, llm: Arc<LlmService>, max_tokens: u32) -> Self {
        let summary = SummaryService::new(db.clone(), llm.clone(), max_tokens);
        Self { db, llm, summary }
    }
}
