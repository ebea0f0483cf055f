//! Summary requester.
//!
//! Takes the visible message set for a scope (a date or a project), builds a
//! prompt from the entry contents with role and time context, asks the
//! external summarization service for a summary, and persists the result as
//! the scope's note, overwriting any previous one.
//!
//! If the filtered set is empty, the credential is missing, or the external
//! call fails, the operation fails with `SummaryUnavailable` and no note is
//! written. There is no retry and no partial state.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::info;

use crate::db::{self, DbPool, Message, Note};
use crate::services::filter::{self, FilterMode, FilterSelection};
use crate::services::llm::LlmService;
use crate::{Error, Result};

/// The scope a summary is generated for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummaryScope {
    Date(NaiveDate),
    Project(i64),
}

/// Service that generates and persists summaries.
#[derive(Clone)]
pub struct SummaryService {
    db: DbPool,
    llm: Arc<LlmService>,
    max_tokens: u32,
}

impl SummaryService {
    pub fn new(db: DbPool, llm: Arc<LlmService>, max_tokens: u32) -> Self {
        Self { db, llm, max_tokens }
    }

    /// Generate a summary for a scope and persist it as that scope's note.
    pub async fn generate(&self, scope: SummaryScope) -> Result<Note> {
        if !self.llm.is_configured() {
            return Err(Error::SummaryUnavailable(
                "No API credential configured".into(),
            ));
        }

        // Default view of the scope: archived entries stay out of the summary.
        let mode = match scope {
            SummaryScope::Date(d) => FilterMode::ByDate(d),
            SummaryScope::Project(p) => FilterMode::ByProject(p),
        };
        let messages = db::list_messages(&self.db).await?;
        let visible = filter::visible_messages(&messages, &FilterSelection::scope(mode));

        if visible.is_empty() {
            return Err(Error::SummaryUnavailable(
                "Nothing to summarize for this scope".into(),
            ));
        }

        let title = match scope {
            SummaryScope::Date(d) => format!("the {} journal", d.format("%Y-%m-%d")),
            SummaryScope::Project(p) => {
                let project = db::get_project(&self.db, p).await?;
                format!("the project \"{}\"", project.name)
            }
        };

        let prompt = build_prompt(&title, &visible);
        let summary = self.llm.complete(&prompt, self.max_tokens).await?;

        info!(?scope, entries = visible.len(), "Generated summary");

        match scope {
            SummaryScope::Date(d) => db::upsert_date_note(&self.db, d, &summary).await,
            SummaryScope::Project(p) => db::upsert_project_note(&self.db, p, &summary).await,
        }
    }
}

/// Build the summarization prompt: one line of instruction, then the entries
/// oldest-first with their time and author context.
fn build_prompt(title: &str, messages: &[Message]) -> String {
    let mut prompt = format!(
        "Summarize the following entries from {} into a short memo of what was done. \
         Write in plain prose, at most one paragraph.\n\n",
        title
    );

    // The filter engine returns most-recent-first; a summary reads better
    // in chronological order.
    for message in messages.iter().rev() {
        prompt.push_str(&format!(
            "[{}] {}: {}\n",
            message.timestamp.format("%Y-%m-%d %H:%M"),
            message.role,
            message.content
        ));
    }

    prompt
}
