//! Filter engine.
//!
//! Computes the visible message set and the applicable note for the current
//! filter selection. Pure functions over in-memory collections; all I/O stays
//! in the db layer. The full note collection is loaded once per request and
//! scanned here, instead of re-querying the store per row.

use chrono::NaiveDate;

use crate::db::{Message, Note};

/// Which scope, if any, the journal is currently filtered to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterMode {
    /// No filter selected. The journal deliberately shows nothing in this
    /// state: the user is asked to pick a date or a project first. This is
    /// product behavior, not a default-empty bug.
    None,
    /// Only messages whose timestamp falls on this date (UTC).
    ByDate(NaiveDate),
    /// Only messages filed under this project.
    ByProject(i64),
}

/// The complete filter selection for one request.
#[derive(Debug, Clone, Copy)]
pub struct FilterSelection {
    pub mode: FilterMode,
    /// Restrict to pinned messages.
    pub pinned_only: bool,
    /// Include archived messages; they are hidden by default.
    pub show_archived: bool,
}

impl FilterSelection {
    /// Default view of a scope: everything except archived entries.
    pub fn scope(mode: FilterMode) -> Self {
        Self {
            mode,
            pinned_only: false,
            show_archived: false,
        }
    }

    fn matches(&self, message: &Message) -> bool {
        let mode_ok = match self.mode {
            FilterMode::None => false,
            FilterMode::ByDate(d) => message.timestamp.date_naive() == d,
            FilterMode::ByProject(p) => message.project_id == Some(p),
        };

        mode_ok
            && (!self.pinned_only || message.pinned)
            && (self.show_archived || !message.archived)
    }
}

/// Compute the visible message sequence for a selection.
///
/// Output is sorted most-recent-first; the sort is stable, so messages with
/// equal timestamps keep their insertion order (the caller passes messages
/// in insertion order).
pub fn visible_messages(messages: &[Message], selection: &FilterSelection) -> Vec<Message> {
    let mut visible: Vec<Message> = messages
        .iter()
        .filter(|m| selection.matches(m))
        .cloned()
        .collect();

    visible.sort_by_key(|m| std::cmp::Reverse(m.timestamp));
    visible
}

/// Pick the note that applies to the current filter mode, if any.
pub fn applicable_note(notes: &[Note], mode: &FilterMode) -> Option<Note> {
    match mode {
        FilterMode::None => None,
        FilterMode::ByDate(d) => {
            let key = d.format("%Y-%m-%d").to_string();
            notes.iter().find(|n| n.date.as_deref() == Some(&key)).cloned()
        }
        FilterMode::ByProject(p) => notes.iter().find(|n| n.project_id == Some(*p)).cloned(),
    }
}
