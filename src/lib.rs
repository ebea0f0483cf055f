//! DagBok - Personal Journal Server
//!
//! A single-user journaling service: timestamped entries organized by date or
//! by project, with pin/archive flags, per-scope memo notes, and AI-generated
//! summaries via an external chat-completions API.

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod services;
pub mod state;

pub use config::config;
pub use error::{Error, Result};
pub use state::AppState;
