//! Services for DagBok.
//!
//! The filter engine is pure; the llm and summary services own the only
//! external collaborator (the summarization API).

pub mod filter;
pub mod llm;
pub mod summary;

pub use filter::{FilterMode, FilterSelection};
pub use llm::LlmService;
pub use summary::{SummaryScope, SummaryService};
