//! Core client logic for Smart Notes.
//! This crate owns the API contracts, data model and workflow semantics;
//! the CLI only composes and prints.

pub mod api;
pub mod config;
pub mod logging;
pub mod model;
pub mod view;
pub mod workflow;

pub use api::http::HttpApiClient;
pub use api::{ApiResult, NoteApi, TopicApi, TransportError};
pub use config::{ClientConfig, ConfigError};
pub use logging::{default_log_level, init_logging, init_stderr_logging, logging_status, LogTarget};
pub use model::id::{NoteId, ResourceId, TopicId};
pub use model::note::{Enrichment, Note, NoteDraft, SummaryResponse, TagsResponse};
pub use model::topic::{Topic, TopicDraft};
pub use model::validation::ValidationError;
pub use view::{render_note_cards, render_topic_cards, NoteCard, TopicCard};
pub use workflow::error::{WorkflowAction, WorkflowError, WorkflowResult};
pub use workflow::notes::{filter_by_topic, CreatedNote, NoteForm, NoteList, NotePhase};
pub use workflow::search::SearchBar;
pub use workflow::session::Session;
pub use workflow::topics::{TopicForm, TopicList};
pub use workflow::ListState;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
