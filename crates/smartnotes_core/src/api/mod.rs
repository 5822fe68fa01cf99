//! REST API contracts and HTTP implementation.
//!
//! # Responsibility
//! - Define typed operations for the topic and note resources.
//! - Keep transport details (URLs, status codes, JSON decoding) behind the
//!   `TopicApi` / `NoteApi` seams so workflows can run against test doubles.
//!
//! # Invariants
//! - Every failed request surfaces as `TransportError`; nothing panics.
//! - No retry and no caching happen at this layer.

use crate::model::id::{NoteId, TopicId};
use crate::model::note::{Note, NoteDraft, SummaryResponse, TagsResponse};
use crate::model::topic::{Topic, TopicDraft};
use async_trait::async_trait;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod http;

pub type ApiResult<T> = Result<T, TransportError>;

/// Failure of a single API request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportError {
    /// HTTP status when the server answered; `None` for connection failures.
    pub status: Option<u16>,
    pub message: String,
}

impl TransportError {
    pub fn status(status: u16, message: impl Into<String>) -> Self {
        Self {
            status: Some(status),
            message: message.into(),
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self {
            status: None,
            message: message.into(),
        }
    }
}

impl Display for TransportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.status {
            Some(status) => write!(f, "HTTP {status}: {}", self.message),
            None => write!(f, "request failed: {}", self.message),
        }
    }
}

impl Error for TransportError {}

/// Topic resource operations.
#[async_trait]
pub trait TopicApi: Send + Sync {
    async fn list_topics(&self) -> ApiResult<Vec<Topic>>;
    async fn get_topic(&self, id: &TopicId) -> ApiResult<Topic>;
    async fn create_topic(&self, draft: &TopicDraft) -> ApiResult<Topic>;
    async fn update_topic(&self, id: &TopicId, draft: &TopicDraft) -> ApiResult<Topic>;
    async fn delete_topic(&self, id: &TopicId) -> ApiResult<()>;
    /// Server-side name search (`?search=`).
    async fn search_topics(&self, query: &str) -> ApiResult<Vec<Topic>>;
}

/// Note resource operations, including the enrichment actions.
#[async_trait]
pub trait NoteApi: Send + Sync {
    async fn list_notes(&self) -> ApiResult<Vec<Note>>;
    async fn get_note(&self, id: &NoteId) -> ApiResult<Note>;
    async fn create_note(&self, draft: &NoteDraft) -> ApiResult<Note>;
    async fn update_note(&self, id: &NoteId, draft: &NoteDraft) -> ApiResult<Note>;
    async fn delete_note(&self, id: &NoteId) -> ApiResult<()>;
    /// Asks the server to (re)generate and store the note summary.
    async fn generate_summary(&self, id: &NoteId) -> ApiResult<SummaryResponse>;
    /// Asks the server to (re)compute and store the note tags.
    async fn suggest_tags(&self, id: &NoteId) -> ApiResult<TagsResponse>;
    /// Server-side search over title, content and tags.
    async fn search_notes(&self, query: &str) -> ApiResult<Vec<Note>>;
}
