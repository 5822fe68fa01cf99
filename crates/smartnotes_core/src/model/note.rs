//! Note domain model.
//!
//! # Responsibility
//! - Mirror the server's note representation, including enrichment fields.
//! - Provide request/acknowledgment bodies for note endpoints.
//!
//! # Invariants
//! - A note references exactly one topic by id.
//! - Missing `summary` and empty `tags` are the valid "not yet enriched"
//!   state, never a decode error.

use crate::model::id::{NoteId, TopicId};
use crate::model::timestamp;
use crate::model::validation::{require_non_blank, ValidationError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// User-authored text record, optionally enriched server-side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: NoteId,
    pub title: String,
    pub content: String,
    /// Owning topic. Not validated by the client.
    pub topic: TopicId,
    #[serde(default, deserialize_with = "timestamp::deserialize_option")]
    pub created_at: Option<DateTime<Utc>>,
    /// Server-generated summary; `None` until enrichment completes.
    #[serde(default)]
    pub summary: Option<String>,
    /// Server-suggested tags in server order; empty until enrichment completes.
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Note {
    /// Returns whether any enrichment result is present.
    pub fn is_enriched(&self) -> bool {
        self.summary.is_some() || !self.tags.is_empty()
    }

    /// Returns a copy with enrichment results applied over this note.
    ///
    /// Fields absent from `enrichment` keep their current value.
    pub fn with_enrichment(&self, enrichment: &Enrichment) -> Note {
        let mut merged = self.clone();
        if let Some(summary) = enrichment.summary.as_ref() {
            merged.summary = Some(summary.clone());
        }
        if let Some(tags) = enrichment.tags.as_ref() {
            merged.tags = tags.clone();
        }
        merged
    }
}

/// Request body for note create/update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NoteDraft {
    pub title: String,
    pub content: String,
    pub topic: TopicId,
}

impl NoteDraft {
    pub fn new(title: impl Into<String>, content: impl Into<String>, topic: TopicId) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            topic,
        }
    }

    /// Checks required fields before a request is issued.
    ///
    /// The topic id is caller-supplied and deliberately not checked.
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_non_blank("title", &self.title)?;
        require_non_blank("content", &self.content)
    }
}

/// Acknowledgment of `generate_summary`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryResponse {
    pub summary: String,
}

/// Acknowledgment of `suggest_tags`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagsResponse {
    pub tags: Vec<String>,
}

/// Collected enrichment results for one note.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Enrichment {
    pub summary: Option<String>,
    pub tags: Option<Vec<String>>,
}

impl Enrichment {
    pub fn from_responses(summary: SummaryResponse, tags: TagsResponse) -> Self {
        Self {
            summary: Some(summary.summary),
            tags: Some(tags.tags),
        }
    }
}
