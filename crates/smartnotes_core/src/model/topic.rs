//! Topic domain model.
//!
//! # Responsibility
//! - Mirror the server's topic representation.
//! - Provide the request body used to create or rename a topic.
//!
//! # Invariants
//! - Topics are owned by the server; the client never mutates a decoded
//!   `Topic` in place.

use crate::model::id::TopicId;
use crate::model::timestamp;
use crate::model::validation::{require_non_blank, ValidationError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Named grouping entity that notes reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic {
    pub id: TopicId,
    pub name: String,
    /// Server-side creation timestamp.
    #[serde(deserialize_with = "timestamp::deserialize")]
    pub created_at: DateTime<Utc>,
}

/// Request body for topic create/update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopicDraft {
    pub name: String,
}

impl TopicDraft {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Checks required fields before a request is issued.
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_non_blank("name", &self.name)
    }
}
