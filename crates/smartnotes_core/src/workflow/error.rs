//! Workflow boundary errors.
//!
//! # Responsibility
//! - Classify why a workflow stopped (validation, busy guard, transport,
//!   cancellation).
//! - Collapse transport failures into one fixed user-facing string per
//!   workflow.
//!
//! # Invariants
//! - `user_message()` never exposes status codes: 404 and 500 read the same.

use crate::api::TransportError;
use crate::model::validation::ValidationError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type WorkflowResult<T> = Result<T, WorkflowError>;

/// Fixed user-facing failure text for each workflow action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowAction {
    CreateTopic,
    FetchTopics,
    CreateNote,
    FetchNotes,
    Search,
}

impl WorkflowAction {
    pub fn failure_message(self) -> &'static str {
        match self {
            Self::CreateTopic => "Failed to create topic",
            Self::FetchTopics => "Failed to fetch topics",
            Self::CreateNote => "Failed to create note",
            Self::FetchNotes => "Failed to fetch notes",
            Self::Search => "Search failed",
        }
    }

    /// Stable name used in log lines.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::CreateTopic => "create_topic",
            Self::FetchTopics => "fetch_topics",
            Self::CreateNote => "create_note",
            Self::FetchNotes => "fetch_notes",
            Self::Search => "search",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkflowError {
    /// Required input missing; no request was issued.
    Validation(ValidationError),
    /// A previous submission is still in flight.
    Busy,
    /// A request failed while performing `action`.
    Transport {
        action: WorkflowAction,
        source: TransportError,
    },
    /// The owning session ended; any result was discarded.
    Cancelled,
}

impl WorkflowError {
    pub fn transport(action: WorkflowAction, source: TransportError) -> Self {
        Self::Transport { action, source }
    }

    /// Text suitable for showing to the user.
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(err) => err.to_string(),
            Self::Busy => "A submission is already in progress".to_string(),
            Self::Transport { action, .. } => action.failure_message().to_string(),
            Self::Cancelled => "Cancelled".to_string(),
        }
    }
}

impl Display for WorkflowError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Busy => write!(f, "workflow busy: submission already in flight"),
            Self::Transport { action, source } => {
                write!(f, "{} ({source})", action.failure_message())
            }
            Self::Cancelled => write!(f, "workflow cancelled"),
        }
    }
}

impl Error for WorkflowError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Transport { source, .. } => Some(source),
            Self::Busy | Self::Cancelled => None,
        }
    }
}

impl From<ValidationError> for WorkflowError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}
