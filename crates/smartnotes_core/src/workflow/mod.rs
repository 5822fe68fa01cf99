//! Client-side workflows over the REST API.
//!
//! # Responsibility
//! - Sequence dependent network calls with defined ordering and failure
//!   semantics (topic form/list, note create-and-enrich, note list, search).
//! - Convert transport failures into fixed user-facing strings at the
//!   workflow boundary.
//!
//! # Invariants
//! - Every network step runs through `Session::guard`.
//! - Transport errors are logged once, where the workflow records its
//!   failure state.

pub mod error;
pub mod notes;
pub mod search;
pub mod session;
pub mod topics;

use crate::api::TransportError;
use crate::workflow::error::{WorkflowAction, WorkflowError};
use log::error;
use std::sync::{Mutex, MutexGuard, PoisonError};
use uuid::Uuid;

/// Renderable state of a list screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListState<T> {
    Loading,
    Loaded(Vec<T>),
    /// Generic user-facing failure text.
    Failed(String),
}

impl<T> ListState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// Items when loaded, otherwise an empty slice.
    pub fn items(&self) -> &[T] {
        match self {
            Self::Loaded(items) => items,
            Self::Loading | Self::Failed(_) => &[],
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed(message) => Some(message),
            Self::Loading | Self::Loaded(_) => None,
        }
    }
}

/// Logs a transport failure and wraps it for the workflow boundary.
pub(crate) fn transport_failure(
    session: Uuid,
    action: WorkflowAction,
    err: TransportError,
) -> WorkflowError {
    error!(
        "event=workflow_failed module=workflow session={} action={} http_status={} message={}",
        session,
        action.as_str(),
        err.status
            .map(|status| status.to_string())
            .unwrap_or_else(|| "none".to_string()),
        err.message
    );
    WorkflowError::transport(action, err)
}

/// Locks workflow-local state; a poisoned lock still yields the data.
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
