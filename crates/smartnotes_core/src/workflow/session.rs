//! Cancellation scope for workflow network steps.
//!
//! # Responsibility
//! - Tie in-flight requests to the lifetime of the screen/command that
//!   started them.
//! - Discard results that arrive after the scope is gone.
//!
//! # Invariants
//! - A cancelled session never yields a request result to its workflow.
//! - Dropping a `Session` cancels it and every handle taken from it.

use crate::workflow::error::{WorkflowError, WorkflowResult};
use log::debug;
use std::future::Future;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

/// Lifetime scope that workflow steps are bound to.
#[derive(Debug)]
pub struct Session {
    id: Uuid,
    token: CancellationToken,
}

impl Session {
    pub fn new() -> Self {
        Self::with_token(CancellationToken::new())
    }

    fn with_token(token: CancellationToken) -> Self {
        Self {
            id: Uuid::new_v4(),
            token,
        }
    }

    /// Correlation id written into workflow log lines.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Creates a nested scope that is cancelled with this one.
    pub fn child(&self) -> Session {
        Self::with_token(self.token.child_token())
    }

    /// Handle that can cancel this session from another task (e.g. Ctrl-C).
    pub fn cancel_handle(&self) -> CancellationToken {
        self.token.clone()
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Runs one network step unless the session ends first.
    ///
    /// The step's output is dropped when cancellation wins the race.
    pub async fn guard<F, T>(&self, step: &'static str, future: F) -> WorkflowResult<T>
    where
        F: Future<Output = T>,
    {
        if self.token.is_cancelled() {
            debug!(
                "event=step_skipped module=workflow session={} step={} reason=cancelled",
                self.id, step
            );
            return Err(WorkflowError::Cancelled);
        }

        tokio::select! {
            biased;
            _ = self.token.cancelled() => {
                debug!(
                    "event=step_discarded module=workflow session={} step={} reason=cancelled",
                    self.id, step
                );
                Err(WorkflowError::Cancelled)
            }
            output = future => Ok(output),
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.token.cancel();
    }
}
