//! Free-text note search dispatch.
//!
//! # Responsibility
//! - Issue `search_notes` for non-blank queries.
//! - Forward the decoded result list, unmodified, to the caller callback.
//!
//! # Invariants
//! - Blank (whitespace-only) queries issue no request.
//! - The query is sent exactly as typed; trimming is only used for the
//!   blank check.
//! - The pending flag is cleared on every exit path.
//! - Failures are logged and surfaced as "Search failed" like every other
//!   workflow; the callback only ever sees successful results.

use crate::api::NoteApi;
use crate::model::note::Note;
use crate::workflow::error::{WorkflowAction, WorkflowResult};
use crate::workflow::session::Session;
use crate::workflow::{lock, transport_failure};
use log::debug;
use std::fmt::{Debug, Formatter};
use std::sync::Mutex;
use tokio::sync::watch;

/// Caller notification for search results.
pub type SearchCallback = Box<dyn FnMut(&[Note]) + Send>;

#[derive(Debug, Default)]
struct SearchFields {
    query: String,
    error: Option<String>,
}

pub struct SearchBar {
    fields: Mutex<SearchFields>,
    pending: watch::Sender<bool>,
    on_search: Mutex<Option<SearchCallback>>,
}

impl Debug for SearchBar {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchBar")
            .field("fields", &*lock(&self.fields))
            .field("pending", &*self.pending.borrow())
            .finish_non_exhaustive()
    }
}

impl Default for SearchBar {
    fn default() -> Self {
        let (pending, _) = watch::channel(false);
        Self {
            fields: Mutex::new(SearchFields::default()),
            pending,
            on_search: Mutex::new(None),
        }
    }
}

impl SearchBar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_on_search(self, callback: impl FnMut(&[Note]) + Send + 'static) -> Self {
        *lock(&self.on_search) = Some(Box::new(callback));
        self
    }

    pub fn set_query(&self, query: impl Into<String>) {
        lock(&self.fields).query = query.into();
    }

    pub fn query(&self) -> String {
        lock(&self.fields).query.clone()
    }

    pub fn is_pending(&self) -> bool {
        *self.pending.borrow()
    }

    /// Receiver that observes the pending flag.
    pub fn subscribe_pending(&self) -> watch::Receiver<bool> {
        self.pending.subscribe()
    }

    pub fn error(&self) -> Option<String> {
        lock(&self.fields).error.clone()
    }

    /// Runs the current query.
    ///
    /// Returns `Ok(None)` without a request when the query is blank.
    pub async fn submit<A>(&self, api: &A, session: &Session) -> WorkflowResult<Option<Vec<Note>>>
    where
        A: NoteApi + ?Sized,
    {
        let query = self.query();
        if query.trim().is_empty() {
            return Ok(None);
        }

        lock(&self.fields).error = None;
        self.pending.send_replace(true);
        let outcome = session.guard("search_notes", api.search_notes(&query)).await;
        self.pending.send_replace(false);

        match outcome? {
            Ok(results) => {
                debug!(
                    "event=search_done module=workflow session={} hits={}",
                    session.id(),
                    results.len()
                );
                if let Some(callback) = lock(&self.on_search).as_mut() {
                    callback(&results);
                }
                Ok(Some(results))
            }
            Err(err) => {
                let err = transport_failure(session.id(), WorkflowAction::Search, err);
                lock(&self.fields).error = Some(err.user_message());
                Err(err)
            }
        }
    }
}
