//! Note create-and-enrich workflow and note listing.
//!
//! # Responsibility
//! - Drive `Idle -> Submitting -> Enriching -> Done | Failed` for one form.
//! - Load notes and filter them by topic on the client.
//!
//! # Invariants
//! - Enrichment is issued only after `create_note` resolved to an id.
//! - `generate_summary` and `suggest_tags` run concurrently and both settle
//!   before the workflow leaves `Enriching`.
//! - Either enrichment failure means `Failed`; the created note is neither
//!   rolled back nor retried.
//! - Submission is rejected while `Submitting` or `Enriching`.
//! - Topic filtering keeps server order.

use crate::api::{NoteApi, TransportError};
use crate::model::id::{NoteId, TopicId};
use crate::model::note::{Enrichment, Note, NoteDraft};
use crate::workflow::error::{WorkflowAction, WorkflowError, WorkflowResult};
use crate::workflow::session::Session;
use crate::workflow::{lock, transport_failure, ListState};
use log::{debug, info, warn};
use std::fmt::{Debug, Formatter};
use std::sync::{Mutex, MutexGuard};
use tokio::sync::watch;

/// Caller notification for a created note (pre-enrichment representation).
pub type NoteCallback = Box<dyn FnMut(&Note) + Send>;

/// Phase of the note form state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotePhase {
    Idle,
    Submitting,
    Enriching { note_id: NoteId },
    Done { note_id: NoteId },
    /// Generic user-facing failure text.
    Failed(String),
}

impl NotePhase {
    /// Whether submission is currently blocked.
    pub fn is_busy(&self) -> bool {
        matches!(self, Self::Submitting | Self::Enriching { .. })
    }
}

/// Result of a completed create-and-enrich run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedNote {
    /// Note as returned by `create_note`, before enrichment.
    pub note: Note,
    /// Values acknowledged by the enrichment actions.
    pub enrichment: Enrichment,
}

impl CreatedNote {
    /// Note with enrichment results applied.
    pub fn enriched(&self) -> Note {
        self.note.with_enrichment(&self.enrichment)
    }
}

#[derive(Debug, Default)]
struct NoteFields {
    title: String,
    content: String,
}

/// Note form bound to one caller-supplied topic.
///
/// Shared by reference between tasks; concurrent `submit` calls observe the
/// busy guard.
pub struct NoteForm {
    topic: TopicId,
    fields: Mutex<NoteFields>,
    phase: watch::Sender<NotePhase>,
    on_submit: Mutex<Option<NoteCallback>>,
}

impl Debug for NoteForm {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NoteForm")
            .field("topic", &self.topic)
            .field("fields", &*self.fields())
            .field("phase", &*self.phase.borrow())
            .finish_non_exhaustive()
    }
}

impl NoteForm {
    pub fn new(topic: TopicId) -> Self {
        let (phase, _) = watch::channel(NotePhase::Idle);
        Self {
            topic,
            fields: Mutex::new(NoteFields::default()),
            phase,
            on_submit: Mutex::new(None),
        }
    }

    pub fn with_on_submit(self, callback: impl FnMut(&Note) + Send + 'static) -> Self {
        *lock(&self.on_submit) = Some(Box::new(callback));
        self
    }

    pub fn topic(&self) -> &TopicId {
        &self.topic
    }

    pub fn set_title(&self, title: impl Into<String>) {
        self.fields().title = title.into();
    }

    pub fn set_content(&self, content: impl Into<String>) {
        self.fields().content = content.into();
    }

    pub fn title(&self) -> String {
        self.fields().title.clone()
    }

    pub fn content(&self) -> String {
        self.fields().content.clone()
    }

    pub fn phase(&self) -> NotePhase {
        self.phase.borrow().clone()
    }

    /// Receiver that observes every phase transition.
    pub fn subscribe(&self) -> watch::Receiver<NotePhase> {
        self.phase.subscribe()
    }

    pub fn is_busy(&self) -> bool {
        self.phase.borrow().is_busy()
    }

    /// Failure text while in `Failed`.
    pub fn error(&self) -> Option<String> {
        match &*self.phase.borrow() {
            NotePhase::Failed(message) => Some(message.clone()),
            _ => None,
        }
    }

    /// Creates the note, then requests summary and tags for it.
    ///
    /// # Errors
    /// - `Busy` while a previous submission is in flight.
    /// - `Validation` for blank title or content; no request is issued.
    /// - `Transport` when creation or either enrichment call fails.
    /// - `Cancelled` when the session ends; the phase returns to `Idle`.
    pub async fn submit<A>(&self, api: &A, session: &Session) -> WorkflowResult<CreatedNote>
    where
        A: NoteApi + ?Sized,
    {
        if self.is_busy() {
            return Err(WorkflowError::Busy);
        }
        let draft = {
            let fields = self.fields();
            NoteDraft::new(fields.title.clone(), fields.content.clone(), self.topic.clone())
        };
        draft.validate()?;
        if !self.begin_submission() {
            return Err(WorkflowError::Busy);
        }

        let created = match session.guard("create_note", api.create_note(&draft)).await {
            Ok(Ok(note)) => note,
            Ok(Err(err)) => return Err(self.fail(session, err)),
            Err(cancelled) => return Err(self.abandon(cancelled)),
        };
        info!(
            "event=note_created module=workflow session={} note_id={} topic_id={}",
            session.id(),
            created.id,
            created.topic
        );

        let note_id = created.id.clone();
        self.phase.send_replace(NotePhase::Enriching {
            note_id: note_id.clone(),
        });

        let enrich = async {
            tokio::join!(api.generate_summary(&note_id), api.suggest_tags(&note_id))
        };
        let (summary, tags) = match session.guard("enrich_note", enrich).await {
            Ok(settled) => settled,
            Err(cancelled) => return Err(self.abandon(cancelled)),
        };
        let enrichment = match (summary, tags) {
            (Ok(summary), Ok(tags)) => Enrichment::from_responses(summary, tags),
            (Err(err), other) => {
                if let Err(other) = other {
                    warn!(
                        "event=enrich_failed module=workflow session={} note_id={} step=suggest_tags error={}",
                        session.id(),
                        note_id,
                        other
                    );
                }
                return Err(self.fail(session, err));
            }
            (Ok(_), Err(err)) => return Err(self.fail(session, err)),
        };
        debug!(
            "event=note_enriched module=workflow session={} note_id={} tags={}",
            session.id(),
            note_id,
            enrichment.tags.as_ref().map_or(0, Vec::len)
        );

        *self.fields() = NoteFields::default();
        self.phase.send_replace(NotePhase::Done { note_id });
        if let Some(callback) = lock(&self.on_submit).as_mut() {
            callback(&created);
        }

        Ok(CreatedNote {
            note: created,
            enrichment,
        })
    }

    /// Atomically moves a non-busy form to `Submitting`.
    fn begin_submission(&self) -> bool {
        self.phase.send_if_modified(|phase| {
            if phase.is_busy() {
                return false;
            }
            *phase = NotePhase::Submitting;
            true
        })
    }

    fn fail(&self, session: &Session, err: TransportError) -> WorkflowError {
        let err = transport_failure(session.id(), WorkflowAction::CreateNote, err);
        self.phase.send_replace(NotePhase::Failed(err.user_message()));
        err
    }

    fn abandon(&self, cancelled: WorkflowError) -> WorkflowError {
        self.phase.send_replace(NotePhase::Idle);
        cancelled
    }

    fn fields(&self) -> MutexGuard<'_, NoteFields> {
        lock(&self.fields)
    }
}

/// Note list screen state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteList {
    state: ListState<Note>,
}

impl Default for NoteList {
    fn default() -> Self {
        Self {
            state: ListState::Loading,
        }
    }
}

impl NoteList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &ListState<Note> {
        &self.state
    }

    /// Fetches every note, then keeps those in `topic_filter` when given.
    ///
    /// The filter is applied client-side over the full list. A cancelled load
    /// leaves the state at `Loading`.
    pub async fn load<A>(
        &mut self,
        api: &A,
        session: &Session,
        topic_filter: Option<&TopicId>,
    ) -> &ListState<Note>
    where
        A: NoteApi + ?Sized,
    {
        self.state = ListState::Loading;
        match session.guard("list_notes", api.list_notes()).await {
            Ok(Ok(notes)) => {
                let total = notes.len();
                let notes = filter_by_topic(notes, topic_filter);
                debug!(
                    "event=notes_loaded module=workflow session={} total={} shown={}",
                    session.id(),
                    total,
                    notes.len()
                );
                self.state = ListState::Loaded(notes);
            }
            Ok(Err(err)) => {
                let err = transport_failure(session.id(), WorkflowAction::FetchNotes, err);
                self.state = ListState::Failed(err.user_message());
            }
            Err(_cancelled) => {}
        }
        &self.state
    }
}

/// Keeps notes belonging to `topic`, preserving order. `None` keeps all.
pub fn filter_by_topic(notes: Vec<Note>, topic: Option<&TopicId>) -> Vec<Note> {
    match topic {
        Some(topic) => notes.into_iter().filter(|note| &note.topic == topic).collect(),
        None => notes,
    }
}
