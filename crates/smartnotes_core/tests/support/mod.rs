#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use smartnotes_core::{
    ApiResult, Note, NoteApi, NoteDraft, NoteId, SummaryResponse, TagsResponse, Topic, TopicApi,
    TopicDraft, TopicId, TransportError,
};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::Duration;

/// In-memory API double that records call start/end order.
#[derive(Default)]
pub struct FakeApi {
    topics: Mutex<Vec<Topic>>,
    notes: Mutex<Vec<Note>>,
    events: Mutex<Vec<String>>,
    queries: Mutex<Vec<String>>,
    failing: Mutex<HashSet<&'static str>>,
    delays: Mutex<HashMap<&'static str, Duration>>,
    next_id: AtomicU64,
}

impl FakeApi {
    pub fn new() -> Self {
        Self {
            next_id: AtomicU64::new(100),
            ..Self::default()
        }
    }

    pub fn with_topics(self, topics: Vec<Topic>) -> Self {
        *self.topics.lock().unwrap() = topics;
        self
    }

    pub fn with_notes(self, notes: Vec<Note>) -> Self {
        *self.notes.lock().unwrap() = notes;
        self
    }

    pub fn fail(&self, op: &'static str) {
        self.failing.lock().unwrap().insert(op);
    }

    pub fn delay(&self, op: &'static str, duration: Duration) {
        self.delays.lock().unwrap().insert(op, duration);
    }

    /// `<op>:start` / `<op>:end` entries in the order they happened.
    pub fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }

    pub fn calls_to(&self, op: &str) -> usize {
        let start = format!("{op}:start");
        self.events().iter().filter(|event| **event == start).count()
    }

    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }

    pub fn stored_notes(&self) -> Vec<Note> {
        self.notes.lock().unwrap().clone()
    }

    async fn step(&self, op: &'static str) -> ApiResult<()> {
        self.events.lock().unwrap().push(format!("{op}:start"));
        let delay = self.delays.lock().unwrap().get(op).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        self.events.lock().unwrap().push(format!("{op}:end"));
        if self.failing.lock().unwrap().contains(op) {
            return Err(TransportError::status(500, format!("{op} exploded")));
        }
        Ok(())
    }

    fn next_id(&self) -> u64 {
        self.next_id.fetch_add(1, Ordering::SeqCst)
    }

    fn find_note(&self, id: &NoteId) -> ApiResult<Note> {
        self.notes
            .lock()
            .unwrap()
            .iter()
            .find(|note| &note.id == id)
            .cloned()
            .ok_or_else(|| TransportError::status(404, "Not found."))
    }
}

#[async_trait]
impl TopicApi for FakeApi {
    async fn list_topics(&self) -> ApiResult<Vec<Topic>> {
        self.step("list_topics").await?;
        Ok(self.topics.lock().unwrap().clone())
    }

    async fn get_topic(&self, id: &TopicId) -> ApiResult<Topic> {
        self.step("get_topic").await?;
        self.topics
            .lock()
            .unwrap()
            .iter()
            .find(|topic| &topic.id == id)
            .cloned()
            .ok_or_else(|| TransportError::status(404, "Not found."))
    }

    async fn create_topic(&self, draft: &TopicDraft) -> ApiResult<Topic> {
        self.step("create_topic").await?;
        let topic = Topic {
            id: TopicId::from(self.next_id()),
            name: draft.name.clone(),
            created_at: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
        };
        self.topics.lock().unwrap().push(topic.clone());
        Ok(topic)
    }

    async fn update_topic(&self, id: &TopicId, draft: &TopicDraft) -> ApiResult<Topic> {
        self.step("update_topic").await?;
        let mut topics = self.topics.lock().unwrap();
        let topic = topics
            .iter_mut()
            .find(|topic| &topic.id == id)
            .ok_or_else(|| TransportError::status(404, "Not found."))?;
        topic.name = draft.name.clone();
        Ok(topic.clone())
    }

    async fn delete_topic(&self, id: &TopicId) -> ApiResult<()> {
        self.step("delete_topic").await?;
        self.topics.lock().unwrap().retain(|topic| &topic.id != id);
        Ok(())
    }

    async fn search_topics(&self, query: &str) -> ApiResult<Vec<Topic>> {
        self.queries.lock().unwrap().push(query.to_string());
        self.step("search_topics").await?;
        let needle = query.to_lowercase();
        Ok(self
            .topics
            .lock()
            .unwrap()
            .iter()
            .filter(|topic| topic.name.to_lowercase().contains(&needle))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl NoteApi for FakeApi {
    async fn list_notes(&self) -> ApiResult<Vec<Note>> {
        self.step("list_notes").await?;
        Ok(self.stored_notes())
    }

    async fn get_note(&self, id: &NoteId) -> ApiResult<Note> {
        self.step("get_note").await?;
        self.find_note(id)
    }

    async fn create_note(&self, draft: &NoteDraft) -> ApiResult<Note> {
        self.step("create_note").await?;
        let note = Note {
            id: NoteId::from(self.next_id()),
            title: draft.title.clone(),
            content: draft.content.clone(),
            topic: draft.topic.clone(),
            created_at: None,
            summary: None,
            tags: Vec::new(),
        };
        self.notes.lock().unwrap().push(note.clone());
        Ok(note)
    }

    async fn update_note(&self, id: &NoteId, draft: &NoteDraft) -> ApiResult<Note> {
        self.step("update_note").await?;
        let mut notes = self.notes.lock().unwrap();
        let note = notes
            .iter_mut()
            .find(|note| &note.id == id)
            .ok_or_else(|| TransportError::status(404, "Not found."))?;
        note.title = draft.title.clone();
        note.content = draft.content.clone();
        note.topic = draft.topic.clone();
        Ok(note.clone())
    }

    async fn delete_note(&self, id: &NoteId) -> ApiResult<()> {
        self.step("delete_note").await?;
        self.notes.lock().unwrap().retain(|note| &note.id != id);
        Ok(())
    }

    async fn generate_summary(&self, id: &NoteId) -> ApiResult<SummaryResponse> {
        self.step("generate_summary").await?;
        let summary = format!("summary of {}", self.find_note(id)?.title);
        if let Some(note) = self.notes.lock().unwrap().iter_mut().find(|n| &n.id == id) {
            note.summary = Some(summary.clone());
        }
        Ok(SummaryResponse { summary })
    }

    async fn suggest_tags(&self, id: &NoteId) -> ApiResult<TagsResponse> {
        self.step("suggest_tags").await?;
        let tags = vec!["alpha".to_string(), "beta".to_string()];
        if let Some(note) = self.notes.lock().unwrap().iter_mut().find(|n| &n.id == id) {
            note.tags = tags.clone();
        }
        Ok(TagsResponse { tags })
    }

    async fn search_notes(&self, query: &str) -> ApiResult<Vec<Note>> {
        self.queries.lock().unwrap().push(query.to_string());
        self.step("search_notes").await?;
        let needle = query.to_lowercase();
        Ok(self
            .stored_notes()
            .into_iter()
            .filter(|note| {
                note.title.to_lowercase().contains(&needle)
                    || note.content.to_lowercase().contains(&needle)
            })
            .collect())
    }
}

pub fn topic(id: u64, name: &str, day: u32) -> Topic {
    Topic {
        id: TopicId::from(id),
        name: name.to_string(),
        created_at: Utc.with_ymd_and_hms(2024, 1, day, 9, 30, 0).unwrap(),
    }
}

pub fn note(id: u64, title: &str, topic: &str) -> Note {
    Note {
        id: NoteId::from(id),
        title: title.to_string(),
        content: format!("{title} body"),
        topic: TopicId::from(topic),
        created_at: None,
        summary: None,
        tags: Vec::new(),
    }
}
