//! Plain-text card projections for topics and notes.
//!
//! # Responsibility
//! - Derive display fields (creation label, content excerpt) from records.
//! - Render lists as text blocks, one card per item.
//!
//! # Invariants
//! - The creation label is a pure function of the stored UTC timestamp.
//! - Summary and tags are rendered only when present; their absence is a
//!   normal state.

use crate::model::note::Note;
use crate::model::topic::Topic;
use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;

const EXCERPT_MAX_CHARS: usize = 100;
const EXCERPT_SUFFIX: &str = "...";
const CREATED_DATE_FORMAT: &str = "%Y-%m-%d";

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicCard {
    pub name: String,
    /// `Created: YYYY-MM-DD` (UTC).
    pub created_label: String,
}

impl TopicCard {
    pub fn from_topic(topic: &Topic) -> Self {
        Self {
            name: topic.name.clone(),
            created_label: created_label(&topic.created_at),
        }
    }

    pub fn render(&self) -> String {
        format!("{}\n  {}", self.name, self.created_label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteCard {
    pub title: String,
    pub excerpt: String,
    pub summary: Option<String>,
    pub tags: Vec<String>,
}

impl NoteCard {
    pub fn from_note(note: &Note) -> Self {
        Self {
            title: note.title.clone(),
            excerpt: content_excerpt(&note.content),
            summary: note.summary.clone().filter(|value| !value.trim().is_empty()),
            tags: note.tags.clone(),
        }
    }

    pub fn render(&self) -> String {
        let mut lines = vec![self.title.clone(), format!("  {}", self.excerpt)];
        if let Some(summary) = self.summary.as_ref() {
            lines.push(format!("  Summary: {summary}"));
        }
        if !self.tags.is_empty() {
            let tags = self
                .tags
                .iter()
                .map(|tag| format!("#{tag}"))
                .collect::<Vec<_>>()
                .join(" ");
            lines.push(format!("  Tags: {tags}"));
        }
        lines.join("\n")
    }
}

/// Formats the card creation label for a timestamp.
pub fn created_label(created_at: &DateTime<Utc>) -> String {
    format!("Created: {}", created_at.format(CREATED_DATE_FORMAT))
}

/// First 100 characters of content (whitespace collapsed) plus `...`.
pub fn content_excerpt(content: &str) -> String {
    let normalized = WHITESPACE_RE.replace_all(content.trim(), " ");
    let mut excerpt: String = normalized.chars().take(EXCERPT_MAX_CHARS).collect();
    excerpt.push_str(EXCERPT_SUFFIX);
    excerpt
}

pub fn render_topic_cards(topics: &[Topic]) -> Vec<String> {
    topics
        .iter()
        .map(|topic| TopicCard::from_topic(topic).render())
        .collect()
}

pub fn render_note_cards(notes: &[Note]) -> Vec<String> {
    notes
        .iter()
        .map(|note| NoteCard::from_note(note).render())
        .collect()
}
