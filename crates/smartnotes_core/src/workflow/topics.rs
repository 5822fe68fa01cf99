//! Topic create-and-list workflow.
//!
//! # Responsibility
//! - Validate and submit the topic form, then reset it.
//! - Load the topic list into a renderable `ListState`.
//!
//! # Invariants
//! - Blank names never reach the API.
//! - A loaded list holds exactly the items the server returned, in order.

use crate::api::TopicApi;
use crate::model::topic::{Topic, TopicDraft};
use crate::workflow::error::{WorkflowAction, WorkflowResult};
use crate::workflow::session::Session;
use crate::workflow::{transport_failure, ListState};
use log::{debug, info};
use std::fmt::{Debug, Formatter};

/// Caller notification for a created topic.
pub type TopicCallback = Box<dyn FnMut(&Topic) + Send>;

/// Topic form state.
#[derive(Default)]
pub struct TopicForm {
    name: String,
    error: Option<String>,
    on_submit: Option<TopicCallback>,
}

impl Debug for TopicForm {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TopicForm")
            .field("name", &self.name)
            .field("error", &self.error)
            .finish_non_exhaustive()
    }
}

impl TopicForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_on_submit(mut self, callback: impl FnMut(&Topic) + Send + 'static) -> Self {
        self.on_submit = Some(Box::new(callback));
        self
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Last user-facing failure, if any.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Creates a topic from the current name.
    ///
    /// On success the name is cleared and the callback receives the topic.
    pub async fn submit<A>(&mut self, api: &A, session: &Session) -> WorkflowResult<Topic>
    where
        A: TopicApi + ?Sized,
    {
        let draft = TopicDraft::new(self.name.clone());
        draft.validate()?;
        self.error = None;

        match session.guard("create_topic", api.create_topic(&draft)).await? {
            Ok(topic) => {
                info!(
                    "event=topic_created module=workflow session={} topic_id={}",
                    session.id(),
                    topic.id
                );
                self.name.clear();
                if let Some(callback) = self.on_submit.as_mut() {
                    callback(&topic);
                }
                Ok(topic)
            }
            Err(err) => {
                let err = transport_failure(session.id(), WorkflowAction::CreateTopic, err);
                self.error = Some(err.user_message());
                Err(err)
            }
        }
    }
}

/// Topic list screen state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicList {
    state: ListState<Topic>,
}

impl Default for TopicList {
    fn default() -> Self {
        Self {
            state: ListState::Loading,
        }
    }
}

impl TopicList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &ListState<Topic> {
        &self.state
    }

    /// Fetches all topics.
    ///
    /// A cancelled load leaves the state at `Loading`.
    pub async fn load<A>(&mut self, api: &A, session: &Session) -> &ListState<Topic>
    where
        A: TopicApi + ?Sized,
    {
        self.state = ListState::Loading;
        match session.guard("list_topics", api.list_topics()).await {
            Ok(Ok(topics)) => {
                debug!(
                    "event=topics_loaded module=workflow session={} count={}",
                    session.id(),
                    topics.len()
                );
                self.state = ListState::Loaded(topics);
            }
            Ok(Err(err)) => {
                let err = transport_failure(session.id(), WorkflowAction::FetchTopics, err);
                self.state = ListState::Failed(err.user_message());
            }
            Err(_cancelled) => {}
        }
        &self.state
    }
}
