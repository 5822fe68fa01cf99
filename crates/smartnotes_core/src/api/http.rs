//! reqwest-backed implementation of the topic/note API contracts.
//!
//! # Responsibility
//! - Map each contract operation onto its REST endpoint.
//! - Convert non-2xx responses into `TransportError` with the server's
//!   message when one is provided.
//!
//! # Invariants
//! - Every request carries `Content-Type: application/json`.
//! - Enrichment actions are sent as POST without a body.
//! - Search queries are handed to the transport as-is; encoding is reqwest's
//!   default query-string encoding.

use crate::api::{ApiResult, NoteApi, TopicApi, TransportError};
use crate::config::{ClientConfig, ConfigError};
use crate::model::id::{NoteId, TopicId};
use crate::model::note::{Note, NoteDraft, SummaryResponse, TagsResponse};
use crate::model::topic::{Topic, TopicDraft};
use async_trait::async_trait;
use log::{debug, warn};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;

const TOPICS_PATH: &str = "/topics/";
const NOTES_PATH: &str = "/notes/";
const SEARCH_PARAM: &str = "search";

/// HTTP client for the notes REST API.
#[derive(Debug, Clone)]
pub struct HttpApiClient {
    config: ClientConfig,
    client: reqwest::Client,
}

impl HttpApiClient {
    /// Builds a client for the configured base URL.
    ///
    /// # Errors
    /// - Returns an error when the base URL is invalid.
    /// - Returns an error when the underlying HTTP client cannot be built.
    pub fn new(config: ClientConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let mut builder = reqwest::Client::builder().default_headers(headers);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|err| ConfigError::HttpClient(err.to_string()))?;

        Ok(Self { config, client })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.client.request(method, self.config.endpoint(path))
    }

    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> ApiResult<T> {
        let response = self.execute(request).await?;
        let status = response.status();
        response.json::<T>().await.map_err(|err| {
            warn!(
                "event=api_decode module=api status=error http_status={} error={}",
                status.as_u16(),
                err
            );
            TransportError::status(status.as_u16(), format!("failed to decode response: {err}"))
        })
    }

    async fn send_with_body<B: Serialize + Sync, T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> ApiResult<T> {
        self.send_json(self.request(method, path).json(body)).await
    }

    async fn execute(&self, request: RequestBuilder) -> ApiResult<Response> {
        let request = request
            .build()
            .map_err(|err| TransportError::network(err.to_string()))?;
        let method = request.method().clone();
        let path = request.url().path().to_string();

        let response = self.client.execute(request).await.map_err(|err| {
            warn!(
                "event=api_request module=api status=error method={} path={} error={}",
                method, path, err
            );
            TransportError::network(err.to_string())
        })?;

        let status = response.status();
        if status.is_success() {
            debug!(
                "event=api_request module=api status=ok method={} path={} http_status={}",
                method,
                path,
                status.as_u16()
            );
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = error_message(status, &body);
        warn!(
            "event=api_request module=api status=error method={} path={} http_status={} message={}",
            method,
            path,
            status.as_u16(),
            message
        );
        Err(TransportError::status(status.as_u16(), message))
    }
}

#[async_trait]
impl TopicApi for HttpApiClient {
    async fn list_topics(&self) -> ApiResult<Vec<Topic>> {
        self.send_json(self.request(Method::GET, TOPICS_PATH)).await
    }

    async fn get_topic(&self, id: &TopicId) -> ApiResult<Topic> {
        self.send_json(self.request(Method::GET, &topic_path(id))).await
    }

    async fn create_topic(&self, draft: &TopicDraft) -> ApiResult<Topic> {
        self.send_with_body(Method::POST, TOPICS_PATH, draft).await
    }

    async fn update_topic(&self, id: &TopicId, draft: &TopicDraft) -> ApiResult<Topic> {
        self.send_with_body(Method::PUT, &topic_path(id), draft).await
    }

    async fn delete_topic(&self, id: &TopicId) -> ApiResult<()> {
        self.execute(self.request(Method::DELETE, &topic_path(id))).await.map(|_| ())
    }

    async fn search_topics(&self, query: &str) -> ApiResult<Vec<Topic>> {
        let request = self
            .request(Method::GET, TOPICS_PATH)
            .query(&[(SEARCH_PARAM, query)]);
        self.send_json(request).await
    }
}

#[async_trait]
impl NoteApi for HttpApiClient {
    async fn list_notes(&self) -> ApiResult<Vec<Note>> {
        self.send_json(self.request(Method::GET, NOTES_PATH)).await
    }

    async fn get_note(&self, id: &NoteId) -> ApiResult<Note> {
        self.send_json(self.request(Method::GET, &note_path(id))).await
    }

    async fn create_note(&self, draft: &NoteDraft) -> ApiResult<Note> {
        self.send_with_body(Method::POST, NOTES_PATH, draft).await
    }

    async fn update_note(&self, id: &NoteId, draft: &NoteDraft) -> ApiResult<Note> {
        self.send_with_body(Method::PUT, &note_path(id), draft).await
    }

    async fn delete_note(&self, id: &NoteId) -> ApiResult<()> {
        self.execute(self.request(Method::DELETE, &note_path(id))).await.map(|_| ())
    }

    async fn generate_summary(&self, id: &NoteId) -> ApiResult<SummaryResponse> {
        let path = note_action_path(id, "generate_summary");
        self.send_json(self.request(Method::POST, &path)).await
    }

    async fn suggest_tags(&self, id: &NoteId) -> ApiResult<TagsResponse> {
        let path = note_action_path(id, "suggest_tags");
        self.send_json(self.request(Method::POST, &path)).await
    }

    async fn search_notes(&self, query: &str) -> ApiResult<Vec<Note>> {
        let request = self
            .request(Method::GET, NOTES_PATH)
            .query(&[(SEARCH_PARAM, query)]);
        self.send_json(request).await
    }
}

fn topic_path(id: &TopicId) -> String {
    format!("{TOPICS_PATH}{id}/")
}

fn note_path(id: &NoteId) -> String {
    format!("{NOTES_PATH}{id}/")
}

fn note_action_path(id: &NoteId, action: &str) -> String {
    format!("{NOTES_PATH}{id}/{action}/")
}

/// Picks the most specific message a failed response offers.
///
/// Order: `{"error": ..}` (enrichment actions), `{"detail": ..}` (framework
/// errors such as 404), raw body text, then the canonical reason phrase.
fn error_message(status: StatusCode, body: &str) -> String {
    if let Ok(serde_json::Value::Object(fields)) = serde_json::from_str::<serde_json::Value>(body) {
        for key in ["error", "detail"] {
            if let Some(serde_json::Value::String(message)) = fields.get(key) {
                return message.clone();
            }
        }
    }

    let trimmed = body.trim();
    if !trimmed.is_empty() {
        return trimmed.to_string();
    }
    status
        .canonical_reason()
        .unwrap_or("request failed")
        .to_string()
}
