mod support;

use smartnotes_core::{
    Note, NoteForm, NotePhase, Session, TopicId, ValidationError, WorkflowAction, WorkflowError,
};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use support::FakeApi;

fn filled_form(topic: TopicId) -> NoteForm {
    let form = NoteForm::new(topic);
    form.set_title("Weekly plan");
    form.set_content("Finish the parser and review the roadmap.");
    form
}

#[tokio::test]
async fn created_note_keeps_caller_topic() {
    let api = FakeApi::new();
    let session = Session::new();
    let form = filled_form(TopicId::from(7));

    let created = form.submit(&api, &session).await.unwrap();

    assert_eq!(created.note.topic, TopicId::from(7));
    assert_eq!(api.stored_notes()[0].topic, TopicId::from(7));
}

#[tokio::test]
async fn enrichment_starts_only_after_create_resolves() {
    let api = FakeApi::new();
    api.delay("create_note", Duration::from_millis(40));
    let session = Session::new();
    let form = filled_form(TopicId::from(1));

    form.submit(&api, &session).await.unwrap();

    let events = api.events();
    let create_end = events.iter().position(|e| e == "create_note:end").unwrap();
    let summary_start = events
        .iter()
        .position(|e| e == "generate_summary:start")
        .unwrap();
    let tags_start = events.iter().position(|e| e == "suggest_tags:start").unwrap();
    assert_eq!(events[0], "create_note:start");
    assert!(create_end < summary_start);
    assert!(create_end < tags_start);
}

#[tokio::test]
async fn enrichment_calls_overlap_and_both_settle() {
    let api = FakeApi::new();
    api.delay("generate_summary", Duration::from_millis(30));
    api.delay("suggest_tags", Duration::from_millis(5));
    let session = Session::new();
    let form = filled_form(TopicId::from(1));

    let created = form.submit(&api, &session).await.unwrap();

    let events = api.events();
    let summary_end = events
        .iter()
        .position(|e| e == "generate_summary:end")
        .unwrap();
    let tags_start = events.iter().position(|e| e == "suggest_tags:start").unwrap();
    assert!(tags_start < summary_end, "enrichment calls should run concurrently");
    assert_eq!(
        created.enrichment.summary.as_deref(),
        Some("summary of Weekly plan")
    );
    assert_eq!(
        created.enrichment.tags,
        Some(vec!["alpha".to_string(), "beta".to_string()])
    );
    assert!(matches!(form.phase(), NotePhase::Done { .. }));
}

#[tokio::test]
async fn summary_failure_ends_in_failed() {
    let api = FakeApi::new();
    api.fail("generate_summary");
    let session = Session::new();
    let form = filled_form(TopicId::from(1));

    let err = form.submit(&api, &session).await.unwrap_err();

    assert!(matches!(
        err,
        WorkflowError::Transport {
            action: WorkflowAction::CreateNote,
            ..
        }
    ));
    assert_eq!(form.phase(), NotePhase::Failed("Failed to create note".to_string()));
    assert_eq!(form.error().as_deref(), Some("Failed to create note"));
}

#[tokio::test]
async fn tags_failure_ends_in_failed_and_keeps_created_note() {
    let api = FakeApi::new();
    api.fail("suggest_tags");
    let session = Session::new();
    let form = filled_form(TopicId::from(3));

    let err = form.submit(&api, &session).await.unwrap_err();

    assert_eq!(err.user_message(), "Failed to create note");
    assert!(matches!(form.phase(), NotePhase::Failed(_)));
    // No rollback: the note stays on the server, and nothing retries.
    assert_eq!(api.stored_notes().len(), 1);
    assert_eq!(api.calls_to("suggest_tags"), 1);
    assert_eq!(api.calls_to("delete_note"), 0);
    // Form input is kept so the user can see what failed.
    assert_eq!(form.title(), "Weekly plan");
}

#[tokio::test]
async fn create_failure_skips_enrichment() {
    let api = FakeApi::new();
    api.fail("create_note");
    let session = Session::new();
    let form = filled_form(TopicId::from(1));

    form.submit(&api, &session).await.unwrap_err();

    assert_eq!(api.calls_to("generate_summary"), 0);
    assert_eq!(api.calls_to("suggest_tags"), 0);
    assert!(matches!(form.phase(), NotePhase::Failed(_)));
}

#[tokio::test]
async fn success_resets_fields_and_notifies_with_base_note() {
    let api = FakeApi::new();
    let session = Session::new();
    let received: Arc<Mutex<Vec<Note>>> = Arc::default();
    let sink = Arc::clone(&received);
    let form = filled_form(TopicId::from(9)).with_on_submit(move |note| {
        sink.lock().unwrap().push(note.clone());
    });

    let created = form.submit(&api, &session).await.unwrap();

    assert_eq!(form.title(), "");
    assert_eq!(form.content(), "");
    assert_eq!(form.topic(), &TopicId::from(9));

    let received = received.lock().unwrap();
    assert_eq!(received.len(), 1);
    assert_eq!(received[0], created.note);
    assert!(!received[0].is_enriched());

    let enriched = created.enriched();
    assert_eq!(enriched.summary.as_deref(), Some("summary of Weekly plan"));
    assert_eq!(enriched.tags.len(), 2);
}

#[tokio::test]
async fn blank_fields_are_rejected_before_any_request() {
    let api = FakeApi::new();
    let session = Session::new();
    let form = NoteForm::new(TopicId::from(1));
    form.set_title("Title only");
    form.set_content("   ");

    let err = form.submit(&api, &session).await.unwrap_err();

    assert_eq!(
        err,
        WorkflowError::Validation(ValidationError::EmptyField("content"))
    );
    assert!(api.events().is_empty());
    assert_eq!(form.phase(), NotePhase::Idle);
}

#[tokio::test]
async fn second_submit_while_in_flight_is_busy() {
    let api = FakeApi::new();
    api.delay("create_note", Duration::from_millis(50));
    let session = Session::new();
    let form = filled_form(TopicId::from(1));

    let (first, second) = tokio::join!(form.submit(&api, &session), async {
        tokio::time::sleep(Duration::from_millis(10)).await;
        assert!(form.is_busy());
        form.submit(&api, &session).await
    });

    assert!(first.is_ok());
    assert_eq!(second.unwrap_err(), WorkflowError::Busy);
    assert_eq!(api.calls_to("create_note"), 1);
}

#[tokio::test]
async fn phase_transitions_are_published_in_order() {
    let api = FakeApi::new();
    api.delay("create_note", Duration::from_millis(20));
    api.delay("generate_summary", Duration::from_millis(20));
    let session = Session::new();
    let form = filled_form(TopicId::from(1));
    let mut phases = form.subscribe();

    let (result, seen) = tokio::join!(form.submit(&api, &session), async {
        let mut seen = Vec::new();
        while phases.changed().await.is_ok() {
            let phase = phases.borrow_and_update().clone();
            let finished = !phase.is_busy();
            seen.push(phase);
            if finished {
                break;
            }
        }
        seen
    });

    let note_id = result.unwrap().note.id;
    assert_eq!(
        seen,
        vec![
            NotePhase::Submitting,
            NotePhase::Enriching {
                note_id: note_id.clone()
            },
            NotePhase::Done { note_id },
        ]
    );
}

#[tokio::test]
async fn cancelled_session_discards_results_and_returns_to_idle() {
    let api = FakeApi::new();
    api.delay("generate_summary", Duration::from_millis(200));
    let session = Session::new();
    let handle = session.cancel_handle();
    let notified = Arc::new(Mutex::new(false));
    let flag = Arc::clone(&notified);
    let form = filled_form(TopicId::from(1)).with_on_submit(move |_| {
        *flag.lock().unwrap() = true;
    });

    let (result, _) = tokio::join!(form.submit(&api, &session), async {
        tokio::time::sleep(Duration::from_millis(30)).await;
        handle.cancel();
    });

    assert_eq!(result.unwrap_err(), WorkflowError::Cancelled);
    assert_eq!(form.phase(), NotePhase::Idle);
    assert!(!*notified.lock().unwrap());
    assert_eq!(form.title(), "Weekly plan");
}

#[tokio::test]
async fn form_accepts_new_submission_after_failure() {
    let api = FakeApi::new();
    api.fail("create_note");
    let session = Session::new();
    let form = filled_form(TopicId::from(1));
    form.submit(&api, &session).await.unwrap_err();

    let retry_api = FakeApi::new();
    let created = form.submit(&retry_api, &session).await.unwrap();
    assert_eq!(created.note.title, "Weekly plan");
    assert!(matches!(form.phase(), NotePhase::Done { .. }));
}
