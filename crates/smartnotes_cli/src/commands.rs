//! Command dispatch: composes core workflows and prints card projections.

use crate::{Command, NoteCommand, TopicCommand};
use anyhow::{bail, Context};
use smartnotes_core::{
    render_note_cards, render_topic_cards, ApiResult, HttpApiClient, ListState, NoteApi, NoteCard,
    NoteForm, NoteList, NotePhase, SearchBar, Session, TopicApi, TopicCard, TopicForm, TopicList,
    WorkflowError,
};
use std::future::Future;

pub async fn dispatch(
    command: Command,
    client: &HttpApiClient,
    session: &Session,
) -> anyhow::Result<()> {
    match command {
        Command::Topics { action } => topics(action, client, session).await,
        Command::Notes { action } => notes(action, client, session).await,
        Command::Search { query } => search(query, client, session).await,
    }
}

async fn topics(
    action: TopicCommand,
    client: &HttpApiClient,
    session: &Session,
) -> anyhow::Result<()> {
    match action {
        TopicCommand::List => {
            let mut list = TopicList::new();
            let state = list.load(client, session).await;
            print_list(state, render_topic_cards, "No topics yet.")
        }
        TopicCommand::Create { name } => {
            let mut form = TopicForm::new();
            form.set_name(name);
            let topic = form.submit(client, session).await.map_err(user_error)?;
            println!("Created topic {}", topic.id);
            println!("{}", TopicCard::from_topic(&topic).render());
            Ok(())
        }
        TopicCommand::Show { id } => {
            let topic = step(session, "get_topic", client.get_topic(&id))
                .await
                .with_context(|| format!("failed to fetch topic {id}"))?;
            println!("{}", TopicCard::from_topic(&topic).render());
            Ok(())
        }
        TopicCommand::Delete { id } => {
            step(session, "delete_topic", client.delete_topic(&id))
                .await
                .with_context(|| format!("failed to delete topic {id}"))?;
            println!("Deleted topic {id}");
            Ok(())
        }
        TopicCommand::Search { query } => {
            let topics = step(session, "search_topics", client.search_topics(&query))
                .await
                .context("topic search failed")?;
            print_list(&ListState::Loaded(topics), render_topic_cards, "No matches.")
        }
    }
}

async fn notes(
    action: NoteCommand,
    client: &HttpApiClient,
    session: &Session,
) -> anyhow::Result<()> {
    match action {
        NoteCommand::List { topic } => {
            let mut list = NoteList::new();
            let state = list.load(client, session, topic.as_ref()).await;
            print_list(state, render_note_cards, "No notes yet.")
        }
        NoteCommand::Create {
            topic,
            title,
            content,
        } => {
            let form = NoteForm::new(topic);
            form.set_title(title);
            form.set_content(content);

            let mut phases = form.subscribe();
            let progress = tokio::spawn(async move {
                while phases.changed().await.is_ok() {
                    match &*phases.borrow_and_update() {
                        NotePhase::Submitting => eprintln!("Creating..."),
                        NotePhase::Enriching { .. } => eprintln!("Generating summary and tags..."),
                        _ => {}
                    }
                }
            });

            let outcome = form.submit(client, session).await;
            drop(form);
            if let Err(err) = progress.await {
                log::warn!("event=progress_printer module=cli status=error error={err}");
            }

            let created = outcome.map_err(user_error)?;
            println!("Created note {}", created.note.id);
            println!("{}", NoteCard::from_note(&created.enriched()).render());
            Ok(())
        }
        NoteCommand::Show { id } => {
            let note = step(session, "get_note", client.get_note(&id))
                .await
                .with_context(|| format!("failed to fetch note {id}"))?;
            println!("{}", NoteCard::from_note(&note).render());
            Ok(())
        }
        NoteCommand::Delete { id } => {
            step(session, "delete_note", client.delete_note(&id))
                .await
                .with_context(|| format!("failed to delete note {id}"))?;
            println!("Deleted note {id}");
            Ok(())
        }
    }
}

async fn search(query: String, client: &HttpApiClient, session: &Session) -> anyhow::Result<()> {
    let bar = SearchBar::new().with_on_search(|results| {
        if results.is_empty() {
            println!("No matches.");
        }
        for card in render_note_cards(results) {
            println!("{card}\n");
        }
    });
    bar.set_query(query);

    match bar.submit(client, session).await.map_err(user_error)? {
        Some(_) => Ok(()),
        None => bail!("search query must not be blank"),
    }
}

/// Runs a single API call bound to the command's session.
async fn step<T, F>(session: &Session, name: &'static str, call: F) -> anyhow::Result<T>
where
    F: Future<Output = ApiResult<T>>,
{
    let outcome = session.guard(name, call).await.map_err(user_error)?;
    Ok(outcome?)
}

fn print_list<T>(
    state: &ListState<T>,
    render: fn(&[T]) -> Vec<String>,
    empty: &str,
) -> anyhow::Result<()> {
    match state {
        ListState::Loaded(items) if items.is_empty() => {
            println!("{empty}");
            Ok(())
        }
        ListState::Loaded(items) => {
            for card in render(items) {
                println!("{card}\n");
            }
            Ok(())
        }
        ListState::Failed(message) => bail!("{message}"),
        ListState::Loading => bail!("{}", WorkflowError::Cancelled.user_message()),
    }
}

fn user_error(err: WorkflowError) -> anyhow::Error {
    anyhow::anyhow!(err.user_message())
}
