//! `smartnotes` command-line entry point.
//!
//! # Responsibility
//! - Parse options, initialize logging and build the HTTP client.
//! - Bind every command to one `Session` that Ctrl-C cancels.

mod commands;

use anyhow::Context;
use clap::{Parser, Subcommand};
use smartnotes_core::config::{
    parse_timeout_secs, API_URL_ENV, DEFAULT_API_URL, LOG_DIR_ENV, LOG_LEVEL_ENV, TIMEOUT_SECS_ENV,
};
use smartnotes_core::{
    default_log_level, init_logging, init_stderr_logging, ClientConfig, HttpApiClient, NoteId,
    Session, TopicId,
};
use std::process::ExitCode;
use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, Parser)]
#[command(name = "smartnotes", version, about = "Client for the Smart Notes API")]
struct Cli {
    /// API root, e.g. http://localhost:8000/api
    #[arg(long, global = true, env = API_URL_ENV, default_value = DEFAULT_API_URL)]
    api_url: String,
    /// Per-request timeout in seconds (default: none)
    #[arg(long, global = true, env = TIMEOUT_SECS_ENV, value_parser = parse_timeout_secs)]
    timeout_secs: Option<Duration>,
    /// trace|debug|info|warn|error
    #[arg(long, global = true, env = LOG_LEVEL_ENV)]
    log_level: Option<String>,
    /// Absolute directory for rolling log files; logs go to stderr when unset
    #[arg(long, global = true, env = LOG_DIR_ENV)]
    log_dir: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Manage topics
    Topics {
        #[command(subcommand)]
        action: TopicCommand,
    },
    /// Manage notes
    Notes {
        #[command(subcommand)]
        action: NoteCommand,
    },
    /// Search notes by title, content and tags
    Search { query: String },
}

#[derive(Debug, Subcommand)]
enum TopicCommand {
    List,
    Create { name: String },
    Show {
        #[arg(value_parser = TopicId::from_str)]
        id: TopicId,
    },
    Delete {
        #[arg(value_parser = TopicId::from_str)]
        id: TopicId,
    },
    /// Search topics by name
    Search { query: String },
}

#[derive(Debug, Subcommand)]
enum NoteCommand {
    List {
        /// Only show notes of this topic
        #[arg(long, value_parser = TopicId::from_str)]
        topic: Option<TopicId>,
    },
    /// Create a note, then request its summary and tags
    Create {
        #[arg(long, value_parser = TopicId::from_str)]
        topic: TopicId,
        #[arg(long)]
        title: String,
        #[arg(long)]
        content: String,
    },
    Show {
        #[arg(value_parser = NoteId::from_str)]
        id: NoteId,
    },
    Delete {
        #[arg(value_parser = NoteId::from_str)]
        id: NoteId,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    if let Err(err) = setup_logging(cli.log_level.as_deref(), cli.log_dir.as_deref()) {
        eprintln!("warning: logging disabled: {err}");
    }

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn setup_logging(level: Option<&str>, log_dir: Option<&str>) -> Result<(), String> {
    match log_dir {
        Some(dir) => init_logging(level.unwrap_or(default_log_level()), dir),
        None => init_stderr_logging(level.unwrap_or("warn")),
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = ClientConfig::new(cli.api_url).with_timeout(cli.timeout_secs);
    let client = HttpApiClient::new(config).context("invalid client configuration")?;

    let session = Session::new();
    let cancel = session.cancel_handle();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            log::info!("event=interrupt module=cli status=ok action=cancel_session");
            cancel.cancel();
        }
    });

    commands::dispatch(cli.command, &client, &session).await
}
