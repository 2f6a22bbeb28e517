use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use client_core::{
    exit::{is_confirmation, ExitPrompt},
    ChatSession, Key, Modifiers,
};
use shared::protocol::SessionEvent;
use tokio::{
    io::{AsyncBufReadExt, BufReader},
    sync::broadcast::error::RecvError,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod config;
mod render;

use config::load_settings;

const EXIT_COMMAND: &str = "/exit";

#[derive(Parser, Debug)]
struct Args {
    /// Settings file; defaults to ./secure_chat.toml when present.
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    display_name: Option<String>,
    #[arg(long)]
    reply_delay_ms: Option<u64>,
    /// Dump the transcript as JSON on exit.
    #[arg(long)]
    json: bool,
    #[arg(long, default_value_t = 72)]
    width: usize,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut settings = load_settings(args.config.as_deref())?;
    if let Some(name) = args.display_name {
        settings.display_name = Some(name);
    }
    if let Some(delay) = args.reply_delay_ms {
        settings.reply_delay_ms = delay;
    }

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.log_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let mut session =
        ChatSession::open(settings.session_config()).context("failed to open chat session")?;
    println!("{}", render::render_header(session.display_name()));
    println!("{}", render::render_log(&session.view(), args.width));

    let width = args.width;
    let mut events = session.subscribe_events();
    let printer = tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(SessionEvent::MessageAppended(message)) => {
                    println!("\n{}", render::render_message(&message, width));
                }
                Ok(SessionEvent::Closed) | Err(RecvError::Closed) => break,
                Err(RecvError::Lagged(skipped)) => {
                    warn!("desktop: renderer lagged skipped_events={skipped}");
                }
            }
        }
    });

    let prompt = ExitPrompt;
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("failed to read stdin")? {
        if line.trim() == EXIT_COMMAND {
            println!("{} [y/N]", prompt.message());
            let answer = lines
                .next_line()
                .await
                .context("failed to read stdin")?
                .unwrap_or_default();
            if let Some(target) = prompt.resolve(is_confirmation(&answer)) {
                info!("desktop: exit confirmed navigate={target:?}");
                break;
            }
            continue;
        }

        session.set_composer_text(line);
        session.consume_keystroke(Key::Enter, Modifiers::NONE);
    }

    let transcript = session.view();
    session.close();
    if let Err(err) = printer.await {
        warn!("desktop: renderer task failed: {err}");
    }

    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&transcript).context("failed to encode transcript")?
        );
    }

    Ok(())
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
