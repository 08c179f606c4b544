//! ec-chat: talk to the energy statistics assistant on stdin/stdout.

use tokio::io::BufReader;
use tracing_subscriber::EnvFilter;

use ec_chat::{Assistant, ChatConfig, repl};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .json()
        .init();

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "ec-chat starting");

    // ── Load config ─────────────────────────────────────────────
    let config = match std::env::args().nth(1) {
        Some(path) => {
            let config = ChatConfig::from_file(&path)?;
            tracing::info!(path = %path, "config loaded");
            config
        }
        None => {
            tracing::info!("no config file given, using defaults");
            ChatConfig::default()
        }
    };

    let assistant = Assistant::new(&config)?;
    let mut conversation = assistant.start();

    let stdin = BufReader::new(tokio::io::stdin());
    let mut stdout = tokio::io::stdout();

    tokio::select! {
        result = repl::run(&assistant, &mut conversation, stdin, &mut stdout) => {
            result?;
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("shutdown signal received");
        }
    }

    tracing::info!(
        conversation = %conversation.id(),
        turns = conversation.user_turns(),
        "ec-chat stopped"
    );
    Ok(())
}
