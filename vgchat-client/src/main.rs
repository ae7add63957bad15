//! Interactive chat client binary: username prompt, connection setup, and
//! the input loop that routes slash-commands and plain chat lines.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWriteExt, BufReader, Lines};
use vgchat_client::{ChatConfig, CommandHandler, CommandOutcome, ConnectionManager, ConsoleSink};
use vgchat_core::{init_tracing, EventSink, SystemClock};
use vgchat_storage::MessageHistory;
use vgchat_ws::WsTransport;

#[derive(Parser)]
#[command(name = "vgchat", about = "VG chat client")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Connect to a chat server and start the interactive session.
    Run {
        /// Server URL, e.g. ws://localhost:3000 (overrides CHAT_SERVER_URL).
        #[arg(long)]
        server: Option<String>,
        /// Username; prompted for when omitted.
        #[arg(long)]
        username: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    match cli.command {
        Commands::Run { server, username } => run(server, username).await,
    }
}

async fn run(server: Option<String>, username: Option<String>) -> Result<()> {
    let config = ChatConfig::from_env(server)?;
    if let Some(parent) = std::path::Path::new(&config.log_file).parent() {
        std::fs::create_dir_all(parent)?;
    }
    init_tracing(&config.log_file)?;

    // One reader for both the prompt and the line loop, so type-ahead
    // buffered during the prompt is not lost.
    let mut input = BufReader::new(tokio::io::stdin()).lines();

    println!("=== VG Chat Client ===");
    let username = match username {
        Some(name) if !name.trim().is_empty() => name,
        _ => prompt_username(&mut input).await?,
    };

    let history = match &config.history_db {
        Some(path) => MessageHistory::with_store(path).await?,
        None => MessageHistory::in_memory(),
    };
    history.load().await?;

    let (transport, signals) = WsTransport::new(&config.server_url);
    let sink: Arc<dyn EventSink> = Arc::new(ConsoleSink);
    let manager = Arc::new(ConnectionManager::new(
        username,
        Arc::new(transport),
        history.clone(),
        sink.clone(),
        Arc::new(SystemClock),
    )?);

    let pump = manager.clone();
    tokio::spawn(async move { pump.run(signals).await });

    manager.connect().await;

    let handler = CommandHandler::new(manager.clone(), history, sink);
    println!("Type /help for commands.");

    while let Some(line) = input.next_line().await? {
        let line = line.trim().to_string();
        if line.is_empty() {
            continue;
        }
        if line.starts_with('/') {
            if handler.handle(&line).await == CommandOutcome::Quit {
                break;
            }
        } else {
            manager.send_broadcast(&line).await;
        }
    }

    Ok(())
}

async fn prompt_username<R>(input: &mut Lines<R>) -> Result<String>
where
    R: AsyncBufRead + Unpin,
{
    let mut stdout = tokio::io::stdout();
    stdout.write_all(b"Enter username: ").await?;
    stdout.flush().await?;

    let line = input.next_line().await?.unwrap_or_default();
    let name = line.trim();
    Ok(if name.is_empty() {
        "Anonymous".to_string()
    } else {
        name.to_string()
    })
}
