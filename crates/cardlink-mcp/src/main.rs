//! MCP server for Anki flashcards via AnkiConnect.
//!
//! Exposes deck listing, card search and card creation (with media
//! attachments) as tools for LLM assistants.

mod params;
mod server;

use std::sync::Arc;
use std::time::Duration;

use cardlink_engine::{ClientBuilder, EmptyDeckPolicy, Engine, EngineOptions};
use clap::Parser;
use rmcp::ServiceExt;
use tracing::info;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use server::CardServer;

/// MCP server for Anki flashcards via AnkiConnect.
#[derive(Parser, Debug)]
#[command(name = "cardlink-mcp")]
#[command(version, about, long_about = None)]
struct Args {
    /// AnkiConnect host address
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// AnkiConnect port
    #[arg(long, default_value_t = 8765)]
    port: u16,

    /// AnkiConnect API key, if the add-on is configured to require one
    #[arg(long)]
    api_key: Option<String>,

    /// Timeout for each AnkiConnect request, in seconds
    #[arg(long, default_value_t = 30)]
    timeout_secs: u64,

    /// Read-only mode (disables addCard and addBulkCards)
    #[arg(long, default_value_t = false)]
    read_only: bool,

    /// What an empty deck name means for getCardsInDeck: all or reject
    #[arg(long, default_value = "all")]
    empty_deck: EmptyDeck,

    /// Enable verbose logging (use multiple times for more verbosity)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Transport mode: stdio (default) or http
    #[arg(long, default_value = "stdio")]
    transport: Transport,

    /// HTTP server port (only used with --transport http)
    #[arg(long, default_value_t = 3000)]
    http_port: u16,

    /// HTTP server bind address (only used with --transport http)
    #[arg(long, default_value = "127.0.0.1")]
    http_host: String,
}

/// Transport mode for the MCP server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Transport {
    /// Standard I/O transport (default, for CLI integration)
    #[default]
    Stdio,
    /// Streamable HTTP transport (for remote connections)
    Http,
}

impl std::str::FromStr for Transport {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "stdio" => Ok(Transport::Stdio),
            "http" => Ok(Transport::Http),
            _ => Err(format!("Invalid transport: {}. Use 'stdio' or 'http'", s)),
        }
    }
}

/// Command-line spelling of [`EmptyDeckPolicy`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum EmptyDeck {
    #[default]
    All,
    Reject,
}

impl std::str::FromStr for EmptyDeck {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "all" => Ok(EmptyDeck::All),
            "reject" => Ok(EmptyDeck::Reject),
            _ => Err(format!("Invalid empty-deck policy: {}. Use 'all' or 'reject'", s)),
        }
    }
}

impl From<EmptyDeck> for EmptyDeckPolicy {
    fn from(value: EmptyDeck) -> Self {
        match value {
            EmptyDeck::All => EmptyDeckPolicy::AllDecks,
            EmptyDeck::Reject => EmptyDeckPolicy::Reject,
        }
    }
}

fn log_level(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

fn build_engine(args: &Args) -> Engine {
    let url = format!("http://{}:{}", args.host, args.port);
    let mut builder = ClientBuilder::new()
        .url(url)
        .timeout(Duration::from_secs(args.timeout_secs));
    if let Some(key) = &args.api_key {
        builder = builder.api_key(key);
    }

    Engine::from_client(builder.build()).with_options(EngineOptions {
        empty_deck: args.empty_deck.into(),
    })
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // RUST_LOG wins over -v; logs go to stderr since stdout carries the stdio transport
    let filter = EnvFilter::builder()
        .with_default_directive(log_level(args.verbose).into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let engine = build_engine(&args);
    info!(
        anki_url = %engine.client().url(),
        read_only = args.read_only,
        empty_deck = ?args.empty_deck,
        transport = ?args.transport,
        "Starting cardlink-mcp server"
    );

    let server = CardServer::new(engine, args.read_only);

    match args.transport {
        Transport::Stdio => {
            let transport = (tokio::io::stdin(), tokio::io::stdout());
            let mcp_server = server.serve(transport).await?;
            mcp_server.waiting().await?;
        }
        Transport::Http => {
            use rmcp::transport::streamable_http_server::{
                StreamableHttpServerConfig, StreamableHttpService,
                session::local::LocalSessionManager,
            };

            let bind_addr = format!("{}:{}", args.http_host, args.http_port);
            info!(bind_addr = %bind_addr, "Starting HTTP transport");

            let service: StreamableHttpService<CardServer, LocalSessionManager> =
                StreamableHttpService::new(
                    move || Ok(server.clone()),
                    Arc::new(LocalSessionManager::default()),
                    StreamableHttpServerConfig::default(),
                );

            let router = axum::Router::new().nest_service("/mcp", service);
            let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
            info!(bind_addr = %bind_addr, "MCP server listening on HTTP");

            axum::serve(listener, router).await?;
        }
    }

    Ok(())
}
