//! Spendbot server binary
//!
//! Accepts free-text messages from a messaging-bot front end, extracts
//! expenses with an LLM, and stores them in SQLite.
//!
//! Usage:
//!   spendbot-server --db spendbot.db --port 8000
//!
//! Provider credentials come from the environment (OPENAI_API_KEY or
//! ANTHROPIC_API_KEY, selected by LLM_MODEL).

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use spendbot_core::{Database, ExpenseService, Extractor, LlmClient, Settings};

#[derive(Parser)]
#[command(name = "spendbot-server", about = "Expense extraction API server")]
struct Cli {
    /// Database file path (overrides SPENDBOT_DB)
    #[arg(long)]
    db: Option<String>,

    /// Host to bind to (overrides SPENDBOT_HOST)
    #[arg(long)]
    host: Option<String>,

    /// Port to bind to (overrides SPENDBOT_PORT)
    #[arg(long)]
    port: Option<u16>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    let mut settings = Settings::from_env();
    if let Some(db) = cli.db {
        settings.database_path = db;
    }
    if let Some(host) = cli.host {
        settings.host = host;
    }
    if let Some(port) = cli.port {
        settings.port = port;
    }

    // A missing credential for the selected provider is fatal here, before
    // the server starts accepting messages.
    let client = LlmClient::from_settings(&settings)
        .with_context(|| format!("Failed to initialize {} client", settings.llm_provider()))?;
    tracing::info!(
        model = %settings.llm_model,
        provider = %settings.llm_provider(),
        "LLM client initialized"
    );

    let db = Database::new(&settings.database_path)
        .with_context(|| format!("Failed to open database at {}", settings.database_path))?;

    let service = ExpenseService::new(Extractor::new(client), db.clone());

    spendbot_server::serve(db, service, settings.clone(), &settings.host, settings.port).await
}
