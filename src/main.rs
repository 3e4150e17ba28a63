use anyhow::{Context, Result};
use clap::Parser;
use flashcard_server::config::{self, ConfigOverrides, RunMode};
use flashcard_server::query::{DeckService, FlashcardQueries};
use flashcard_server::{api, deck, logging};
use std::net::Ipv4Addr;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;

#[derive(Parser)]
#[command(
    name = "flashcard-server",
    about = "Serve a static flashcard deck over a read-only REST API"
)]
struct Cli {
    /// Port to listen on (overrides `PORT`).
    #[arg(long)]
    port: Option<u16>,
    /// Flashcard JSON file (overrides `FLASHCARDS_DATA_PATH`).
    #[arg(long)]
    data: Option<PathBuf>,
    /// Front-end bundle directory (overrides `STATIC_DIR`).
    #[arg(long)]
    static_dir: Option<PathBuf>,
    /// Mirror log output into this file (overrides `FLASHCARDS_LOG_FILE`).
    #[arg(long)]
    log_file: Option<PathBuf>,
    /// Serve the front-end bundle for non-API paths.
    #[arg(long)]
    production: bool,
}

impl From<Cli> for ConfigOverrides {
    fn from(cli: Cli) -> Self {
        Self {
            port: cli.port,
            data_path: cli.data,
            static_dir: cli.static_dir,
            log_file: cli.log_file,
            production: cli.production,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = config::init_config(cli.into()).context("failed to load configuration")?;
    logging::init_tracing(config.log_file.as_deref());

    let service = Arc::new(DeckService::new(deck::load(&config.data_path)));
    let flashcards = service.flashcard_count();
    let app = match config.mode {
        RunMode::Production => {
            tracing::info!(static_dir = %config.static_dir.display(), "Serving front-end bundle");
            api::create_router_with_frontend(service, &config.static_dir)
        }
        RunMode::Development => api::create_router(service),
    };

    let listener = TcpListener::bind((Ipv4Addr::UNSPECIFIED, config.port))
        .await
        .with_context(|| format!("failed to bind port {}", config.port))?;
    tracing::info!("Server running on port {}", config.port);
    tracing::info!("Loaded {} flashcards", flashcards);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server terminated unexpectedly")?;
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("Received Ctrl+C, shutting down"),
        Err(err) => {
            tracing::warn!(error = %err, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    }
}
