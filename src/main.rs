//! # Jobscout RAG API server
//!
//! Answers natural-language questions from a precomputed vector index and
//! matches uploaded résumés against job offers from the France Travail API.
//!
//! Usage:
//!   jobscout                          # Start the API (default port 8001)
//!   jobscout --config ./jobscout.toml # Custom config file
//!   jobscout --port 9000              # Override the listen port

use anyhow::Result;
use clap::Parser;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use jobscout_core::JobscoutConfig;
use jobscout_gateway::AppState;
use jobscout_jobs::FranceTravailClient;
use jobscout_providers::{OpenAiEmbedder, OpenAiGenerator, PlainTextExtractor, QdrantStore};

#[derive(Parser)]
#[command(name = "jobscout", version, about = "Jobscout RAG API server")]
struct Cli {
    /// Path to the config file (defaults to ~/.jobscout/config.toml)
    #[arg(short, long)]
    config: Option<std::path::PathBuf>,

    /// Override the listen port
    #[arg(short, long)]
    port: Option<u16>,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        "jobscout=debug,tower_http=debug"
    } else {
        "jobscout=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();

    let mut config = match &cli.config {
        Some(path) => JobscoutConfig::load_from(path)?,
        None => JobscoutConfig::load()?,
    };
    if let Some(port) = cli.port {
        config.gateway.port = port;
    }

    // Collaborator handles: constructed once, immutable afterwards.
    let store = Arc::new(QdrantStore::new(&config.qdrant)?);
    let embedder = Arc::new(OpenAiEmbedder::new(&config.embedding)?);
    let generator = Arc::new(OpenAiGenerator::new(&config.llm)?);
    let extractor = Arc::new(PlainTextExtractor::new());
    let offers = Arc::new(FranceTravailClient::new(config.france_travail.clone())?);

    tracing::info!(
        qdrant = %config.qdrant.url,
        llm = %config.llm.endpoint,
        model = %config.llm.model,
        "starting jobscout v{}",
        env!("CARGO_PKG_VERSION")
    );

    let state = AppState {
        config,
        embedder,
        store,
        generator,
        extractor,
        offers,
    };

    jobscout_gateway::start(state).await?;
    Ok(())
}
