//! # Jobscout Indexer: offline corpus indexing
//!
//! Walks a directory of plain-text documents, chunks them, and (re)builds the
//! document collection in the vector store. Intended to run on every deploy;
//! the rebuild is destructive by design.
//!
//! With `--offers`, instead ingests the current job offers from the France
//! Travail API into the offer collection. That build is guarded: if the
//! collection is already populated it is left untouched, because offer
//! ingestion burns external API quota.
//!
//! Usage:
//!   jobscout-indexer --data-dir ./data
//!   jobscout-indexer --offers --max-offers 100

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use jobscout_core::JobscoutConfig;
use jobscout_core::traits::TextExtractor;
use jobscout_core::types::Profile;
use jobscout_index::builder::{IndexBuilder, RebuildMode, SourceDocument, wait_ready};
use jobscout_jobs::FranceTravailClient;
use jobscout_providers::{OpenAiEmbedder, PlainTextExtractor, QdrantStore};

#[derive(Parser)]
#[command(name = "jobscout-indexer", version, about = "Jobscout offline corpus indexer")]
struct Cli {
    /// Path to the config file (defaults to ~/.jobscout/config.toml)
    #[arg(short, long)]
    config: Option<std::path::PathBuf>,

    /// Directory of documents to index (.txt and .md)
    #[arg(short, long, default_value = "./data")]
    data_dir: std::path::PathBuf,

    /// Ingest job offers from the France Travail API instead of documents
    #[arg(long)]
    offers: bool,

    /// How many offers to fetch with --offers
    #[arg(long, default_value = "100")]
    max_offers: usize,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

/// Collect extractable documents from the corpus directory. Files that fail
/// extraction are logged and skipped; they do not abort the build.
fn collect_corpus(dir: &std::path::Path, extractor: &dyn TextExtractor) -> Result<Vec<SourceDocument>> {
    let mut corpus = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        let Some(name) = path.file_name().and_then(|n| n.to_str()).map(String::from) else {
            continue;
        };

        let bytes = match std::fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::warn!(file = %name, "failed to read, skipping: {e}");
                continue;
            }
        };
        match extractor.extract(&bytes, &name) {
            Ok(text) => corpus.push(SourceDocument::new(name, text)),
            Err(e) => tracing::warn!(file = %name, "failed to extract, skipping: {e}"),
        }
    }
    Ok(corpus)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        "jobscout=debug"
    } else {
        "jobscout=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();

    let config = match &cli.config {
        Some(path) => JobscoutConfig::load_from(path)?,
        None => JobscoutConfig::load()?,
    };

    let store = QdrantStore::new(&config.qdrant)?;
    let embedder = OpenAiEmbedder::new(&config.embedding)?;

    tracing::info!(qdrant = %config.qdrant.url, "waiting for the vector store");
    wait_ready(&store).await?;

    let (corpus, collection, mode) = if cli.offers {
        let client = FranceTravailClient::new(config.france_travail.clone())?;
        // An empty profile plans the terminal no-filter strategy only, which
        // returns the endpoint's most recent offers.
        let offers = client
            .find_offers(&Profile::new("", vec![]), cli.max_offers)
            .await?;
        tracing::info!(offers = offers.len(), "fetched job offers");

        let corpus = offers
            .into_iter()
            .enumerate()
            .map(|(idx, offer)| {
                let text = format!(
                    "{}\n{}\n{}\n{}\n{}",
                    offer.title, offer.company, offer.location, offer.contract_type, offer.description
                );
                SourceDocument::new(format!("offer-{idx}"), text)
            })
            .collect();
        (
            corpus,
            config.index.offer_collection.clone(),
            RebuildMode::SkipIfPopulated,
        )
    } else {
        let extractor = PlainTextExtractor::new();
        let corpus = collect_corpus(&cli.data_dir, &extractor)?;
        tracing::info!(documents = corpus.len(), "collected corpus");
        (
            corpus,
            config.index.document_collection.clone(),
            RebuildMode::Recreate,
        )
    };

    if corpus.is_empty() {
        tracing::warn!("nothing to index");
        return Ok(());
    }

    let builder = IndexBuilder::new(
        &embedder,
        &store,
        config.index.chunk_size,
        config.index.chunk_overlap,
    );
    let records = builder.build(corpus, &collection, mode).await?;

    tracing::info!(collection = %collection, records, "indexing complete");
    Ok(())
}
