//! Text Splitter - Command Line Entry Point
//!
//! Reads a document (or a JSON array of documents) from stdin and writes
//! the resulting chunks to stdout as JSON.

use std::io::Read;
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{debug, info};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use textsplit::batch::{BatchConfig, BatchProcessor};
use textsplit::chunkers::Chunker;
use textsplit::registry::SplitterRegistry;
use textsplit::types::{ChunkingConfig, SourceItem};

/// Output for a single plain-text document.
#[derive(Debug, Serialize)]
struct SplitOutput {
    strategy: String,
    chunk_size: usize,
    chunk_overlap: usize,
    chunks: Vec<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration, .env first so it can set RUST_LOG too
    dotenvy::dotenv().ok();
    let config = ChunkingConfig::try_from_env().context("loading configuration")?;

    // Initialize tracing on stderr, keeping stdout for results
    let json = config.json_logs;
    tracing_subscriber::registry()
        .with(EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "textsplit=info".into()),
        ))
        .with(json.then(|| fmt::layer().json().with_writer(std::io::stderr)))
        .with((!json).then(|| fmt::layer().with_writer(std::io::stderr)))
        .init();

    info!("Starting textsplit v{}", env!("CARGO_PKG_VERSION"));
    info!(
        chunk_size = config.default_chunk_size,
        chunk_overlap = config.default_chunk_overlap,
        strategy = %config.default_strategy,
        "Configuration loaded"
    );

    let registry = Arc::new(SplitterRegistry::with_defaults(&config));

    let mut input = String::new();
    std::io::stdin()
        .read_to_string(&mut input)
        .context("reading stdin")?;

    let output = match parse_items(&input) {
        Some(items) => {
            let processor = BatchProcessor::new(
                Arc::clone(&registry),
                BatchConfig::from_chunking_config(&config),
            );
            let (documents, result) = processor
                .process_batch(items, &config.chunk_config())
                .await?;

            info!(
                documents = documents.len(),
                failed = result.failed_items,
                chunks = result.total_chunks,
                "Batch split"
            );
            serde_json::to_string_pretty(&documents)?
        }
        None => {
            let chunker = registry.try_resolve(&config.default_strategy)?;
            let chunks = chunker.chunk(&input, &config.chunk_config());

            info!(strategy = chunker.name(), chunks = chunks.len(), "Document split");
            serde_json::to_string_pretty(&SplitOutput {
                strategy: chunker.name().to_string(),
                chunk_size: config.default_chunk_size,
                chunk_overlap: config.default_chunk_overlap,
                chunks,
            })?
        }
    };

    println!("{}", output);

    Ok(())
}

/// Parse stdin as a JSON array of items, or `None` to split it as raw text.
fn parse_items(input: &str) -> Option<Vec<SourceItem>> {
    match serde_json::from_str(input) {
        Ok(items) => Some(items),
        Err(e) => {
            if input.trim_start().starts_with('[') {
                debug!(error = %e, "Input is not a valid item array, splitting as raw text");
            }
            None
        }
    }
}
