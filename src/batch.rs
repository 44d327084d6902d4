//! Batch processing utilities for chunking many documents at once.

use std::collections::VecDeque;
use std::sync::Arc;

use anyhow::Result;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::chunkers::Chunker;
use crate::error::ChunkerError;
use crate::registry::SplitterRegistry;
use crate::types::{ChunkConfig, ChunkingConfig, DocumentChunks, SourceItem};
use crate::DEFAULT_BATCH_CONCURRENCY;

/// Configuration for batch processing.
#[derive(Debug, Clone)]
pub struct BatchConfig {
    /// Maximum items to split concurrently
    pub concurrency: usize,
    /// Whether to continue on individual item failures
    pub continue_on_error: bool,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            concurrency: DEFAULT_BATCH_CONCURRENCY,
            continue_on_error: true,
        }
    }
}

impl BatchConfig {
    /// Batch settings taken from the global configuration.
    pub fn from_chunking_config(config: &ChunkingConfig) -> Self {
        Self {
            concurrency: config.batch_concurrency,
            ..Default::default()
        }
    }
}

/// Result of batch processing.
#[derive(Debug, Clone, Default)]
pub struct BatchResult {
    pub total_items: usize,
    pub processed_items: usize,
    pub failed_items: usize,
    pub total_chunks: usize,
    pub errors: Vec<BatchError>,
}

/// Error during batch processing.
#[derive(Debug, Clone)]
pub struct BatchError {
    pub item_id: Uuid,
    pub error: String,
}

type ItemHandle = (Uuid, JoinHandle<crate::error::Result<DocumentChunks>>);

/// Batch processor that splits documents on the blocking thread pool.
///
/// Splitting is CPU-bound, so each item runs in `spawn_blocking`. At most
/// `concurrency` items are in flight; results come back in input order.
pub struct BatchProcessor {
    registry: Arc<SplitterRegistry>,
    config: BatchConfig,
}

impl BatchProcessor {
    /// Create a new batch processor.
    pub fn new(registry: Arc<SplitterRegistry>, config: BatchConfig) -> Self {
        Self { registry, config }
    }

    /// Process a batch of items and return the chunks of each.
    pub async fn process_batch(
        &self,
        items: Vec<SourceItem>,
        chunk_config: &ChunkConfig,
    ) -> Result<(Vec<DocumentChunks>, BatchResult)> {
        info!(total_items = items.len(), "Starting batch processing");

        let (tx, mut rx) = mpsc::channel(self.config.concurrency.max(1));
        let collect = async {
            let mut documents = Vec::new();
            while let Some(document) = rx.recv().await {
                documents.push(document);
            }
            documents
        };

        let (result, documents) = tokio::join!(
            self.process_batch_streaming(items, chunk_config, tx),
            collect
        );
        let result = result?;

        info!(
            processed = result.processed_items,
            failed = result.failed_items,
            chunks = result.total_chunks,
            "Batch processing complete"
        );

        Ok((documents, result))
    }

    /// Process a batch, sending each document's chunks as soon as it and
    /// every document before it are done.
    ///
    /// Items are spawned in order; once `concurrency` are in flight, the
    /// oldest one is awaited and sent before the next is spawned. A slow
    /// receiver therefore holds back spawning instead of letting finished
    /// results pile up.
    pub async fn process_batch_streaming(
        &self,
        items: Vec<SourceItem>,
        chunk_config: &ChunkConfig,
        sender: mpsc::Sender<DocumentChunks>,
    ) -> Result<BatchResult> {
        let concurrency = self.config.concurrency.max(1);
        let mut in_flight: VecDeque<ItemHandle> = VecDeque::with_capacity(concurrency);
        let mut result = BatchResult {
            total_items: items.len(),
            ..Default::default()
        };

        for item in items {
            if in_flight.len() >= concurrency {
                if let Some(handle) = in_flight.pop_front() {
                    if !self.deliver(handle, &sender, &mut result).await? {
                        return Ok(result);
                    }
                }
            }
            in_flight.push_back(self.spawn_item(item, chunk_config));
        }

        while let Some(handle) = in_flight.pop_front() {
            if !self.deliver(handle, &sender, &mut result).await? {
                break;
            }
        }

        Ok(result)
    }

    fn spawn_item(&self, item: SourceItem, chunk_config: &ChunkConfig) -> ItemHandle {
        let registry = Arc::clone(&self.registry);
        let defaults = *chunk_config;
        let item_id = item.id;

        let handle = tokio::task::spawn_blocking(move || split_item(&registry, &item, &defaults));
        (item_id, handle)
    }

    /// Await one item and send its chunks. Returns `false` once the receiver
    /// is gone.
    async fn deliver(
        &self,
        (item_id, handle): ItemHandle,
        sender: &mpsc::Sender<DocumentChunks>,
        result: &mut BatchResult,
    ) -> Result<bool> {
        match join(handle).await {
            Ok(document) => {
                result.total_chunks += document.len();
                result.processed_items += 1;

                if sender.send(document).await.is_err() {
                    warn!("Receiver dropped, stopping batch processing");
                    return Ok(false);
                }
            }
            Err(e) => self.record_failure(result, item_id, e)?,
        }

        Ok(true)
    }

    fn record_failure(&self, result: &mut BatchResult, item_id: Uuid, error: ChunkerError) -> Result<()> {
        result.failed_items += 1;
        result.errors.push(BatchError {
            item_id,
            error: error.to_string(),
        });

        if !self.config.continue_on_error {
            return Err(error.into());
        }

        warn!(item_id = %item_id, error = %error, "Failed to process item");
        Ok(())
    }
}

async fn join(handle: JoinHandle<crate::error::Result<DocumentChunks>>) -> crate::error::Result<DocumentChunks> {
    handle.await.map_err(|e| ChunkerError::Task(e.to_string()))?
}

/// Split one item with its resolved strategy and effective parameters.
fn split_item(
    registry: &SplitterRegistry,
    item: &SourceItem,
    defaults: &ChunkConfig,
) -> crate::error::Result<DocumentChunks> {
    let name = item.strategy.as_deref().unwrap_or_else(|| registry.default_name());
    let chunker = registry.try_resolve(name)?;
    let config = item.effective_config(defaults);

    debug!(
        item_id = %item.id,
        strategy = chunker.name(),
        chars = item.content_len(),
        "Splitting item"
    );

    Ok(DocumentChunks {
        source_item_id: item.id,
        strategy: chunker.name().to_string(),
        chunks: chunker.chunk(&item.content, &config),
    })
}
