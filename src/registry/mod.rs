//! Chunking strategy registry.

use std::collections::BTreeMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use lazy_static::lazy_static;
use tracing::{debug, warn};

use crate::chunkers::{Chunker, FixedWindowChunker, RecursiveChunker};
use crate::error::{ChunkerError, Result};
use crate::types::ChunkingConfig;
use crate::DEFAULT_STRATEGY;

lazy_static! {
    static ref GLOBAL: Arc<SplitterRegistry> =
        Arc::new(SplitterRegistry::with_defaults(&ChunkingConfig::from_env()));
}

/// The process-wide registry, built on first use from environment config.
pub fn global() -> Arc<SplitterRegistry> {
    Arc::clone(&GLOBAL)
}

/// Registry that maps strategy names to chunkers.
///
/// Resolution never fails for an unknown name: it falls back to the default
/// strategy, then to the first registered name in lexicographic order.
/// Names are case-insensitive.
///
/// Registration is expected at startup; resolution is cheap and may happen
/// from any number of threads.
pub struct SplitterRegistry {
    chunkers: RwLock<BTreeMap<String, Arc<dyn Chunker>>>,
    default_name: String,
}

impl SplitterRegistry {
    /// Create an empty registry whose fallback is the "recursive" strategy.
    pub fn new() -> Self {
        Self::with_default_name(DEFAULT_STRATEGY)
    }

    /// Create an empty registry with a custom fallback name.
    pub fn with_default_name(default_name: &str) -> Self {
        Self {
            chunkers: RwLock::new(BTreeMap::new()),
            default_name: normalize(default_name),
        }
    }

    /// Create a registry holding the built-in strategies.
    pub fn with_defaults(config: &ChunkingConfig) -> Self {
        let registry = Self::with_default_name(&config.default_strategy);
        registry.register_chunker(FixedWindowChunker::new());
        registry.register_chunker(RecursiveChunker::new());
        registry.register_chunker(RecursiveChunker::for_markdown());
        registry
    }

    /// Bind `chunker` to `name`, replacing any previous binding.
    pub fn register(&self, name: &str, chunker: Arc<dyn Chunker>) {
        let name = normalize(name);
        debug!(name = %name, chunker = chunker.name(), "Registering chunker");
        self.write().insert(name, chunker);
    }

    /// Register a chunker under its own name.
    pub fn register_chunker<C: Chunker + 'static>(&self, chunker: C) {
        self.register(chunker.name(), Arc::new(chunker));
    }

    /// Remove the binding for `name`, returning it if present.
    pub fn unregister(&self, name: &str) -> Option<Arc<dyn Chunker>> {
        self.write().remove(&normalize(name))
    }

    /// Get a chunker by exact name, without fallback.
    pub fn get(&self, name: &str) -> Option<Arc<dyn Chunker>> {
        self.read().get(&normalize(name)).cloned()
    }

    /// Resolve a chunker by name.
    ///
    /// Falls back to the default name, then to the first registered entry.
    /// Returns `None` only when nothing is registered.
    pub fn resolve(&self, name: &str) -> Option<Arc<dyn Chunker>> {
        let chunkers = self.read();
        let name = normalize(name);

        if let Some(chunker) = chunkers.get(&name) {
            return Some(Arc::clone(chunker));
        }

        if let Some(chunker) = chunkers.get(&self.default_name) {
            debug!(requested = %name, fallback = %self.default_name, "Unknown chunker, using default");
            return Some(Arc::clone(chunker));
        }

        let (fallback, chunker) = chunkers.iter().next()?;
        warn!(
            requested = %name,
            default = %self.default_name,
            fallback = %fallback,
            "Default chunker not registered, using first available"
        );
        Some(Arc::clone(chunker))
    }

    /// Resolve a chunker, treating an empty registry as an error.
    pub fn try_resolve(&self, name: &str) -> Result<Arc<dyn Chunker>> {
        self.resolve(name).ok_or(ChunkerError::EmptyRegistry)
    }

    /// Resolve `name` and split `text` with it.
    pub fn split_text(
        &self,
        name: &str,
        text: &str,
        chunk_size: usize,
        chunk_overlap: usize,
    ) -> Result<Vec<String>> {
        Ok(self.try_resolve(name)?.split_text(text, chunk_size, chunk_overlap))
    }

    /// The name unknown strategies resolve to.
    pub fn default_name(&self) -> &str {
        &self.default_name
    }

    /// List registered names with their descriptions, sorted by name.
    pub fn list(&self) -> Vec<(String, &'static str)> {
        self.read()
            .iter()
            .map(|(name, chunker)| (name.clone(), chunker.description()))
            .collect()
    }

    /// Number of registered names.
    pub fn len(&self) -> usize {
        self.read().len()
    }

    /// Check if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    // The map is only ever replaced entry by entry, so a panic while a guard
    // was held cannot leave it half-updated.
    fn read(&self) -> RwLockReadGuard<'_, BTreeMap<String, Arc<dyn Chunker>>> {
        self.chunkers.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, BTreeMap<String, Arc<dyn Chunker>>> {
        self.chunkers.write().unwrap_or_else(|e| e.into_inner())
    }
}

impl Default for SplitterRegistry {
    fn default() -> Self {
        Self::with_defaults(&ChunkingConfig::default())
    }
}

fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}
