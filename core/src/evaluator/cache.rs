//! Memoization of evaluation results.
//!
//! Entries live for the whole process and are never evicted or invalidated;
//! the key space is bounded by what a user types into one editing session.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;
use serde::Serialize;

use super::result::EvalResult;
use crate::params::Params;

/// `(operation name, canonical parameters)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub operation: String,
    pub params: String,
}

impl CacheKey {
    pub fn new(operation: &str, params: &Params) -> Self {
        Self {
            operation: operation.to_string(),
            params: params.cache_key(),
        }
    }
}

/// Counters describing cache use so far.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub entries: usize,
}

/// Concurrent result cache. Both successes and failures are stored.
#[derive(Debug, Default)]
pub struct ResultCache {
    entries: DashMap<CacheKey, Arc<EvalResult>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl ResultCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &CacheKey) -> Option<Arc<EvalResult>> {
        let found = self.entries.get(key).map(|entry| Arc::clone(entry.value()));
        let counter = if found.is_some() {
            &self.hits
        } else {
            &self.misses
        };
        counter.fetch_add(1, Ordering::Relaxed);
        found
    }

    /// Store `result` unless another caller stored one for `key` first, and
    /// return whichever is cached.
    pub fn insert(&self, key: CacheKey, result: Arc<EvalResult>) -> Arc<EvalResult> {
        Arc::clone(self.entries.entry(key).or_insert(result).value())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entries: self.entries.len(),
        }
    }
}
