// ==========================================
// Zuidplas Logistics - Result Cache
// ==========================================
// Caller-controlled decorator around the pipeline.
// Key: SHA-256 of the canonical JSON bytes of the raw row set
// (plus the run options). A different key always recomputes.
// ==========================================

use serde::Serialize;
use serde_json::Value;
use sha2::{Digest, Sha256};
use tracing::debug;

/// Content hash of a raw row set; `None` if it cannot be serialised.
pub fn content_key(rows: &[Value]) -> Option<String> {
    keyed(rows, &())
}

/// Content hash of a raw row set together with the run options.
pub fn keyed<O: Serialize>(rows: &[Value], options: &O) -> Option<String> {
    let mut hasher = Sha256::new();
    hasher.update(serde_json::to_vec(rows).ok()?);
    hasher.update(serde_json::to_vec(options).ok()?);
    Some(hex::encode(hasher.finalize()))
}

/// Single-entry cache of the last computed result.
#[derive(Debug, Clone)]
pub struct CartResultCache<T> {
    entry: Option<(String, T)>,
    hits: u64,
    misses: u64,
}

impl<T> Default for CartResultCache<T> {
    fn default() -> Self {
        Self {
            entry: None,
            hits: 0,
            misses: 0,
        }
    }
}

impl<T: Clone> CartResultCache<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached value for `key`, or `compute()` stored under `key`.
    /// A `None` key is never cached.
    pub fn get_or_compute<F>(&mut self, key: Option<String>, compute: F) -> T
    where
        F: FnOnce() -> T,
    {
        let Some(key) = key else {
            self.misses += 1;
            return compute();
        };

        if let Some((cached_key, value)) = &self.entry {
            if *cached_key == key {
                self.hits += 1;
                debug!(key = %key, "result cache hit");
                return value.clone();
            }
        }

        self.misses += 1;
        debug!(key = %key, "result cache miss");
        let value = compute();
        self.entry = Some((key, value.clone()));
        value
    }

    pub fn invalidate(&mut self) {
        self.entry = None;
    }

    pub fn current_key(&self) -> Option<&str> {
        self.entry.as_ref().map(|(key, _)| key.as_str())
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_key_is_content_based() {
        let a = vec![json!({"order_id": "1", "assembly_amount": 10})];
        let b = vec![json!({"assembly_amount": 10, "order_id": "1"})];
        let c = vec![json!({"order_id": "1", "assembly_amount": 11})];

        assert_eq!(content_key(&a), content_key(&b));
        assert_ne!(content_key(&a), content_key(&c));
        assert_eq!(content_key(&a).map(|k| k.len()), Some(64));
        assert_ne!(keyed(&a, &true), keyed(&a, &false));
    }

    #[test]
    fn test_same_key_hits() {
        let rows = vec![json!({"order_id": "1"})];
        let mut cache = CartResultCache::new();
        let mut calls = 0;

        let first = cache.get_or_compute(content_key(&rows), || {
            calls += 1;
            42
        });
        let second = cache.get_or_compute(content_key(&rows), || {
            calls += 1;
            0
        });

        assert_eq!((first, second), (42, 42));
        assert_eq!(calls, 1);
        assert_eq!(cache.hits(), 1);
    }

    #[test]
    fn test_changed_rows_recompute() {
        let mut cache = CartResultCache::new();
        cache.get_or_compute(content_key(&[json!({"a": 1})]), || 1);
        let value = cache.get_or_compute(content_key(&[json!({"a": 2})]), || 2);
        assert_eq!(value, 2);
        assert_eq!(cache.misses(), 2);
    }

    #[test]
    fn test_invalidate_clears_entry() {
        let rows = [json!({"a": 1})];
        let mut cache = CartResultCache::new();
        cache.get_or_compute(content_key(&rows), || 1);
        cache.invalidate();
        assert!(cache.current_key().is_none());
        assert_eq!(cache.get_or_compute(content_key(&rows), || 7), 7);
    }
}
