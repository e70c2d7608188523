//! Content-addressed fragment cache using moka
//!
//! Fragments are keyed by the hash of their source text, so an edited file
//! misses the cache and is parsed again while unchanged files are served
//! from memory.

use moka::future::Cache;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use swatch_core::{ContentHash, FragmentKind, ThemeFragment};

/// Cache key: the same text under another kind or label is another fragment
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FragmentKey {
    /// Fragment kind
    pub kind: FragmentKind,
    /// Fragment label
    pub label: String,
    /// Hash of format and source text
    pub hash: ContentHash,
}

impl FragmentKey {
    /// Create key
    #[inline]
    #[must_use]
    pub fn new(kind: FragmentKind, label: impl Into<String>, hash: ContentHash) -> Self {
        Self {
            kind,
            label: label.into(),
            hash,
        }
    }
}

/// Statistics for cache monitoring
#[derive(Debug, Clone, Copy, Default)]
pub struct CacheStats {
    /// Number of entries in cache
    pub entry_count: u64,
}

/// Parsed fragment cache
#[derive(Debug, Clone)]
pub struct FragmentCache {
    inner: Cache<FragmentKey, Arc<ThemeFragment>>,
}

impl FragmentCache {
    /// Create new cache with max capacity
    #[inline]
    #[must_use]
    pub fn new(max_capacity: u64) -> Self {
        Self {
            inner: Cache::new(max_capacity),
        }
    }

    /// Create cache with time-based expiration
    #[inline]
    #[must_use]
    pub fn with_ttl(max_capacity: u64, ttl: Duration) -> Self {
        Self {
            inner: Cache::builder()
                .max_capacity(max_capacity)
                .time_to_live(ttl)
                .build(),
        }
    }

    /// Insert fragment into cache
    #[inline]
    pub async fn insert(&self, key: FragmentKey, fragment: Arc<ThemeFragment>) {
        self.inner.insert(key, fragment).await;
    }

    /// Get fragment from cache
    #[inline]
    pub async fn get(&self, key: &FragmentKey) -> Option<Arc<ThemeFragment>> {
        self.inner.get(key).await
    }

    /// Get cached fragment or compute and cache it
    ///
    /// # Errors
    /// Returns whatever `f` returns; failures are not cached
    pub async fn try_get_or_insert_with<E, F, Fut>(
        &self,
        key: FragmentKey,
        f: F,
    ) -> Result<Arc<ThemeFragment>, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<ThemeFragment, E>>,
    {
        if let Some(cached) = self.get(&key).await {
            tracing::trace!(label = %key.label, hash = %key.hash.short(), "fragment cache hit");
            return Ok(cached);
        }

        let fragment = Arc::new(f().await?);
        self.insert(key, Arc::clone(&fragment)).await;
        Ok(fragment)
    }

    /// Invalidate all entries
    #[inline]
    pub fn invalidate_all(&self) {
        self.inner.invalidate_all();
    }

    /// Check if cache contains key
    #[inline]
    pub async fn contains(&self, key: &FragmentKey) -> bool {
        self.inner.get(key).await.is_some()
    }

    /// Get cache statistics
    #[inline]
    #[must_use]
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entry_count: self.inner.entry_count(),
        }
    }

    /// Flush pending maintenance so counts are current
    pub async fn sync(&self) {
        self.inner.run_pending_tasks().await;
    }
}

impl Default for FragmentCache {
    fn default() -> Self {
        Self::new(1_000)
    }
}
