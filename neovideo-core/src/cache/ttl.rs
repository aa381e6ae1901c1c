//! Time-bounded in-process cache
//!
//! Entries are written with an expiry and read back until it passes. Expired
//! entries are dropped lazily on read and by a periodic sweep task that the
//! owner starts explicitly. The sweep stops when the cache is dropped.

use std::hash::Hash;
use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::trace;

/// Default entry lifetime
pub const DEFAULT_TTL: Duration = Duration::from_secs(42);
/// Default sweep interval
pub const DEFAULT_CLEANUP_INTERVAL: Duration = Duration::from_secs(60);

#[derive(Debug, Clone)]
struct Entry<V> {
    value: V,
    expires_at: Instant,
}

impl<V> Entry<V> {
    fn is_live(&self, now: Instant) -> bool {
        self.expires_at > now
    }
}

/// Concurrent key/value cache with per-entry time-to-live.
///
/// Reads clone the value out, so `V` is typically an `Arc`.
pub struct TtlCache<K, V>
where
    K: Hash + Eq + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    entries: Arc<DashMap<K, Entry<V>>>,
    default_ttl: Duration,
    cleanup_interval: Duration,
    cleanup: parking_lot::Mutex<Option<CancellationToken>>,
}

impl<K, V> TtlCache<K, V>
where
    K: Hash + Eq + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    #[must_use]
    pub fn new(default_ttl: Duration, cleanup_interval: Duration) -> Self {
        Self {
            entries: Arc::new(DashMap::new()),
            default_ttl,
            cleanup_interval,
            cleanup: parking_lot::Mutex::new(None),
        }
    }

    /// Value for `key` if present and not expired.
    pub fn get(&self, key: &K) -> Option<V> {
        let now = Instant::now();
        if let Some(entry) = self.entries.get(key) {
            if entry.is_live(now) {
                return Some(entry.value.clone());
            }
        } else {
            return None;
        }

        // Re-check under the write lock: a concurrent `set` may have refreshed it.
        self.entries.remove_if(key, |_, entry| !entry.is_live(now));
        None
    }

    /// Store `value` with the default lifetime.
    pub fn set(&self, key: K, value: V) {
        self.set_with_ttl(key, value, self.default_ttl);
    }

    pub fn set_with_ttl(&self, key: K, value: V, ttl: Duration) {
        self.entries.insert(
            key,
            Entry {
                value,
                expires_at: Instant::now() + ttl,
            },
        );
    }

    /// Number of stored entries, including expired ones not yet swept.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub const fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    /// Drop every expired entry now.
    pub fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let before = self.entries.len();
        self.entries.retain(|_, entry| entry.is_live(now));
        before.saturating_sub(self.entries.len())
    }

    /// Spawn the periodic sweep. Calling it while a sweep runs is a no-op.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn start_cleanup(&self) {
        let mut slot = self.cleanup.lock();
        if slot.is_some() {
            return;
        }

        let token = CancellationToken::new();
        let entries = Arc::clone(&self.entries);
        let period = self.cleanup_interval;
        let cancel = token.clone();

        tokio::spawn(async move {
            let mut interval = tokio::time::interval_at(Instant::now() + period, period);
            loop {
                tokio::select! {
                    () = cancel.cancelled() => break,
                    _ = interval.tick() => {
                        let now = Instant::now();
                        let before = entries.len();
                        entries.retain(|_, entry| entry.is_live(now));
                        trace!(removed = before.saturating_sub(entries.len()), "TTL cache sweep");
                    }
                }
            }
        });

        *slot = Some(token);
    }

    /// Stop the periodic sweep if it is running.
    pub fn stop_cleanup(&self) {
        if let Some(token) = self.cleanup.lock().take() {
            token.cancel();
        }
    }

    #[must_use]
    pub fn is_cleanup_running(&self) -> bool {
        self.cleanup.lock().is_some()
    }
}

impl<K, V> Default for TtlCache<K, V>
where
    K: Hash + Eq + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new(DEFAULT_TTL, DEFAULT_CLEANUP_INTERVAL)
    }
}

impl<K, V> Drop for TtlCache<K, V>
where
    K: Hash + Eq + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    fn drop(&mut self) {
        self.stop_cleanup();
    }
}

impl<K, V> std::fmt::Debug for TtlCache<K, V>
where
    K: Hash + Eq + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TtlCache")
            .field("entries", &self.entries.len())
            .field("default_ttl", &self.default_ttl)
            .field("cleanup_interval", &self.cleanup_interval)
            .finish()
    }
}
