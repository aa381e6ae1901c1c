//! Shared loads for the home view
//!
//! A burst of home requests arriving right after the cache expired would
//! otherwise each re-read the source registry and fan out to every CMS
//! backend. With a flight per cache slot the first request does the work and
//! the others receive a clone of its outcome, error included.
//!
//! ```
//! use neovideo_core::cache::SingleFlight;
//!
//! # async fn example() {
//! let registry = SingleFlight::<&'static str, Vec<i64>, String>::new();
//! let source_ids = registry.do_work("sources", async { Ok(vec![1, 2, 3]) }).await;
//! # }
//! ```

use std::fmt::Debug;
use std::future::Future;
use std::hash::Hash;
use std::sync::Arc;

/// Error type for SingleFlight operations
#[derive(Debug, Clone, thiserror::Error)]
pub enum SingleFlightError<E> {
    /// The leading call was dropped or panicked before producing a result
    #[error("SingleFlight worker failed - leader dropped or panicked")]
    WorkerFailed,
    /// The loader itself failed
    #[error("{0}")]
    Inner(E),
}

impl<E> SingleFlightError<E> {
    /// Collapse into the loader's error type, building one for leader failure.
    pub fn into_inner_or(self, on_worker_failed: impl FnOnce() -> E) -> E {
        match self {
            Self::Inner(err) => err,
            Self::WorkerFailed => on_worker_failed(),
        }
    }
}

/// Per-key deduplication of concurrent async loads.
#[derive(Clone)]
pub struct SingleFlight<K, V, E>
where
    K: Hash + Eq + Clone + Debug + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
    E: Clone + Send + Sync + 'static,
{
    group: Arc<async_singleflight::Group<K, V, E>>,
}

impl<K, V, E> SingleFlight<K, V, E>
where
    K: Hash + Eq + Clone + Debug + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
    E: Clone + Send + Sync + 'static,
{
    pub fn new() -> Self {
        Self {
            group: Arc::new(async_singleflight::Group::new()),
        }
    }

    /// Run `f` unless a call for `key` is already in flight, in which case
    /// wait for that call and return its result.
    pub async fn do_work<Fut>(&self, key: K, f: Fut) -> Result<V, SingleFlightError<E>>
    where
        Fut: Future<Output = Result<V, E>> + Send,
    {
        // Err(None) means the leader went away without a result.
        self.group.work(&key, f).await.map_err(|opt_err| match opt_err {
            Some(inner) => SingleFlightError::Inner(inner),
            None => SingleFlightError::WorkerFailed,
        })
    }
}

impl<K, V, E> Default for SingleFlight<K, V, E>
where
    K: Hash + Eq + Clone + Debug + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
    E: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, E> Debug for SingleFlight<K, V, E>
where
    K: Hash + Eq + Clone + Debug + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
    E: Clone + Send + Sync + 'static,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SingleFlight").finish_non_exhaustive()
    }
}
