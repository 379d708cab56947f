//! TTL cache for the student-facing roster snapshot.
//!
//! The bulk roster view is the one read-heavy endpoint; non-staff callers
//! tolerate a slightly stale snapshot, so it is cached for a configurable
//! TTL. Staff reads bypass the cache entirely.

use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

use domain::models::attendance::RosterResponse;

struct CachedRoster {
    class_id: i64,
    fetched_at: Instant,
    snapshot: Arc<RosterResponse>,
}

/// Shared roster cache; cheap to clone.
#[derive(Clone)]
pub struct RosterCache {
    inner: Arc<RwLock<Option<CachedRoster>>>,
    ttl: Duration,
}

impl RosterCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            inner: Arc::new(RwLock::new(None)),
            ttl,
        }
    }

    /// Returns the cached snapshot for the given class if still fresh.
    /// A snapshot cached for a different class never matches.
    pub async fn get(&self, class_id: i64) -> Option<Arc<RosterResponse>> {
        let guard = self.inner.read().await;
        match guard.as_ref() {
            Some(cached)
                if cached.class_id == class_id && cached.fetched_at.elapsed() < self.ttl =>
            {
                Some(cached.snapshot.clone())
            }
            _ => None,
        }
    }

    /// Replaces the cached snapshot.
    pub async fn put(&self, class_id: i64, snapshot: RosterResponse) -> Arc<RosterResponse> {
        let snapshot = Arc::new(snapshot);
        let mut guard = self.inner.write().await;
        *guard = Some(CachedRoster {
            class_id,
            fetched_at: Instant::now(),
            snapshot: snapshot.clone(),
        });
        snapshot
    }

    /// Drops the cached snapshot; the next read refetches.
    pub async fn invalidate(&self) {
        let mut guard = self.inner.write().await;
        *guard = None;
    }
}
