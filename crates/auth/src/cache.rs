//! Identity cache with soft expiry and a periodic sweep.
//!
//! Maps subject id to a snapshot of the resolved user. An entry is fresh
//! while `now - cached_at < ttl`; stale entries are invisible to lookups
//! even before the sweeper removes them. The cache is a latency
//! optimisation only: contents are lost on restart and the users table
//! stays authoritative.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use dashmap::DashMap;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};
use uuid::Uuid;

use crate::types::ResolvedUser;

/// Immutable cache entry; a refresh replaces the whole value.
#[derive(Debug, Clone)]
struct CacheEntry {
    user: ResolvedUser,
    cached_at: DateTime<Utc>,
}

/// Process-local identity cache.
///
/// Owned by the auth gate and shared with its sweeper through `Arc`.
#[derive(Debug)]
pub struct IdentityCache {
    entries: DashMap<Uuid, CacheEntry>,
    ttl: Duration,
    ttl_delta: TimeDelta,
}

impl IdentityCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            ttl,
            ttl_delta: TimeDelta::from_std(ttl).unwrap_or(TimeDelta::MAX),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Look up a fresh entry as of the current wall-clock time.
    pub fn lookup(&self, subject_id: Uuid) -> Option<ResolvedUser> {
        self.lookup_at(subject_id, Utc::now())
    }

    /// Look up a fresh entry as of `now`.
    ///
    /// Stale entries are reported absent but left for the sweeper.
    pub fn lookup_at(&self, subject_id: Uuid, now: DateTime<Utc>) -> Option<ResolvedUser> {
        let entry = self.entries.get(&subject_id)?;
        if self.is_fresh(&entry, now) {
            Some(entry.user.clone())
        } else {
            None
        }
    }

    /// Insert or replace the entry for `subject_id`, stamped with the current time.
    pub fn insert(&self, subject_id: Uuid, user: ResolvedUser) {
        self.insert_at(subject_id, user, Utc::now());
    }

    /// Insert or replace the entry for `subject_id`, stamped with `cached_at`.
    ///
    /// Concurrent inserts for the same subject are last-writer-wins.
    pub fn insert_at(&self, subject_id: Uuid, user: ResolvedUser, cached_at: DateTime<Utc>) {
        self.entries
            .insert(subject_id, CacheEntry { user, cached_at });
    }

    /// Remove every entry whose age is at least the TTL.
    ///
    /// Returns the number of entries removed.
    pub fn sweep(&self, now: DateTime<Utc>) -> usize {
        let mut removed = 0;

        self.entries.retain(|_, entry| {
            if self.is_fresh(entry, now) {
                true
            } else {
                removed += 1;
                false
            }
        });

        removed
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn is_fresh(&self, entry: &CacheEntry, now: DateTime<Utc>) -> bool {
        now.signed_duration_since(entry.cached_at) < self.ttl_delta
    }
}

/// Floor for the sweep period; a zero or near-zero TTL must not busy-loop.
const MIN_SWEEP_INTERVAL: Duration = Duration::from_millis(10);

/// Background task that sweeps stale identity cache entries.
///
/// Runs every `ttl / 2` (never faster than `MIN_SWEEP_INTERVAL`) until its
/// cancellation token fires:
/// ```rust,ignore
/// let handle = CacheSweeper::new(cache.clone()).spawn(shutdown.child_token());
/// ```
pub struct CacheSweeper {
    cache: Arc<IdentityCache>,
    interval: Duration,
}

impl CacheSweeper {
    pub fn new(cache: Arc<IdentityCache>) -> Self {
        let interval = (cache.ttl() / 2).max(MIN_SWEEP_INTERVAL);
        Self { cache, interval }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Spawn the sweep loop onto the current runtime.
    pub fn spawn(self, shutdown: CancellationToken) -> JoinHandle<()> {
        tokio::spawn(self.run(shutdown))
    }

    /// Run the sweep loop until the cancellation token is triggered.
    pub async fn run(self, shutdown: CancellationToken) {
        info!(
            interval_ms = self.interval.as_millis() as u64,
            "Identity cache sweeper starting"
        );

        loop {
            tokio::select! {
                _ = tokio::time::sleep(self.interval) => {},
                _ = shutdown.cancelled() => {
                    info!("Identity cache sweeper shutting down");
                    return;
                }
            }

            let removed = self.cache.sweep(Utc::now());
            if removed > 0 {
                debug!(
                    removed,
                    remaining = self.cache.len(),
                    "Swept stale identity cache entries"
                );
            }
        }
    }
}
