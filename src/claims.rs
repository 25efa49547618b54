use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

use crate::cache::Category;

/// The unit of work a single network fetch fills.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) enum FetchKey {
    /// One league-scoped cache entry.
    League(Category, String),
    /// A team page by source identifier, which fills both team-scoped entries.
    TeamPage(String),
}

/// Per-key mutual exclusion for in-flight fetches.
///
/// Holding the guard returned by [`FetchClaims::claim`] means no other task is
/// fetching the same key. Waiters must re-check the cache once they get the
/// claim, since the previous holder has usually filled it.
#[derive(Debug, Default)]
pub(crate) struct FetchClaims {
    locks: DashMap<FetchKey, Arc<AsyncMutex<()>>>,
}

impl FetchClaims {
    pub(crate) async fn claim(&self, key: FetchKey) -> OwnedMutexGuard<()> {
        let lock = Arc::clone(&self.locks.entry(key).or_default());
        lock.lock_owned().await
    }
}
