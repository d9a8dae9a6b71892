//! In-memory session store.
//!
//! Maps the session id held in the session cookie to its state. Sessions
//! are lost on restart, expire after a period without visits, and the
//! number kept at once is capped.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use uuid::Uuid;

use crate::config::{MAX_SESSIONS, SESSION_IDLE_SECS, SESSION_SWEEP_SECS};
use domain::SessionState;

#[derive(Clone, Copy)]
struct Entry {
    state: SessionState,
    last_seen: Instant,
}

#[derive(Clone)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<Uuid, Entry>>>,
    max_idle: Duration,
    capacity: usize,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::with_limits(Duration::from_secs(SESSION_IDLE_SECS), MAX_SESSIONS)
    }
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store dropping sessions idle for longer than `max_idle` and holding
    /// at most `capacity` of them.
    pub fn with_limits(max_idle: Duration, capacity: usize) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            max_idle,
            capacity: capacity.max(1),
        }
    }

    /// Replace a session's state with `f(current)` and return the new state.
    ///
    /// Unknown or expired ids start from a fresh state. The write lock is
    /// held for the whole transition. Starting a session in a full store
    /// first drops idle sessions, then the least recently seen one.
    pub async fn update<F>(&self, id: Uuid, f: F) -> SessionState
    where
        F: FnOnce(SessionState) -> SessionState,
    {
        let now = Instant::now();
        let mut sessions = self.sessions.write().await;

        let current = sessions
            .remove(&id)
            .filter(|entry| now.duration_since(entry.last_seen) <= self.max_idle)
            .map(|entry| entry.state)
            .unwrap_or_default();

        if sessions.len() >= self.capacity {
            self.evict(&mut sessions, now);
        }

        let next = f(current);
        sessions.insert(
            id,
            Entry {
                state: next,
                last_seen: now,
            },
        );
        next
    }

    /// Drop every idle session; returns how many were removed.
    pub async fn purge_idle(&self) -> usize {
        let now = Instant::now();
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, entry| now.duration_since(entry.last_seen) <= self.max_idle);
        before - sessions.len()
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Purge idle sessions periodically for as long as the server runs.
    pub fn spawn_sweeper(&self) -> JoinHandle<()> {
        let store = self.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(Duration::from_secs(SESSION_SWEEP_SECS));
            loop {
                ticker.tick().await;
                let removed = store.purge_idle().await;
                if removed > 0 {
                    let remaining = store.len().await;
                    tracing::debug!(removed, remaining, "Idle sessions dropped");
                }
            }
        })
    }

    fn evict(&self, sessions: &mut HashMap<Uuid, Entry>, now: Instant) {
        sessions.retain(|_, entry| now.duration_since(entry.last_seen) <= self.max_idle);

        while sessions.len() >= self.capacity {
            let oldest = sessions
                .iter()
                .min_by_key(|(_, entry)| entry.last_seen)
                .map(|(id, _)| *id);
            match oldest {
                Some(id) => {
                    sessions.remove(&id);
                }
                None => break,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn visits(store: &SessionStore, id: Uuid) -> u64 {
        store.update(id, SessionState::record_visit).await.visits
    }

    #[tokio::test]
    async fn test_visits_are_counted_per_session() {
        let store = SessionStore::new();
        let first = Uuid::new_v4();
        let second = Uuid::new_v4();

        assert_eq!(visits(&store, first).await, 1);
        assert_eq!(visits(&store, first).await, 2);
        assert_eq!(visits(&store, second).await, 1);
        assert_eq!(store.len().await, 2);
    }

    #[tokio::test]
    async fn test_concurrent_updates_are_not_lost() {
        let store = SessionStore::new();
        let id = Uuid::new_v4();

        let tasks: Vec<_> = (0..50)
            .map(|_| {
                let store = store.clone();
                tokio::spawn(async move {
                    store.update(id, SessionState::record_visit).await;
                })
            })
            .collect();
        for task in tasks {
            task.await.unwrap();
        }

        assert_eq!(store.update(id, |state| state).await.visits, 50);
    }

    #[tokio::test]
    async fn test_idle_sessions_are_purged() {
        let store = SessionStore::with_limits(Duration::from_millis(50), 100);
        let stale = Uuid::new_v4();
        visits(&store, stale).await;

        tokio::time::sleep(Duration::from_millis(120)).await;
        let fresh = Uuid::new_v4();
        visits(&store, fresh).await;

        assert_eq!(store.purge_idle().await, 1);
        assert_eq!(store.len().await, 1);
        // The expired id starts over
        assert_eq!(visits(&store, stale).await, 1);
    }

    #[tokio::test]
    async fn test_new_sessions_never_exceed_capacity() {
        let store = SessionStore::with_limits(Duration::from_secs(3600), 10);
        let first = Uuid::new_v4();
        visits(&store, first).await;
        tokio::time::sleep(Duration::from_millis(5)).await;

        for _ in 0..1000 {
            visits(&store, Uuid::new_v4()).await;
        }

        assert_eq!(store.len().await, 10);
        // The least recently seen session went first
        assert_eq!(visits(&store, first).await, 1);
    }

    #[tokio::test]
    async fn test_known_session_in_full_store_keeps_its_count() {
        let store = SessionStore::with_limits(Duration::from_secs(3600), 2);
        let first = Uuid::new_v4();
        let second = Uuid::new_v4();
        visits(&store, first).await;
        visits(&store, second).await;

        assert_eq!(visits(&store, second).await, 2);
        assert_eq!(visits(&store, first).await, 2);
        assert_eq!(store.len().await, 2);
    }
}
