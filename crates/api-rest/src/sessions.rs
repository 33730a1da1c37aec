//! In-memory session storage.
//!
//! Sessions live only as long as the process, until deleted, or until they sit idle for
//! longer than the configured ttl. Each session sits behind its own lock, so requests
//! for one session never wait on another session's scoring; the map lock is held only
//! to look up, insert, expire or remove entries.

use dialens_core::Session;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};
use uuid::Uuid;

type SharedSession = Arc<Mutex<Session>>;

struct StoredSession {
    session: SharedSession,
    last_seen: Instant,
}

#[derive(Clone)]
pub struct SessionStore {
    sessions: Arc<Mutex<HashMap<Uuid, StoredSession>>>,
    ttl: Duration,
}

/// Drop every session idle for longer than `ttl`, returning how many were dropped.
fn evict_expired(
    sessions: &mut HashMap<Uuid, StoredSession>,
    ttl: Duration,
    now: Instant,
) -> usize {
    let before = sessions.len();
    sessions.retain(|id, stored| {
        let alive = now.saturating_duration_since(stored.last_seen) <= ttl;
        if !alive {
            tracing::info!("session {} expired", id);
        }
        alive
    });
    before - sessions.len()
}

impl SessionStore {
    /// Create an empty store whose sessions expire after `ttl` without a request.
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: Arc::new(Mutex::new(HashMap::new())),
            ttl,
        }
    }

    /// Create and store a new session, returning a snapshot of it.
    pub fn create(&self) -> Session {
        self.create_at(Instant::now())
    }

    fn create_at(&self, now: Instant) -> Session {
        let session = Session::new();
        let mut sessions = self.sessions.lock().unwrap_or_else(PoisonError::into_inner);
        evict_expired(&mut sessions, self.ttl, now);
        sessions.insert(
            session.id(),
            StoredSession {
                session: Arc::new(Mutex::new(session.clone())),
                last_seen: now,
            },
        );
        tracing::info!("session {} created", session.id());
        session
    }

    /// Run `f` against the session with `id`, or return `None` if there is no such
    /// session or it has expired. A successful lookup refreshes the session's idle timer.
    pub fn with_session<T>(&self, id: Uuid, f: impl FnOnce(&mut Session) -> T) -> Option<T> {
        self.with_session_at(id, Instant::now(), f)
    }

    fn with_session_at<T>(
        &self,
        id: Uuid,
        now: Instant,
        f: impl FnOnce(&mut Session) -> T,
    ) -> Option<T> {
        let session = {
            let mut sessions = self.sessions.lock().unwrap_or_else(PoisonError::into_inner);
            evict_expired(&mut sessions, self.ttl, now);
            let stored = sessions.get_mut(&id)?;
            stored.last_seen = now;
            stored.session.clone()
        };
        let mut guard = session.lock().unwrap_or_else(PoisonError::into_inner);
        Some(f(&mut guard))
    }

    /// Drop every expired session, returning how many were dropped.
    pub fn sweep(&self) -> usize {
        self.sweep_at(Instant::now())
    }

    fn sweep_at(&self, now: Instant) -> usize {
        let mut sessions = self.sessions.lock().unwrap_or_else(PoisonError::into_inner);
        evict_expired(&mut sessions, self.ttl, now)
    }

    /// End a session, discarding its answers. Returns whether it existed.
    pub fn remove(&self, id: Uuid) -> bool {
        let removed = self
            .sessions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&id)
            .is_some();
        if removed {
            tracing::info!("session {} ended", id);
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.sessions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dialens_core::{Step, Transition};

    const TTL: Duration = Duration::from_secs(60);

    #[test]
    fn test_store_creates_isolated_sessions() {
        let store = SessionStore::new(TTL);
        let a = store.create();
        let b = store.create();
        assert_eq!(store.len(), 2);

        store
            .with_session(a.id(), |s| s.apply(Transition::Start))
            .expect("session a exists")
            .expect("start is valid");

        assert_eq!(
            store.with_session(a.id(), |s| s.step()),
            Some(Step::DataCollection)
        );
        assert_eq!(store.with_session(b.id(), |s| s.step()), Some(Step::Welcome));
    }

    #[test]
    fn test_store_remove_discards_session() {
        let store = SessionStore::new(TTL);
        let session = store.create();

        assert!(store.remove(session.id()));
        assert!(!store.remove(session.id()));
        assert!(store.with_session(session.id(), |s| s.step()).is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn test_idle_session_expires_after_ttl() {
        let store = SessionStore::new(TTL);
        let start = Instant::now();
        let session = store.create_at(start);

        let within = start + TTL;
        assert_eq!(
            store.with_session_at(session.id(), within, |s| s.step()),
            Some(Step::Welcome)
        );

        let after = within + TTL + Duration::from_secs(1);
        assert!(store
            .with_session_at(session.id(), after, |s| s.step())
            .is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn test_activity_keeps_session_alive() {
        let store = SessionStore::new(TTL);
        let start = Instant::now();
        let active = store.create_at(start);
        let idle = store.create_at(start);

        let half = start + TTL / 2;
        store
            .with_session_at(active.id(), half, |_| ())
            .expect("active session exists");

        assert_eq!(store.sweep_at(start + TTL + Duration::from_secs(1)), 1);
        assert_eq!(store.len(), 1);
        assert!(store.with_session(idle.id(), |_| ()).is_none());
        assert!(store.with_session(active.id(), |_| ()).is_some());
    }
}
