//! Keyed session store.
//!
//! Replaces ambient process-global dictionaries with an explicit store:
//! create-on-first-message, get, delete, idle eviction. The map itself
//! is the only shared-resource hazard in the core, so all mutation goes
//! through one mutex.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Errors from session store operations.
#[derive(Debug, thiserror::Error)]
pub enum SessionStoreError {
    #[error("Internal lock error")]
    LockPoisoned,
}

struct Entry<S> {
    session: S,
    last_activity: Instant,
}

/// One keyed collection of conversation sessions.
pub struct SessionStore<S> {
    sessions: Mutex<HashMap<String, Entry<S>>>,
}

impl<S: Default> SessionStore<S> {
    pub fn new() -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
        }
    }

    /// Run `f` against the session for `id`, creating a fresh session on
    /// first use. Refreshes the idle clock.
    pub fn with_session<R>(
        &self,
        id: &str,
        f: impl FnOnce(&mut S) -> R,
    ) -> Result<R, SessionStoreError> {
        let mut map = self.lock()?;
        let entry = map.entry(id.to_string()).or_insert_with(|| Entry {
            session: S::default(),
            last_activity: Instant::now(),
        });
        entry.last_activity = Instant::now();
        Ok(f(&mut entry.session))
    }

    /// Run `f` against an existing session; `None` if the id is unknown.
    /// Does not create and does not refresh the idle clock.
    pub fn with_existing<R>(
        &self,
        id: &str,
        f: impl FnOnce(&mut S) -> R,
    ) -> Result<Option<R>, SessionStoreError> {
        let mut map = self.lock()?;
        Ok(map.get_mut(id).map(|entry| f(&mut entry.session)))
    }

    /// Remove a session. Returns whether one existed.
    pub fn remove(&self, id: &str) -> Result<bool, SessionStoreError> {
        Ok(self.lock()?.remove(id).is_some())
    }

    pub fn contains(&self, id: &str) -> Result<bool, SessionStoreError> {
        Ok(self.lock()?.contains_key(id))
    }

    pub fn len(&self) -> Result<usize, SessionStoreError> {
        Ok(self.lock()?.len())
    }

    pub fn is_empty(&self) -> Result<bool, SessionStoreError> {
        Ok(self.lock()?.is_empty())
    }

    /// Evict sessions idle longer than `max_idle`. Returns the number
    /// evicted. Called on demand by the embedder; there is no background
    /// task.
    pub fn evict_idle(&self, max_idle: Duration) -> Result<usize, SessionStoreError> {
        let mut map = self.lock()?;
        let before = map.len();
        map.retain(|_, entry| entry.last_activity.elapsed() <= max_idle);
        Ok(before - map.len())
    }

    fn lock(
        &self,
    ) -> Result<std::sync::MutexGuard<'_, HashMap<String, Entry<S>>>, SessionStoreError> {
        self.sessions
            .lock()
            .map_err(|_| SessionStoreError::LockPoisoned)
    }
}

impl<S: Default> Default for SessionStore<S> {
    fn default() -> Self {
        Self::new()
    }
}
