//! In-memory session store with idle expiry.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;
use tokio::sync::Mutex;
use uuid::Uuid;

use super::Session;

pub type SessionId = Uuid;

/// Shared handle to one session.
pub type SessionHandle = Arc<Mutex<Session>>;

/// Sessions expire after this long without being touched.
const DEFAULT_IDLE_TIMEOUT: Duration = Duration::from_secs(30 * 60);

/// Upper bound on live sessions.
const DEFAULT_MAX_SESSIONS: u64 = 10_000;

/// Session id → session state, expiring idle entries.
#[derive(Clone)]
pub struct SessionStore {
    sessions: MokaCache<SessionId, SessionHandle>,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new(DEFAULT_IDLE_TIMEOUT, DEFAULT_MAX_SESSIONS)
    }
}

impl SessionStore {
    pub fn new(idle_timeout: Duration, max_sessions: u64) -> Self {
        let sessions = MokaCache::builder()
            .time_to_idle(idle_timeout)
            .max_capacity(max_sessions)
            .build();
        Self { sessions }
    }

    /// Create a fresh, empty session.
    pub async fn create(&self) -> (SessionId, SessionHandle) {
        let id = Uuid::new_v4();
        let handle = Arc::new(Mutex::new(Session::new()));
        self.sessions.insert(id, handle.clone()).await;
        (id, handle)
    }

    pub async fn get(&self, id: &SessionId) -> Option<SessionHandle> {
        self.sessions.get(id).await
    }

    pub async fn remove(&self, id: &SessionId) {
        self.sessions.invalidate(id).await;
    }

    /// Approximate number of live sessions.
    pub fn len(&self) -> u64 {
        self.sessions.entry_count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
