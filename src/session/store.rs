//! Session Store
//!
//! Keeps live sessions in memory, keyed by id. Nothing is persisted.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;

use super::{create_session, now_secs, Session};

/// In-memory registry of sessions
#[derive(Debug, Clone)]
pub struct SessionStore {
    sessions: Arc<Mutex<HashMap<String, Session>>>,
    /// Maximum idle time in seconds (default: 1 hour)
    max_session_age: u64,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore {
    pub fn new() -> Self {
        Self::with_max_age(3600)
    }

    pub fn with_max_age(max_age_secs: u64) -> Self {
        Self {
            sessions: Arc::new(Mutex::new(HashMap::new())),
            max_session_age: max_age_secs,
        }
    }

    /// Create or restore a session. Idle sessions are expired first.
    pub async fn open_session(&self, restore_id: Option<&str>) -> Session {
        let mut sessions = self.sessions.lock().await;
        self.expire(&mut sessions);

        if let Some(id) = restore_id {
            if let Some(session) = sessions.get_mut(id) {
                session.touch();
                tracing::debug!(session = %id, "Restored session");
                return session.clone();
            }
        }

        let session = create_session();
        tracing::debug!(session = %session.id, "Opened session");
        sessions.insert(session.id.clone(), session.clone());

        session
    }

    /// Get a session by ID
    pub async fn get_session(&self, id: &str) -> Option<Session> {
        let mut sessions = self.sessions.lock().await;
        sessions.get_mut(id).map(|session| {
            session.touch();
            session.clone()
        })
    }

    /// Replaces a stored session with a newer value. Last write wins.
    pub async fn update_session(&self, session: Session) -> bool {
        let mut sessions = self.sessions.lock().await;
        match sessions.get_mut(&session.id) {
            Some(slot) => {
                *slot = session;
                slot.touch();
                true
            }
            None => false,
        }
    }

    /// Close a session
    pub async fn close_session(&self, id: &str) -> bool {
        let mut sessions = self.sessions.lock().await;
        sessions.remove(id).is_some()
    }

    /// Clean up expired sessions
    pub async fn cleanup_expired(&self) -> usize {
        let mut sessions = self.sessions.lock().await;
        self.expire(&mut sessions)
    }

    fn expire(&self, sessions: &mut HashMap<String, Session>) -> usize {
        let now = now_secs();

        let before = sessions.len();
        sessions.retain(|_, s| now.saturating_sub(s.last_accessed) <= self.max_session_age);

        let count = before - sessions.len();
        if count > 0 {
            tracing::info!("Expired {} idle sessions", count);
        }
        count
    }

    /// Get session count
    pub async fn session_count(&self) -> usize {
        self.sessions.lock().await.len()
    }
}
