//! USSD Session Module
//!
//! A session records where a user is in the menu tree and every screen they
//! have been shown. The engine never mutates a session in place; each
//! transition hands back a new value that replaces the old one.

pub mod engine;
pub mod store;

use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::catalog::path_key;
use crate::screen::Screen;

pub use engine::{Engine, Rule, Transition};
pub use store::SessionStore;

pub(crate) fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    /// Session ID
    pub id: String,
    /// Screens shown so far, oldest first
    pub history: Vec<Screen>,
    /// Tokens taken from the root; empty means the root screen
    pub current_path: Vec<String>,
    /// Creation timestamp
    pub created_at: u64,
    /// Last accessed timestamp
    pub last_accessed: u64,
}

impl Session {
    pub fn new(id: String) -> Self {
        let now = now_secs();

        Self {
            id,
            history: Vec::new(),
            current_path: Vec::new(),
            created_at: now,
            last_accessed: now,
        }
    }

    pub fn touch(&mut self) {
        self.last_accessed = now_secs();
    }

    /// Catalog key of the current position
    pub fn current_key(&self) -> String {
        path_key(&self.current_path)
    }
}

/// Starts a fresh conversation with an empty path and history
pub fn create_session() -> Session {
    Session::new(uuid::Uuid::new_v4().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_creation() {
        let session = Session::new("test-session".to_string());
        assert_eq!(session.id, "test-session");
        assert!(session.created_at > 0);
        assert!(session.current_path.is_empty());
        assert_eq!(session.current_key(), "start");
        assert!(session.history.is_empty());
    }

    #[test]
    fn test_create_session_ids_are_unique() {
        let a = create_session();
        let b = create_session();
        assert!(!a.id.is_empty());
        assert_ne!(a.id, b.id);
        assert!(a.history.is_empty());
    }

    #[test]
    fn test_session_serializes_camel_case() {
        let mut session = Session::new("s1".to_string());
        session.current_path = vec!["banking".to_string()];
        let json = serde_json::to_value(&session).unwrap();
        assert_eq!(json["currentPath"][0], "banking");
        assert_eq!(json["id"], "s1");
    }
}
