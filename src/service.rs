//! Async request facade.
//!
//! Wraps the engine with a simulated network round trip. The wait is bounded
//! by a request timeout; exceeding it is the one error a caller can see,
//! and leaves the caller's last known session valid.

use std::sync::Arc;
use std::time::Duration;

use crate::catalog::Catalog;
use crate::error::{Result, UssdError};
use crate::session::{Engine, Session, SessionStore, Transition};

pub const DEFAULT_LATENCY: Duration = Duration::from_millis(700);
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Timing knobs for the simulated transport
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceConfig {
    /// Artificial delay before each transition resolves
    pub latency: Duration,
    pub request_timeout: Duration,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            latency: DEFAULT_LATENCY,
            request_timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl ServiceConfig {
    /// No delay at all, for tests and scripted runs
    pub fn instant() -> Self {
        Self {
            latency: Duration::ZERO,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone)]
pub struct UssdService {
    engine: Engine,
    store: SessionStore,
    config: ServiceConfig,
}

impl Default for UssdService {
    fn default() -> Self {
        Self::new(Engine::default(), ServiceConfig::default())
    }
}

impl UssdService {
    pub fn new(engine: Engine, config: ServiceConfig) -> Self {
        Self {
            engine,
            store: SessionStore::new(),
            config,
        }
    }

    pub fn with_catalog(catalog: Catalog, config: ServiceConfig) -> Self {
        Self::new(Engine::new(Arc::new(catalog)), config)
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    pub fn config(&self) -> ServiceConfig {
        self.config
    }

    /// Applies one token after the simulated round trip
    pub async fn process_request(&self, session: &Session, input: &str) -> Result<Transition> {
        tokio::time::timeout(self.config.request_timeout, self.round_trip())
            .await
            .map_err(|_| {
                tracing::warn!(session = %session.id, "Request timed out");
                UssdError::Transport(format!(
                    "no response within {} ms",
                    self.config.request_timeout.as_millis()
                ))
            })?;

        Ok(self.engine.transition(session, input))
    }

    /// Opens (or restores) a stored session
    pub async fn dial(&self, restore_id: Option<&str>) -> Session {
        self.store.open_session(restore_id).await
    }

    /// Applies one token to a stored session and saves the result
    pub async fn send(&self, session_id: &str, input: &str) -> Result<Transition> {
        let session = self
            .store
            .get_session(session_id)
            .await
            .ok_or_else(|| UssdError::SessionNotFound(session_id.to_string()))?;

        let transition = self.process_request(&session, input).await?;
        if !self.store.update_session(transition.session.clone()).await {
            tracing::warn!(session = %session_id, "Session closed while request was pending");
            return Err(UssdError::SessionNotFound(session_id.to_string()));
        }

        Ok(transition)
    }

    /// Drops a stored session
    pub async fn hang_up(&self, session_id: &str) -> bool {
        self.store.close_session(session_id).await
    }

    async fn round_trip(&self) {
        if !self.config.latency.is_zero() {
            tokio::time::sleep(self.config.latency).await;
        }
    }
}
