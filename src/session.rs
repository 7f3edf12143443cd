//! Independent conversations keyed by session id.
//!
//! Each session owns its own [`Collector`]; only the ad service and help
//! responder are shared. Turns for one session are serialized, turns for
//! different sessions never block each other beyond the registry lookup.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use tracing::info;
use uuid::Uuid;

use crate::collector::{CannedHelp, Collector, HelpResponder, Step, TurnOutcome};
use crate::service::AdService;

/// Session identifier.
pub type SessionId = Uuid;

/// Registry lookup failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    /// No open session with this id.
    #[error("session not found: {0}")]
    NotFound(SessionId),
}

/// Open conversations sharing one ad service.
pub struct SessionRegistry {
    service: Arc<dyn AdService>,
    help: Arc<dyn HelpResponder>,
    /// Uses a sync [`Mutex`] since the critical section is a map lookup.
    sessions: Mutex<HashMap<SessionId, Arc<tokio::sync::Mutex<Collector>>>>,
}

impl std::fmt::Debug for SessionRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionRegistry")
            .field("sessions", &self.len())
            .finish_non_exhaustive()
    }
}

impl SessionRegistry {
    /// Empty registry with canned help.
    pub fn new(service: Arc<dyn AdService>) -> Self {
        Self {
            service,
            help: Arc::new(CannedHelp),
            sessions: Mutex::new(HashMap::new()),
        }
    }

    fn lock_sessions(
        &self,
    ) -> MutexGuard<'_, HashMap<SessionId, Arc<tokio::sync::Mutex<Collector>>>> {
        match self.sessions.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    /// Open a session and return its id with the greeting turn.
    pub async fn open(&self) -> (SessionId, TurnOutcome) {
        let id = Uuid::new_v4();
        let mut collector =
            Collector::with_help(Arc::clone(&self.service), Arc::clone(&self.help));
        let greeting = collector.submit_turn("start").await;

        self.lock_sessions()
            .insert(id, Arc::new(tokio::sync::Mutex::new(collector)));
        info!(session = %id, "session opened");
        (id, greeting)
    }

    /// Feed one user turn to a session.
    ///
    /// # Errors
    ///
    /// [`SessionError::NotFound`] when the id is unknown or closed.
    pub async fn submit_turn(
        &self,
        id: SessionId,
        text: &str,
    ) -> Result<TurnOutcome, SessionError> {
        let collector = self.get(id)?;
        let mut collector = collector.lock().await;
        Ok(collector.submit_turn(text).await)
    }

    /// Current step of a session.
    ///
    /// # Errors
    ///
    /// [`SessionError::NotFound`] when the id is unknown or closed.
    pub async fn step(&self, id: SessionId) -> Result<Step, SessionError> {
        let collector = self.get(id)?;
        let step = collector.lock().await.step();
        Ok(step)
    }

    /// Close a session, returning whether it existed.
    pub fn close(&self, id: SessionId) -> bool {
        let removed = self.lock_sessions().remove(&id).is_some();
        if removed {
            info!(session = %id, "session closed");
        }
        removed
    }

    /// Number of open sessions.
    pub fn len(&self) -> usize {
        self.lock_sessions().len()
    }

    /// Whether no sessions are open.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn get(&self, id: SessionId) -> Result<Arc<tokio::sync::Mutex<Collector>>, SessionError> {
        self.lock_sessions()
            .get(&id)
            .cloned()
            .ok_or(SessionError::NotFound(id))
    }
}
