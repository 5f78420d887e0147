//! SSE session manager.
//!
//! Every `GET /sse` opens its own session keyed by a random id; connecting
//! never replaces another session. A session moves `Connecting -> Connected
//! -> Closed` and is removed from the map when its stream is dropped.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, RwLock};

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::error::SessionError;

/// Outbound messages buffered per session before senders wait.
const OUTBOUND_CAPACITY: usize = 64;

/// Lifecycle of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Connecting,
    Connected,
    Closed,
}

/// One client stream and everything tied to its lifetime.
#[derive(Debug)]
pub struct Session {
    id: String,
    state: Mutex<SessionState>,
    outbound: mpsc::Sender<String>,
    cancel: CancellationToken,
}

impl Session {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn state(&self) -> SessionState {
        *self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Mark the handshake done. A closed session stays closed.
    pub fn connect(&self) {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        if *state == SessionState::Connecting {
            *state = SessionState::Connected;
        }
    }

    fn mark_closed(&self) {
        *self.state.lock().unwrap_or_else(|e| e.into_inner()) = SessionState::Closed;
        self.cancel.cancel();
    }

    /// Token for one call on this session; cancelled when the session closes.
    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel.child_token()
    }

    /// Queue a message on the session stream, in FIFO order.
    pub async fn send(&self, message: String) -> Result<(), SessionError> {
        if self.state() == SessionState::Closed {
            return Err(SessionError::closed(&self.id));
        }
        self.outbound
            .send(message)
            .await
            .map_err(|_| SessionError::closed(&self.id))
    }
}

/// Map from session id to live session.
#[derive(Debug, Clone, Default)]
pub struct SessionManager {
    sessions: Arc<RwLock<HashMap<String, Arc<Session>>>>,
}

impl SessionManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a new session in the `Connecting` state.
    ///
    /// Dropping the returned receiver closes the session.
    pub fn open(&self) -> (Arc<Session>, SessionReceiver) {
        let (tx, rx) = mpsc::channel(OUTBOUND_CAPACITY);
        let session = Arc::new(Session {
            id: Uuid::new_v4().to_string(),
            state: Mutex::new(SessionState::Connecting),
            outbound: tx,
            cancel: CancellationToken::new(),
        });

        let active = {
            let mut sessions = self.sessions.write().unwrap_or_else(|e| e.into_inner());
            sessions.insert(session.id.clone(), session.clone());
            sessions.len()
        };
        info!(session_id = %session.id, active, "Session opened");

        let receiver = SessionReceiver {
            rx,
            _guard: SessionGuard {
                manager: self.clone(),
                id: session.id.clone(),
            },
        };
        (session, receiver)
    }

    /// Look up a session that can accept messages.
    pub fn get(&self, id: &str) -> Result<Arc<Session>, SessionError> {
        let session = self
            .sessions
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .get(id)
            .cloned()
            .ok_or_else(|| SessionError::closed(id))?;

        match session.state() {
            SessionState::Connected => Ok(session),
            SessionState::Connecting => Err(SessionError::NotReady(id.to_string())),
            SessionState::Closed => Err(SessionError::closed(id)),
        }
    }

    /// Close a session and cancel its in-flight calls. Idempotent.
    pub fn close(&self, id: &str) {
        let removed = self
            .sessions
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .remove(id);
        match removed {
            Some(session) => {
                session.mark_closed();
                info!(session_id = %id, "Session closed");
            }
            None => debug!(session_id = %id, "Session already closed"),
        }
    }

    /// Number of open sessions.
    pub fn len(&self) -> usize {
        self.sessions.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Receiving half of a session stream.
#[derive(Debug)]
pub struct SessionReceiver {
    rx: mpsc::Receiver<String>,
    _guard: SessionGuard,
}

impl SessionReceiver {
    /// Next outbound message, or `None` once every sender is gone.
    pub async fn recv(&mut self) -> Option<String> {
        self.rx.recv().await
    }
}

#[derive(Debug)]
struct SessionGuard {
    manager: SessionManager,
    id: String,
}

impl Drop for SessionGuard {
    fn drop(&mut self) {
        self.manager.close(&self.id);
    }
}

/// Deliver a response, logging instead of failing when the session is gone.
pub async fn deliver(session: &Session, message: String) {
    if let Err(e) = session.send(message).await {
        warn!(session_id = %session.id(), "Dropping response: {}", e);
    }
}
