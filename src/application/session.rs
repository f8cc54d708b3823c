// src/application/session.rs
use crate::domain::{DomainError, Identity};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::mpsc::{self, Receiver, Sender};
use tracing::{debug, info, warn};

/// Raw persisted entries, mirroring the `token` and `user` keys of the
/// browser's local storage. `user` stays a serialized string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredSession {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub user: Option<String>,
}

pub trait SessionStore {
    fn load(&self) -> Result<StoredSession, DomainError>;

    fn save(&mut self, session: &StoredSession) -> Result<(), DomainError>;

    /// Remove both entries from persistent storage
    fn clear(&mut self) -> Result<(), DomainError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    Refreshed { authenticated: bool },
    Invalidated,
}

/// Process-wide authentication state shared by the detail view and the
/// comment panel.
pub struct Session<S: SessionStore> {
    store: S,
    token: Option<String>,
    identity: Option<Identity>,
    listeners: Vec<Sender<SessionEvent>>,
}

pub type SharedSession<S> = Rc<RefCell<Session<S>>>;

impl<S: SessionStore> Session<S> {
    pub fn open(store: S) -> Self {
        let mut session = Self {
            store,
            token: None,
            identity: None,
            listeners: Vec::new(),
        };
        session.reload_from_store();
        session
    }

    pub fn shared(self) -> SharedSession<S> {
        Rc::new(RefCell::new(self))
    }

    /// Authenticated means a token is present; the identity may still be missing.
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Re-read persistent storage and notify subscribers.
    pub fn refresh(&mut self) {
        self.reload_from_store();
        let authenticated = self.is_authenticated();
        self.notify(SessionEvent::Refreshed { authenticated });
    }

    /// Persist a pre-issued token together with the identity it belongs to.
    pub fn establish(&mut self, token: &str, identity: Identity) -> Result<(), DomainError> {
        let token = token.trim();
        if token.is_empty() {
            return Err(DomainError::SessionStore("token must not be empty".to_string()));
        }
        let stored = StoredSession {
            token: Some(token.to_string()),
            user: Some(identity.to_stored()),
        };
        self.store.save(&stored)?;
        info!(user_id = identity.id, "Session established");
        self.token = Some(token.to_string());
        self.identity = Some(identity);
        self.notify(SessionEvent::Refreshed {
            authenticated: true,
        });
        Ok(())
    }

    /// Drop token and identity from memory and storage.
    ///
    /// Called once for every authorization failure, whichever request hit it.
    pub fn invalidate(&mut self) {
        self.token = None;
        self.identity = None;
        if let Err(e) = self.store.clear() {
            warn!(error = %e, "Failed to clear persisted session");
        }
        info!("Session invalidated");
        self.notify(SessionEvent::Invalidated);
    }

    pub fn subscribe(&mut self) -> Receiver<SessionEvent> {
        let (tx, rx) = mpsc::channel();
        self.listeners.push(tx);
        rx
    }

    fn reload_from_store(&mut self) {
        let stored = match self.store.load() {
            Ok(stored) => stored,
            Err(e) => {
                warn!(error = %e, "Failed to read persisted session, treating as logged out");
                StoredSession::default()
            }
        };

        self.token = stored
            .token
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty());
        self.identity = match (&self.token, stored.user.as_deref()) {
            (Some(_), Some(raw)) => Identity::from_stored(raw),
            (Some(_), None) => {
                warn!("Token found, but user data missing");
                None
            }
            (None, _) => None,
        };
        debug!(
            authenticated = self.token.is_some(),
            user_id = ?self.identity.as_ref().map(|i| i.id),
            "Session loaded"
        );
    }

    fn notify(&mut self, event: SessionEvent) {
        self.listeners.retain(|tx| tx.send(event).is_ok());
    }
}
