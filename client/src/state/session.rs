//! Session store for the admin token.
//!
//! SYSTEM CONTEXT
//! ==============
//! The HTTP wrapper reads the token on every request and clears it on 401;
//! login and logout set and clear it; the route guard and navbar observe the
//! derived [`SessionState`] through [`SessionStore::subscribe`].
//!
//! DESIGN
//! ======
//! State is keyed solely by presence of a non-empty token. Validity and
//! expiry are never checked locally; the backend rejecting a request is the
//! only signal. Every mutation updates memory, persistent storage, and the
//! watch channel under one lock so observers never see a token/state mismatch.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::fmt;
use std::io::Write as _;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use tokio::sync::watch;

/// Fixed key the token is persisted under.
pub const TOKEN_KEY: &str = "token";

/// Derived session state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SessionState {
    #[default]
    Anonymous,
    Authenticated,
}

impl SessionState {
    fn for_token(token: Option<&str>) -> Self {
        if token.is_some_and(|t| !t.trim().is_empty()) { Self::Authenticated } else { Self::Anonymous }
    }
}

/// Errors from the persistent token store.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("token store I/O failed at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

// =============================================================================
// TOKEN STORAGE
// =============================================================================

/// Persistent storage for the session token.
pub trait TokenStore: Send + Sync {
    /// Load the stored token, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be read.
    fn load(&self) -> Result<Option<String>, SessionError>;

    /// Persist `token`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be written.
    fn save(&self, token: &str) -> Result<(), SessionError>;

    /// Remove the stored token. Removing an absent token is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be modified.
    fn remove(&self) -> Result<(), SessionError>;
}

/// Token persisted as a file named [`TOKEN_KEY`] inside a state directory.
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(state_dir: &Path) -> Self {
        Self { path: state_dir.join(TOKEN_KEY) }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> SessionError {
        SessionError::Io { path: self.path.clone(), source }
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> Result<Option<String>, SessionError> {
        match std::fs::read_to_string(&self.path) {
            Ok(raw) => {
                let token = raw.trim();
                Ok((!token.is_empty()).then(|| token.to_owned()))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(self.io_error(e)),
        }
    }

    fn save(&self, token: &str) -> Result<(), SessionError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }
        let mut options = std::fs::OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }
        let mut file = options.open(&self.path).map_err(|e| self.io_error(e))?;
        // `mode` only applies on creation; tighten a file left by an older run.
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            file.set_permissions(std::fs::Permissions::from_mode(0o600)).map_err(|e| self.io_error(e))?;
        }
        file.write_all(token.as_bytes()).map_err(|e| self.io_error(e))
    }

    fn remove(&self) -> Result<(), SessionError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(self.io_error(e)),
        }
    }
}

/// In-process token storage that does not survive restarts.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: Mutex<Option<String>>,
}

impl MemoryTokenStore {
    pub fn with_token(token: &str) -> Self {
        Self { token: Mutex::new(Some(token.to_owned())) }
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Result<Option<String>, SessionError> {
        Ok(self.token.lock().unwrap_or_else(PoisonError::into_inner).clone())
    }

    fn save(&self, token: &str) -> Result<(), SessionError> {
        *self.token.lock().unwrap_or_else(PoisonError::into_inner) = Some(token.to_owned());
        Ok(())
    }

    fn remove(&self) -> Result<(), SessionError> {
        *self.token.lock().unwrap_or_else(PoisonError::into_inner) = None;
        Ok(())
    }
}

// =============================================================================
// SESSION STORE
// =============================================================================

/// Shared session context. Cloning shares the same underlying session.
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<SessionInner>,
}

struct SessionInner {
    token: RwLock<Option<String>>,
    store: Box<dyn TokenStore>,
    state_tx: watch::Sender<SessionState>,
}

impl SessionStore {
    /// Open a session backed by `store`, restoring any persisted token.
    ///
    /// # Errors
    ///
    /// Returns an error if the persisted token cannot be read.
    pub fn open(store: impl TokenStore + 'static) -> Result<Self, SessionError> {
        let token = store.load()?.filter(|t| !t.trim().is_empty());
        let state = SessionState::for_token(token.as_deref());
        let (state_tx, _) = watch::channel(state);
        tracing::debug!(?state, "session restored");
        Ok(Self {
            inner: Arc::new(SessionInner { token: RwLock::new(token), store: Box::new(store), state_tx }),
        })
    }

    /// Session backed by memory only, starting anonymous.
    pub fn in_memory() -> Self {
        let (state_tx, _) = watch::channel(SessionState::Anonymous);
        Self {
            inner: Arc::new(SessionInner {
                token: RwLock::new(None),
                store: Box::new(MemoryTokenStore::default()),
                state_tx,
            }),
        }
    }

    /// Current token, if authenticated.
    pub fn token(&self) -> Option<String> {
        self.inner.token.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn state(&self) -> SessionState {
        *self.inner.state_tx.borrow()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state() == SessionState::Authenticated
    }

    /// Store `token` and move to [`SessionState::Authenticated`].
    ///
    /// A blank token is treated as a logout.
    ///
    /// # Errors
    ///
    /// Returns an error if the token cannot be persisted; the session is left
    /// unchanged in that case.
    pub fn set(&self, token: &str) -> Result<(), SessionError> {
        let token = token.trim();
        if token.is_empty() {
            return self.clear().map(|_| ());
        }

        let mut slot = self.inner.token.write().unwrap_or_else(PoisonError::into_inner);
        self.inner.store.save(token)?;
        *slot = Some(token.to_owned());
        let changed = self.inner.state_tx.send_if_modified(|state| {
            let was = *state;
            *state = SessionState::Authenticated;
            was != SessionState::Authenticated
        });
        if changed {
            tracing::info!("session authenticated");
        }
        Ok(())
    }

    /// Drop the token and move to [`SessionState::Anonymous`].
    ///
    /// Returns `true` only for the call that actually ended the session, so
    /// concurrent clears produce a single transition.
    ///
    /// If the stored token cannot be removed, removal is tried once more and
    /// then the stored value is overwritten with an empty token, which
    /// [`SessionStore::open`] restores as anonymous.
    ///
    /// # Errors
    ///
    /// Returns the removal error if the token could not be removed. The
    /// in-memory session is cleared regardless.
    pub fn clear(&self) -> Result<bool, SessionError> {
        let mut slot = self.inner.token.write().unwrap_or_else(PoisonError::into_inner);
        if slot.take().is_none() {
            return Ok(false);
        }
        self.inner.state_tx.send_if_modified(|state| {
            let was = *state;
            *state = SessionState::Anonymous;
            was != SessionState::Anonymous
        });
        let removed = self.remove_persisted();
        drop(slot);

        tracing::info!("session cleared");
        removed.map(|()| true)
    }

    fn remove_persisted(&self) -> Result<(), SessionError> {
        let store = &self.inner.store;
        let Err(first) = store.remove() else {
            return Ok(());
        };
        tracing::warn!(error = %first, "token removal failed; retrying");
        if store.remove().is_ok() {
            return Ok(());
        }
        if let Err(e) = store.save("") {
            tracing::error!(error = %e, "stored token could not be blanked");
        }
        Err(first)
    }

    /// Observe state transitions without polling.
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.inner.state_tx.subscribe()
    }
}

impl fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionStore").field("state", &self.state()).finish_non_exhaustive()
    }
}
