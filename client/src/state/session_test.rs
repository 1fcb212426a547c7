use super::*;

// =============================================================================
// SessionStore transitions
// =============================================================================

#[test]
fn in_memory_session_starts_anonymous() {
    let session = SessionStore::in_memory();
    assert_eq!(session.state(), SessionState::Anonymous);
    assert_eq!(session.token(), None);
    assert!(!session.is_authenticated());
}

#[test]
fn set_authenticates_and_stores_token() {
    let session = SessionStore::in_memory();
    session.set("tok-123").unwrap();
    assert_eq!(session.state(), SessionState::Authenticated);
    assert_eq!(session.token().as_deref(), Some("tok-123"));
}

#[test]
fn set_blank_token_logs_out() {
    let session = SessionStore::in_memory();
    session.set("tok").unwrap();
    session.set("   ").unwrap();
    assert_eq!(session.state(), SessionState::Anonymous);
    assert_eq!(session.token(), None);
}

#[test]
fn clear_reports_only_the_first_transition() {
    let session = SessionStore::in_memory();
    session.set("tok").unwrap();
    assert!(session.clear().unwrap());
    assert!(!session.clear().unwrap());
    assert_eq!(session.state(), SessionState::Anonymous);
}

#[test]
fn clones_share_the_same_session() {
    let session = SessionStore::in_memory();
    let other = session.clone();
    session.set("shared").unwrap();
    assert_eq!(other.token().as_deref(), Some("shared"));
    other.clear().unwrap();
    assert!(!session.is_authenticated());
}

#[test]
fn debug_output_hides_token() {
    let session = SessionStore::in_memory();
    session.set("secret-token").unwrap();
    let rendered = format!("{session:?}");
    assert!(!rendered.contains("secret-token"));
    assert!(rendered.contains("Authenticated"));
}

// =============================================================================
// subscribe
// =============================================================================

#[test]
fn subscribers_observe_each_transition_once() {
    let session = SessionStore::in_memory();
    let mut rx = session.subscribe();
    assert!(!rx.has_changed().unwrap());

    session.set("tok").unwrap();
    assert!(rx.has_changed().unwrap());
    assert_eq!(*rx.borrow_and_update(), SessionState::Authenticated);

    // Re-setting while authenticated is not a transition.
    session.set("tok-2").unwrap();
    assert!(!rx.has_changed().unwrap());

    session.clear().unwrap();
    assert!(rx.has_changed().unwrap());
    assert_eq!(*rx.borrow_and_update(), SessionState::Anonymous);

    session.clear().unwrap();
    assert!(!rx.has_changed().unwrap());
}

#[test]
fn concurrent_clears_end_the_session_once() {
    let session = SessionStore::in_memory();
    session.set("tok").unwrap();

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let session = session.clone();
            std::thread::spawn(move || session.clear().unwrap())
        })
        .collect();
    let ended = handles.into_iter().map(|h| h.join().unwrap()).filter(|ended| *ended).count();

    assert_eq!(ended, 1);
    assert_eq!(session.state(), SessionState::Anonymous);
}

// =============================================================================
// FileTokenStore
// =============================================================================

#[test]
fn file_store_persists_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let session = SessionStore::open(FileTokenStore::new(dir.path())).unwrap();
    assert_eq!(session.state(), SessionState::Anonymous);
    session.set("persisted").unwrap();

    let reopened = SessionStore::open(FileTokenStore::new(dir.path())).unwrap();
    assert_eq!(reopened.state(), SessionState::Authenticated);
    assert_eq!(reopened.token().as_deref(), Some("persisted"));
}

#[test]
fn file_store_clear_removes_token_file() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileTokenStore::new(dir.path());
    let path = store.path().to_path_buf();
    let session = SessionStore::open(store).unwrap();

    session.set("tok").unwrap();
    assert!(path.exists());
    session.clear().unwrap();
    assert!(!path.exists());

    let reopened = SessionStore::open(FileTokenStore::new(dir.path())).unwrap();
    assert_eq!(reopened.state(), SessionState::Anonymous);
}

#[test]
fn file_store_uses_fixed_key() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileTokenStore::new(dir.path());
    assert_eq!(store.path(), dir.path().join(TOKEN_KEY));
}

#[test]
fn file_store_ignores_blank_file() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join(TOKEN_KEY), "  \n").unwrap();
    let session = SessionStore::open(FileTokenStore::new(dir.path())).unwrap();
    assert_eq!(session.state(), SessionState::Anonymous);
}

#[test]
fn memory_store_with_token_restores_authenticated() {
    let session = SessionStore::open(MemoryTokenStore::with_token("abc")).unwrap();
    assert!(session.is_authenticated());
}

#[cfg(unix)]
#[test]
fn file_store_writes_owner_only_token() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempfile::tempdir().unwrap();
    let store = FileTokenStore::new(&dir.path().join("nested"));
    store.save("secret").unwrap();
    let mode = std::fs::metadata(store.path()).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o600);
    assert_eq!(store.load().unwrap().as_deref(), Some("secret"));

    std::fs::set_permissions(store.path(), std::fs::Permissions::from_mode(0o644)).unwrap();
    store.save("rotated").unwrap();
    let mode = std::fs::metadata(store.path()).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o600);
    assert_eq!(store.load().unwrap().as_deref(), Some("rotated"));
}

// =============================================================================
// Failed removal
// =============================================================================

/// Shared backing value whose removal fails a set number of times.
#[derive(Clone, Default)]
struct FlakyStore {
    token: Arc<Mutex<Option<String>>>,
    failures_left: Arc<Mutex<usize>>,
}

impl FlakyStore {
    fn failing(times: usize) -> Self {
        Self { failures_left: Arc::new(Mutex::new(times)), ..Self::default() }
    }
}

impl TokenStore for FlakyStore {
    fn load(&self) -> Result<Option<String>, SessionError> {
        Ok(self.token.lock().unwrap().clone())
    }

    fn save(&self, token: &str) -> Result<(), SessionError> {
        *self.token.lock().unwrap() = Some(token.to_owned());
        Ok(())
    }

    fn remove(&self) -> Result<(), SessionError> {
        let mut left = self.failures_left.lock().unwrap();
        if *left > 0 {
            *left -= 1;
            return Err(SessionError::Io {
                path: PathBuf::from("token"),
                source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
            });
        }
        *self.token.lock().unwrap() = None;
        Ok(())
    }
}

#[test]
fn clear_retries_a_failed_removal() {
    let store = FlakyStore::failing(1);
    let session = SessionStore::open(store.clone()).unwrap();
    session.set("tok").unwrap();

    assert!(session.clear().unwrap());
    assert_eq!(*store.token.lock().unwrap(), None);
}

#[test]
fn clear_blanks_a_token_it_cannot_remove() {
    let store = FlakyStore::failing(usize::MAX);
    let session = SessionStore::open(store.clone()).unwrap();
    session.set("tok").unwrap();

    assert!(matches!(session.clear(), Err(SessionError::Io { .. })));
    assert_eq!(session.state(), SessionState::Anonymous);
    assert_eq!(store.token.lock().unwrap().as_deref(), Some(""));

    let reopened = SessionStore::open(store).unwrap();
    assert_eq!(reopened.state(), SessionState::Anonymous);
    assert_eq!(reopened.token(), None);
}
