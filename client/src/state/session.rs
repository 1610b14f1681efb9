//! Session store for the authenticated user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Created once at start-up and handed (by cheap clone) to the auth service,
//! the trip service, the guards and the router. Only the auth service writes.
//!
//! Guards read synchronously, so the store sits behind a std `RwLock`; no
//! lock is held across an await point.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::io::Write;
#[cfg(unix)]
use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};

use serde::{Deserialize, Serialize};

use crate::net::types::{Role, User};

/// Permissions of the session file on unix: it holds a bearer token.
#[cfg(unix)]
const SESSION_FILE_MODE: u32 = 0o600;

/// Authenticated user plus the token sent with every API call.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub user: User,
    pub token: String,
}

/// Shared handle to the current session. Clones observe the same state.
#[derive(Clone, Debug, Default)]
pub struct SessionStore {
    inner: Arc<RwLock<Option<Session>>>,
    file: Option<PathBuf>,
}

impl SessionStore {
    /// An empty store that lives only as long as the process.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A store mirrored to `path`. An existing, readable session file is
    /// loaded immediately; a missing or corrupt one yields an empty store.
    #[must_use]
    pub fn persistent(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let loaded = load_session(&path);
        if loaded.is_some() {
            tracing::debug!(path = %path.display(), "restored session from file");
        }
        Self { inner: Arc::new(RwLock::new(loaded)), file: Some(path) }
    }

    #[must_use]
    pub fn file(&self) -> Option<&Path> {
        self.file.as_deref()
    }

    #[must_use]
    pub fn session(&self) -> Option<Session> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    #[must_use]
    pub fn user(&self) -> Option<User> {
        self.read(|session| session.user.clone())
    }

    #[must_use]
    pub fn token(&self) -> Option<String> {
        self.read(|session| session.token.clone())
    }

    #[must_use]
    pub fn role(&self) -> Option<Role> {
        self.read(|session| session.user.group)
    }

    #[must_use]
    pub fn is_logged_in(&self) -> bool {
        self.read(|_| ()).is_some()
    }

    /// Replace the current session.
    pub fn set(&self, session: Session) {
        let mut guard = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(path) = &self.file {
            save_session(path, Some(&session));
        }
        *guard = Some(session);
    }

    /// Drop the current session (and its file, if any).
    pub fn clear(&self) {
        let mut guard = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(path) = &self.file {
            save_session(path, None);
        }
        *guard = None;
    }

    fn read<T>(&self, f: impl FnOnce(&Session) -> T) -> Option<T> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner).as_ref().map(f)
    }
}

fn load_session(path: &Path) -> Option<Session> {
    let raw = std::fs::read_to_string(path).ok()?;
    match serde_json::from_str(&raw) {
        Ok(session) => Some(session),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "ignoring unreadable session file");
            None
        }
    }
}

fn save_session(path: &Path, session: Option<&Session>) {
    let Some(session) = session else {
        if let Err(e) = std::fs::remove_file(path)
            && e.kind() != std::io::ErrorKind::NotFound
        {
            tracing::warn!(path = %path.display(), error = %e, "failed to remove session file");
        }
        return;
    };
    let raw = match serde_json::to_string_pretty(session) {
        Ok(raw) => raw,
        Err(e) => {
            tracing::warn!(error = %e, "failed to encode session");
            return;
        }
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty())
        && let Err(e) = std::fs::create_dir_all(parent)
    {
        tracing::warn!(path = %parent.display(), error = %e, "failed to create session directory");
    }
    if let Err(e) = write_private(path, raw.as_bytes()) {
        tracing::warn!(path = %path.display(), error = %e, "failed to write session file");
    }
}

/// Write `bytes` to `path`, readable and writable by the owner only.
fn write_private(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut options = std::fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    options.mode(SESSION_FILE_MODE);
    let mut file = options.open(path)?;
    // `mode` only applies on creation; an existing file keeps its old bits.
    #[cfg(unix)]
    file.set_permissions(std::fs::Permissions::from_mode(SESSION_FILE_MODE))?;
    file.write_all(bytes)
}
