use super::types::Credential;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};

/// Persistent, process-wide storage for the session credential.
///
/// The store holds at most one credential. Every operation is a whole-value
/// read, replace or clear - never a partial-field mutation - so concurrent
/// dispatches racing on an expired session converge to "no credential"
/// regardless of ordering. Clearing an empty store is a no-op.
pub trait SessionStore: Send + Sync {
    /// The current credential, if one is stored.
    fn load(&self) -> Option<Credential>;
    /// Replace the stored credential.
    fn store(&self, credential: &Credential);
    /// Remove the stored credential.
    fn clear(&self);
}

/// In-memory store for tests and ephemeral sessions.
#[derive(Default)]
pub struct MemorySessionStore {
    credential: RwLock<Option<Credential>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> Option<Credential> {
        self.credential
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn store(&self, credential: &Credential) {
        *self
            .credential
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(credential.clone());
    }

    fn clear(&self) {
        *self
            .credential
            .write()
            .unwrap_or_else(PoisonError::into_inner) = None;
    }
}

/// File-backed store persisting the credential as JSON, so a session
/// survives process restarts.
///
/// Storage failures are absorbed and logged: a session that fails to
/// persist degrades to an in-process one rather than failing the login
/// that produced it.
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at the conventional location,
    /// `<user config dir>/inventra/session.json`.
    pub fn default_location() -> Option<Self> {
        dirs::config_dir().map(|dir| Self::new(dir.join("inventra").join("session.json")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> Option<Credential> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return None,
            Err(e) => {
                log::warn!("failed to read session file {}: {e}", self.path.display());
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(credential) => Some(credential),
            Err(e) => {
                log::warn!(
                    "discarding unreadable session file {}: {e}",
                    self.path.display()
                );
                None
            }
        }
    }

    fn store(&self, credential: &Credential) {
        if let Some(parent) = self.path.parent() {
            if let Err(e) = fs::create_dir_all(parent) {
                log::warn!(
                    "failed to create session directory {}: {e}",
                    parent.display()
                );
                return;
            }
        }
        let raw = match serde_json::to_string(credential) {
            Ok(raw) => raw,
            Err(e) => {
                log::warn!("failed to serialize credential: {e}");
                return;
            }
        };
        if let Err(e) = fs::write(&self.path, raw) {
            log::warn!("failed to persist session file {}: {e}", self.path.display());
            return;
        }
        // The file holds a live token; keep it owner-readable only.
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            if let Err(e) = fs::set_permissions(&self.path, fs::Permissions::from_mode(0o600)) {
                log::warn!(
                    "failed to restrict session file permissions {}: {e}",
                    self.path.display()
                );
            }
        }
    }

    fn clear(&self) {
        if let Err(e) = fs::remove_file(&self.path) {
            if e.kind() != ErrorKind::NotFound {
                log::warn!("failed to clear session file {}: {e}", self.path.display());
            }
        }
    }
}
