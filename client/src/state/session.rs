//! Persisted sign-in state.
//!
//! The session lives in a single JSON file so that separate `chronos`
//! invocations share it. Removing the file is the sign-out.

use chrono::{DateTime, Utc};
use chronos_ledger::{SessionContext, SessionStatus};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum SessionStoreError {
    #[error("Failed to access session file: {0}")]
    Io(#[from] io::Error),

    #[error("Session file is unreadable: {0}")]
    Corrupt(#[from] serde_json::Error),
}

#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<Option<SessionContext>, SessionStoreError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        Ok(Some(serde_json::from_str(&raw)?))
    }

    /// Loads the session only if it is still usable at `now`.
    ///
    /// An expired session is removed from disk so the next command starts
    /// from a clean sign-in.
    pub fn load_valid(
        &self,
        now: DateTime<Utc>,
    ) -> Result<Result<SessionContext, SessionStatus>, SessionStoreError> {
        let session = match self.load() {
            Ok(session) => session,
            Err(SessionStoreError::Corrupt(err)) => {
                tracing::warn!(error = %err, path = %self.path.display(), "Discarding unreadable session file");
                self.clear()?;
                None
            }
            Err(err) => return Err(err),
        };
        let Some(session) = session else {
            return Ok(Err(SessionStatus::Missing));
        };
        match session.status(now) {
            SessionStatus::Valid => Ok(Ok(session)),
            status => {
                tracing::info!(%status, "Stored session is no longer usable");
                self.clear()?;
                Ok(Err(status))
            }
        }
    }

    pub fn save(&self, session: &SessionContext) -> Result<(), SessionStoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let raw = serde_json::to_string_pretty(session)?;
        fs::write(&self.path, raw)?;
        Ok(())
    }

    pub fn clear(&self) -> Result<(), SessionStoreError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use chronos_ledger::{UserId, UserRole};
    use tempfile::tempdir;

    fn session(expires_at: DateTime<Utc>) -> SessionContext {
        SessionContext {
            token: "token-abc".into(),
            expires_at,
            user_id: UserId::new(3),
            role: UserRole::Employee,
            company_id: None,
            name: Some("Ana".into()),
            email: Some("ana@example.com".into()),
        }
    }

    #[test]
    fn save_then_load_returns_same_session() {
        let dir = tempdir().unwrap();
        let store = SessionStore::new(dir.path().join("nested").join("session.json"));
        let saved = session(Utc::now() + Duration::hours(1));

        store.save(&saved).unwrap();

        assert_eq!(store.load().unwrap(), Some(saved));
    }

    #[test]
    fn load_without_file_is_none() {
        let dir = tempdir().unwrap();
        let store = SessionStore::new(dir.path().join("session.json"));
        assert!(store.load().unwrap().is_none());
        assert_eq!(
            store.load_valid(Utc::now()).unwrap(),
            Err(SessionStatus::Missing)
        );
    }

    #[test]
    fn clear_is_idempotent() {
        let dir = tempdir().unwrap();
        let store = SessionStore::new(dir.path().join("session.json"));
        store.save(&session(Utc::now())).unwrap();

        store.clear().unwrap();
        store.clear().unwrap();

        assert!(!store.path().exists());
    }

    #[test]
    fn expired_session_is_removed_on_load() {
        let dir = tempdir().unwrap();
        let store = SessionStore::new(dir.path().join("session.json"));
        let now = Utc::now();
        store.save(&session(now - Duration::seconds(1))).unwrap();

        assert_eq!(store.load_valid(now).unwrap(), Err(SessionStatus::Expired));
        assert!(!store.path().exists());
    }

    #[test]
    fn unreadable_session_is_treated_as_missing() {
        let dir = tempdir().unwrap();
        let store = SessionStore::new(dir.path().join("session.json"));
        fs::write(store.path(), "{not json").unwrap();

        assert!(matches!(store.load(), Err(SessionStoreError::Corrupt(_))));
        assert_eq!(
            store.load_valid(Utc::now()).unwrap(),
            Err(SessionStatus::Missing)
        );
        assert!(!store.path().exists());
    }
}
