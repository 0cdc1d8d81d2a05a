//! Persisted login session.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use cors_client::{Credential, Session};
use log::debug;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// On-disk form of a [`Session`].
#[derive(Debug, Serialize, Deserialize)]
struct StoredSession {
    credential: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    refresh_credential: Option<String>,
    user_id: Uuid,
    expires: i64,
}

impl StoredSession {
    fn from_session(session: &Session) -> Self {
        Self {
            credential: session.credential.expose().to_string(),
            refresh_credential: session
                .refresh_credential
                .as_ref()
                .map(|c| c.expose().to_string()),
            user_id: session.user_id,
            expires: session.expires,
        }
    }

    fn into_session(self) -> anyhow::Result<Session> {
        Ok(Session {
            credential: Credential::new(self.credential)?,
            refresh_credential: Credential::from_optional(self.refresh_credential.as_deref())?,
            user_id: self.user_id,
            expires: self.expires,
        })
    }
}

/// Reads and writes the session file.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// The stored session, or `None` if nobody is logged in.
    pub fn load(&self) -> anyhow::Result<Option<Session>> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to read {}", self.path.display()));
            }
        };

        let stored: StoredSession = serde_json::from_str(&raw)
            .with_context(|| format!("Corrupt session file {}", self.path.display()))?;
        stored.into_session().map(Some)
    }

    /// Replace the stored session. The file is written atomically and is
    /// only readable by the current user.
    pub fn save(&self, session: &Session) -> anyhow::Result<()> {
        let dir = self
            .path
            .parent()
            .unwrap_or_else(|| Path::new("."));
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create {}", dir.display()))?;

        let json = serde_json::to_string_pretty(&StoredSession::from_session(session))?;
        let mut file = tempfile::NamedTempFile::new_in(dir)?;
        file.write_all(json.as_bytes())?;
        file.persist(&self.path)
            .with_context(|| format!("Failed to write {}", self.path.display()))?;

        debug!("Session stored at {:?}", self.path);
        Ok(())
    }

    /// Forget the stored session. Clearing an absent session is fine.
    pub fn clear(&self) -> anyhow::Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).with_context(|| format!("Failed to remove {}", self.path.display())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> Session {
        Session {
            credential: Credential::new("Bearer access").unwrap(),
            refresh_credential: Some(Credential::new("Bearer refresh").unwrap()),
            user_id: "0b9a4a9c-7c36-4f3e-9a57-0a5b1b5b7d11".parse().unwrap(),
            expires: 1_617_000_000_000,
        }
    }

    #[test]
    fn test_load_without_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path().join("session.json"));

        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path().join("nested").join("session.json"));

        store.save(&session()).unwrap();

        assert_eq!(store.load().unwrap(), Some(session()));
    }

    #[test]
    fn test_save_replaces_previous_session() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path().join("session.json"));
        store.save(&session()).unwrap();

        let mut newer = session();
        newer.refresh_credential = None;
        newer.expires = 5;
        store.save(&newer).unwrap();

        let loaded = store.load().unwrap().unwrap();
        assert_eq!(loaded.refresh_credential, None);
        assert_eq!(loaded.expires, 5);
    }

    #[test]
    fn test_clear() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path().join("session.json"));
        store.save(&session()).unwrap();

        store.clear().unwrap();
        assert!(store.load().unwrap().is_none());

        // Clearing twice is not an error
        store.clear().unwrap();
    }

    #[test]
    fn test_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        fs::write(&path, "{ not json").unwrap();

        assert!(SessionStore::new(path).load().is_err());
    }

    #[test]
    fn test_empty_credential_in_file_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        fs::write(
            &path,
            r#"{"credential":"","user_id":"0b9a4a9c-7c36-4f3e-9a57-0a5b1b5b7d11","expires":1}"#,
        )
        .unwrap();

        assert!(SessionStore::new(path).load().is_err());
    }
}
