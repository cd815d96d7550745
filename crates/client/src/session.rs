//! Session files.
//!
//! `session.json` holds the API token and the logged-in user.
//! `kitchen_access.json` holds the kiosk access code, which is independent
//! of any user login.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use pasok_core::domain::{Kitchen, User};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use thiserror::Error;

const SESSION_FILE: &str = "session.json";
const KIOSK_FILE: &str = "kitchen_access.json";

/// Session file errors.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The file could not be read, written or removed.
    #[error("Session file {path}: {source}")]
    Io {
        /// File path.
        path: PathBuf,
        /// Underlying error.
        source: io::Error,
    },

    /// The file exists but is not valid JSON for its type.
    #[error("Session file {path} is corrupt: {source}")]
    Corrupt {
        /// File path.
        path: PathBuf,
        /// Underlying error.
        source: serde_json::Error,
    },
}

/// A logged-in user session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredSession {
    /// API token.
    pub token: String,
    /// The user the token belongs to.
    pub user: User,
    /// When the session was stored.
    pub saved_at: DateTime<Utc>,
}

/// A verified kiosk access code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KioskSession {
    /// The access code.
    pub code: String,
    /// Kitchen the code unlocks.
    pub kitchen: Kitchen,
    /// When the code was verified.
    pub verified_at: DateTime<Utc>,
}

/// Reads and writes the session files in one directory.
#[derive(Debug, Clone)]
pub struct SessionStore {
    dir: PathBuf,
}

impl SessionStore {
    /// Creates a store rooted at `dir`. Nothing is touched until first use.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Path of the user session file.
    #[must_use]
    pub fn session_path(&self) -> PathBuf {
        self.dir.join(SESSION_FILE)
    }

    /// Path of the kiosk session file.
    #[must_use]
    pub fn kiosk_path(&self) -> PathBuf {
        self.dir.join(KIOSK_FILE)
    }

    /// Loads the user session, if any.
    pub fn load(&self) -> Result<Option<StoredSession>, SessionError> {
        read_json(&self.session_path())
    }

    /// Returns the stored token, if any.
    pub fn token(&self) -> Result<Option<String>, SessionError> {
        Ok(self.load()?.map(|session| session.token))
    }

    /// Stores the user session.
    pub fn save(&self, session: &StoredSession) -> Result<(), SessionError> {
        write_json(&self.dir, &self.session_path(), session)
    }

    /// Removes the user session.
    pub fn clear(&self) -> Result<(), SessionError> {
        remove(&self.session_path())
    }

    /// Loads the kiosk session, if any.
    pub fn load_kiosk(&self) -> Result<Option<KioskSession>, SessionError> {
        read_json(&self.kiosk_path())
    }

    /// Stores the kiosk session.
    pub fn save_kiosk(&self, session: &KioskSession) -> Result<(), SessionError> {
        write_json(&self.dir, &self.kiosk_path(), session)
    }

    /// Removes the kiosk session.
    pub fn clear_kiosk(&self) -> Result<(), SessionError> {
        remove(&self.kiosk_path())
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, SessionError> {
    let data = match fs::read_to_string(path) {
        Ok(data) => data,
        Err(source) if source.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(SessionError::Io {
                path: path.to_path_buf(),
                source,
            });
        }
    };
    serde_json::from_str(&data)
        .map(Some)
        .map_err(|source| SessionError::Corrupt {
            path: path.to_path_buf(),
            source,
        })
}

fn write_json<T: Serialize>(dir: &Path, path: &Path, value: &T) -> Result<(), SessionError> {
    let io_err = |source| SessionError::Io {
        path: path.to_path_buf(),
        source,
    };
    fs::create_dir_all(dir).map_err(io_err)?;
    let data = serde_json::to_string_pretty(value).map_err(|source| SessionError::Corrupt {
        path: path.to_path_buf(),
        source,
    })?;
    let mut file = private_file(path).map_err(io_err)?;
    file.write_all(data.as_bytes()).map_err(io_err)
}

/// Opens `path` for writing, readable by the owner only on unix.
fn private_file(path: &Path) -> io::Result<fs::File> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    std::os::unix::fs::OpenOptionsExt::mode(&mut options, 0o600);
    let file = options.open(path)?;
    // `mode` only applies on creation; tighten files left by older runs.
    #[cfg(unix)]
    file.set_permissions(std::os::unix::fs::PermissionsExt::from_mode(0o600))?;
    Ok(file)
}

fn remove(path: &Path) -> Result<(), SessionError> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(source) if source.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(source) => Err(SessionError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pasok_core::domain::Role;
    use pasok_shared::types::{KitchenId, UserId};

    fn user() -> User {
        User {
            id: UserId(1),
            username: "admin".to_string(),
            name: Some("Administrator".to_string()),
            email: None,
            role: Role::Admin,
            is_active: true,
        }
    }

    #[test]
    fn test_save_load_clear() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path().join("nested"));
        assert!(store.load().unwrap().is_none());

        let session = StoredSession {
            token: "abc".to_string(),
            user: user(),
            saved_at: Utc::now(),
        };
        store.save(&session).unwrap();
        assert_eq!(store.token().unwrap().as_deref(), Some("abc"));
        assert_eq!(store.load().unwrap(), Some(session));

        store.clear().unwrap();
        assert!(store.load().unwrap().is_none());
        // Clearing twice is fine.
        store.clear().unwrap();
    }

    #[test]
    fn test_kiosk_session_is_independent() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path());
        let kiosk = KioskSession {
            code: "DPR-001".to_string(),
            kitchen: Kitchen {
                id: KitchenId(3),
                code: None,
                name: "Dapur Timur".to_string(),
                address: None,
                pic: None,
                access_code: None,
                is_active: true,
            },
            verified_at: Utc::now(),
        };
        store.save_kiosk(&kiosk).unwrap();
        store.clear().unwrap();
        assert_eq!(store.load_kiosk().unwrap(), Some(kiosk));
    }

    #[cfg(unix)]
    #[test]
    fn test_session_file_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path());
        fs::write(store.session_path(), "{}").unwrap();
        fs::set_permissions(store.session_path(), fs::Permissions::from_mode(0o644)).unwrap();

        store
            .save(&StoredSession {
                token: "secret".to_string(),
                user: user(),
                saved_at: Utc::now(),
            })
            .unwrap();
        let mode = fs::metadata(store.session_path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn test_corrupt_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path());
        fs::write(store.session_path(), "not json").unwrap();
        assert!(matches!(store.load(), Err(SessionError::Corrupt { .. })));
    }
}
