use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::Utc;
use coeus_core::{SessionKey, SessionSnapshot, SessionStore};
use coeus_logging::{coeus_debug, coeus_error, coeus_warn};
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use thiserror::Error;

pub const DEFAULT_SESSION_FILE: &str = ".coeus_session.ron";

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("session directory missing or not writable: {0}")]
    Directory(String),
    #[error("could not serialize session: {0}")]
    Serialize(#[from] ron::Error),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
struct PersistedSession {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    user_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    job_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    file_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    vectors_stored: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    docs_indexed: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    saved_utc: Option<String>,
}

impl From<PersistedSession> for SessionSnapshot {
    fn from(p: PersistedSession) -> Self {
        SessionSnapshot {
            display_name: p.display_name,
            user_id: p.user_id,
            job_id: p.job_id,
            file_name: p.file_name,
            vectors_stored: p.vectors_stored,
            docs_indexed: p.docs_indexed,
        }
    }
}

impl PersistedSession {
    fn stamped(snapshot: SessionSnapshot) -> Self {
        PersistedSession {
            display_name: snapshot.display_name,
            user_id: snapshot.user_id,
            job_id: snapshot.job_id,
            file_name: snapshot.file_name,
            vectors_stored: snapshot.vectors_stored,
            docs_indexed: snapshot.docs_indexed,
            saved_utc: Some(Utc::now().to_rfc3339()),
        }
    }
}

/// Session store backed by one RON file, rewritten atomically on every change.
#[derive(Debug, Clone)]
pub struct RonSessionStore {
    path: PathBuf,
}

impl RonSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write(&self, snapshot: SessionSnapshot) -> Result<(), PersistError> {
        let pretty = ron::ser::PrettyConfig::new();
        let content = ron::ser::to_string_pretty(&PersistedSession::stamped(snapshot), pretty)?;
        write_atomic(&self.path, &content)
    }

    fn store(&self, snapshot: SessionSnapshot) {
        if let Err(err) = self.write(snapshot) {
            coeus_error!("Failed to write session to {:?}: {}", self.path, err);
        }
    }

    /// Reads the file. A missing file is an empty session; a file that exists
    /// but cannot be read is an error so callers do not overwrite it.
    fn read(&self) -> Result<SessionSnapshot, PersistError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return Ok(SessionSnapshot::default());
            }
            Err(err) => return Err(err.into()),
        };

        match ron::from_str::<PersistedSession>(&content) {
            Ok(persisted) => Ok(persisted.into()),
            Err(err) => {
                // Nothing recoverable is left in it; the next write replaces it.
                coeus_warn!("Failed to parse session from {:?}: {}", self.path, err);
                Ok(SessionSnapshot::default())
            }
        }
    }

    fn update_with(&self, change: impl FnOnce(&mut SessionSnapshot)) {
        let mut current = match self.read() {
            Ok(snapshot) => snapshot,
            Err(err) => {
                coeus_error!(
                    "Not writing session to {:?}, existing file unreadable: {}",
                    self.path,
                    err
                );
                return;
            }
        };
        change(&mut current);
        self.store(current);
    }
}

impl SessionStore for RonSessionStore {
    fn load(&self) -> SessionSnapshot {
        match self.read() {
            Ok(snapshot) => {
                coeus_debug!("Loaded session from {:?}", self.path);
                snapshot
            }
            Err(err) => {
                coeus_warn!("Failed to read session from {:?}: {}", self.path, err);
                SessionSnapshot::default()
            }
        }
    }

    fn save(&mut self, patch: &SessionSnapshot) {
        self.update_with(|current| current.merge(patch));
    }

    fn clear(&mut self, keys: &[SessionKey]) {
        self.update_with(|current| {
            for key in keys {
                current.remove(*key);
            }
        });
    }
}

/// Writes `content` to `path` through a temp file in the same directory, then renames.
fn write_atomic(path: &Path, content: &str) -> Result<(), PersistError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    if !dir.exists() {
        fs::create_dir_all(&dir).map_err(|e| PersistError::Directory(e.to_string()))?;
    } else if !dir.is_dir() {
        return Err(PersistError::Directory(format!(
            "{} is not a directory",
            dir.display()
        )));
    }

    let mut tmp = NamedTempFile::new_in(&dir)?;
    tmp.write_all(content.as_bytes())?;
    tmp.flush()?;
    tmp.as_file_mut().sync_all()?;
    tmp.persist(path).map_err(|e| PersistError::Io(e.error))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn write_atomic_creates_missing_directory() {
        let temp = TempDir::new().unwrap();
        let target = temp.path().join("nested").join("session.ron");
        write_atomic(&target, "()").unwrap();
        assert_eq!(fs::read_to_string(&target).unwrap(), "()");
    }

    #[test]
    fn write_atomic_refuses_file_as_directory() {
        let temp = TempDir::new().unwrap();
        let blocker = temp.path().join("not_a_dir");
        fs::write(&blocker, "x").unwrap();

        let result = write_atomic(&blocker.join("session.ron"), "()");
        assert!(matches!(result, Err(PersistError::Directory(_))));
        assert_eq!(fs::read_to_string(&blocker).unwrap(), "x");
    }
}
