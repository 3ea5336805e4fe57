use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::SessionUser;

#[derive(Error, Diagnostic, Debug)]
pub enum SessionError {
    #[error("Failed to access session file {path}: {source}")]
    #[diagnostic(code(activity_hub::session::io))]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Session file {path} is not valid JSON: {source}")]
    #[diagnostic(
        code(activity_hub::session::corrupt),
        help("Delete the file or run `ahub auth logout` to start a fresh session.")
    )]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

pub type SessionResult<T> = Result<T, SessionError>;

/// Persisted session document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Session {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<SessionUser>,
}

/// Process-wide owner of the current session.
#[derive(Debug, Default)]
pub struct SessionStore {
    path: Option<PathBuf>,
    state: RwLock<Session>,
}

impl SessionStore {
    /// Session that lives only as long as the process.
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// In-memory session already holding `token`.
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            path: None,
            state: RwLock::new(Session {
                access_token: Some(token.into()),
                user: None,
            }),
        }
    }

    /// Session backed by a JSON file. A missing file is an empty session.
    pub fn open(path: impl Into<PathBuf>) -> SessionResult<Self> {
        let path = path.into();
        let session = match fs::read_to_string(&path) {
            Ok(content) => {
                serde_json::from_str(&content).map_err(|source| SessionError::Corrupt {
                    path: path.clone(),
                    source,
                })?
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Session::default(),
            Err(source) => return Err(SessionError::Io { path, source }),
        };

        Ok(Self {
            path: Some(path),
            state: RwLock::new(session),
        })
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Current bearer token; an empty token counts as none.
    pub fn token(&self) -> Option<String> {
        self.read()
            .access_token
            .clone()
            .filter(|token| !token.is_empty())
    }

    pub fn user(&self) -> Option<SessionUser> {
        self.read().user.clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    pub fn login(&self, token: impl Into<String>, user: Option<SessionUser>) -> SessionResult<()> {
        let session = Session {
            access_token: Some(token.into()),
            user,
        };
        self.persist(&session)?;
        *self.write() = session;
        tracing::info!("session started");
        Ok(())
    }

    pub fn logout(&self) -> SessionResult<()> {
        let session = Session::default();
        self.persist(&session)?;
        *self.write() = session;
        tracing::info!("session cleared");
        Ok(())
    }

    fn persist(&self, session: &Session) -> SessionResult<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| SessionError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let content = serde_json::to_string_pretty(session).map_err(|source| {
            SessionError::Corrupt {
                path: path.clone(),
                source,
            }
        })?;
        fs::write(path, content).map_err(|source| SessionError::Io {
            path: path.clone(),
            source,
        })
    }

    // A panic while holding the lock cannot leave a half-written session,
    // so a poisoned lock is still safe to use.
    fn read(&self) -> RwLockReadGuard<'_, Session> {
        self.state.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Session> {
        self.state.write().unwrap_or_else(|e| e.into_inner())
    }
}
