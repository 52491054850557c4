use anyhow::{Context, Result};
use log::error;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::Player;

#[derive(Debug, Default, Serialize, Deserialize)]
struct PersistedSession {
    auth_token: Option<String>,
    current_user: Option<Player>,
}

/// Explicit session state for the API client: the bearer token and the
/// cached profile of the logged-in player, backed by a JSON file.
/// Injected into the client rather than held as module-global state.
pub struct SessionStore {
    path: PathBuf,
    auth_token: Option<String>,
    current_user: Option<Player>,
}

impl SessionStore {
    /// Hydrate from the session file. A missing file means logged out;
    /// a corrupt file is logged and likewise treated as logged out.
    pub fn load<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();

        let persisted = match fs::read_to_string(&path) {
            Ok(json) => match serde_json::from_str::<PersistedSession>(&json) {
                Ok(session) => session,
                Err(e) => {
                    error!("Failed to parse stored session, treating as logged out: {e}");
                    PersistedSession::default()
                }
            },
            Err(_) => PersistedSession::default(),
        };

        Self {
            path,
            auth_token: persisted.auth_token,
            current_user: persisted.current_user,
        }
    }

    pub fn token(&self) -> Option<&str> {
        self.auth_token.as_deref()
    }

    pub fn current_user(&self) -> Option<&Player> {
        self.current_user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.auth_token.is_some()
    }

    /// Store a fresh token and profile and persist them together
    pub fn set(&mut self, token: String, user: Player) -> Result<()> {
        self.auth_token = Some(token);
        self.current_user = Some(user);
        self.persist()
    }

    /// Drop token and profile together (logout) and remove the file
    pub fn clear(&mut self) -> Result<()> {
        self.auth_token = None;
        self.current_user = None;

        if self.path.exists() {
            fs::remove_file(&self.path).context("Failed to remove session file")?;
        }
        Ok(())
    }

    fn persist(&self) -> Result<()> {
        let persisted = PersistedSession {
            auth_token: self.auth_token.clone(),
            current_user: self.current_user.clone(),
        };
        let json =
            serde_json::to_string_pretty(&persisted).context("Failed to serialize session")?;
        fs::write(&self.path, json).context("Failed to write session file")?;
        Ok(())
    }
}
