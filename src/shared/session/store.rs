use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use crate::shared::errors::{AppError, AppResult};

/// Durable key-value storage for client session state (bearer token,
/// serialized user profile, locale preference). Backed by a single JSON
/// object file; read synchronously at startup.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

pub mod keys {
    pub const ACCESS_TOKEN: &str = "access_token";
    pub const USER: &str = "user";
    pub const LOCALE: &str = "locale";
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Loads the full key-value map. A missing file is an empty store.
    pub fn read_all(&self) -> AppResult<HashMap<String, String>> {
        if !self.path.exists() {
            return Ok(HashMap::new());
        }
        let raw = fs::read_to_string(&self.path)?;
        if raw.trim().is_empty() {
            return Ok(HashMap::new());
        }
        serde_json::from_str(&raw).map_err(|e| {
            AppError::StorageError(format!(
                "Session file {} is not a JSON object: {}",
                self.path.display(),
                e
            ))
        })
    }

    pub fn get(&self, key: &str) -> AppResult<Option<String>> {
        Ok(self.read_all()?.remove(key))
    }

    pub fn set(&self, key: &str, value: &str) -> AppResult<()> {
        let mut state = self.read_all()?;
        state.insert(key.to_string(), value.to_string());
        self.write_all(&state)
    }

    pub fn remove(&self, key: &str) -> AppResult<()> {
        let mut state = self.read_all()?;
        if state.remove(key).is_some() {
            self.write_all(&state)?;
        }
        Ok(())
    }

    fn write_all(&self, state: &HashMap<String, String>) -> AppResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let raw = serde_json::to_string_pretty(state)?;
        fs::write(&self.path, raw)?;
        Ok(())
    }
}
