//! Process-wide session state: API base URL, bearer token, signed-in user
//! profile, and locale preference.
//!
//! The session is an explicit context object handed to every client and
//! service constructor; nothing reads it through globals. Durable state
//! lives in a [`SessionStore`] and is loaded synchronously when the session
//! is built.

pub mod locale;
pub mod store;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::log_warn;
use crate::shared::errors::AppResult;

pub use locale::Locale;
pub use store::{keys, SessionStore};

/// Signed-in administrator profile, persisted alongside the bearer token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub user_name: String,
    pub email: String,
    pub full_name: String,
}

pub struct Session {
    base_url: String,
    token: RwLock<Option<String>>,
    user: RwLock<Option<UserProfile>>,
    locale: RwLock<Locale>,
    store: Option<SessionStore>,
}

impl Session {
    /// In-memory session with no durable backing (used by tests and tools
    /// that should not persist credentials).
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: RwLock::new(None),
            user: RwLock::new(None),
            locale: RwLock::new(Locale::default()),
            store: None,
        }
    }

    /// Session backed by durable storage. Persisted state is read
    /// synchronously; a profile that no longer deserializes is discarded
    /// together with its token.
    pub fn with_store(base_url: impl Into<String>, store: SessionStore) -> AppResult<Self> {
        let state = store.read_all()?;

        let mut token = state.get(keys::ACCESS_TOKEN).cloned();
        let locale = state
            .get(keys::LOCALE)
            .and_then(|raw| Locale::parse(raw))
            .unwrap_or_default();
        let user = match state.get(keys::USER) {
            Some(raw) => match serde_json::from_str::<UserProfile>(raw) {
                Ok(profile) => Some(profile),
                Err(err) => {
                    log_warn!("Discarding corrupt persisted profile: {}", err);
                    store.remove(keys::ACCESS_TOKEN)?;
                    store.remove(keys::USER)?;
                    token = None;
                    None
                }
            },
            None => None,
        };

        Ok(Self {
            base_url: base_url.into(),
            token: RwLock::new(token),
            user: RwLock::new(user),
            locale: RwLock::new(locale),
            store: Some(store),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn token(&self) -> Option<String> {
        self.token.read().clone()
    }

    pub fn user(&self) -> Option<UserProfile> {
        self.user.read().clone()
    }

    pub fn locale(&self) -> Locale {
        *self.locale.read()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.read().is_some()
    }

    pub fn set_locale(&self, locale: Locale) -> AppResult<()> {
        *self.locale.write() = locale;
        if let Some(store) = &self.store {
            store.set(keys::LOCALE, locale.as_str())?;
        }
        Ok(())
    }

    /// Records a successful login and persists it.
    pub fn sign_in(&self, token: String, user: UserProfile) -> AppResult<()> {
        if let Some(store) = &self.store {
            store.set(keys::ACCESS_TOKEN, &token)?;
            store.set(keys::USER, &serde_json::to_string(&user)?)?;
        }
        *self.token.write() = Some(token);
        *self.user.write() = Some(user);
        Ok(())
    }

    /// Clears the signed-in state, both in memory and in durable storage.
    pub fn sign_out(&self) -> AppResult<()> {
        if let Some(store) = &self.store {
            store.remove(keys::ACCESS_TOKEN)?;
            store.remove(keys::USER)?;
        }
        *self.token.write() = None;
        *self.user.write() = None;
        Ok(())
    }
}
