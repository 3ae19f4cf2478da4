//! # Session Store
//!
//! Holds the persisted keys of a signed-in client: `access_token`,
//! `refresh_token`, `user` and `theme`. With a path the state is written to
//! a JSON file after every change; without one it lives in memory only.

use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
    sync::{Mutex, MutexGuard, PoisonError},
};
use timemesh_core::models::user::{TokenPair, User};
use tokio::sync::watch;

use crate::errors::ClientResult;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
struct PersistedSession {
    #[serde(default)]
    access_token: Option<String>,
    #[serde(default)]
    refresh_token: Option<String>,
    #[serde(default)]
    user: Option<User>,
    #[serde(default)]
    theme: Theme,
}

impl PersistedSession {
    fn signed_in(&self) -> bool {
        self.access_token.is_some()
    }
}

#[derive(Debug)]
pub struct SessionStore {
    path: Option<PathBuf>,
    state: Mutex<PersistedSession>,
    signed_in: watch::Sender<bool>,
}

impl SessionStore {
    pub fn in_memory() -> Self {
        Self::with_state(None, PersistedSession::default())
    }

    /// Opens the session file at `path`, starting empty when it does not exist.
    ///
    /// An unreadable or corrupt file is discarded with a warning rather than
    /// locking the user out.
    pub fn open(path: impl AsRef<Path>) -> ClientResult<Self> {
        let path = path.as_ref().to_path_buf();

        let state = match fs::read_to_string(&path) {
            Ok(contents) => serde_json::from_str(&contents).unwrap_or_else(|e| {
                tracing::warn!("Ignoring corrupt session file {}: {}", path.display(), e);
                PersistedSession::default()
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => PersistedSession::default(),
            Err(e) => return Err(e.into()),
        };

        Ok(Self::with_state(Some(path), state))
    }

    fn with_state(path: Option<PathBuf>, state: PersistedSession) -> Self {
        let (signed_in, _) = watch::channel(state.signed_in());
        Self {
            path,
            state: Mutex::new(state),
            signed_in,
        }
    }

    fn lock(&self) -> MutexGuard<'_, PersistedSession> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Applies a change, persists the result and publishes the signed-in flag.
    fn update<F>(&self, change: F) -> ClientResult<()>
    where
        F: FnOnce(&mut PersistedSession),
    {
        let snapshot = {
            let mut state = self.lock();
            change(&mut state);
            state.clone()
        };

        if let Some(path) = &self.path {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)?;
            }
            fs::write(path, serde_json::to_string_pretty(&snapshot)?)?;
        }

        let signed_in = snapshot.signed_in();
        self.signed_in.send_if_modified(|current| {
            let changed = *current != signed_in;
            *current = signed_in;
            changed
        });

        Ok(())
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn access_token(&self) -> Option<String> {
        self.lock().access_token.clone()
    }

    pub fn refresh_token(&self) -> Option<String> {
        self.lock().refresh_token.clone()
    }

    pub fn user(&self) -> Option<User> {
        self.lock().user.clone()
    }

    pub fn theme(&self) -> Theme {
        self.lock().theme
    }

    pub fn is_signed_in(&self) -> bool {
        self.lock().signed_in()
    }

    /// Receives `true` while an access token is held.
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.signed_in.subscribe()
    }

    pub fn set_tokens(&self, tokens: &TokenPair) -> ClientResult<()> {
        self.update(|state| {
            state.access_token = Some(tokens.access.clone());
            state.refresh_token = Some(tokens.refresh.clone());
        })
    }

    pub fn set_access_token(&self, access: &str) -> ClientResult<()> {
        self.update(|state| state.access_token = Some(access.to_string()))
    }

    pub fn set_user(&self, user: &User) -> ClientResult<()> {
        self.update(|state| state.user = Some(user.clone()))
    }

    pub fn set_theme(&self, theme: Theme) -> ClientResult<()> {
        self.update(|state| state.theme = theme)
    }

    pub fn toggle_theme(&self) -> ClientResult<Theme> {
        let theme = self.theme().toggled();
        self.set_theme(theme)?;
        Ok(theme)
    }

    /// Forgets tokens and user; the theme preference survives sign-out.
    pub fn clear_credentials(&self) -> ClientResult<()> {
        self.update(|state| {
            state.access_token = None;
            state.refresh_token = None;
            state.user = None;
        })
    }
}
