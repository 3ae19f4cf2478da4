//! # Modal Registry
//!
//! A shared set of open dialog identifiers. Background pollers consult it
//! and skip their fetches while anything is open, so data does not shift
//! under a dialog the user is editing.

use std::{
    collections::HashSet,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};
use tokio::sync::watch;
use uuid::Uuid;

#[derive(Debug)]
struct Registry {
    open: Mutex<HashSet<String>>,
    any_open: watch::Sender<bool>,
}

/// Cheaply clonable handle to the shared registry.
#[derive(Debug, Clone)]
pub struct ModalRegistry {
    inner: Arc<Registry>,
}

impl Default for ModalRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ModalRegistry {
    pub fn new() -> Self {
        let (any_open, _) = watch::channel(false);
        Self {
            inner: Arc::new(Registry {
                open: Mutex::new(HashSet::new()),
                any_open,
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, HashSet<String>> {
        self.inner.open.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Applies `change` and publishes the result before the lock is released,
    /// so concurrent updates cannot publish out of order.
    fn update(&self, change: impl FnOnce(&mut HashSet<String>)) {
        let mut open = self.lock();
        change(&mut open);
        let any_open = !open.is_empty();
        self.inner.any_open.send_if_modified(|current| {
            let changed = *current != any_open;
            *current = any_open;
            changed
        });
    }

    /// Marks a dialog as open. Registering the same id twice is a no-op.
    pub fn register(&self, id: impl Into<String>) {
        let id = id.into();
        tracing::trace!("Modal {} opened", id);
        self.update(|open| {
            open.insert(id);
        });
    }

    pub fn unregister(&self, id: &str) {
        tracing::trace!("Modal {} closed", id);
        self.update(|open| {
            open.remove(id);
        });
    }

    pub fn is_open(&self, id: &str) -> bool {
        self.lock().contains(id)
    }

    pub fn has_open_modals(&self) -> bool {
        !self.lock().is_empty()
    }

    pub fn open_count(&self) -> usize {
        self.lock().len()
    }

    /// Receives `true` whenever at least one dialog is open.
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.inner.any_open.subscribe()
    }

    /// Registers `id` until the returned guard is dropped.
    pub fn guard(&self, id: impl Into<String>) -> ModalGuard {
        let id = id.into();
        self.register(id.clone());
        ModalGuard {
            registry: self.clone(),
            id,
        }
    }

    /// Like [`guard`](Self::guard) with a unique id under `prefix`, for dialogs
    /// that can be open more than once.
    pub fn guard_scoped(&self, prefix: &str) -> ModalGuard {
        self.guard(format!("{}-{}", prefix, Uuid::new_v4()))
    }
}

/// Keeps a dialog registered for as long as it lives.
#[derive(Debug)]
pub struct ModalGuard {
    registry: ModalRegistry,
    id: String,
}

impl ModalGuard {
    pub fn id(&self) -> &str {
        &self.id
    }
}

impl Drop for ModalGuard {
    fn drop(&mut self) {
        self.registry.unregister(&self.id);
    }
}
