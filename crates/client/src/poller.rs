//! # Background Polling
//!
//! [`spawn_poller`] runs a [`PollTask`] on a fixed interval in its own tokio
//! task. A tick fetches nothing while the handle is paused or while any
//! dialog is registered in the [`ModalRegistry`]. Failed polls back off
//! exponentially; the first success returns to the base interval.
//!
//! [`Snapshot`] is the other half: it holds the latest fetched value and only
//! notifies subscribers when the serialised form actually changed.

use async_trait::async_trait;
use serde::Serialize;
use std::{
    sync::{Arc, Mutex, PoisonError},
    time::Duration,
};
use tokio::{
    sync::watch,
    task::JoinHandle,
    time::{self, Instant},
};

use crate::{
    config::DEFAULT_POLL_INTERVAL,
    errors::{ClientError, ClientResult},
    modal::ModalRegistry,
};

/// Upper bound on the delay after repeated failures
pub const DEFAULT_MAX_BACKOFF: Duration = Duration::from_secs(300);

/// Latest value of some polled resource with change suppression.
#[derive(Debug)]
pub struct Snapshot<T> {
    value: watch::Sender<T>,
    fingerprint: Mutex<String>,
}

impl<T> Snapshot<T>
where
    T: Serialize + Clone,
{
    pub fn new(initial: T) -> ClientResult<Self> {
        let fingerprint = serde_json::to_string(&initial)?;
        let (value, _) = watch::channel(initial);
        Ok(Self {
            value,
            fingerprint: Mutex::new(fingerprint),
        })
    }

    pub fn get(&self) -> T {
        self.value.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<T> {
        self.value.subscribe()
    }

    /// Stores `next` unless it serialises identically to the current value.
    ///
    /// Returns whether subscribers were notified.
    pub fn replace(&self, next: T) -> ClientResult<bool> {
        let encoded = serde_json::to_string(&next)?;
        {
            let mut fingerprint = self.fingerprint.lock().unwrap_or_else(PoisonError::into_inner);
            if *fingerprint == encoded {
                return Ok(false);
            }
            *fingerprint = encoded;
        }
        self.value.send_replace(next);
        Ok(true)
    }

    /// Applies a local edit and notifies when it changed anything.
    pub fn update<F>(&self, edit: F) -> ClientResult<bool>
    where
        F: FnOnce(&mut T),
    {
        let mut next = self.get();
        edit(&mut next);
        self.replace(next)
    }
}

/// A resource refreshed in the background.
#[async_trait]
pub trait PollTask: Send + Sync + 'static {
    fn name(&self) -> &str;

    async fn poll(&self) -> ClientResult<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollerConfig {
    pub interval: Duration,
    pub max_backoff: Duration,
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            interval: DEFAULT_POLL_INTERVAL,
            max_backoff: DEFAULT_MAX_BACKOFF,
        }
    }
}

impl PollerConfig {
    pub fn with_interval(interval: Duration) -> Self {
        Self {
            interval,
            ..Self::default()
        }
    }

    /// Delay before the next tick after `failures` consecutive failed polls.
    pub fn delay_after(&self, failures: u32) -> Duration {
        if failures == 0 {
            return self.interval;
        }
        let factor = 1u32 << failures.min(16);
        self.interval.saturating_mul(factor).min(self.max_backoff.max(self.interval))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PollState {
    Running,
    Paused,
    Stopped,
}

/// Controls a running poller. Dropping it cancels the poller.
#[derive(Debug)]
pub struct PollHandle {
    control: watch::Sender<PollState>,
    join: Option<JoinHandle<()>>,
}

impl PollHandle {
    pub fn pause(&self) {
        self.set(PollState::Paused);
    }

    pub fn resume(&self) {
        self.set(PollState::Running);
    }

    pub fn is_paused(&self) -> bool {
        *self.control.borrow() == PollState::Paused
    }

    pub fn is_finished(&self) -> bool {
        self.join.as_ref().is_none_or(JoinHandle::is_finished)
    }

    fn set(&self, state: PollState) {
        self.control.send_if_modified(|current| {
            if *current == state || *current == PollState::Stopped {
                return false;
            }
            *current = state;
            true
        });
    }

    /// Stops the poller, letting an in-flight poll finish first.
    pub async fn stop(mut self) {
        self.control.send_replace(PollState::Stopped);
        if let Some(join) = self.join.take() {
            if let Err(e) = join.await {
                if e.is_panic() {
                    tracing::error!("Poller panicked: {}", e);
                }
            }
        }
    }
}

impl Drop for PollHandle {
    fn drop(&mut self) {
        if let Some(join) = self.join.take() {
            join.abort();
        }
    }
}

/// Starts polling `task` immediately and then every `config.interval`.
pub fn spawn_poller<T: PollTask>(task: Arc<T>, config: PollerConfig, modals: ModalRegistry) -> PollHandle {
    let (control, state) = watch::channel(PollState::Running);
    let join = tokio::spawn(run(task, config, modals, state));

    PollHandle {
        control,
        join: Some(join),
    }
}

async fn run<T: PollTask>(
    task: Arc<T>,
    config: PollerConfig,
    modals: ModalRegistry,
    mut state: watch::Receiver<PollState>,
) {
    let mut failures: u32 = 0;
    let mut next_tick = Instant::now();

    tracing::debug!("Poller {} started", task.name());

    loop {
        tokio::select! {
            _ = time::sleep_until(next_tick) => {}
            changed = state.changed() => {
                if changed.is_err() || *state.borrow() == PollState::Stopped {
                    break;
                }
                continue;
            }
        }

        if *state.borrow() == PollState::Paused || modals.has_open_modals() {
            tracing::trace!("Poller {} skipped a tick", task.name());
            next_tick = Instant::now() + config.interval;
            continue;
        }

        match task.poll().await {
            Ok(()) => {
                failures = 0;
                next_tick = Instant::now() + config.interval;
            }
            Err(ClientError::SessionExpired) => {
                tracing::info!("Poller {} stopped: session expired", task.name());
                break;
            }
            Err(e) => {
                failures = failures.saturating_add(1);
                let delay = config.delay_after(failures);
                tracing::warn!(
                    "Poller {} failed ({} in a row), retrying in {:?}: {}",
                    task.name(),
                    failures,
                    delay,
                    e
                );
                next_tick = Instant::now() + delay;
            }
        }
    }

    tracing::debug!("Poller {} stopped", task.name());
}
