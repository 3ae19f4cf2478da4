//! # TimeMesh Client
//!
//! The client-side engine of TimeMesh. It talks to the REST API, keeps the
//! signed-in session, and exposes application state through `watch`
//! channels so any front end (terminal, GUI, or the headless watcher) can
//! render it.
//!
//! - [`api::ApiClient`]: JSON over HTTP with one-shot token refresh
//! - [`session::SessionStore`]: persisted tokens, user and theme
//! - [`modal::ModalRegistry`]: which dialogs are open
//! - [`poller`]: pausable background refresh with change suppression
//! - [`teams::TeamsContext`] and [`invites::InvitesContext`]: polled server state
//! - [`calendar`]: pointer gestures over the weekly grid and batch reconciliation

pub mod api;
pub mod calendar;
pub mod config;
pub mod errors;
pub mod invites;
pub mod modal;
pub mod poller;
pub mod services;
pub mod session;
pub mod teams;
