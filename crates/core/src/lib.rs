//! # TimeMesh Core
//!
//! Types and pure logic shared by the API server and the client engine:
//! wire models, the error taxonomy, weekly grid geometry, recurrence
//! expansion, common-availability matching and usage statistics.

pub mod analytics;
pub mod errors;
pub mod grid;
pub mod matching;
pub mod models;
pub mod recurrence;
