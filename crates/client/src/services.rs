//! Thin wrappers over the REST endpoints, one module per resource.

pub mod analytics;
pub mod auth;
pub mod availability;
pub mod groups;
