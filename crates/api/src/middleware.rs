/// Bearer-token authentication and password hashing
pub mod auth;
/// Mapping of domain errors to HTTP responses
pub mod error_handling;
