pub mod analytics;
pub mod auth;
pub mod availability;
pub mod groups;
pub mod health;
pub mod users;
