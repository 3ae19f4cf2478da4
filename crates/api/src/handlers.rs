pub mod analytics;
pub mod auth;
pub mod availability;
pub mod groups;
pub mod slots;
pub mod users;
