pub mod analytics;
pub mod availability;
pub mod group;
pub mod time_slot;
pub mod user;
