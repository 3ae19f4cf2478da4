pub mod group;
pub mod time_slot;
pub mod token;
pub mod user;
