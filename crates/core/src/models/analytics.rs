use serde::{Deserialize, Serialize};

/// Summary of the caller's own availability slots.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserStats {
    /// Sum of slot lengths, in hours.
    pub total_hours: f64,
    /// Mean slot length, in minutes; zero without slots.
    pub average_duration_minutes: f64,
    /// Hour of day (0-23) most slots start in.
    pub most_common_time: Option<u32>,
    /// English weekday name most slots fall on, e.g. "Monday".
    pub most_common_weekday: Option<String>,
}

/// How the invites a member sent in one group turned out.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GroupInviteStats {
    pub total_invites: u32,
    pub accepted_invites: u32,
    /// Accepted share of sent invites, as a percentage from 0 to 100.
    pub acceptance_rate: f64,
    /// Mean time from invite to acceptance, in whole seconds.
    pub average_acceptance_seconds: i64,
}
