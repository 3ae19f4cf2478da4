use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use timemesh_core::analytics::InviteOutcome;
use timemesh_core::models::{
    group::{Group, GroupMember, Invite, InviteGroup, Membership},
    time_slot::TimeSlot,
    user::User,
};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbUser {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub created_at: DateTime<Utc>,
}

impl From<DbUser> for User {
    fn from(user: DbUser) -> Self {
        User {
            id: user.id,
            username: user.username,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
        }
    }
}

impl From<DbUser> for GroupMember {
    fn from(user: DbUser) -> Self {
        GroupMember {
            id: user.id,
            username: user.username,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
        }
    }
}

/// Account values ready to be inserted; the password is already hashed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
}

/// Token kinds stored in `auth_tokens.kind`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Access,
    Refresh,
}

impl TokenKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenKind::Access => "access",
            TokenKind::Refresh => "refresh",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbAuthToken {
    pub token: String,
    pub user_id: i64,
    pub kind: String,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbGroup {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub owner_id: i64,
    pub owner_username: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl DbGroup {
    pub fn into_group(self, members: Vec<GroupMember>) -> Group {
        Group {
            id: self.id,
            name: self.name,
            description: self.description,
            owner: self.owner_username,
            owner_id: self.owner_id,
            created_at: self.created_at,
            updated_at: self.updated_at,
            members,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbMembership {
    pub id: i64,
    pub group_id: i64,
    pub user_id: i64,
    pub invited_by: Option<i64>,
    pub accepted: bool,
    pub invited_at: DateTime<Utc>,
}

/// Invite sent by a member, as seen by the invite statistics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct DbInviteRecord {
    pub accepted: bool,
    pub invited_at: DateTime<Utc>,
    pub accepted_at: Option<DateTime<Utc>>,
}

impl From<DbInviteRecord> for InviteOutcome {
    fn from(row: DbInviteRecord) -> Self {
        InviteOutcome {
            accepted: row.accepted,
            invited_at: row.invited_at,
            accepted_at: row.accepted_at,
        }
    }
}

/// Membership row joined with group name and usernames.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbMembershipView {
    pub id: i64,
    pub group_id: i64,
    pub group_name: String,
    pub username: String,
    pub invited_by_username: Option<String>,
    pub accepted: bool,
    pub invited_at: DateTime<Utc>,
}

impl From<DbMembershipView> for Membership {
    fn from(row: DbMembershipView) -> Self {
        Membership {
            id: row.id,
            group: row.group_name,
            user: row.username,
            invited_by: row.invited_by_username,
            accepted: row.accepted,
            invited_at: row.invited_at,
        }
    }
}

impl From<DbMembershipView> for Invite {
    fn from(row: DbMembershipView) -> Self {
        Invite {
            id: row.id,
            group_id: row.group_id,
            group: InviteGroup {
                id: row.group_id,
                name: row.group_name,
            },
            invited_by: row.invited_by_username,
            invited_at: row.invited_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct DbSlot {
    pub id: i64,
    pub user_id: i64,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub title: String,
    pub is_available: bool,
    pub created_at: DateTime<Utc>,
}

impl From<DbSlot> for TimeSlot {
    fn from(slot: DbSlot) -> Self {
        TimeSlot {
            id: slot.id,
            user_id: slot.user_id,
            date: slot.date,
            start_time: slot.start_time,
            end_time: slot.end_time,
            title: slot.title,
            is_available: slot.is_available,
        }
    }
}

/// Slot row joined with its owner's username, used for matching.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbMemberSlot {
    pub user_id: i64,
    pub username: String,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub title: String,
    pub is_available: bool,
}

/// Validated slot values ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSlot {
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub title: String,
    pub is_available: bool,
}
