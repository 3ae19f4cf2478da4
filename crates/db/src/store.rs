//! Persistence behind traits so request rules can run against mocks.

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};
use eyre::Result;

use crate::{
    DbPool,
    models::{DbGroup, DbInviteRecord, DbMembership, DbSlot, DbUser, NewSlot, NewUser},
    repositories::{group, time_slot, token, user},
};

#[async_trait]
pub trait SlotStore: Send + Sync {
    /// Writes a slot, replacing any slot of the user with the same date and start time.
    async fn upsert_slot(&self, user_id: i64, slot: &NewSlot) -> Result<DbSlot>;

    /// Deletes the user's slot at a date and start time, returning the number of rows removed.
    async fn delete_slot_at(&self, user_id: i64, date: NaiveDate, start_time: NaiveTime) -> Result<u64>;
}

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_user(&self, id: i64) -> Result<Option<DbUser>>;

    async fn find_user_by_username(&self, username: &str) -> Result<Option<DbUser>>;

    async fn username_taken(&self, username: &str) -> Result<bool>;

    async fn email_taken(&self, email: &str) -> Result<bool>;

    /// Inserts an account; `None` means a unique column was already taken.
    async fn insert_user(&self, account: &NewUser) -> Result<Option<DbUser>>;
}

#[async_trait]
pub trait GroupStore: Send + Sync {
    async fn find_group(&self, group_id: i64) -> Result<Option<DbGroup>>;

    async fn membership(&self, group_id: i64, user_id: i64) -> Result<Option<DbMembership>>;

    /// Inserts a pending invite; `None` means a membership row already exists.
    async fn insert_invite(&self, group_id: i64, user_id: i64, invited_by: i64) -> Result<Option<DbMembership>>;

    async fn accept_invite(&self, group_id: i64, user_id: i64) -> Result<bool>;

    async fn reject_invite(&self, group_id: i64, user_id: i64) -> Result<bool>;

    async fn remove_member(&self, group_id: i64, user_id: i64) -> Result<bool>;

    async fn transfer_ownership(&self, group_id: i64, new_owner_id: i64) -> Result<()>;

    async fn share_group(&self, user_a: i64, user_b: i64) -> Result<bool>;

    async fn invites_sent_by(&self, group_id: i64, inviter_id: i64) -> Result<Vec<DbInviteRecord>>;
}

#[async_trait]
pub trait TokenStore: Send + Sync {
    /// Removes tokens past their expiry, returning how many were deleted.
    async fn delete_expired_tokens(&self) -> Result<u64>;
}

#[async_trait]
impl SlotStore for DbPool {
    async fn upsert_slot(&self, user_id: i64, slot: &NewSlot) -> Result<DbSlot> {
        time_slot::upsert_time_slot(self, user_id, slot).await
    }

    async fn delete_slot_at(&self, user_id: i64, date: NaiveDate, start_time: NaiveTime) -> Result<u64> {
        time_slot::delete_time_slot_at(self, user_id, date, start_time).await
    }
}

#[async_trait]
impl UserStore for DbPool {
    async fn find_user(&self, id: i64) -> Result<Option<DbUser>> {
        user::get_user_by_id(self, id).await
    }

    async fn find_user_by_username(&self, username: &str) -> Result<Option<DbUser>> {
        user::get_user_by_username(self, username).await
    }

    async fn username_taken(&self, username: &str) -> Result<bool> {
        user::username_exists(self, username).await
    }

    async fn email_taken(&self, email: &str) -> Result<bool> {
        user::email_exists(self, email).await
    }

    async fn insert_user(&self, account: &NewUser) -> Result<Option<DbUser>> {
        user::create_user(self, account).await
    }
}

#[async_trait]
impl GroupStore for DbPool {
    async fn find_group(&self, group_id: i64) -> Result<Option<DbGroup>> {
        group::get_group_by_id(self, group_id).await
    }

    async fn membership(&self, group_id: i64, user_id: i64) -> Result<Option<DbMembership>> {
        group::get_membership(self, group_id, user_id).await
    }

    async fn insert_invite(&self, group_id: i64, user_id: i64, invited_by: i64) -> Result<Option<DbMembership>> {
        group::create_invite(self, group_id, user_id, invited_by).await
    }

    async fn accept_invite(&self, group_id: i64, user_id: i64) -> Result<bool> {
        group::accept_invite(self, group_id, user_id).await
    }

    async fn reject_invite(&self, group_id: i64, user_id: i64) -> Result<bool> {
        group::reject_invite(self, group_id, user_id).await
    }

    async fn remove_member(&self, group_id: i64, user_id: i64) -> Result<bool> {
        group::remove_member(self, group_id, user_id).await
    }

    async fn transfer_ownership(&self, group_id: i64, new_owner_id: i64) -> Result<()> {
        group::transfer_ownership(self, group_id, new_owner_id).await
    }

    async fn share_group(&self, user_a: i64, user_b: i64) -> Result<bool> {
        group::users_share_group(self, user_a, user_b).await
    }

    async fn invites_sent_by(&self, group_id: i64, inviter_id: i64) -> Result<Vec<DbInviteRecord>> {
        group::invites_sent_by(self, group_id, inviter_id).await
    }
}

#[async_trait]
impl TokenStore for DbPool {
    async fn delete_expired_tokens(&self) -> Result<u64> {
        token::delete_expired_tokens(self).await
    }
}
