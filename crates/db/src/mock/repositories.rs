use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};
use mockall::mock;

use crate::{
    models::{DbGroup, DbInviteRecord, DbMembership, DbSlot, DbUser, NewSlot, NewUser},
    store::{GroupStore, SlotStore, TokenStore, UserStore},
};

// Mock slot store for testing batch operations without a database
mock! {
    pub SlotRepo {}

    #[async_trait]
    impl SlotStore for SlotRepo {
        async fn upsert_slot(&self, user_id: i64, slot: &NewSlot) -> eyre::Result<DbSlot>;

        async fn delete_slot_at(
            &self,
            user_id: i64,
            date: NaiveDate,
            start_time: NaiveTime,
        ) -> eyre::Result<u64>;
    }
}

// Group and user lookups together, since membership rules need both
mock! {
    pub GroupRepo {}

    #[async_trait]
    impl GroupStore for GroupRepo {
        async fn find_group(&self, group_id: i64) -> eyre::Result<Option<DbGroup>>;

        async fn membership(&self, group_id: i64, user_id: i64) -> eyre::Result<Option<DbMembership>>;

        async fn insert_invite(
            &self,
            group_id: i64,
            user_id: i64,
            invited_by: i64,
        ) -> eyre::Result<Option<DbMembership>>;

        async fn accept_invite(&self, group_id: i64, user_id: i64) -> eyre::Result<bool>;

        async fn reject_invite(&self, group_id: i64, user_id: i64) -> eyre::Result<bool>;

        async fn remove_member(&self, group_id: i64, user_id: i64) -> eyre::Result<bool>;

        async fn transfer_ownership(&self, group_id: i64, new_owner_id: i64) -> eyre::Result<()>;

        async fn share_group(&self, user_a: i64, user_b: i64) -> eyre::Result<bool>;

        async fn invites_sent_by(&self, group_id: i64, inviter_id: i64) -> eyre::Result<Vec<DbInviteRecord>>;
    }

    #[async_trait]
    impl UserStore for GroupRepo {
        async fn find_user(&self, id: i64) -> eyre::Result<Option<DbUser>>;

        async fn find_user_by_username(&self, username: &str) -> eyre::Result<Option<DbUser>>;

        async fn username_taken(&self, username: &str) -> eyre::Result<bool>;

        async fn email_taken(&self, email: &str) -> eyre::Result<bool>;

        async fn insert_user(&self, account: &NewUser) -> eyre::Result<Option<DbUser>>;
    }
}

mock! {
    pub TokenRepo {}

    #[async_trait]
    impl TokenStore for TokenRepo {
        async fn delete_expired_tokens(&self) -> eyre::Result<u64>;
    }
}
