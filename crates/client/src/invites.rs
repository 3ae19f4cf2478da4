//! Polled list of invitations waiting for the signed-in user.

use async_trait::async_trait;
use std::sync::Arc;
use timemesh_core::models::group::{DetailResponse, Invite};
use tokio::sync::watch;

use crate::{
    api::ApiClient,
    errors::{ClientResult, InviteFailure},
    poller::{PollTask, Snapshot},
    services::groups,
    teams::TeamsContext,
};

#[derive(Debug)]
pub struct InvitesContext {
    api: Arc<ApiClient>,
    pending: Snapshot<Vec<Invite>>,
    teams: Option<Arc<TeamsContext>>,
}

impl InvitesContext {
    pub fn new(api: Arc<ApiClient>) -> ClientResult<Self> {
        Ok(Self {
            api,
            pending: Snapshot::new(Vec::new())?,
            teams: None,
        })
    }

    /// Also refreshes `teams` after an invite is accepted, so the new group shows up.
    pub fn with_teams(mut self, teams: Arc<TeamsContext>) -> Self {
        self.teams = Some(teams);
        self
    }

    pub async fn refresh(&self) -> ClientResult<bool> {
        match groups::pending_invites(&self.api).await {
            Ok(invites) => self.pending.replace(invites),
            Err(e) => {
                tracing::warn!("Failed to fetch pending invites: {}", e);
                Err(e)
            }
        }
    }

    pub fn pending(&self) -> Vec<Invite> {
        self.pending.get()
    }

    pub fn subscribe(&self) -> watch::Receiver<Vec<Invite>> {
        self.pending.subscribe()
    }

    fn forget(&self, invite_id: i64) -> ClientResult<bool> {
        self.pending.update(|invites| invites.retain(|i| i.id != invite_id))
    }

    /// Accepts an invite; it leaves the local list once the server confirms.
    pub async fn accept(&self, invite: &Invite) -> ClientResult<()> {
        groups::accept_invite(&self.api, invite.group_id).await?;
        self.forget(invite.id)?;
        tracing::info!("Joined group {}", invite.group.name);

        if let Some(teams) = &self.teams {
            if let Err(e) = teams.refresh().await {
                tracing::debug!("Teams refresh after accepting invite failed: {}", e);
            }
        }
        Ok(())
    }

    pub async fn reject(&self, invite: &Invite) -> ClientResult<()> {
        groups::reject_invite(&self.api, invite.group_id).await?;
        self.forget(invite.id)?;
        Ok(())
    }

    pub async fn invite_user(&self, group_id: i64, username: &str) -> Result<DetailResponse, InviteFailure> {
        groups::invite_user(&self.api, group_id, username).await
    }
}

#[async_trait]
impl PollTask for InvitesContext {
    fn name(&self) -> &str {
        "invites"
    }

    async fn poll(&self) -> ClientResult<()> {
        self.refresh().await.map(|_| ())
    }
}
