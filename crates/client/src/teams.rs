//! Polled list of the groups the signed-in user belongs to.

use async_trait::async_trait;
use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};
use timemesh_core::models::group::{Group, GroupRequest};
use tokio::sync::watch;

use crate::{
    api::ApiClient,
    errors::ClientResult,
    poller::{PollTask, Snapshot},
    services::groups,
};

#[derive(Debug)]
pub struct TeamsContext {
    api: Arc<ApiClient>,
    teams: Snapshot<Vec<Group>>,
    loading: AtomicBool,
}

impl TeamsContext {
    pub fn new(api: Arc<ApiClient>) -> ClientResult<Self> {
        Ok(Self {
            api,
            teams: Snapshot::new(Vec::new())?,
            loading: AtomicBool::new(false),
        })
    }

    /// Refetches the list. Returns whether it differed from what was held.
    ///
    /// On failure the previous list is kept.
    pub async fn refresh(&self) -> ClientResult<bool> {
        self.loading.store(true, Ordering::Relaxed);
        let fetched = groups::list_groups(&self.api).await;
        self.loading.store(false, Ordering::Relaxed);

        match fetched {
            Ok(teams) => self.teams.replace(teams),
            Err(e) => {
                tracing::warn!("Failed to fetch teams: {}", e);
                Err(e)
            }
        }
    }

    pub fn teams(&self) -> Vec<Group> {
        self.teams.get()
    }

    pub fn subscribe(&self) -> watch::Receiver<Vec<Group>> {
        self.teams.subscribe()
    }

    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::Relaxed)
    }

    /// Adds a team locally unless one with the same id is already listed.
    pub fn add_team(&self, team: Group) -> ClientResult<bool> {
        self.teams.update(|teams| {
            if !teams.iter().any(|t| t.id == team.id) {
                teams.push(team);
            }
        })
    }

    pub fn remove_team(&self, team_id: i64) -> ClientResult<bool> {
        self.teams.update(|teams| teams.retain(|t| t.id != team_id))
    }

    pub async fn create_team(&self, request: &GroupRequest) -> ClientResult<Group> {
        let created = groups::create_group(&self.api, request).await?;
        self.add_team(created.clone())?;
        Ok(created)
    }

    pub async fn update_team(&self, team_id: i64, request: &GroupRequest) -> ClientResult<Group> {
        let updated = groups::update_group(&self.api, team_id, request).await?;
        let replacement = updated.clone();
        self.teams.update(move |teams| {
            if let Some(slot) = teams.iter_mut().find(|t| t.id == replacement.id) {
                *slot = replacement;
            }
        })?;
        Ok(updated)
    }

    pub async fn delete_team(&self, team_id: i64) -> ClientResult<()> {
        groups::delete_group(&self.api, team_id).await?;
        self.remove_team(team_id)?;
        Ok(())
    }
}

#[async_trait]
impl PollTask for TeamsContext {
    fn name(&self) -> &str {
        "teams"
    }

    async fn poll(&self) -> ClientResult<()> {
        self.refresh().await.map(|_| ())
    }
}
