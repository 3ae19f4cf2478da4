//! Headless client: signs in, keeps teams and invites fresh in the
//! background and logs whatever changes until interrupted.

use color_eyre::eyre::Result;
use dotenv::dotenv;
use std::sync::Arc;
use timemesh_client::{
    api::ApiClient,
    config::ClientConfig,
    invites::InvitesContext,
    modal::ModalRegistry,
    poller::{PollerConfig, spawn_poller},
    services::auth,
    session::SessionStore,
    teams::TeamsContext,
};
use tracing::{info, warn};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Load environment variables
    dotenv().ok();

    let config = ClientConfig::from_env()?;

    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let session = Arc::new(match &config.session_path {
        Some(path) => SessionStore::open(path)?,
        None => SessionStore::in_memory(),
    });
    let api = Arc::new(ApiClient::new(config.api_url.clone(), session.clone()));

    if let Some((username, password)) = config.credentials() {
        auth::login(&api, username, password).await?;
    } else if session.is_signed_in() {
        let user = auth::me(&api).await?;
        info!("Resuming session for {}", user.username);
    } else {
        warn!("No stored session and no credentials configured; requests will be unauthenticated");
    }

    let modals = ModalRegistry::new();
    let poller_config = PollerConfig::with_interval(config.poll_interval);

    let teams = Arc::new(TeamsContext::new(api.clone())?);
    let invites = Arc::new(InvitesContext::new(api.clone())?.with_teams(teams.clone()));

    let teams_handle = spawn_poller(teams.clone(), poller_config, modals.clone());
    let invites_handle = spawn_poller(invites.clone(), poller_config, modals);

    let mut team_updates = teams.subscribe();
    let mut invite_updates = invites.subscribe();
    let mut signed_in = session.subscribe();

    info!("Watching {} every {:?}", config.api_url, config.poll_interval);

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                info!("Shutting down");
                break;
            }
            Ok(()) = team_updates.changed() => {
                let names: Vec<String> = team_updates
                    .borrow_and_update()
                    .iter()
                    .map(|team| team.name.clone())
                    .collect();
                info!("Teams ({}): {}", names.len(), names.join(", "));
            }
            Ok(()) = invite_updates.changed() => {
                let pending = invite_updates.borrow_and_update().clone();
                for invite in &pending {
                    info!(
                        "Pending invite to {} from {}",
                        invite.group.name,
                        invite.invited_by.as_deref().unwrap_or("unknown")
                    );
                }
                if pending.is_empty() {
                    info!("No pending invites");
                }
            }
            Ok(()) = signed_in.changed() => {
                if !*signed_in.borrow_and_update() {
                    warn!("Session expired, sign in again to keep watching");
                    break;
                }
            }
        }
    }

    teams_handle.stop().await;
    invites_handle.stop().await;

    Ok(())
}
