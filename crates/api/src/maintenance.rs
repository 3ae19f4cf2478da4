//! # Background Maintenance
//!
//! Periodic upkeep that runs alongside the HTTP server. Expired auth tokens
//! are never read again once past their expiry, so they are purged on a timer
//! instead of on the request path.

use std::{sync::Arc, time::Duration};

use timemesh_db::store::TokenStore;
use tokio::{
    task::JoinHandle,
    time::{self, MissedTickBehavior},
};
use tracing::{debug, info, warn};

/// Deletes expired tokens once, returning how many went away.
///
/// Failures are logged and reported as `None`; the next run retries.
pub async fn purge_expired_tokens<S>(store: &S) -> Option<u64>
where
    S: TokenStore + ?Sized,
{
    match store.delete_expired_tokens().await {
        Ok(0) => {
            debug!("No expired tokens to purge");
            Some(0)
        }
        Ok(deleted) => {
            info!("Purged {} expired tokens", deleted);
            Some(deleted)
        }
        Err(e) => {
            warn!("Expired token cleanup failed: {:?}", e);
            None
        }
    }
}

/// Purges expired tokens right away and then every `every`, until the handle is aborted.
pub fn spawn_token_cleanup<S>(store: Arc<S>, every: Duration) -> JoinHandle<()>
where
    S: TokenStore + ?Sized + 'static,
{
    tokio::spawn(async move {
        let mut ticker = time::interval(every);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;
            purge_expired_tokens(store.as_ref()).await;
        }
    })
}
