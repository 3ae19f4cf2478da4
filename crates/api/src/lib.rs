//! # TimeMesh API
//!
//! The web server for TimeMesh: accounts and token authentication, teams with
//! invitations, personal availability slots and common-availability matching.
//!
//! ## Architecture
//!
//! - **Routes**: Define API endpoints and URL structure
//! - **Handlers**: Implement request processing logic
//! - **Middleware**: Bearer authentication and error mapping
//! - **Config**: Environment-driven server settings
//! - **Maintenance**: Timed cleanup running next to the server
//!
//! The API uses Axum as the web framework and SQLx for database interactions.

/// Configuration module for API settings
pub mod config;
/// Request handlers that implement business logic
pub mod handlers;
/// Background upkeep tasks
pub mod maintenance;
/// Middleware for authentication and error handling
pub mod middleware;
/// Route definitions and API endpoint structure
pub mod routes;

use std::{sync::Arc, time::Duration};

use axum::{
    Router,
    http::{HeaderValue, Method, header},
};
use eyre::Result;
use sqlx::PgPool;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};
use tracing::{info, warn};

/// Lifetimes applied to newly issued tokens.
#[derive(Debug, Clone, Copy)]
pub struct TokenSettings {
    pub access_ttl: chrono::Duration,
    pub refresh_ttl: chrono::Duration,
}

impl TokenSettings {
    pub fn from_config(config: &config::ApiConfig) -> Self {
        Self {
            access_ttl: chrono::Duration::seconds(config.access_token_ttl),
            refresh_ttl: chrono::Duration::seconds(config.refresh_token_ttl),
        }
    }
}

impl Default for TokenSettings {
    fn default() -> Self {
        Self {
            access_ttl: chrono::Duration::seconds(config::DEFAULT_ACCESS_TOKEN_TTL),
            refresh_ttl: chrono::Duration::seconds(config::DEFAULT_REFRESH_TOKEN_TTL),
        }
    }
}

/// Shared application state that is accessible to all request handlers
///
/// ```rust,ignore
/// let state = Arc::new(ApiState { db_pool, tokens: TokenSettings::default() });
/// let app = build_router(state);
/// ```
pub struct ApiState {
    /// PostgreSQL connection pool for database operations
    pub db_pool: PgPool,
    /// Token lifetimes used by the auth handlers
    pub tokens: TokenSettings,
}

/// Builds the router with every endpoint and the shared state attached.
pub fn build_router(state: Arc<ApiState>) -> Router {
    Router::new()
        // Health check endpoints
        .merge(routes::health::routes())
        // Token issue and refresh
        .merge(routes::auth::routes())
        // Registration and profile
        .merge(routes::users::routes())
        // Teams, memberships and invites
        .merge(routes::groups::routes())
        // Slots and common availability
        .merge(routes::availability::routes())
        // Slot and invite statistics
        .merge(routes::analytics::routes())
        .with_state(state)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin {:?}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::ACCEPT])
        .allow_origin(allowed)
        .allow_credentials(true)
}

/// Starts the API server with the provided configuration and database connection
///
/// ```rust,ignore
/// let config = ApiConfig::from_env()?;
/// let db_pool = timemesh_db::create_pool(&config.database_url).await?;
/// start_server(config, db_pool).await?;
/// ```
pub async fn start_server(config: config::ApiConfig, db_pool: PgPool) -> Result<()> {
    let cleanup = maintenance::spawn_token_cleanup(
        Arc::new(db_pool.clone()),
        Duration::from_secs(config.token_cleanup_interval),
    );

    let state = Arc::new(ApiState {
        db_pool,
        tokens: TokenSettings::from_config(&config),
    });

    let app = build_router(state);

    // Apply CORS configuration if origins are specified
    let app = match &config.cors_origins {
        Some(origins) => app.layer(cors_layer(origins)),
        None => app,
    };

    let app = app.layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(TimeoutLayer::new(Duration::from_secs(config.request_timeout))),
    );

    let addr = config.server_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);
    let served = axum::serve(listener, app).await;
    cleanup.abort();
    served?;

    Ok(())
}
