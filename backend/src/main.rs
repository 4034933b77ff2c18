//! Service entry-point: loads settings, wires adapters and serves the
//! profile REST API with OpenAPI docs.

mod server;

use std::sync::Arc;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};
use uuid::Uuid;

use profiles::domain::RepositoryListingService;
use profiles::inbound::http::health::HealthState;
use profiles::outbound::github::GithubHttpSource;
use profiles::outbound::identity::SignedTokenIdentityProvider;
use profiles::outbound::persistence::{DbPool, run_pending_migrations};
use profiles::settings::AppSettings;

use server::{ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load()
        .map_err(|e| std::io::Error::other(format!("failed to load settings: {e}")))?;

    let identity = Arc::new(SignedTokenIdentityProvider::new(token_secret(&settings)?));

    let github_url = settings
        .github_api_url()
        .map_err(|e| std::io::Error::other(format!("invalid GitHub API URL: {e}")))?;
    let github = GithubHttpSource::new(
        github_url,
        settings.github_credentials(),
        settings.github_timeout(),
    )
    .map_err(|e| std::io::Error::other(format!("failed to build GitHub client: {e}")))?;
    if settings.github_credentials().is_none() {
        warn!("GitHub credentials not configured; requests are unauthenticated");
    }

    let db_pool = match settings.pool_config() {
        Some(pool_config) => {
            run_pending_migrations(pool_config.database_url())
                .await
                .map_err(|e| std::io::Error::other(format!("migrations failed: {e}")))?;
            let pool = DbPool::new(pool_config)
                .await
                .map_err(|e| std::io::Error::other(format!("database pool failed: {e}")))?;
            Some(pool)
        }
        None => None,
    };

    let config = ServerConfig::new(
        settings.bind_addr(),
        identity,
        Arc::new(RepositoryListingService::new(Arc::new(github))),
    )
    .with_db_pool(db_pool)
    .with_seed_users_file(settings.seed_users_file.clone());

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config).await?;
    info!(bind_addr = settings.bind_addr(), "profiles service listening");
    server.await
}

/// Return the configured token secret, or an ephemeral one in debug builds.
fn token_secret(settings: &AppSettings) -> std::io::Result<String> {
    match settings
        .token_secret
        .as_deref()
        .filter(|secret| !secret.is_empty())
    {
        Some(secret) => Ok(secret.to_owned()),
        None => {
            let allow_dev = std::env::var("PROFILES_ALLOW_EPHEMERAL_SECRET").ok().as_deref()
                == Some("1");
            if cfg!(debug_assertions) || allow_dev {
                warn!("using temporary token secret (dev only)");
                Ok(Uuid::new_v4().to_string())
            } else {
                Err(std::io::Error::other(
                    "PROFILES_TOKEN_SECRET must be set in release builds",
                ))
            }
        }
    }
}
