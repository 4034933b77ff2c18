//! Builders for HTTP state ports and the stores behind them.

use std::path::Path;
use std::sync::Arc;

use actix_web::web;
use tracing::info;

use profiles::domain::ports::{
    ProfileCommand, ProfileQuery, ProfileRepository, UserRepository,
};
use profiles::domain::{ProfileService, User};
use profiles::inbound::http::state::{HttpState, HttpStatePorts};
use profiles::outbound::memory::{InMemoryProfileRepository, InMemoryUserRepository};
use profiles::outbound::persistence::{DieselProfileRepository, DieselUserRepository};

use super::ServerConfig;

/// Profile command/query pair plus the owner store used for seeding.
struct ProfilePorts {
    command: Arc<dyn ProfileCommand>,
    query: Arc<dyn ProfileQuery>,
    users: Arc<dyn UserRepository>,
}

fn profile_ports<P, U>(profiles: P, users: U) -> ProfilePorts
where
    P: ProfileRepository + 'static,
    U: UserRepository + 'static,
{
    let users = Arc::new(users);
    let service = Arc::new(ProfileService::new(Arc::new(profiles), users.clone()));
    ProfilePorts {
        command: service.clone(),
        query: service,
        users,
    }
}

/// Read owner records from `path` and store each one.
///
/// The file holds a JSON array of `{id, name, avatar?}` objects.
///
/// # Errors
/// Returns [`std::io::Error`] when the file cannot be read or parsed, or
/// when the store rejects a record.
pub(super) async fn seed_users(users: &dyn UserRepository, path: &Path) -> std::io::Result<usize> {
    let raw = std::fs::read_to_string(path)?;
    let records: Vec<User> = serde_json::from_str(&raw).map_err(|err| {
        std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            format!("invalid seed users file {}: {err}", path.display()),
        )
    })?;
    for user in &records {
        users
            .upsert(user)
            .await
            .map_err(|err| std::io::Error::other(format!("failed to seed user: {err}")))?;
    }
    Ok(records.len())
}

/// Build HTTP state, selecting Diesel adapters when a pool is configured and
/// the in-memory store otherwise.
///
/// # Errors
/// Propagates seeding failures from [`seed_users`].
pub(super) async fn build_http_state(
    config: &ServerConfig,
) -> std::io::Result<web::Data<HttpState>> {
    let ports = match &config.db_pool {
        Some(pool) => {
            info!("using PostgreSQL profile store");
            profile_ports(
                DieselProfileRepository::new(pool.clone()),
                DieselUserRepository::new(pool.clone()),
            )
        }
        None => {
            info!("using in-memory profile store");
            profile_ports(InMemoryProfileRepository::new(), InMemoryUserRepository::new())
        }
    };

    if let Some(path) = &config.seed_users_file {
        let count = seed_users(ports.users.as_ref(), path).await?;
        info!(count, path = %path.display(), "seeded profile owners");
    }

    Ok(web::Data::new(HttpState::new(HttpStatePorts {
        profiles: ports.command,
        profiles_query: ports.query,
        repositories: config.repositories.clone(),
        identity: config.identity.clone(),
    })))
}
