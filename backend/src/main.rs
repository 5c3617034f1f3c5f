//! Backend entry-point: loads settings, migrates the database, wires adapters
//! and serves the REST API.

mod server;

use std::ffi::OsString;

use actix_web::web;
use color_eyre::eyre::{Result, WrapErr, eyre};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use pokedex::config::AppSettings;
use pokedex::inbound::http::health::HealthState;
use pokedex::outbound::persistence::{DbPool, PoolConfig, run_migrations};

use server::{ServerConfig, build_http_state, create_server};

/// Merge defaults, config file, `POKEDEX_*` variables and CLI flags.
fn load_settings(args: impl IntoIterator<Item = OsString>) -> Result<AppSettings> {
    AppSettings::load_from_iter(args.into_iter().collect::<Vec<_>>())
        .map_err(|err| eyre!("failed to load settings: {err}"))
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = load_settings(std::env::args_os())?;
    if settings.uses_default_secret() && !settings.is_development() {
        warn!(
            environment = settings.environment(),
            "signing tokens with the built-in development secret; set POKEDEX_JWT_SECRET"
        );
    }

    run_migrations(settings.database_url())
        .await
        .wrap_err("failed to apply database migrations")?;
    let pool = DbPool::new(PoolConfig::new(settings.database_url()))
        .await
        .wrap_err("failed to build database pool")?;

    let (http_state, verifier) = build_http_state(&settings, &pool)?;
    let bind_addr = settings.bind_addr();
    let health_state = web::Data::new(HealthState::new());
    let server = create_server(
        health_state,
        ServerConfig::new(bind_addr, http_state, verifier),
    )
    .wrap_err_with(|| format!("failed to bind {bind_addr}"))?;

    info!(%bind_addr, environment = settings.environment(), "pokedex listening");
    server.await.wrap_err("server terminated with an error")
}

#[cfg(test)]
mod tests;
