//! Builders wiring outbound adapters into domain services.

use std::sync::Arc;

use color_eyre::eyre::{Result, WrapErr};
use mockable::DefaultClock;
use url::Url;

use pokedex::config::AppSettings;
use pokedex::domain::ports::{AccountService, CatchLedger, SpeciesLookup, TokenVerifier};
use pokedex::domain::{AccountServiceImpl, CatchLedgerService, SpeciesLookupService};
use pokedex::inbound::http::state::HttpState;
use pokedex::outbound::persistence::{DbPool, DieselCatchRepository, DieselUserRepository};
use pokedex::outbound::pokeapi::PokeApiHttpSource;
use pokedex::outbound::security::{BcryptPasswordHasher, JwtTokenCodec};

/// Build the handler state and the bearer verifier from `pool` and `settings`.
///
/// The JWT codec backs both token issuing at login and verification in the
/// bearer middleware, so both share one secret and TTL.
pub fn build_http_state(
    settings: &AppSettings,
    pool: &DbPool,
) -> Result<(HttpState, Arc<dyn TokenVerifier>)> {
    let clock = Arc::new(DefaultClock);
    let tokens = Arc::new(
        JwtTokenCodec::new(
            settings.jwt_secret().as_bytes(),
            settings.token_ttl(),
            clock.clone(),
        )
        .wrap_err("failed to build token codec")?,
    );

    let accounts: Arc<dyn AccountService> = Arc::new(AccountServiceImpl::new(
        Arc::new(DieselUserRepository::new(pool.clone())),
        Arc::new(BcryptPasswordHasher::default()),
        tokens.clone(),
    ));
    let catches: Arc<dyn CatchLedger> = Arc::new(CatchLedgerService::new(
        Arc::new(DieselCatchRepository::new(pool.clone())),
        clock,
    ));

    let base_url = Url::parse(settings.pokeapi_base_url())
        .wrap_err_with(|| format!("invalid PokeAPI base URL {}", settings.pokeapi_base_url()))?;
    let source = PokeApiHttpSource::new(base_url, settings.pokeapi_timeout())
        .wrap_err("failed to build PokeAPI client")?;
    let species: Arc<dyn SpeciesLookup> = Arc::new(SpeciesLookupService::new(Arc::new(source)));

    let verifier: Arc<dyn TokenVerifier> = tokens;
    Ok((HttpState::new(accounts, catches, species), verifier))
}
