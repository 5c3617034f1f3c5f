//! Catch ledger domain service.
//!
//! Records, releases and lists a trainer's caught species. Catching is
//! idempotent per (user, species): a repeat returns the stored record as
//! [`CatchOutcome::AlreadyCaught`] instead of failing.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::SubsecRound;
use mockable::Clock;
use tracing::{debug, info};

use crate::domain::ports::{
    CatchLedger, CatchRepository, CatchRepositoryError, InsertCatchOutcome,
};
use crate::domain::{
    CatchId, CatchOutcome, CaughtPokemon, Error, NewCatch, SpeciesName, UserId,
};

pub(crate) const NOT_OWNED_MESSAGE: &str = "Pokémon not found or does not belong to you";

/// Postgres stores timestamps with microsecond precision.
const TIMESTAMP_PRECISION_DIGITS: u16 = 6;

fn map_repository_error(error: CatchRepositoryError) -> Error {
    match error {
        CatchRepositoryError::Connection { message } => {
            Error::internal(format!("catch repository unavailable: {message}"))
        }
        CatchRepositoryError::Query { message } => {
            Error::internal(format!("catch repository error: {message}"))
        }
    }
}

/// Catch ledger service implementing the [`CatchLedger`] driving port.
///
/// # Examples
/// ```no_run
/// # use std::sync::Arc;
/// # use mockable::DefaultClock;
/// # use pokedex::domain::CatchLedgerService;
/// # fn build<R>(repo: R) -> CatchLedgerService<R> {
/// CatchLedgerService::new(Arc::new(repo), Arc::new(DefaultClock))
/// # }
/// ```
#[derive(Clone)]
pub struct CatchLedgerService<R> {
    repo: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> CatchLedgerService<R> {
    /// Create a ledger over `repo`, stamping catches with `clock`.
    pub fn new(repo: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { repo, clock }
    }
}

impl<R> CatchLedgerService<R>
where
    R: CatchRepository,
{
    async fn existing(
        &self,
        user_id: &UserId,
        catch: &NewCatch,
    ) -> Result<Option<CaughtPokemon>, Error> {
        self.repo
            .find_for_species(user_id, &catch.species.id)
            .await
            .map_err(map_repository_error)
    }
}

#[async_trait]
impl<R> CatchLedger for CatchLedgerService<R>
where
    R: CatchRepository,
{
    async fn catch(&self, user_id: &UserId, name: &SpeciesName) -> Result<CatchOutcome, Error> {
        let species = self
            .repo
            .find_or_create_species(name)
            .await
            .map_err(map_repository_error)?;

        let new_catch = NewCatch {
            id: CatchId::random(),
            user_id: user_id.clone(),
            species,
            caught_at: self.clock.utc().trunc_subsecs(TIMESTAMP_PRECISION_DIGITS),
        };

        if let Some(existing) = self.existing(user_id, &new_catch).await? {
            debug!(%user_id, species = %name, "species already caught");
            return Ok(CatchOutcome::AlreadyCaught(existing));
        }

        match self
            .repo
            .insert(&new_catch)
            .await
            .map_err(map_repository_error)?
        {
            InsertCatchOutcome::Inserted => {
                info!(%user_id, species = %name, catch_id = %new_catch.id, "caught species");
                Ok(CatchOutcome::Caught(new_catch.into()))
            }
            InsertCatchOutcome::AlreadyPresent => {
                // A concurrent request for the same pair won the insert.
                let existing = self.existing(user_id, &new_catch).await?.ok_or_else(|| {
                    Error::internal(format!(
                        "catch record for {user_id}/{name} missing after conflict"
                    ))
                })?;
                Ok(CatchOutcome::AlreadyCaught(existing))
            }
        }
    }

    async fn release(&self, user_id: &UserId, catch_id: &CatchId) -> Result<(), Error> {
        let deleted = self
            .repo
            .delete_owned(user_id, catch_id)
            .await
            .map_err(map_repository_error)?;
        if !deleted {
            return Err(Error::not_found(NOT_OWNED_MESSAGE));
        }
        info!(%user_id, %catch_id, "released catch");
        Ok(())
    }

    async fn list_caught(&self, user_id: &UserId) -> Result<Vec<CaughtPokemon>, Error> {
        self.repo
            .list_for_user(user_id)
            .await
            .map_err(map_repository_error)
    }
}

#[cfg(test)]
#[path = "catch_ledger_service_tests.rs"]
mod tests;
