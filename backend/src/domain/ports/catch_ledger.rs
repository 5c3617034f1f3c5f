//! Driving port for the per-user catch ledger.

use async_trait::async_trait;

use crate::domain::{CatchId, CatchOutcome, CaughtPokemon, Error, SpeciesName, UserId};

/// Domain use-case port for catching, releasing and listing Pokémon.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatchLedger: Send + Sync {
    /// Record a catch, or return the existing record when already caught.
    async fn catch(&self, user_id: &UserId, name: &SpeciesName) -> Result<CatchOutcome, Error>;

    /// Remove one of the user's records.
    async fn release(&self, user_id: &UserId, catch_id: &CatchId) -> Result<(), Error>;

    /// List the user's records, newest first.
    async fn list_caught(&self, user_id: &UserId) -> Result<Vec<CaughtPokemon>, Error>;
}
