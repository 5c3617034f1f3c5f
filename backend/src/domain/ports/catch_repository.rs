//! Port for species rows and per-user catch records.

use async_trait::async_trait;

use crate::domain::{CatchId, CaughtPokemon, NewCatch, Species, SpeciesId, SpeciesName, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by catch repository adapters.
    pub enum CatchRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "catch repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "catch repository query failed: {message}",
    }
}

/// Result of attempting to store a catch record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertCatchOutcome {
    /// The record was written.
    Inserted,
    /// A record for the same user and species already existed.
    AlreadyPresent,
}

/// Persistence for species and catch records.
///
/// ## Invariants
/// - At most one species row exists per [`SpeciesName`].
/// - At most one catch record exists per (user, species) pair. `insert`
///   reports a collision as [`InsertCatchOutcome::AlreadyPresent`].
/// - `delete_owned` only removes a record owned by the given user.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatchRepository: Send + Sync {
    /// Return the species row for `name`, creating it when absent.
    async fn find_or_create_species(
        &self,
        name: &SpeciesName,
    ) -> Result<Species, CatchRepositoryError>;

    /// Fetch the user's record for a species, if any.
    async fn find_for_species(
        &self,
        user_id: &UserId,
        species_id: &SpeciesId,
    ) -> Result<Option<CaughtPokemon>, CatchRepositoryError>;

    /// Store a new catch record unless one already exists for the pair.
    async fn insert(&self, catch: &NewCatch) -> Result<InsertCatchOutcome, CatchRepositoryError>;

    /// Delete a record owned by `user_id`. Returns `false` when nothing matched.
    async fn delete_owned(
        &self,
        user_id: &UserId,
        catch_id: &CatchId,
    ) -> Result<bool, CatchRepositoryError>;

    /// All records for a user, newest capture first.
    async fn list_for_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<CaughtPokemon>, CatchRepositoryError>;
}
