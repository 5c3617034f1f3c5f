//! Test utilities for the backend crate.
//!
//! In-memory adapters for the driven ports plus a controllable clock. Unit
//! tests use them directly; integration tests under `tests/` reach them
//! through the `test-support` feature.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Local, TimeDelta, Utc};
use mockable::Clock;
use serde_json::Value;

use crate::domain::ports::{
    CatchRepository, CatchRepositoryError, InsertCatchOutcome, SpeciesSource, SpeciesSourceError,
    UserPersistenceError, UserRepository,
};
use crate::domain::{
    CatchId, CaughtPokemon, EmailAddress, NewCatch, Species, SpeciesId, SpeciesName, UserAccount,
    UserId,
};

/// Clock whose time only moves when told to.
pub struct MutableClock(Mutex<DateTime<Utc>>);

impl MutableClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self(Mutex::new(now))
    }

    pub fn advance(&self, delta: Duration) {
        let delta = match TimeDelta::from_std(delta) {
            Ok(delta) => delta,
            Err(error) => {
                panic!("failed to convert Duration to TimeDelta: {error}; delta={delta:?}")
            }
        };
        *self.lock_clock() += delta;
    }

    pub fn advance_seconds(&self, seconds: i64) {
        *self.lock_clock() += TimeDelta::seconds(seconds);
    }

    fn lock_clock(&self) -> MutexGuard<'_, DateTime<Utc>> {
        match self.0.lock() {
            Ok(guard) => guard,
            Err(_) => panic!("clock mutex"),
        }
    }
}

impl Clock for MutableClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.lock_clock()
    }
}

/// `UserRepository` keyed by normalised email.
#[derive(Default)]
pub struct InMemoryUserRepository {
    accounts: Mutex<HashMap<String, UserAccount>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn accounts(&self) -> Result<MutexGuard<'_, HashMap<String, UserAccount>>, UserPersistenceError> {
        self.accounts
            .lock()
            .map_err(|_| UserPersistenceError::connection("user store lock poisoned"))
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, account: &UserAccount) -> Result<(), UserPersistenceError> {
        let mut accounts = self.accounts()?;
        let email = account.user().email().as_ref().to_owned();
        if accounts.contains_key(&email) {
            return Err(UserPersistenceError::duplicate_email(email));
        }
        accounts.insert(email, account.clone());
        Ok(())
    }

    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<UserAccount>, UserPersistenceError> {
        Ok(self.accounts()?.get(email.as_ref()).cloned())
    }
}

#[derive(Default)]
struct CatchStore {
    species: HashMap<SpeciesName, Species>,
    catches: Vec<CaughtPokemon>,
}

/// `CatchRepository` enforcing the same uniqueness rules as the schema:
/// one species row per name and one catch per (user, species).
#[derive(Default)]
pub struct InMemoryCatchRepository {
    store: Mutex<CatchStore>,
}

impl InMemoryCatchRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct species rows created so far.
    pub fn species_count(&self) -> usize {
        self.store().map(|store| store.species.len()).unwrap_or(0)
    }

    fn store(&self) -> Result<MutexGuard<'_, CatchStore>, CatchRepositoryError> {
        self.store
            .lock()
            .map_err(|_| CatchRepositoryError::connection("catch store lock poisoned"))
    }
}

#[async_trait]
impl CatchRepository for InMemoryCatchRepository {
    async fn find_or_create_species(
        &self,
        name: &SpeciesName,
    ) -> Result<Species, CatchRepositoryError> {
        let mut store = self.store()?;
        let species = store
            .species
            .entry(name.clone())
            .or_insert_with(|| Species {
                id: SpeciesId::random(),
                name: name.clone(),
            });
        Ok(species.clone())
    }

    async fn find_for_species(
        &self,
        user_id: &UserId,
        species_id: &SpeciesId,
    ) -> Result<Option<CaughtPokemon>, CatchRepositoryError> {
        Ok(self
            .store()?
            .catches
            .iter()
            .find(|catch| &catch.user_id == user_id && &catch.species.id == species_id)
            .cloned())
    }

    async fn insert(&self, catch: &NewCatch) -> Result<InsertCatchOutcome, CatchRepositoryError> {
        let mut store = self.store()?;
        let taken = store
            .catches
            .iter()
            .any(|existing| existing.user_id == catch.user_id && existing.species.id == catch.species.id);
        if taken {
            return Ok(InsertCatchOutcome::AlreadyPresent);
        }
        store.catches.push(catch.clone().into());
        Ok(InsertCatchOutcome::Inserted)
    }

    async fn delete_owned(
        &self,
        user_id: &UserId,
        catch_id: &CatchId,
    ) -> Result<bool, CatchRepositoryError> {
        let mut store = self.store()?;
        let before = store.catches.len();
        store
            .catches
            .retain(|catch| !(&catch.id == catch_id && &catch.user_id == user_id));
        Ok(store.catches.len() < before)
    }

    async fn list_for_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<CaughtPokemon>, CatchRepositoryError> {
        let mut owned: Vec<CaughtPokemon> = self
            .store()?
            .catches
            .iter()
            .filter(|catch| &catch.user_id == user_id)
            .cloned()
            .collect();
        owned.sort_by(|a, b| {
            b.caught_at
                .cmp(&a.caught_at)
                .then_with(|| b.id.as_uuid().cmp(a.id.as_uuid()))
        });
        Ok(owned)
    }
}

/// `SpeciesSource` serving canned documents; unknown names are not found.
#[derive(Default)]
pub struct StubSpeciesSource {
    documents: HashMap<String, Value>,
}

impl StubSpeciesSource {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_species(mut self, name: impl Into<String>, document: Value) -> Self {
        self.documents.insert(name.into(), document);
        self
    }
}

#[async_trait]
impl SpeciesSource for StubSpeciesSource {
    async fn fetch_species(&self, name: &str) -> Result<Value, SpeciesSourceError> {
        self.documents
            .get(name)
            .cloned()
            .ok_or_else(|| SpeciesSourceError::not_found(name))
    }
}
