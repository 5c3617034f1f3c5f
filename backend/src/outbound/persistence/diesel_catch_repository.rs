//! PostgreSQL-backed `CatchRepository` implementation using Diesel ORM.
//!
//! Uniqueness of species names and of (user, species) catch pairs is enforced
//! by table constraints. Inserts use `ON CONFLICT DO NOTHING` so concurrent
//! requests for the same key settle on a single row.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{CatchRepository, CatchRepositoryError, InsertCatchOutcome};
use crate::domain::{
    CatchId, CaughtPokemon, NewCatch, Species, SpeciesId, SpeciesName, UserId,
};

use super::diesel_error_mapping::{map_basic_diesel_error, pool_error_message};
use super::models::{CatchRow, NewCatchRow, NewSpeciesRow, SpeciesRow};
use super::pool::{DbPool, PoolError};
use super::schema::{caught_pokemon, pokemon};

/// Diesel-backed implementation of the [`CatchRepository`] port.
#[derive(Clone)]
pub struct DieselCatchRepository {
    pool: DbPool,
}

impl DieselCatchRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> CatchRepositoryError {
    CatchRepositoryError::connection(pool_error_message(error))
}

fn map_diesel_error(error: diesel::result::Error) -> CatchRepositoryError {
    map_basic_diesel_error(
        error,
        CatchRepositoryError::query,
        CatchRepositoryError::connection,
    )
}

fn row_to_species(row: SpeciesRow) -> Result<Species, CatchRepositoryError> {
    let name = SpeciesName::parse(&row.name).map_err(|err| {
        CatchRepositoryError::query(format!("stored species {} is invalid: {err}", row.id))
    })?;
    Ok(Species {
        id: SpeciesId::from_uuid(row.id),
        name,
    })
}

fn rows_to_caught(
    (catch, species): (CatchRow, SpeciesRow),
) -> Result<CaughtPokemon, CatchRepositoryError> {
    Ok(CaughtPokemon {
        id: CatchId::from_uuid(catch.id),
        user_id: UserId::from_uuid(catch.user_id),
        species: row_to_species(species)?,
        caught_at: catch.caught_at,
    })
}

#[async_trait]
impl CatchRepository for DieselCatchRepository {
    async fn find_or_create_species(
        &self,
        name: &SpeciesName,
    ) -> Result<Species, CatchRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let candidate = NewSpeciesRow {
            id: Uuid::new_v4(),
            name: name.as_ref(),
        };
        diesel::insert_into(pokemon::table)
            .values(&candidate)
            .on_conflict(pokemon::name)
            .do_nothing()
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        let row: SpeciesRow = pokemon::table
            .filter(pokemon::name.eq(name.as_ref()))
            .select(SpeciesRow::as_select())
            .first(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        row_to_species(row)
    }

    async fn find_for_species(
        &self,
        user_id: &UserId,
        species_id: &SpeciesId,
    ) -> Result<Option<CaughtPokemon>, CatchRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Option<(CatchRow, SpeciesRow)> = caught_pokemon::table
            .inner_join(pokemon::table)
            .filter(caught_pokemon::user_id.eq(user_id.as_uuid()))
            .filter(caught_pokemon::pokemon_id.eq(species_id.as_uuid()))
            .select((CatchRow::as_select(), SpeciesRow::as_select()))
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        rows.map(rows_to_caught).transpose()
    }

    async fn insert(&self, catch: &NewCatch) -> Result<InsertCatchOutcome, CatchRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = NewCatchRow {
            id: *catch.id.as_uuid(),
            user_id: *catch.user_id.as_uuid(),
            pokemon_id: *catch.species.id.as_uuid(),
            caught_at: catch.caught_at,
        };

        let inserted = diesel::insert_into(caught_pokemon::table)
            .values(&row)
            .on_conflict((caught_pokemon::user_id, caught_pokemon::pokemon_id))
            .do_nothing()
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(if inserted == 0 {
            InsertCatchOutcome::AlreadyPresent
        } else {
            InsertCatchOutcome::Inserted
        })
    }

    async fn delete_owned(
        &self,
        user_id: &UserId,
        catch_id: &CatchId,
    ) -> Result<bool, CatchRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let deleted = diesel::delete(
            caught_pokemon::table
                .filter(caught_pokemon::id.eq(catch_id.as_uuid()))
                .filter(caught_pokemon::user_id.eq(user_id.as_uuid())),
        )
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error)?;

        Ok(deleted > 0)
    }

    async fn list_for_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<CaughtPokemon>, CatchRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<(CatchRow, SpeciesRow)> = caught_pokemon::table
            .inner_join(pokemon::table)
            .filter(caught_pokemon::user_id.eq(user_id.as_uuid()))
            .order((caught_pokemon::caught_at.desc(), caught_pokemon::id.desc()))
            .select((CatchRow::as_select(), SpeciesRow::as_select()))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(rows_to_caught).collect()
    }
}
