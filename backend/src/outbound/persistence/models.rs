//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and are
//! never exposed to the domain.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{caught_pokemon, pokemon, users};

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
}

/// Insertable struct for creating user records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: Uuid,
    pub email: &'a str,
    pub password_hash: &'a str,
}

/// Row struct for reading from the pokemon table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = pokemon)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct SpeciesRow {
    pub id: Uuid,
    pub name: String,
}

/// Insertable struct for creating species records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = pokemon)]
pub(crate) struct NewSpeciesRow<'a> {
    pub id: Uuid,
    pub name: &'a str,
}

/// Row struct for reading from the caught_pokemon table.
///
/// Species columns come from the `pokemon` join as a [`SpeciesRow`].
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = caught_pokemon)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CatchRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub caught_at: DateTime<Utc>,
}

/// Insertable struct for creating catch records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = caught_pokemon)]
pub(crate) struct NewCatchRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub pokemon_id: Uuid,
    pub caught_at: DateTime<Utc>,
}
