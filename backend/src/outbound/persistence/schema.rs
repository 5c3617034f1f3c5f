//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. The
//! `diesel print-schema` command regenerates them from a live database.

diesel::table! {
    /// Registered accounts. `email` is stored normalised and is unique.
    users (id) {
        id -> Uuid,
        email -> Varchar,
        /// bcrypt hash string.
        password_hash -> Text,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Species created lazily on first catch. `name` is unique.
    pokemon (id) {
        id -> Uuid,
        name -> Varchar,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Per-user catch records, unique on `(user_id, pokemon_id)`.
    caught_pokemon (id) {
        id -> Uuid,
        user_id -> Uuid,
        pokemon_id -> Uuid,
        caught_at -> Timestamptz,
    }
}

diesel::joinable!(caught_pokemon -> users (user_id));
diesel::joinable!(caught_pokemon -> pokemon (pokemon_id));

diesel::allow_tables_to_appear_in_same_query!(caught_pokemon, pokemon, users);
