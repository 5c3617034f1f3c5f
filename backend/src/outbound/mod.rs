//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: PostgreSQL-backed repositories using Diesel ORM
//! - **pokeapi**: HTTP client for the public species API
//! - **security**: bcrypt password hashing and JWT bearer tokens
//!
//! Adapters translate between domain types and infrastructure representations
//! and hold no business rules.

pub mod persistence;
pub mod pokeapi;
pub mod security;
