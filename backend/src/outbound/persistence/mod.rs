//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Repositories translate between Diesel rows and domain types and contain no
//! business rules. Row structs (`models.rs`) and table definitions
//! (`schema.rs`) stay private to this module. Connections come from a shared
//! `bb8` pool through `diesel-async`.
//!
//! # Example
//!
//! ```no_run
//! use pokedex::outbound::persistence::{
//!     DbPool, DieselCatchRepository, DieselUserRepository, PoolConfig, run_migrations,
//! };
//!
//! # async fn wire() -> Result<(), Box<dyn std::error::Error>> {
//! run_migrations("postgres://localhost/pokedex").await?;
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/pokedex")).await?;
//! let users = DieselUserRepository::new(pool.clone());
//! let catches = DieselCatchRepository::new(pool);
//! # Ok(())
//! # }
//! ```

mod diesel_catch_repository;
mod diesel_error_mapping;
mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_catch_repository::DieselCatchRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MigrationError, run_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
