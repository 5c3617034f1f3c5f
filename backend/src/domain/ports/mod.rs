//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (`UserRepository`, `CatchRepository`, `PasswordHasher`,
//! `TokenIssuer`/`TokenVerifier`, `SpeciesSource`) are implemented by
//! outbound adapters. Driving ports (`AccountService`, `CatchLedger`,
//! `SpeciesLookup`) are called by inbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod account_service;
mod catch_ledger;
mod catch_repository;
mod password_hasher;
mod species_lookup;
mod species_source;
mod token_codec;
mod user_repository;

pub use account_service::AccountService;
#[cfg(test)]
pub use account_service::MockAccountService;
pub use catch_ledger::CatchLedger;
#[cfg(test)]
pub use catch_ledger::MockCatchLedger;
#[cfg(test)]
pub use catch_repository::MockCatchRepository;
pub use catch_repository::{CatchRepository, CatchRepositoryError, InsertCatchOutcome};
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{PasswordHasher, PasswordHasherError};
#[cfg(test)]
pub use species_lookup::MockSpeciesLookup;
pub use species_lookup::SpeciesLookup;
#[cfg(test)]
pub use species_source::MockSpeciesSource;
pub use species_source::{SpeciesSource, SpeciesSourceError};
#[cfg(test)]
pub use token_codec::{MockTokenIssuer, MockTokenVerifier};
pub use token_codec::{TokenError, TokenIssuer, TokenVerifier};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
