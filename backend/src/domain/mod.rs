//! Domain primitives, ports and services.
//!
//! Purpose: define strongly typed entities for accounts and the catch ledger,
//! the ports adapters implement, and the services that orchestrate them.
//! Types are immutable once built and document their invariants in Rustdoc.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - User, EmailAddress, UserId: account identity.
//! - RegistrationCredentials, LoginCredentials: validated auth input.
//! - SpeciesName, Species: normalised species identity.
//! - CaughtPokemon, CatchOutcome: catch ledger records.
//! - AccountServiceImpl, CatchLedgerService, SpeciesLookupService: use cases.

pub mod account_service;
pub mod auth;
pub mod catch;
pub mod catch_ledger_service;
pub mod error;
pub mod ports;
pub mod species;
pub mod species_lookup_service;
pub mod trace_id;
pub mod user;
pub mod validation;

pub use self::account_service::AccountServiceImpl;
pub use self::auth::{
    AccessToken, CredentialsValidationError, LoginCredentials, LoginOutcome, PasswordHash,
    RegistrationCredentials, UserAccount,
};
pub use self::catch::{CatchId, CatchOutcome, CaughtPokemon, NewCatch};
pub use self::catch_ledger_service::CatchLedgerService;
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::species::{Species, SpeciesId, SpeciesName, SpeciesNameError};
pub use self::species_lookup_service::SpeciesLookupService;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{EmailAddress, User, UserId, UserValidationError};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use pokedex::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::unauthorized("Invalid credentials"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
