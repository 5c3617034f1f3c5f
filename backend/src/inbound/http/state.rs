//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{AccountService, CatchLedger, SpeciesLookup};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub accounts: Arc<dyn AccountService>,
    pub catches: Arc<dyn CatchLedger>,
    pub species: Arc<dyn SpeciesLookup>,
}

impl HttpState {
    /// Construct state from the three driving ports.
    ///
    /// # Examples
    /// ```no_run
    /// use std::sync::Arc;
    /// use pokedex::domain::ports::{AccountService, CatchLedger, SpeciesLookup};
    /// use pokedex::inbound::http::state::HttpState;
    ///
    /// fn build(
    ///     accounts: Arc<dyn AccountService>,
    ///     catches: Arc<dyn CatchLedger>,
    ///     species: Arc<dyn SpeciesLookup>,
    /// ) -> HttpState {
    ///     HttpState::new(accounts, catches, species)
    /// }
    /// ```
    pub fn new(
        accounts: Arc<dyn AccountService>,
        catches: Arc<dyn CatchLedger>,
        species: Arc<dyn SpeciesLookup>,
    ) -> Self {
        Self {
            accounts,
            catches,
            species,
        }
    }
}
