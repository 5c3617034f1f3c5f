//! PokeAPI outbound adapter.
//!
//! A thin HTTP implementation of the `SpeciesSource` port.

mod http_source;

pub use http_source::{DEFAULT_POKEAPI_BASE_URL, PokeApiHttpSource};
