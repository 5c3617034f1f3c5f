//! Port for the external species data source.

use async_trait::async_trait;
use serde_json::Value;

use super::define_port_error;

define_port_error! {
    /// Errors raised by species source adapters.
    pub enum SpeciesSourceError {
        /// The upstream has no species by that name.
        NotFound { name: String } => "species not found upstream: {name}",
        /// The request could not be sent or the connection failed.
        Transport { message: String } => "species source transport failed: {message}",
        /// The upstream did not answer in time.
        Timeout { message: String } => "species source timed out: {message}",
        /// The upstream answered with an unexpected status.
        Status { status: u16, message: String } =>
            "species source returned status {status}: {message}",
        /// The upstream body was not valid JSON.
        Decode { message: String } => "species source body could not be decoded: {message}",
    }
}

/// Source of species documents, keyed by lowercase name.
///
/// The payload is relayed to clients unmodified, so adapters return raw JSON.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SpeciesSource: Send + Sync {
    /// Fetch the document for `name`.
    async fn fetch_species(&self, name: &str) -> Result<Value, SpeciesSourceError>;
}
