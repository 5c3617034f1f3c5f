//! Driving port for the species lookup proxy.

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::Error;

/// Domain use-case port relaying species documents.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SpeciesLookup: Send + Sync {
    /// Fetch the species document for a raw, caller-supplied name.
    async fn lookup(&self, name: &str) -> Result<Value, Error>;
}
