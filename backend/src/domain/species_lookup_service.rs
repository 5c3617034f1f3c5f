//! Species lookup proxy service.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tracing::error;

use crate::domain::Error;
use crate::domain::ports::{SpeciesLookup, SpeciesSource, SpeciesSourceError};

pub(crate) const NAME_REQUIRED_MESSAGE: &str = "Pokémon name is required";
pub(crate) const SPECIES_NOT_FOUND_MESSAGE: &str = "Pokémon not found";
pub(crate) const UPSTREAM_FAILURE_MESSAGE: &str = "Failed to fetch Pokémon data";

fn map_source_error(name: &str, source_error: SpeciesSourceError) -> Error {
    match source_error {
        SpeciesSourceError::NotFound { .. } => Error::not_found(SPECIES_NOT_FOUND_MESSAGE),
        other => {
            error!(species = name, error = %other, "species source request failed");
            Error::upstream(UPSTREAM_FAILURE_MESSAGE)
        }
    }
}

/// Relays species documents from a [`SpeciesSource`] unmodified.
///
/// Names are trimmed and lowercased before the upstream call. No format check
/// beyond non-emptiness is applied; the adapter encodes the name as a single
/// path segment.
#[derive(Clone)]
pub struct SpeciesLookupService<S> {
    source: Arc<S>,
}

impl<S> SpeciesLookupService<S> {
    /// Build the lookup over a species data source.
    pub fn new(source: Arc<S>) -> Self {
        Self { source }
    }
}

#[async_trait]
impl<S> SpeciesLookup for SpeciesLookupService<S>
where
    S: SpeciesSource,
{
    async fn lookup(&self, name: &str) -> Result<Value, Error> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(Error::invalid_request(NAME_REQUIRED_MESSAGE));
        }

        let normalised = trimmed.to_lowercase();
        self.source
            .fetch_species(&normalised)
            .await
            .map_err(|err| map_source_error(&normalised, err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::ports::MockSpeciesSource;
    use rstest::rstest;
    use serde_json::json;

    fn service(source: MockSpeciesSource) -> SpeciesLookupService<MockSpeciesSource> {
        SpeciesLookupService::new(Arc::new(source))
    }

    #[rstest]
    #[tokio::test]
    async fn lookup_normalises_and_relays_payload() {
        let payload = json!({ "id": 25, "name": "pikachu", "height": 4 });
        let expected = payload.clone();

        let mut source = MockSpeciesSource::new();
        source
            .expect_fetch_species()
            .withf(|name| name == "pikachu")
            .times(1)
            .return_once(move |_| Ok(payload));

        let value = service(source)
            .lookup("  PikaChu ")
            .await
            .expect("lookup succeeds");

        assert_eq!(value, expected);
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[tokio::test]
    async fn lookup_rejects_blank_names(#[case] name: &str) {
        let mut source = MockSpeciesSource::new();
        source.expect_fetch_species().times(0);

        let error = service(source).lookup(name).await.expect_err("blank name");

        assert_eq!(error.code(), ErrorCode::InvalidRequest);
        assert_eq!(error.message(), NAME_REQUIRED_MESSAGE);
    }

    #[rstest]
    #[case(SpeciesSourceError::not_found("missingno"), ErrorCode::NotFound, SPECIES_NOT_FOUND_MESSAGE)]
    #[case(SpeciesSourceError::timeout("30s"), ErrorCode::UpstreamError, UPSTREAM_FAILURE_MESSAGE)]
    #[case(SpeciesSourceError::status(502_u16, "bad gateway"), ErrorCode::UpstreamError, UPSTREAM_FAILURE_MESSAGE)]
    #[case(SpeciesSourceError::decode("eof"), ErrorCode::UpstreamError, UPSTREAM_FAILURE_MESSAGE)]
    #[tokio::test]
    async fn lookup_maps_source_failures(
        #[case] failure: SpeciesSourceError,
        #[case] code: ErrorCode,
        #[case] message: &str,
    ) {
        let mut source = MockSpeciesSource::new();
        source
            .expect_fetch_species()
            .return_once(move |_| Err(failure));

        let error = service(source)
            .lookup("missingno")
            .await
            .expect_err("source failure");

        assert_eq!(error.code(), code);
        assert_eq!(error.message(), message);
    }
}
