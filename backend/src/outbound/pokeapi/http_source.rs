//! Reqwest-backed PokeAPI species source.
//!
//! This adapter owns transport details only: URL construction, timeout and
//! HTTP status mapping, and JSON decoding. Payloads are relayed untouched.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde_json::Value;
use tracing::debug;

use crate::domain::ports::{SpeciesSource, SpeciesSourceError};

/// Public PokeAPI v2 root.
pub const DEFAULT_POKEAPI_BASE_URL: &str = "https://pokeapi.co/api/v2/";
const USER_AGENT: &str = concat!("pokedex-backend/", env!("CARGO_PKG_VERSION"));

/// Species source that issues `GET {base}/pokemon/{name}`.
pub struct PokeApiHttpSource {
    client: Client,
    base_url: Url,
}

impl PokeApiHttpSource {
    /// Build an adapter. Without a timeout the reqwest client default applies.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(base_url: Url, timeout: Option<Duration>) -> Result<Self, reqwest::Error> {
        let mut builder = Client::builder().user_agent(USER_AGENT);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            base_url,
        })
    }

    fn species_url(&self, name: &str) -> Result<Url, SpeciesSourceError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| {
                SpeciesSourceError::transport(format!("base url {} cannot hold a path", self.base_url))
            })?
            .pop_if_empty()
            .push("pokemon")
            .push(name);
        Ok(url)
    }
}

#[async_trait]
impl SpeciesSource for PokeApiHttpSource {
    async fn fetch_species(&self, name: &str) -> Result<Value, SpeciesSourceError> {
        // Dot segments would be resolved away and address another resource.
        if matches!(name, "." | "..") {
            return Err(SpeciesSourceError::not_found(name));
        }

        let url = self.species_url(name)?;
        debug!(%url, "fetching species");
        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(SpeciesSourceError::not_found(name));
        }

        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }

        decode_body(body.as_ref())
    }
}

fn decode_body(body: &[u8]) -> Result<Value, SpeciesSourceError> {
    serde_json::from_slice(body).map_err(|error| {
        SpeciesSourceError::decode(format!("invalid PokeAPI JSON payload: {error}"))
    })
}

fn map_transport_error(error: reqwest::Error) -> SpeciesSourceError {
    if error.is_timeout() {
        SpeciesSourceError::timeout(error.to_string())
    } else {
        SpeciesSourceError::transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> SpeciesSourceError {
    match status {
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => {
            SpeciesSourceError::timeout(format!("status {}", status.as_u16()))
        }
        _ => SpeciesSourceError::status(status.as_u16(), body_preview(body)),
    }
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}
