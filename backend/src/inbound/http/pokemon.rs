//! Species lookup handler proxying PokeAPI.
//!
//! ```text
//! GET /pokemon/pikachu -> {"data": { ...upstream document... }}
//! ```

use actix_web::{get, web};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::Error;
use crate::domain::species_lookup_service::NAME_REQUIRED_MESSAGE;
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

/// Envelope around the upstream species document.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct SpeciesDocumentResponse {
    /// PokeAPI `pokemon` resource, relayed unmodified.
    #[schema(value_type = Object)]
    pub data: Value,
}

/// Fetch a species document by name.
#[utoipa::path(
    get,
    path = "/pokemon/{name}",
    params(("name" = String, Path, description = "Species name, case-insensitive")),
    responses(
        (status = 200, description = "Upstream species document", body = SpeciesDocumentResponse),
        (status = 400, description = "Name missing", body = Error),
        (status = 404, description = "Pokémon not found", body = Error),
        (status = 500, description = "Failed to fetch Pokémon data", body = Error)
    ),
    tags = ["pokemon"],
    operation_id = "lookupSpecies",
    security([])
)]
#[get("/pokemon/{name}")]
pub async fn lookup_species(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<SpeciesDocumentResponse>> {
    let data = state.species.lookup(&path.into_inner()).await?;
    Ok(web::Json(SpeciesDocumentResponse { data }))
}

/// `GET /pokemon/` carries no name segment.
#[get("/pokemon/")]
pub async fn lookup_missing_name() -> ApiResult<web::Json<SpeciesDocumentResponse>> {
    Err(Error::invalid_request(NAME_REQUIRED_MESSAGE))
}
