//! Service banner and fallback handlers.
//!
//! ```text
//! GET /            -> {"status":"ok","message":"Pokémon API is running","version":"0.1.0"}
//! <anything else>  -> 404 {"code":"not_found","message":"Route not found"}
//! ```

use actix_web::{HttpResponse, get, web};
use serde::{Deserialize, Serialize};

use crate::domain::Error;

pub(crate) const ROUTE_NOT_FOUND_MESSAGE: &str = "Route not found";

/// Body returned by `GET /`.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct IndexResponse {
    #[schema(example = "ok")]
    pub status: String,
    #[schema(example = "Pokémon API is running")]
    pub message: String,
    #[schema(example = "0.1.0")]
    pub version: String,
}

/// Report that the API is running.
#[utoipa::path(
    get,
    path = "/",
    responses((status = 200, description = "Service banner", body = IndexResponse)),
    tags = ["meta"],
    operation_id = "index",
    security([])
)]
#[get("/")]
pub async fn index() -> web::Json<IndexResponse> {
    web::Json(IndexResponse {
        status: "ok".to_owned(),
        message: "Pokémon API is running".to_owned(),
        version: env!("CARGO_PKG_VERSION").to_owned(),
    })
}

/// Default service for unmatched routes.
pub async fn not_found() -> Result<HttpResponse, Error> {
    Err(Error::not_found(ROUTE_NOT_FOUND_MESSAGE))
}
