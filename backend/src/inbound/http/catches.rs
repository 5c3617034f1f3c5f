//! Catch ledger handlers mounted under the bearer-protected `/protected` scope.
//!
//! ```text
//! POST   /protected/catch {"name":"Pikachu"}
//! DELETE /protected/release/{id}
//! GET    /protected/caught
//! ```

use actix_web::{HttpResponse, delete, get, post, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{CatchId, CatchOutcome, CaughtPokemon, Error, SpeciesName};
use crate::inbound::http::ApiResult;
use crate::inbound::http::accounts::MessageResponse;
use crate::inbound::http::auth::AuthenticatedUser;
use crate::inbound::http::state::HttpState;

pub(crate) const INVALID_CATCH_ID_MESSAGE: &str = "Invalid Pokémon id";
pub(crate) const CATCH_ID_REQUIRED_MESSAGE: &str = "Pokémon ID is required";

/// Body for `POST /protected/catch`.
#[derive(Debug, Default, Deserialize, Serialize, utoipa::ToSchema)]
pub struct CatchRequest {
    #[serde(default)]
    #[schema(example = "Pikachu")]
    pub name: String,
}

/// Species summary embedded in a catch record.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, utoipa::ToSchema)]
pub struct SpeciesDto {
    pub id: Uuid,
    #[schema(example = "pikachu")]
    pub name: String,
}

/// Catch record as rendered to clients.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CaughtPokemonDto {
    pub id: Uuid,
    pub user_id: Uuid,
    pub pokemon_id: Uuid,
    pub caught_at: DateTime<Utc>,
    pub pokemon: SpeciesDto,
}

impl From<CaughtPokemon> for CaughtPokemonDto {
    fn from(value: CaughtPokemon) -> Self {
        Self {
            id: *value.id.as_uuid(),
            user_id: *value.user_id.as_uuid(),
            pokemon_id: *value.species.id.as_uuid(),
            caught_at: value.caught_at,
            pokemon: SpeciesDto {
                id: *value.species.id.as_uuid(),
                name: value.species.name.into(),
            },
        }
    }
}

/// Body returned by `POST /protected/catch`.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct CatchResponse {
    pub message: String,
    pub data: CaughtPokemonDto,
}

/// Body returned by `GET /protected/caught`.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct CaughtListResponse {
    pub message: String,
    pub count: usize,
    pub data: Vec<CaughtPokemonDto>,
}

/// Record a catch for the caller.
///
/// The first catch of a species answers 201; repeats answer 200 with the
/// stored record.
#[utoipa::path(
    post,
    path = "/protected/catch",
    request_body = CatchRequest,
    responses(
        (status = 201, description = "Pokémon caught", body = CatchResponse),
        (status = 200, description = "Already caught", body = CatchResponse),
        (status = 400, description = "Invalid name", body = Error),
        (status = 401, description = "Unauthorized", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["catches"],
    operation_id = "catchPokemon",
    security(("BearerAuth" = []))
)]
#[post("/catch")]
pub async fn catch_pokemon(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    payload: web::Json<CatchRequest>,
) -> ApiResult<HttpResponse> {
    let name = SpeciesName::parse(&payload.name)
        .map_err(|err| Error::invalid_request(err.to_string()))?;
    let outcome = state.catches.catch(user.user_id(), &name).await?;
    let (mut builder, message) = match &outcome {
        CatchOutcome::Caught(_) => (HttpResponse::Created(), "Pokémon caught successfully"),
        CatchOutcome::AlreadyCaught(_) => {
            (HttpResponse::Ok(), "You have already caught this Pokémon")
        }
    };
    Ok(builder.json(CatchResponse {
        message: message.to_owned(),
        data: outcome.into_record().into(),
    }))
}

/// Release one of the caller's catches.
#[utoipa::path(
    delete,
    path = "/protected/release/{id}",
    params(("id" = Uuid, Path, description = "Catch record identifier")),
    responses(
        (status = 200, description = "Pokémon released", body = MessageResponse),
        (status = 400, description = "Malformed id", body = Error),
        (status = 401, description = "Unauthorized", body = Error),
        (status = 404, description = "Not found or not owned by caller", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["catches"],
    operation_id = "releasePokemon",
    security(("BearerAuth" = []))
)]
#[delete("/release/{id}")]
pub async fn release_pokemon(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    path: web::Path<String>,
) -> ApiResult<web::Json<MessageResponse>> {
    let raw = path.into_inner();
    let catch_id = Uuid::parse_str(raw.trim())
        .map(CatchId::from_uuid)
        .map_err(|_| Error::invalid_request(INVALID_CATCH_ID_MESSAGE))?;
    state.catches.release(user.user_id(), &catch_id).await?;
    Ok(web::Json(MessageResponse {
        message: "Pokémon released successfully".to_owned(),
    }))
}

/// `DELETE /protected/release/` carries no id segment.
#[delete("/release/")]
pub async fn release_missing_id(_user: AuthenticatedUser) -> ApiResult<HttpResponse> {
    Err(Error::invalid_request(CATCH_ID_REQUIRED_MESSAGE))
}

/// List the caller's catches, most recent first.
#[utoipa::path(
    get,
    path = "/protected/caught",
    responses(
        (status = 200, description = "Caught Pokémon", body = CaughtListResponse),
        (status = 401, description = "Unauthorized", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["catches"],
    operation_id = "listCaught",
    security(("BearerAuth" = []))
)]
#[get("/caught")]
pub async fn list_caught(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
) -> ApiResult<web::Json<CaughtListResponse>> {
    let records = state.catches.list_caught(user.user_id()).await?;
    let data: Vec<CaughtPokemonDto> = records.into_iter().map(Into::into).collect();
    Ok(web::Json(CaughtListResponse {
        message: "Caught Pokémon retrieved successfully".to_owned(),
        count: data.len(),
        data,
    }))
}

#[cfg(test)]
#[path = "catches_tests.rs"]
mod tests;
