//! Account handlers: registration and login.
//!
//! ```text
//! POST /register {"email":"ash@pallet.town","password":"pikachu"}
//! POST /login    {"email":"ash@pallet.town","password":"pikachu"}
//! ```

use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};

use crate::domain::{CredentialsValidationError, Error, LoginCredentials, RegistrationCredentials, User};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

/// Credentials body shared by `POST /register` and `POST /login`.
///
/// Missing fields deserialize as empty strings so they surface the
/// validators' "required" message rather than a JSON error.
#[derive(Debug, Default, Deserialize, Serialize, utoipa::ToSchema)]
pub struct CredentialsRequest {
    #[serde(default)]
    #[schema(example = "ash@pallet.town")]
    pub email: String,
    #[serde(default)]
    #[schema(example = "pikachu")]
    pub password: String,
}

/// Plain confirmation body.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

/// Body returned by a successful `POST /login`.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct LoginResponse {
    #[schema(example = "Login successful")]
    pub message: String,
    /// HS256 bearer token for the `/protected` routes.
    pub token: String,
    pub user: User,
}

fn map_credentials_error(err: CredentialsValidationError) -> Error {
    Error::invalid_request(err.to_string())
}

/// Create an account.
#[utoipa::path(
    post,
    path = "/register",
    request_body = CredentialsRequest,
    responses(
        (status = 201, description = "Account created", body = MessageResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 409, description = "Email already exists", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["accounts"],
    operation_id = "register",
    security([])
)]
#[post("/register")]
pub async fn register(
    state: web::Data<HttpState>,
    payload: web::Json<CredentialsRequest>,
) -> ApiResult<HttpResponse> {
    let CredentialsRequest { email, password } = payload.into_inner();
    let credentials =
        RegistrationCredentials::try_from_parts(&email, &password).map_err(map_credentials_error)?;
    let user = state.accounts.register(&credentials).await?;
    Ok(HttpResponse::Created().json(MessageResponse {
        message: format!("User {} created successfully", user.email()),
    }))
}

/// Exchange credentials for a bearer token.
///
/// Unknown email and wrong password produce the same 401 body.
#[utoipa::path(
    post,
    path = "/login",
    request_body = CredentialsRequest,
    responses(
        (status = 200, description = "Login success", body = LoginResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Invalid credentials", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["accounts"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    payload: web::Json<CredentialsRequest>,
) -> ApiResult<HttpResponse> {
    let CredentialsRequest { email, password } = payload.into_inner();
    let credentials =
        LoginCredentials::try_from_parts(&email, &password).map_err(map_credentials_error)?;
    let outcome = state.accounts.login(&credentials).await?;
    Ok(HttpResponse::Ok().json(LoginResponse {
        message: "Login successful".to_owned(),
        token: outcome.token.as_str().to_owned(),
        user: outcome.user,
    }))
}

#[cfg(test)]
#[path = "accounts_tests.rs"]
mod tests;
