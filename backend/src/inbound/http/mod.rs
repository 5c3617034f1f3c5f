//! HTTP inbound adapter exposing REST endpoints.

use std::sync::Arc;

use actix_web::web;

use crate::domain::ports::TokenVerifier;
use crate::middleware::BearerAuth;

pub mod accounts;
pub mod auth;
pub mod catches;
pub mod error;
pub mod health;
pub mod index;
pub mod pokemon;
pub mod schemas;
pub mod state;
#[cfg(test)]
pub mod test_utils;

pub use error::ApiResult;

/// Mount the public API on `cfg`.
///
/// `/protected` routes sit behind [`BearerAuth`] using `verifier`. Malformed
/// JSON bodies render as 400 and unmatched paths as 404 JSON payloads. The
/// caller supplies [`state::HttpState`] as app data.
///
/// # Examples
/// ```no_run
/// use std::sync::Arc;
/// use actix_web::{App, web};
/// use pokedex::domain::ports::TokenVerifier;
/// use pokedex::inbound::http::{configure, state::HttpState};
///
/// fn app(state: HttpState, verifier: Arc<dyn TokenVerifier>) {
///     let _app = App::new()
///         .app_data(web::Data::new(state))
///         .configure(|cfg| configure(cfg, verifier));
/// }
/// ```
pub fn configure(cfg: &mut web::ServiceConfig, verifier: Arc<dyn TokenVerifier>) {
    cfg.app_data(web::JsonConfig::default().error_handler(error::json_error_handler))
        .service(index::index)
        .service(accounts::register)
        .service(accounts::login)
        .service(pokemon::lookup_missing_name)
        .service(pokemon::lookup_species)
        .service(
            web::scope("/protected")
                .wrap(BearerAuth::new(verifier))
                .service(catches::catch_pokemon)
                .service(catches::release_missing_id)
                .service(catches::release_pokemon)
                .service(catches::list_caught),
        )
        .default_service(web::to(index::not_found));
}
