//! Authenticated caller extraction for protected handlers.
//!
//! [`crate::middleware::BearerAuth`] verifies the bearer token and stores the
//! subject in request extensions. Handlers declare an [`AuthenticatedUser`]
//! argument to receive it.

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpMessage, HttpRequest};
use futures_util::future::{Ready, ready};

use crate::domain::{Error, UserId};

pub(crate) const UNAUTHORIZED_MESSAGE: &str = "Unauthorized";

/// Identity of the caller established by bearer authentication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser(pub UserId);

impl AuthenticatedUser {
    /// Subject of the verified token.
    pub fn user_id(&self) -> &UserId {
        &self.0
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        // Absent when a protected handler is mounted outside the bearer scope.
        let user = req.extensions().get::<AuthenticatedUser>().cloned();
        ready(user.ok_or_else(|| Error::unauthorized(UNAUTHORIZED_MESSAGE)))
    }
}
