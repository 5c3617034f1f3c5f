//! Bearer token authentication for protected scopes.
//!
//! Requests must carry `Authorization: Bearer <token>`; the scheme name is
//! matched case-insensitively. A verified token's
//! subject is stored in request extensions as an [`AuthenticatedUser`] for
//! handlers to extract. Anything else short-circuits with a 401 payload.

use std::sync::Arc;
use std::task::{Context, Poll};

use actix_web::body::EitherBody;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header::AUTHORIZATION;
use actix_web::{Error, HttpMessage};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use tracing::debug;

use crate::domain::Error as DomainError;
use crate::domain::ports::{TokenError, TokenVerifier};
use crate::inbound::http::auth::{AuthenticatedUser, UNAUTHORIZED_MESSAGE};

const BEARER_SCHEME: &str = "Bearer";

/// Middleware factory validating bearer tokens with a [`TokenVerifier`].
///
/// # Examples
/// ```no_run
/// use std::sync::Arc;
/// use actix_web::{App, web};
/// use pokedex::domain::ports::TokenVerifier;
/// use pokedex::middleware::BearerAuth;
///
/// fn protected(verifier: Arc<dyn TokenVerifier>) {
///     let _app = App::new().service(web::scope("/protected").wrap(BearerAuth::new(verifier)));
/// }
/// ```
#[derive(Clone)]
pub struct BearerAuth {
    verifier: Arc<dyn TokenVerifier>,
}

impl BearerAuth {
    /// Guard a scope with `verifier`.
    pub fn new(verifier: Arc<dyn TokenVerifier>) -> Self {
        Self { verifier }
    }
}

impl<S, B> Transform<S, ServiceRequest> for BearerAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = BearerAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(BearerAuthMiddleware {
            service,
            verifier: Arc::clone(&self.verifier),
        }))
    }
}

/// Service wrapper produced by [`BearerAuth`].
pub struct BearerAuthMiddleware<S> {
    service: S,
    verifier: Arc<dyn TokenVerifier>,
}

fn bearer_token(req: &ServiceRequest) -> Option<&str> {
    let header = req.headers().get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = header.trim_start().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case(BEARER_SCHEME) {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}

fn authenticate(
    req: &ServiceRequest,
    verifier: &dyn TokenVerifier,
) -> Result<AuthenticatedUser, DomainError> {
    let token = bearer_token(req).ok_or_else(|| {
        debug!("missing or malformed bearer credentials");
        DomainError::unauthorized(UNAUTHORIZED_MESSAGE)
    })?;

    verifier.verify(token).map(AuthenticatedUser).map_err(|err| {
        match &err {
            TokenError::Expired => debug!("rejected expired bearer token"),
            other => debug!(error = %other, "rejected bearer token"),
        }
        DomainError::unauthorized(UNAUTHORIZED_MESSAGE)
    })
}

impl<S, B> Service<ServiceRequest> for BearerAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        match authenticate(&req, self.verifier.as_ref()) {
            Ok(user) => {
                req.extensions_mut().insert(user);
                let fut = self.service.call(req);
                Box::pin(async move { fut.await.map(ServiceResponse::map_into_left_body) })
            }
            Err(error) => {
                let response = req.error_response(error).map_into_right_body();
                Box::pin(async move { Ok(response) })
            }
        }
    }
}
