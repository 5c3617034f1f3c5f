//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};

use crate::Trace;
use crate::domain::UserId;
use crate::domain::ports::{
    MockAccountService, MockCatchLedger, MockSpeciesLookup, MockTokenVerifier, TokenError,
    TokenVerifier,
};
use crate::inbound::http::configure;
use crate::inbound::http::state::HttpState;

/// Token accepted by [`MockPorts::verifier`].
pub const TEST_TOKEN: &str = "test-token";

/// Mocked driving ports plus the identity the test verifier vouches for.
pub struct MockPorts {
    pub accounts: MockAccountService,
    pub catches: MockCatchLedger,
    pub species: MockSpeciesLookup,
    pub caller: UserId,
}

impl Default for MockPorts {
    fn default() -> Self {
        Self {
            accounts: MockAccountService::new(),
            catches: MockCatchLedger::new(),
            species: MockSpeciesLookup::new(),
            caller: UserId::random(),
        }
    }
}

impl MockPorts {
    /// Verifier accepting only [`TEST_TOKEN`], resolving to `caller`.
    fn verifier(&self) -> Arc<dyn TokenVerifier> {
        let caller = self.caller.clone();
        let mut verifier = MockTokenVerifier::new();
        verifier.expect_verify().returning(move |token| {
            if token == TEST_TOKEN {
                Ok(caller.clone())
            } else {
                Err(TokenError::invalid("unknown test token"))
            }
        });
        Arc::new(verifier)
    }
}

/// Build the full router over mocked ports.
pub fn test_app(
    ports: MockPorts,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let verifier = ports.verifier();
    let state = HttpState::new(
        Arc::new(ports.accounts),
        Arc::new(ports.catches),
        Arc::new(ports.species),
    );
    App::new()
        .app_data(web::Data::new(state))
        .wrap(Trace)
        .configure(|cfg| configure(cfg, verifier))
}

/// `Authorization` header value carrying [`TEST_TOKEN`].
pub fn bearer() -> (actix_web::http::header::HeaderName, String) {
    (
        actix_web::http::header::AUTHORIZATION,
        format!("Bearer {TEST_TOKEN}"),
    )
}
