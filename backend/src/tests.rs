//! Tests for the server bootstrap: readiness signalling and app wiring.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use actix_web::http::StatusCode;
use actix_web::{test as actix_test, web};
use chrono::{TimeZone, Utc};
use rstest::{fixture, rstest};

use pokedex::domain::ports::TokenVerifier;
use pokedex::domain::{AccountServiceImpl, CatchLedgerService, SpeciesLookupService};
use pokedex::inbound::http::health::HealthState;
use pokedex::inbound::http::state::HttpState;
use pokedex::outbound::security::{BcryptPasswordHasher, JwtTokenCodec};
use pokedex::test_support::{
    InMemoryCatchRepository, InMemoryUserRepository, MutableClock, StubSpeciesSource,
};

use super::load_settings;
use super::server::{ServerConfig, create_server};

#[fixture]
fn health_state() -> web::Data<HealthState> {
    web::Data::new(HealthState::new())
}

#[fixture]
fn bind_address() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 0))
}

fn in_memory_state() -> (HttpState, Arc<dyn TokenVerifier>) {
    let clock = Arc::new(MutableClock::new(
        Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0)
            .single()
            .expect("valid timestamp"),
    ));
    let tokens = Arc::new(
        JwtTokenCodec::new(b"test-secret", Duration::from_secs(3600), clock.clone())
            .expect("codec"),
    );
    let state = HttpState::new(
        Arc::new(AccountServiceImpl::new(
            Arc::new(InMemoryUserRepository::new()),
            Arc::new(BcryptPasswordHasher::with_cost(4)),
            tokens.clone(),
        )),
        Arc::new(CatchLedgerService::new(
            Arc::new(InMemoryCatchRepository::new()),
            clock,
        )),
        Arc::new(SpeciesLookupService::new(Arc::new(StubSpeciesSource::new()))),
    );
    let verifier: Arc<dyn TokenVerifier> = tokens;
    (state, verifier)
}

#[rstest]
#[actix_web::test]
async fn create_server_marks_ready(health_state: web::Data<HealthState>, bind_address: SocketAddr) {
    assert!(!health_state.is_ready(), "state should start unready");
    let (state, verifier) = in_memory_state();

    let _server = create_server(
        health_state.clone(),
        ServerConfig::new(bind_address, state, verifier),
    )
    .expect("server should bind");

    assert!(
        health_state.is_ready(),
        "server creation should mark readiness"
    );
}

#[rstest]
#[case("/", StatusCode::OK)]
#[case("/health/ready", StatusCode::OK)]
#[case("/health/live", StatusCode::OK)]
#[case("/protected/caught", StatusCode::UNAUTHORIZED)]
#[case("/does-not-exist", StatusCode::NOT_FOUND)]
#[actix_web::test]
async fn built_app_routes_requests(#[case] uri: &str, #[case] expected: StatusCode) {
    let health = web::Data::new(HealthState::new());
    health.mark_ready();
    let (state, verifier) = in_memory_state();
    let app = actix_test::init_service(super::server::build_app_for_tests(
        health,
        web::Data::new(state),
        verifier,
    ))
    .await;

    let req = actix_test::TestRequest::get().uri(uri).to_request();
    let res = actix_test::call_service(&app, req).await;

    assert_eq!(res.status(), expected);
    assert!(res.headers().contains_key("trace-id"));
}

#[rstest]
fn settings_load_without_any_configuration() {
    let _guard = env_lock::lock_env(
        [
            "POKEDEX_JWT_SECRET",
            "POKEDEX_TOKEN_TTL_SECONDS",
            "POKEDEX_HOST",
            "POKEDEX_PORT",
            "POKEDEX_ENVIRONMENT",
            "POKEDEX_DATABASE_URL",
            "POKEDEX_POKEAPI_BASE_URL",
            "POKEDEX_POKEAPI_TIMEOUT_SECS",
        ]
        .map(|name| (name, None::<String>)),
    );

    let settings =
        load_settings([std::ffi::OsString::from("pokedex")]).expect("defaults should load");

    assert_eq!(settings.bind_addr(), SocketAddr::from(([0, 0, 0, 0], 3000)));
    assert_eq!(settings.token_ttl(), Duration::from_secs(3600));
    assert!(settings.is_development());
}
