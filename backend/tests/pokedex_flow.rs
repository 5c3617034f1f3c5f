//! End-to-end behaviour of the HTTP API over in-memory adapters.
//!
//! Real bcrypt hashing and JWT signing are used; storage and the species
//! source are the `test-support` doubles.

use std::sync::Arc;
use std::time::Duration;

use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::http::header::AUTHORIZATION;
use actix_web::{App, test, web};
use chrono::{TimeZone, Utc};
use rstest::{fixture, rstest};
use serde_json::{Value, json};

use pokedex::Trace;
use pokedex::domain::ports::TokenVerifier;
use pokedex::domain::{AccountServiceImpl, CatchLedgerService, SpeciesLookupService};
use pokedex::inbound::http::configure;
use pokedex::inbound::http::state::HttpState;
use pokedex::outbound::security::{BcryptPasswordHasher, JwtTokenCodec};
use pokedex::test_support::{
    InMemoryCatchRepository, InMemoryUserRepository, MutableClock, StubSpeciesSource,
};

const TTL: Duration = Duration::from_secs(3600);

struct World {
    clock: Arc<MutableClock>,
    catches: Arc<InMemoryCatchRepository>,
    state: HttpState,
    verifier: Arc<dyn TokenVerifier>,
}

#[fixture]
fn world() -> World {
    let clock = Arc::new(MutableClock::new(
        Utc.with_ymd_and_hms(2026, 5, 1, 12, 0, 0)
            .single()
            .expect("valid timestamp"),
    ));
    let tokens = Arc::new(
        JwtTokenCodec::new(b"integration-secret", TTL, clock.clone()).expect("codec"),
    );
    let catches = Arc::new(InMemoryCatchRepository::new());
    let source = StubSpeciesSource::new().with_species(
        "pikachu",
        json!({ "id": 25, "name": "pikachu", "types": [{ "type": { "name": "electric" } }] }),
    );
    let state = HttpState::new(
        Arc::new(AccountServiceImpl::new(
            Arc::new(InMemoryUserRepository::new()),
            Arc::new(BcryptPasswordHasher::with_cost(4)),
            tokens.clone(),
        )),
        Arc::new(CatchLedgerService::new(catches.clone(), clock.clone())),
        Arc::new(SpeciesLookupService::new(Arc::new(source))),
    );
    let verifier: Arc<dyn TokenVerifier> = tokens;
    World {
        clock,
        catches,
        state,
        verifier,
    }
}

async fn app(
    world: &World,
) -> impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error> {
    let verifier = world.verifier.clone();
    test::init_service(
        App::new()
            .app_data(web::Data::new(world.state.clone()))
            .wrap(Trace)
            .configure(|cfg| configure(cfg, verifier)),
    )
    .await
}

async fn json_call<S>(app: &S, req: test::TestRequest) -> (StatusCode, Value)
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let res = test::call_service(app, req.to_request()).await;
    let status = res.status();
    (status, test::read_body_json(res).await)
}

fn credentials(email: &str, password: &str) -> Value {
    json!({ "email": email, "password": password })
}

fn with_token(req: test::TestRequest, token: &str) -> test::TestRequest {
    req.insert_header((AUTHORIZATION, format!("Bearer {token}")))
}

async fn register_and_login<S>(app: &S, email: &str) -> String
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let (status, _) = json_call(
        app,
        test::TestRequest::post()
            .uri("/register")
            .set_json(credentials(email, "secret1")),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = json_call(
        app,
        test::TestRequest::post()
            .uri("/login")
            .set_json(credentials(email, "secret1")),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body["token"].as_str().expect("token").to_owned()
}

#[rstest]
#[actix_web::test]
async fn trainer_journey(world: World) {
    let app = app(&world).await;

    let (status, body) = json_call(
        &app,
        test::TestRequest::post()
            .uri("/register")
            .set_json(credentials("a@b.com", "secret1")),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "User a@b.com created successfully");

    let (status, body) = json_call(
        &app,
        test::TestRequest::post()
            .uri("/register")
            .set_json(credentials(" A@B.com ", "secret1")),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["message"], "Email already exists");

    let (status, wrong_password) = json_call(
        &app,
        test::TestRequest::post()
            .uri("/login")
            .set_json(credentials("a@b.com", "wrong-pass")),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    let (_, unknown_email) = json_call(
        &app,
        test::TestRequest::post()
            .uri("/login")
            .set_json(credentials("nobody@b.com", "secret1")),
    )
    .await;
    assert_eq!(wrong_password["message"], unknown_email["message"]);
    assert_eq!(wrong_password["code"], unknown_email["code"]);

    let (status, body) = json_call(
        &app,
        test::TestRequest::post()
            .uri("/login")
            .set_json(credentials("a@b.com", "secret1")),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["email"], "a@b.com");
    let token = body["token"].as_str().expect("token").to_owned();

    let (status, first) = json_call(
        &app,
        with_token(test::TestRequest::post().uri("/protected/catch"), &token)
            .set_json(json!({ "name": "Pikachu" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(first["data"]["pokemon"]["name"], "pikachu");

    let (status, repeat) = json_call(
        &app,
        with_token(test::TestRequest::post().uri("/protected/catch"), &token)
            .set_json(json!({ "name": "  PIKACHU " })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(repeat["message"], "You have already caught this Pokémon");
    assert_eq!(repeat["data"], first["data"]);
    assert_eq!(world.catches.species_count(), 1);

    let (status, listed) = json_call(
        &app,
        with_token(test::TestRequest::get().uri("/protected/caught"), &token),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed["count"], 1);

    let catch_id = first["data"]["id"].as_str().expect("catch id");
    let (status, _) = json_call(
        &app,
        with_token(
            test::TestRequest::delete().uri(&format!("/protected/release/{catch_id}")),
            &token,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, listed) = json_call(
        &app,
        with_token(test::TestRequest::get().uri("/protected/caught"), &token),
    )
    .await;
    assert_eq!(listed["count"], 0);
}

#[rstest]
#[actix_web::test]
async fn release_is_scoped_to_owner(world: World) {
    let app = app(&world).await;
    let ash = register_and_login(&app, "ash@pallet.town").await;
    let gary = register_and_login(&app, "gary@pallet.town").await;

    let (_, caught) = json_call(
        &app,
        with_token(test::TestRequest::post().uri("/protected/catch"), &ash)
            .set_json(json!({ "name": "eevee" })),
    )
    .await;
    let catch_id = caught["data"]["id"].as_str().expect("catch id").to_owned();

    let (status, body) = json_call(
        &app,
        with_token(
            test::TestRequest::delete().uri(&format!("/protected/release/{catch_id}")),
            &gary,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Pokémon not found or does not belong to you");

    let (_, listed) = json_call(
        &app,
        with_token(test::TestRequest::get().uri("/protected/caught"), &ash),
    )
    .await;
    assert_eq!(listed["count"], 1);
}

#[rstest]
#[actix_web::test]
async fn caught_list_is_newest_first(world: World) {
    let app = app(&world).await;
    let token = register_and_login(&app, "misty@cerulean.city").await;

    for name in ["staryu", "psyduck", "togepi"] {
        let (status, _) = json_call(
            &app,
            with_token(test::TestRequest::post().uri("/protected/catch"), &token)
                .set_json(json!({ "name": name })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        world.clock.advance_seconds(60);
    }

    let (_, listed) = json_call(
        &app,
        with_token(test::TestRequest::get().uri("/protected/caught"), &token),
    )
    .await;
    let names: Vec<&str> = listed["data"]
        .as_array()
        .expect("data array")
        .iter()
        .map(|entry| entry["pokemon"]["name"].as_str().expect("name"))
        .collect();
    assert_eq!(names, ["togepi", "psyduck", "staryu"]);
}

#[rstest]
#[case(3600, StatusCode::OK)]
#[case(3601, StatusCode::UNAUTHORIZED)]
#[actix_web::test]
async fn tokens_expire_after_ttl(
    world: World,
    #[case] elapsed_seconds: i64,
    #[case] expected: StatusCode,
) {
    let app = app(&world).await;
    let token = register_and_login(&app, "brock@pewter.city").await;

    world.clock.advance_seconds(elapsed_seconds);
    let res = test::call_service(
        &app,
        with_token(test::TestRequest::get().uri("/protected/caught"), &token).to_request(),
    )
    .await;

    assert_eq!(res.status(), expected);
}

#[rstest]
#[actix_web::test]
async fn species_lookup_relays_document(world: World) {
    let app = app(&world).await;

    let (status, body) = json_call(&app, test::TestRequest::get().uri("/pokemon/PIKACHU")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["id"], 25);
    assert_eq!(body["data"]["types"][0]["type"]["name"], "electric");

    let (status, body) = json_call(&app, test::TestRequest::get().uri("/pokemon/missingno")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Pokémon not found");
}

#[rstest]
#[actix_web::test]
async fn unknown_routes_are_json_404s(world: World) {
    let app = app(&world).await;

    let res = test::call_service(&app, test::TestRequest::get().uri("/nope").to_request()).await;

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert!(res.headers().contains_key("trace-id"));
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["message"], "Route not found");
    assert!(body["traceId"].is_string());
}
