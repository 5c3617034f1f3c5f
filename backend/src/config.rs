//! Application settings loaded via OrthoConfig.
//!
//! Values come from `POKEDEX_*` environment variables, CLI flags or a config
//! file, layered over the defaults declared on each field. Only the PokeAPI
//! timeout has no default; the client's own applies when it is unset.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;

/// Signing secret used when none is configured. Only acceptable locally.
pub const DEFAULT_JWT_SECRET: &str = "mySecretKey";
pub const DEFAULT_TOKEN_TTL_SECONDS: u64 = 3600;
pub const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_ENVIRONMENT: &str = "development";
pub const DEFAULT_DATABASE_URL: &str = "postgres://localhost/pokedex";

/// Runtime configuration for the Pokédex server.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "POKEDEX")]
pub struct AppSettings {
    /// HS256 signing secret for access tokens.
    #[ortho_config(default = DEFAULT_JWT_SECRET.to_owned())]
    pub jwt_secret: String,
    /// Access token lifetime in seconds.
    #[ortho_config(default = DEFAULT_TOKEN_TTL_SECONDS)]
    pub token_ttl_seconds: u64,
    /// Interface to bind.
    #[ortho_config(default = DEFAULT_HOST)]
    pub host: IpAddr,
    /// Port to bind.
    #[ortho_config(default = DEFAULT_PORT)]
    pub port: u16,
    /// Deployment environment name, e.g. `development` or `production`.
    #[ortho_config(default = DEFAULT_ENVIRONMENT.to_owned())]
    pub environment: String,
    /// PostgreSQL connection string.
    #[ortho_config(default = DEFAULT_DATABASE_URL.to_owned())]
    pub database_url: String,
    /// Base URL of the PokeAPI v2 service.
    #[ortho_config(default = crate::outbound::pokeapi::DEFAULT_POKEAPI_BASE_URL.to_owned())]
    pub pokeapi_base_url: String,
    /// Optional timeout for species lookups, in seconds.
    pub pokeapi_timeout_secs: Option<u64>,
}

impl AppSettings {
    /// Secret used to sign and verify access tokens.
    pub fn jwt_secret(&self) -> &str {
        self.jwt_secret.as_str()
    }

    /// Whether tokens would be signed with the built-in secret.
    pub fn uses_default_secret(&self) -> bool {
        self.jwt_secret() == DEFAULT_JWT_SECRET
    }

    /// Lifetime of issued access tokens.
    pub fn token_ttl(&self) -> Duration {
        Duration::from_secs(self.token_ttl_seconds)
    }

    /// Socket address the HTTP server binds to.
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Deployment environment name.
    pub fn environment(&self) -> &str {
        self.environment.as_str()
    }

    /// Whether the configured environment is `development`, ignoring case.
    pub fn is_development(&self) -> bool {
        self.environment().eq_ignore_ascii_case(DEFAULT_ENVIRONMENT)
    }

    /// PostgreSQL connection string.
    pub fn database_url(&self) -> &str {
        self.database_url.as_str()
    }

    /// Base URL species lookups are resolved against.
    pub fn pokeapi_base_url(&self) -> &str {
        self.pokeapi_base_url.as_str()
    }

    /// Request timeout for species lookups, if one is configured.
    pub fn pokeapi_timeout(&self) -> Option<Duration> {
        self.pokeapi_timeout_secs.map(Duration::from_secs)
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for settings parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const VARS: [&str; 8] = [
        "POKEDEX_JWT_SECRET",
        "POKEDEX_TOKEN_TTL_SECONDS",
        "POKEDEX_HOST",
        "POKEDEX_PORT",
        "POKEDEX_ENVIRONMENT",
        "POKEDEX_DATABASE_URL",
        "POKEDEX_POKEAPI_BASE_URL",
        "POKEDEX_POKEAPI_TIMEOUT_SECS",
    ];

    fn load_from_empty_args() -> AppSettings {
        AppSettings::load_from_iter([OsString::from("pokedex")]).expect("config should load")
    }

    #[rstest]
    fn default_values_are_used_when_missing() {
        let _guard = lock_env(VARS.map(|name| (name, None::<String>)));

        let settings = load_from_empty_args();

        assert_eq!(settings.jwt_secret(), DEFAULT_JWT_SECRET);
        assert!(settings.uses_default_secret());
        assert_eq!(settings.token_ttl(), Duration::from_secs(3600));
        assert_eq!(settings.bind_addr(), SocketAddr::from(([0, 0, 0, 0], 3000)));
        assert!(settings.is_development());
        assert_eq!(settings.database_url(), DEFAULT_DATABASE_URL);
        assert_eq!(settings.pokeapi_base_url(), "https://pokeapi.co/api/v2/");
        assert!(settings.pokeapi_timeout().is_none());
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("POKEDEX_JWT_SECRET", Some("s3cret".to_owned())),
            ("POKEDEX_TOKEN_TTL_SECONDS", Some("60".to_owned())),
            ("POKEDEX_HOST", Some("127.0.0.1".to_owned())),
            ("POKEDEX_PORT", Some("8080".to_owned())),
            ("POKEDEX_ENVIRONMENT", Some("production".to_owned())),
            (
                "POKEDEX_DATABASE_URL",
                Some("postgres://db.internal/pokedex".to_owned()),
            ),
            (
                "POKEDEX_POKEAPI_BASE_URL",
                Some("http://localhost:9000/api/v2/".to_owned()),
            ),
            ("POKEDEX_POKEAPI_TIMEOUT_SECS", Some("5".to_owned())),
        ]);

        let settings = load_from_empty_args();

        assert_eq!(settings.jwt_secret(), "s3cret");
        assert!(!settings.uses_default_secret());
        assert_eq!(settings.token_ttl(), Duration::from_secs(60));
        assert_eq!(settings.bind_addr(), SocketAddr::from(([127, 0, 0, 1], 8080)));
        assert!(!settings.is_development());
        assert_eq!(settings.database_url(), "postgres://db.internal/pokedex");
        assert_eq!(settings.pokeapi_base_url(), "http://localhost:9000/api/v2/");
        assert_eq!(settings.pokeapi_timeout(), Some(Duration::from_secs(5)));
    }

    #[rstest]
    fn cli_flags_override_defaults() {
        let _guard = lock_env(VARS.map(|name| (name, None::<String>)));

        let settings = AppSettings::load_from_iter(
            ["pokedex", "--port", "4000", "--token-ttl-seconds", "90"].map(OsString::from),
        )
        .expect("config should load");

        assert_eq!(settings.bind_addr(), SocketAddr::from(([0, 0, 0, 0], 4000)));
        assert_eq!(settings.token_ttl(), Duration::from_secs(90));
        assert_eq!(settings.jwt_secret(), DEFAULT_JWT_SECRET);
    }

    #[rstest]
    #[case("development", true)]
    #[case("Development", true)]
    #[case("staging", false)]
    fn development_detection(#[case] environment: &str, #[case] expected: bool) {
        let _guard = lock_env(VARS.map(|name| (name, None::<String>)));
        let settings = AppSettings {
            environment: environment.to_owned(),
            ..load_from_empty_args()
        };

        assert_eq!(settings.is_development(), expected);
    }
}
