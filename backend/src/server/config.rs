//! HTTP server configuration object and helpers.

use std::net::SocketAddr;
use std::sync::Arc;

use pokedex::domain::ports::TokenVerifier;
use pokedex::inbound::http::state::HttpState;

/// Everything `create_server` needs once adapters and services are built.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) http_state: HttpState,
    pub(crate) verifier: Arc<dyn TokenVerifier>,
}

impl ServerConfig {
    #[must_use]
    pub fn new(
        bind_addr: SocketAddr,
        http_state: HttpState,
        verifier: Arc<dyn TokenVerifier>,
    ) -> Self {
        Self {
            bind_addr,
            http_state,
            verifier,
        }
    }
}
