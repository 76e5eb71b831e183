//! Mock backend helpers for integration tests

use std::sync::Arc;

use remotedesk::egui_app::{ApiClient, MemoryCredentialStore, SessionAuthState};
use remotedesk::shared::AppConfig;
use wiremock::MockServer;

/// Config pointing at a wiremock server, with a short timeout.
pub fn config_for(server: &MockServer) -> AppConfig {
    AppConfig::builder()
        .server_url(server.uri())
        .request_timeout_secs(5)
        .build()
        .expect("mock server uri is a valid url")
}

pub fn client_for(server: &MockServer) -> ApiClient {
    ApiClient::new(&config_for(server)).expect("client builds")
}

/// A session against `server` backed by an in-memory credential store the
/// test can inspect.
pub fn session_for(
    server: &MockServer,
    store: Arc<MemoryCredentialStore>,
) -> SessionAuthState {
    SessionAuthState::new(client_for(server), store)
}
