//! Shared test infrastructure

#![allow(dead_code)]

use marketplace_client::auth::storage::CredentialStore;
use marketplace_client::{ApiClient, ConfigBuilder, Credentials, RefreshMode, SessionContext};
use serde_json::{Value, json};
use wiremock::{MockServer, ResponseTemplate};

pub const REFRESH_PATH: &str = "/api/account/refresh-token";
pub const LOGIN_PATH: &str = "/api/account/login";
pub const LOGOUT_PATH: &str = "/api/account/logout";
pub const PROFILE_PATH: &str = "/api/account/me";
pub const EXPIRED_TOKEN_CODE: i64 = 403002;

/// Client pointed at the mock server with in-memory storage
pub fn client_for(server: &MockServer, mode: RefreshMode) -> ApiClient {
    let config = ConfigBuilder::new()
        .base_url(server.uri())
        .timeout(5)
        .refresh_mode(mode)
        .build();
    ApiClient::new(config, CredentialStore::in_memory(), SessionContext::new())
        .expect("client should build")
}

/// Client with a short per-request timeout
pub fn client_with_timeout(server: &MockServer, timeout_secs: u64) -> ApiClient {
    let config = ConfigBuilder::new()
        .base_url(server.uri())
        .timeout(timeout_secs)
        .build();
    ApiClient::new(config, CredentialStore::in_memory(), SessionContext::new())
        .expect("client should build")
}

/// Store an access/refresh token pair
pub fn seed_credentials(client: &ApiClient, access: &str, refresh: &str, remember_me: bool) {
    client
        .credentials()
        .save(&Credentials {
            access_token: access.to_string(),
            refresh_token: refresh.to_string(),
            remember_me,
        })
        .expect("credentials should save");
}

pub fn bearer(token: &str) -> String {
    format!("Bearer {}", token)
}

/// `{ "data": value }` with status 200
pub fn envelope(data: Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({ "data": data }))
}

/// Backend error body with an application code
pub fn api_error(status: u16, code: i64, message: &str) -> ResponseTemplate {
    ResponseTemplate::new(status).set_body_json(json!({ "code": code, "message": message }))
}

pub fn expired_token() -> ResponseTemplate {
    api_error(403, EXPIRED_TOKEN_CODE, "Access token expired")
}

pub fn tokens(access: &str) -> ResponseTemplate {
    envelope(json!({ "accessToken": access }))
}
