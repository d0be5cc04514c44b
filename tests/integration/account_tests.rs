//! Sign in, profile and sign out

#[cfg(test)]
mod tests {
    use crate::common::*;
    use marketplace_client::auth::storage::{CredentialStore, FileStorage};
    use marketplace_client::{ApiClient, ConfigBuilder, RefreshMode, SessionContext};
    use serde_json::json;
    use std::sync::Arc;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn mount_login(server: &MockServer) {
        Mock::given(method("POST"))
            .and(path(LOGIN_PATH))
            .and(body_json(json!({
                "username": "alice",
                "password": "secret",
                "rememberMe": true
            })))
            .respond_with(envelope(json!({ "accessToken": "a-1", "refreshToken": "r-1" })))
            .expect(1)
            .mount(server)
            .await;
        Mock::given(method("GET"))
            .and(path(PROFILE_PATH))
            .and(header("authorization", bearer("a-1").as_str()))
            .respond_with(envelope(json!({
                "id": 42,
                "username": "alice",
                "email": "alice@example.com",
                "privileges": ["SHOP_MANAGE", "ORDER_READ"]
            })))
            .expect(1)
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_login_stores_tokens_and_loads_profile() {
        let server = MockServer::start().await;
        mount_login(&server).await;

        let client = client_for(&server, RefreshMode::PerRequest);
        let identity = client.login("alice", "secret", true).await.unwrap();

        assert_eq!(identity.id, "42");
        assert_eq!(identity.email.as_deref(), Some("alice@example.com"));
        assert!(client.session().is_authenticated());
        assert!(client.authorize(&["SHOP_DELETE"]));
        assert!(!client.authorize(&["USER_READ"]));

        let stored = client.credentials().credentials().unwrap().unwrap();
        assert_eq!(stored.access_token, "a-1");
        assert_eq!(stored.refresh_token, "r-1");
        assert!(stored.remember_me);

        let requests = server.received_requests().await.unwrap();
        assert!(requests[0].headers.get("authorization").is_none());
    }

    #[tokio::test]
    async fn test_login_rejected() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(LOGIN_PATH))
            .respond_with(api_error(401, 401000, "Bad credentials"))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server, RefreshMode::PerRequest);
        let err = client.login("alice", "wrong", false).await.unwrap_err();
        assert_eq!(err.status(), Some(401));
        assert!(client.credentials().credentials().unwrap().is_none());
        assert!(!client.session().is_authenticated());
    }

    #[tokio::test]
    async fn test_login_persists_to_file() {
        let server = MockServer::start().await;
        mount_login(&server).await;
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("session.json");

        let config = ConfigBuilder::new()
            .base_url(server.uri())
            .file_storage(&file)
            .try_build()
            .unwrap();
        let client = ApiClient::from_config(config).unwrap();
        client.login("alice", "secret", true).await.unwrap();

        // a new process picks the tokens back up
        let reopened = CredentialStore::new(Arc::new(FileStorage::new(&file)));
        assert_eq!(reopened.access_token().unwrap().as_deref(), Some("a-1"));
        assert!(reopened.remember_me().unwrap());
    }

    #[tokio::test]
    async fn test_logout_clears_everything() {
        let server = MockServer::start().await;
        mount_login(&server).await;
        Mock::given(method("POST"))
            .and(path(LOGOUT_PATH))
            .and(header("authorization", bearer("a-1").as_str()))
            .and(body_json(json!({ "refreshToken": "r-1" })))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server, RefreshMode::PerRequest);
        client.login("alice", "secret", true).await.unwrap();
        client.logout().await.unwrap();

        assert!(!client.session().is_authenticated());
        assert!(client.credentials().access_token().unwrap().is_none());
        assert!(client.credentials().refresh_token().unwrap().is_none());
        assert!(!client.credentials().remember_me().unwrap());
    }

    #[tokio::test]
    async fn test_logout_survives_backend_failure() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(LOGOUT_PATH))
            .respond_with(ResponseTemplate::new(503))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server, RefreshMode::PerRequest);
        seed_credentials(&client, "a-1", "r-1", false);

        client.logout().await.unwrap();
        assert!(client.credentials().credentials().unwrap().is_none());
    }

    #[tokio::test]
    async fn test_logout_without_tokens_skips_backend() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(LOGOUT_PATH))
            .respond_with(ResponseTemplate::new(204))
            .expect(0)
            .mount(&server)
            .await;

        let client = client_for(&server, RefreshMode::PerRequest);
        client.logout().await.unwrap();
    }

    #[tokio::test]
    async fn test_profile_fetch_recovers_from_expiry() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(PROFILE_PATH))
            .and(header("authorization", bearer("old").as_str()))
            .respond_with(expired_token())
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path(REFRESH_PATH))
            .respond_with(tokens("new"))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path(PROFILE_PATH))
            .and(header("authorization", bearer("new").as_str()))
            .respond_with(envelope(json!({ "id": "u-7", "username": "bob" })))
            .mount(&server)
            .await;

        let config = ConfigBuilder::new().base_url(server.uri()).build();
        let session = SessionContext::new();
        let client =
            ApiClient::new(config, CredentialStore::in_memory(), session.clone()).unwrap();
        seed_credentials(&client, "old", "r-1", false);

        let identity = client.fetch_profile().await.unwrap();
        assert_eq!(identity.id, "u-7");
        assert!(identity.privileges.is_empty());
        // the caller's handle sees the same session
        assert_eq!(session.identity().unwrap().username, "bob");
    }
}
