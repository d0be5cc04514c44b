//! Concurrent refresh behaviour in both refresh modes

#[cfg(test)]
mod tests {
    use crate::common::*;
    use marketplace_client::RefreshMode;
    use serde_json::{Value, json};
    use std::time::Duration;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer};

    async fn mount_backend(server: &MockServer, refreshes: u64, refresh_delay: Duration) {
        for resource in ["/api/orders", "/api/cart"] {
            Mock::given(method("GET"))
                .and(path(resource))
                .and(header("authorization", bearer("old").as_str()))
                .respond_with(expired_token())
                .expect(1)
                .mount(server)
                .await;
            Mock::given(method("GET"))
                .and(path(resource))
                .and(header("authorization", bearer("new").as_str()))
                .respond_with(envelope(json!({ "resource": resource })))
                .expect(1)
                .mount(server)
                .await;
        }
        Mock::given(method("POST"))
            .and(path(REFRESH_PATH))
            .respond_with(tokens("new").set_delay(refresh_delay))
            .expect(refreshes)
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_per_request_mode_refreshes_independently() {
        let server = MockServer::start().await;
        mount_backend(&server, 2, Duration::from_millis(50)).await;

        let client = client_for(&server, RefreshMode::PerRequest);
        seed_credentials(&client, "old", "r-1", false);

        let (orders, cart) = tokio::join!(
            client.get::<Value>("/api/orders"),
            client.get::<Value>("/api/cart"),
        );
        assert_eq!(orders.unwrap()["resource"], "/api/orders");
        assert_eq!(cart.unwrap()["resource"], "/api/cart");
    }

    #[tokio::test]
    async fn test_single_flight_mode_shares_one_refresh() {
        let server = MockServer::start().await;
        mount_backend(&server, 1, Duration::from_millis(300)).await;

        let client = client_for(&server, RefreshMode::SingleFlight);
        seed_credentials(&client, "old", "r-1", false);

        let (orders, cart) = tokio::join!(
            client.get::<Value>("/api/orders"),
            client.get::<Value>("/api/cart"),
        );
        assert_eq!(orders.unwrap()["resource"], "/api/orders");
        assert_eq!(cart.unwrap()["resource"], "/api/cart");
        assert_eq!(
            client.credentials().access_token().unwrap().as_deref(),
            Some("new")
        );
    }

    #[tokio::test]
    async fn test_single_flight_failure_reaches_every_waiter() {
        let server = MockServer::start().await;
        for resource in ["/api/orders", "/api/cart"] {
            Mock::given(method("GET"))
                .and(path(resource))
                .respond_with(expired_token())
                .expect(1)
                .mount(&server)
                .await;
        }
        Mock::given(method("POST"))
            .and(path(REFRESH_PATH))
            .respond_with(
                api_error(401, 401001, "Refresh token revoked")
                    .set_delay(Duration::from_millis(300)),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server, RefreshMode::SingleFlight);
        seed_credentials(&client, "old", "r-1", false);

        let (orders, cart) = tokio::join!(
            client.get::<Value>("/api/orders"),
            client.get::<Value>("/api/cart"),
        );
        assert_eq!(orders.unwrap_err().api_code(), Some(401001));
        assert_eq!(cart.unwrap_err().api_code(), Some(401001));
        assert!(client.credentials().refresh_token().unwrap().is_none());
    }

    #[tokio::test]
    async fn test_single_flight_slot_is_released() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(REFRESH_PATH))
            .respond_with(tokens("new"))
            .expect(2)
            .mount(&server)
            .await;

        let client = client_for(&server, RefreshMode::SingleFlight);
        seed_credentials(&client, "old", "r-1", false);

        // sequential refreshes each reach the backend
        assert_eq!(client.refresh_access_token().await.unwrap(), "new");
        assert_eq!(client.refresh_access_token().await.unwrap(), "new");
    }
}
