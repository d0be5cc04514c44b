//! Request dispatch and the refresh-and-retry cycle

use super::client::ApiClient;
use crate::sdk::{errors::*, types::*};
use bytes::Bytes;
use reqwest::StatusCode;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

impl ApiClient {
    /// Send a request, recovering once from an expired access token
    pub async fn execute(&self, mut request: ApiRequest) -> Result<Bytes> {
        let token = if request.public {
            None
        } else {
            self.credentials.access_token()?
        };

        let error = match self.dispatch(&request, token.as_deref()).await {
            Ok(body) => return Ok(body),
            Err(error) => error,
        };

        if request.public
            || request.retried
            || !error.is_token_expired(self.config.auth.expired_token_code)
        {
            return Err(error);
        }

        let Some(refresh_token) = self.credentials.refresh_token()? else {
            debug!(path = %request.path, "access token expired and no refresh token stored");
            return Err(error);
        };

        let access_token = self.refresh_with(refresh_token).await?;

        request.retried = true;
        let retry = self.dispatch(&request, Some(&access_token)).await;
        if let Err(error) = &retry {
            warn!(path = %request.path, error = %error, "request failed after token refresh");
        }
        retry
    }

    /// Send a request and decode the body
    pub async fn send<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T> {
        let body = self.execute(request).await?;
        decode(&body)
    }

    /// GET an enveloped resource
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let envelope: ApiEnvelope<T> = self.send(ApiRequest::get(path)).await?;
        Ok(envelope.data)
    }

    /// GET a page of a list resource
    pub async fn get_page<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<Page<T>> {
        self.send(request).await
    }

    /// POST a JSON body, returning the enveloped result
    pub async fn post<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T> {
        let envelope: ApiEnvelope<T> = self.send(ApiRequest::post(path).json(body)?).await?;
        Ok(envelope.data)
    }

    /// PUT a JSON body, returning the enveloped result
    pub async fn put<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T> {
        let envelope: ApiEnvelope<T> = self.send(ApiRequest::put(path).json(body)?).await?;
        Ok(envelope.data)
    }

    /// DELETE a resource, discarding the body
    pub async fn delete(&self, path: &str) -> Result<()> {
        self.execute(ApiRequest::delete(path)).await.map(|_| ())
    }

    /// One HTTP round trip, no recovery
    pub(crate) async fn dispatch(&self, request: &ApiRequest, token: Option<&str>) -> Result<Bytes> {
        let url = self.config.api.url_for(&request.path);
        debug!(
            method = %request.method,
            url = %url,
            authenticated = token.is_some(),
            retried = request.retried,
            "sending request"
        );

        let mut builder = self.http_client.request(request.method.clone(), &url);
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(token) = token {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(ClientError::from_transport)?;
        let status = response.status();
        let body = response.bytes().await.map_err(ClientError::from_transport)?;

        if status.is_success() {
            Ok(body)
        } else {
            let error = api_error(status, &body);
            debug!(status = status.as_u16(), code = ?error.api_code(), "request failed");
            Err(error)
        }
    }
}

pub(crate) fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T> {
    serde_json::from_slice(body)
        .map_err(|e| ClientError::parse(format!("Unexpected response body: {}", e)))
}

/// Build an API error from a non-success response
pub(crate) fn api_error(status: StatusCode, body: &[u8]) -> ClientError {
    match serde_json::from_slice::<ApiErrorBody>(body) {
        Ok(parsed) => ClientError::Api {
            status: status.as_u16(),
            code: parsed.code,
            message: parsed
                .message
                .unwrap_or_else(|| status.canonical_reason().unwrap_or("error").to_string()),
        },
        Err(_) => ClientError::Api {
            status: status.as_u16(),
            code: None,
            message: if body.is_empty() {
                status.canonical_reason().unwrap_or("error").to_string()
            } else {
                String::from_utf8_lossy(body).into_owned()
            },
        },
    }
}
