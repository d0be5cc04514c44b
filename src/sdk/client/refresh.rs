//! Access token refresh

use super::client::ApiClient;
use crate::config::RefreshMode;
use crate::sdk::{errors::*, types::*};
use futures::FutureExt;
use std::sync::Arc;
use tracing::{debug, info, warn};

impl ApiClient {
    /// Exchange the stored refresh token for a new access token
    ///
    /// On failure both tokens are removed from storage and the session
    /// identity is cleared.
    pub async fn refresh_access_token(&self) -> Result<String> {
        let Some(refresh_token) = self.credentials.refresh_token()? else {
            return Err(ClientError::Unauthorized(
                "no refresh token stored".to_string(),
            ));
        };
        self.refresh_with(refresh_token).await
    }

    /// Refresh using a token the caller already read from storage
    pub(crate) async fn refresh_with(&self, refresh_token: String) -> Result<String> {
        match self.config.auth.refresh_mode {
            RefreshMode::PerRequest => self.perform_refresh(refresh_token).await,
            RefreshMode::SingleFlight => self.shared_refresh(refresh_token).await,
        }
    }

    async fn shared_refresh(&self, refresh_token: String) -> Result<String> {
        let refresh = {
            let mut slot = self.inflight_refresh.lock().await;
            match slot.as_ref() {
                Some(existing) => {
                    debug!("joining token refresh in flight");
                    existing.clone()
                }
                None => {
                    let client = self.clone();
                    let refresh = async move {
                        let result = client
                            .perform_refresh(refresh_token)
                            .await
                            .map_err(Arc::new);
                        client.inflight_refresh.lock().await.take();
                        result
                    }
                    .boxed()
                    .shared();
                    *slot = Some(refresh.clone());
                    refresh
                }
            }
        };

        refresh.await.map_err(ClientError::Shared)
    }

    async fn perform_refresh(&self, refresh_token: String) -> Result<String> {
        let remember_me = self.credentials.remember_me()?;

        info!(remember_me, "refreshing access token");

        let request = ApiRequest::post(self.config.endpoints.refresh.as_str())
            .json(&RefreshTokenRequest {
                refresh_token,
                remember_me,
            })?
            .public();

        let outcome = match self.dispatch(&request, None).await {
            Ok(body) => super::request::decode::<ApiEnvelope<TokenPair>>(&body),
            Err(error) => Err(error),
        };

        match outcome {
            Ok(ApiEnvelope { data: tokens }) => {
                self.credentials.set_access_token(&tokens.access_token)?;
                if let Some(rotated) = &tokens.refresh_token {
                    self.credentials.set_refresh_token(rotated)?;
                }
                debug!("access token refreshed");
                Ok(tokens.access_token)
            }
            Err(error) => {
                warn!(error = %error, "token refresh failed, clearing session");
                if let Err(clear_error) = self.credentials.clear() {
                    warn!(error = %clear_error, "failed to clear stored credentials");
                }
                self.session.clear();
                Err(error)
            }
        }
    }
}
