//! Account operations: sign in, profile, sign out

use super::client::ApiClient;
use crate::auth::session::Identity;
use crate::auth::storage::Credentials;
use crate::sdk::{errors::*, types::*};
use serde_json::json;
use tracing::{info, warn};

impl ApiClient {
    /// Sign in, persist the issued tokens and load the profile
    pub async fn login(&self, username: &str, password: &str, remember_me: bool) -> Result<Identity> {
        info!(username, remember_me, "signing in");

        let request = ApiRequest::post(self.config.endpoints.login.as_str())
            .json(&LoginRequest {
                username: username.to_string(),
                password: password.to_string(),
                remember_me,
            })?
            .public();

        let tokens: ApiEnvelope<TokenPair> = self.send(request).await?;
        let refresh_token = tokens
            .data
            .refresh_token
            .ok_or_else(|| ClientError::parse("login response carried no refresh token"))?;

        self.credentials.save(&Credentials {
            access_token: tokens.data.access_token,
            refresh_token,
            remember_me,
        })?;

        self.fetch_profile().await
    }

    /// Load the signed-in user's profile into the session
    pub async fn fetch_profile(&self) -> Result<Identity> {
        let profile: ProfileResponse = self.get(&self.config.endpoints.profile).await?;
        let identity = Identity::from(profile);
        self.session.set_identity(identity.clone());
        Ok(identity)
    }

    /// Sign out. The backend call is best effort; local state is always cleared.
    pub async fn logout(&self) -> Result<()> {
        if let Some(refresh_token) = self.credentials.refresh_token()? {
            let request = ApiRequest::post(self.config.endpoints.logout.as_str())
                .json(&json!({ "refreshToken": refresh_token }))?;
            if let Err(error) = self.execute(request).await {
                warn!(error = %error, "logout request failed");
            }
        }

        self.credentials.clear()?;
        self.session.clear();
        info!("signed out");
        Ok(())
    }
}
