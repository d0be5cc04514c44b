//! Account endpoint paths

use serde::{Deserialize, Serialize};

/// Paths of the account endpoints, relative to the base URL
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EndpointsConfig {
    pub refresh: String,
    pub login: String,
    pub logout: String,
    pub profile: String,
}

impl Default for EndpointsConfig {
    fn default() -> Self {
        Self {
            refresh: "/api/account/refresh-token".to_string(),
            login: "/api/account/login".to_string(),
            logout: "/api/account/logout".to_string(),
            profile: "/api/account/me".to_string(),
        }
    }
}

impl EndpointsConfig {
    pub(crate) fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        [
            ("refresh", self.refresh.as_str()),
            ("login", self.login.as_str()),
            ("logout", self.logout.as_str()),
            ("profile", self.profile.as_str()),
        ]
        .into_iter()
    }
}
