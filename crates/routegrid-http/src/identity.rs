//! Identity/token client
//!
//! One opaque capability token per operation: POST the credentials, read
//! the token id back. No refresh, no caching; a session is valid for the
//! duration of one operation only.

use crate::config::IdentityConfig;
use routegrid_core::{RemoteError, RemoteResult};
use serde::{Deserialize, Serialize};

pub struct IdentityClient {
    client: reqwest::Client,
    config: IdentityConfig,
}

impl IdentityClient {
    pub fn new(config: IdentityConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    /// Exchange credentials for an opaque token.
    pub async fn authenticate(&self) -> RemoteResult<String> {
        let url = format!("{}/tokens", self.config.auth_url.trim_end_matches('/'));
        let request = TokenRequest {
            auth: AuthPayload {
                password_credentials: PasswordCredentials {
                    username: self.config.username.clone(),
                    password: self.config.password.clone(),
                },
                tenant_name: self.config.tenant_name.clone(),
            },
        };

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| RemoteError::Unavailable(e.to_string()))?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN
        {
            return Err(RemoteError::AuthenticationFailed(format!(
                "identity service rejected credentials for '{}'",
                self.config.username
            )));
        }
        if !status.is_success() {
            return Err(RemoteError::Unavailable(format!(
                "identity service returned {status}"
            )));
        }

        let body: TokenResponse = response
            .json()
            .await
            .map_err(|e| RemoteError::Unavailable(e.to_string()))?;
        Ok(body.access.token.id)
    }
}

#[derive(Debug, Serialize)]
struct TokenRequest {
    auth: AuthPayload,
}

#[derive(Debug, Serialize)]
struct AuthPayload {
    #[serde(rename = "passwordCredentials")]
    password_credentials: PasswordCredentials,
    #[serde(rename = "tenantName")]
    tenant_name: String,
}

#[derive(Debug, Serialize)]
struct PasswordCredentials {
    username: String,
    password: String,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access: Access,
}

#[derive(Debug, Deserialize)]
struct Access {
    token: Token,
}

#[derive(Debug, Deserialize)]
struct Token {
    id: String,
}
