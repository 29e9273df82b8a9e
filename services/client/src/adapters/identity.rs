//! services/client/src/adapters/identity.rs
//!
//! This module contains the adapter for the hosted identity provider's REST
//! surface (email/password accounts). It implements the `IdentityService` port.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use skimmly_core::domain::AuthUser;
use skimmly_core::ports::{AuthFailure, IdentityService, PortError, PortResult};
use tokio::sync::watch;
use tracing::{debug, info};

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// Signs users in against the identity provider and publishes the current user.
pub struct FirebaseIdentityAdapter {
    client: Client,
    base_url: String,
    api_key: Option<String>,
    state: watch::Sender<Option<AuthUser>>,
}

impl FirebaseIdentityAdapter {
    pub fn new(client: Client, base_url: impl Into<String>, api_key: Option<String>) -> Self {
        let (state, _) = watch::channel(None);
        Self {
            client,
            base_url: base_url.into(),
            api_key,
            state,
        }
    }

    /// Calls one of the `accounts:*` endpoints with an email/password pair.
    async fn authenticate(&self, action: &str, email: &str, password: &str) -> PortResult<AuthUser> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| PortError::Unexpected("FIREBASE_API_KEY is not configured".to_string()))?;

        let response = self
            .client
            .post(format!("{}/v1/accounts:{}", self.base_url, action))
            .query(&[("key", api_key)])
            .json(&CredentialsBody {
                email,
                password,
                return_secure_token: true,
            })
            .send()
            .await
            .map_err(|e| PortError::Unexpected(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let code = response
                .json::<ErrorEnvelope>()
                .await
                .map(|envelope| envelope.error.message)
                .unwrap_or_else(|_| status.to_string());
            debug!("Identity provider rejected {}: {}", action, code);
            return Err(PortError::Auth(failure_from_code(&code)));
        }

        let record: AccountRecord = response
            .json()
            .await
            .map_err(|e| PortError::Unexpected(e.to_string()))?;
        let user = record.to_domain();
        self.state.send_replace(Some(user.clone()));
        Ok(user)
    }
}

//=========================================================================================
// Wire Records
//=========================================================================================

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CredentialsBody<'a> {
    email: &'a str,
    password: &'a str,
    return_secure_token: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AccountRecord {
    local_id: String,
    #[serde(default)]
    email: String,
    id_token: String,
}
impl AccountRecord {
    fn to_domain(self) -> AuthUser {
        AuthUser {
            uid: self.local_id,
            email: self.email,
            id_token: self.id_token,
        }
    }
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

/// Maps a provider error code such as `WEAK_PASSWORD : Password should be at
/// least 6 characters` onto the failures the client explains to users.
pub fn failure_from_code(message: &str) -> AuthFailure {
    let code = message.split([' ', ':']).next().unwrap_or_default();
    match code {
        "EMAIL_EXISTS" => AuthFailure::EmailInUse,
        "WEAK_PASSWORD" => AuthFailure::WeakPassword,
        "INVALID_EMAIL" => AuthFailure::InvalidEmail,
        "INVALID_LOGIN_CREDENTIALS" | "INVALID_PASSWORD" | "EMAIL_NOT_FOUND" => {
            AuthFailure::InvalidCredential
        }
        _ => AuthFailure::Other(message.to_string()),
    }
}

//=========================================================================================
// `IdentityService` Trait Implementation
//=========================================================================================

#[async_trait]
impl IdentityService for FirebaseIdentityAdapter {
    async fn sign_up(&self, email: &str, password: &str) -> PortResult<AuthUser> {
        self.authenticate("signUp", email, password).await
    }

    async fn sign_in(&self, email: &str, password: &str) -> PortResult<AuthUser> {
        self.authenticate("signInWithPassword", email, password).await
    }

    /// Sign-out is local: the provider keeps no server-side session to end.
    async fn sign_out(&self) -> PortResult<()> {
        self.state.send_replace(None);
        info!("Identity session cleared");
        Ok(())
    }

    fn subscribe(&self) -> watch::Receiver<Option<AuthUser>> {
        self.state.subscribe()
    }
}
