//! services/client/src/adapters/backend.rs
//!
//! This module contains the adapter for the Skimmly REST backend.
//! It implements the `ProfileBackend` port from the `core` crate using `reqwest`.

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::{Deserialize, Serialize};
use skimmly_core::domain::{AccountSync, Profile, ProfileUpdate, SyncResult};
use skimmly_core::ports::{PortError, PortResult, ProfileBackend};
use tracing::debug;

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// An adapter that implements the `ProfileBackend` port over HTTP.
#[derive(Clone)]
pub struct RestBackendAdapter {
    client: Client,
    base_url: String,
}

impl RestBackendAdapter {
    /// Creates a new `RestBackendAdapter` for the given base URL.
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

//=========================================================================================
// Wire Records
//=========================================================================================

#[derive(Deserialize)]
struct ProfileRecord {
    id: Option<i64>,
    username: Option<String>,
    education_level: Option<String>,
    pronouns: Option<String>,
    bio: Option<String>,
    email: Option<String>,
    followers_count: Option<u64>,
    following_count: Option<u64>,
    notes_count: Option<u64>,
}
impl ProfileRecord {
    fn to_domain(self) -> Profile {
        Profile {
            id: self.id,
            username: self.username,
            education_level: self.education_level,
            pronouns: self.pronouns,
            bio: self.bio,
            email: self.email,
            followers_count: self.followers_count.unwrap_or(0),
            following_count: self.following_count.unwrap_or(0),
            notes_count: self.notes_count.unwrap_or(0),
        }
    }
}

/// `{message, user}` as returned by the write endpoints.
#[derive(Deserialize)]
struct UserEnvelope {
    #[serde(default)]
    message: String,
    user: Option<ProfileRecord>,
}

#[derive(Serialize)]
struct ProfileUpdateBody<'a> {
    username: &'a str,
    education_level: &'a str,
    pronouns: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SyncBody<'a> {
    first_name: &'a str,
    last_name: &'a str,
}

/// Maps a non-success response onto a port error, keeping the body for context.
async fn check(response: Response) -> PortResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(match status {
        StatusCode::UNAUTHORIZED => PortError::Unauthorized,
        StatusCode::NOT_FOUND => PortError::NotFound(body),
        _ => PortError::Unexpected(format!("{} {}", status, body)),
    })
}

fn transport(e: reqwest::Error) -> PortError {
    PortError::Unexpected(e.to_string())
}

//=========================================================================================
// `ProfileBackend` Trait Implementation
//=========================================================================================

#[async_trait]
impl ProfileBackend for RestBackendAdapter {
    async fn fetch_profile(&self, token: &str) -> PortResult<Profile> {
        let response = self
            .client
            .get(self.url("/api/profile"))
            .bearer_auth(token)
            .send()
            .await
            .map_err(transport)?;
        let record: ProfileRecord = check(response).await?.json().await.map_err(transport)?;
        Ok(record.to_domain())
    }

    async fn update_profile(&self, token: &str, update: &ProfileUpdate) -> PortResult<Profile> {
        let body = ProfileUpdateBody {
            username: &update.username,
            education_level: &update.education_level,
            pronouns: &update.pronouns,
        };
        let response = self
            .client
            .put(self.url("/api/profile"))
            .bearer_auth(token)
            .json(&body)
            .send()
            .await
            .map_err(transport)?;
        let envelope: UserEnvelope = check(response).await?.json().await.map_err(transport)?;
        debug!("Profile update answered: {}", envelope.message);
        envelope
            .user
            .map(ProfileRecord::to_domain)
            .ok_or_else(|| PortError::Unexpected("profile update returned no user".to_string()))
    }

    async fn sync_account(&self, id_token: &str, account: &AccountSync) -> PortResult<SyncResult> {
        let body = SyncBody {
            first_name: &account.first_name,
            last_name: &account.last_name,
        };
        let response = self
            .client
            .post(self.url("/api/firebase-sync"))
            .bearer_auth(id_token)
            .json(&body)
            .send()
            .await
            .map_err(transport)?;
        let envelope: UserEnvelope = check(response).await?.json().await.map_err(transport)?;
        Ok(SyncResult {
            message: envelope.message,
            user: envelope.user.map(ProfileRecord::to_domain),
        })
    }
}
