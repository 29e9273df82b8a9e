//! crates/skimmly_core/src/domain.rs
//!
//! Defines the pure, core data structures for the client.
//! These structs are independent of any transport or serialization format.

use chrono::{DateTime, Utc};
use std::path::PathBuf;

/// A user profile as last returned by the REST backend.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Profile {
    pub id: Option<i64>,
    pub username: Option<String>,
    pub education_level: Option<String>,
    pub pronouns: Option<String>,
    pub bio: Option<String>,
    pub email: Option<String>,
    pub followers_count: u64,
    pub following_count: u64,
    pub notes_count: u64,
}

/// The editable subset of a profile, sent on save.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileUpdate {
    pub username: String,
    pub education_level: String,
    pub pronouns: String,
}

/// Names sent to the backend when an identity account is first created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountSync {
    pub first_name: String,
    pub last_name: String,
}

/// The backend's answer to an account sync.
#[derive(Debug, Clone)]
pub struct SyncResult {
    pub message: String,
    pub user: Option<Profile>,
}

/// An identity returned by the auth provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    pub uid: String,
    pub email: String,
    pub id_token: String,
}

/// A file handed to the client by a picker or a drop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub name: String,
    pub mime_type: String,
    pub path: PathBuf,
}

impl UploadFile {
    pub fn is_image(&self) -> bool {
        self.mime_type.starts_with("image/")
    }
}

/// A note image uploaded during this session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteItem {
    pub id: String,
    pub file_name: String,
    /// Inline `data:` URL of the image.
    pub image_src: String,
    pub uploaded_at: DateTime<Utc>,
}

// Single comment under a post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub author: String,
    pub text: String,
}

impl Comment {
    pub fn new(author: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            author: author.into(),
            text: text.into(),
        }
    }
}

/// A clickable card that adds its points to the shared score once per session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewardCard {
    pub id: String,
    pub points: i64,
    pub consumed: bool,
}

impl RewardCard {
    pub fn new(id: impl Into<String>, points: i64) -> Self {
        Self {
            id: id.into(),
            points,
            consumed: false,
        }
    }
}

/// The pages a user can be sent to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Landing,
    SignIn,
    SignUp,
    Profile,
}
