//! crates/skimmly_core/src/ports.rs
//!
//! Defines the service contracts (traits) the client core depends on.
//! These traits form the boundary of the hexagonal architecture: the identity
//! provider, the shared score document, the REST backend, local token storage,
//! file decoding and the two interactive prompts all live behind them.

use async_trait::async_trait;
use tokio::sync::watch;
use crate::domain::{AccountSync, AuthUser, Profile, ProfileUpdate, SyncResult, UploadFile};

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// Provider error codes the client knows how to explain to the user.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthFailure {
    #[error("email already in use")]
    EmailInUse,
    #[error("weak password")]
    WeakPassword,
    #[error("invalid email")]
    InvalidEmail,
    #[error("invalid credential")]
    InvalidCredential,
    #[error("{0}")]
    Other(String),
}

/// A generic error type for all port operations.
/// This abstracts away the specific errors from external services (network, storage).
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Unauthorized")]
    Unauthorized,
    #[error("Authentication failed: {0}")]
    Auth(AuthFailure),
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

/// One observation of the shared score document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreSnapshot {
    Missing,
    Present(i64),
}

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

#[async_trait]
pub trait IdentityService: Send + Sync {
    async fn sign_up(&self, email: &str, password: &str) -> PortResult<AuthUser>;

    async fn sign_in(&self, email: &str, password: &str) -> PortResult<AuthUser>;

    async fn sign_out(&self) -> PortResult<()>;

    /// Subscribes to auth-state changes. Dropping the receiver unsubscribes.
    fn subscribe(&self) -> watch::Receiver<Option<AuthUser>>;
}

/// The single shared score document.
#[async_trait]
pub trait ScoreStore: Send + Sync {
    /// Reads the current total, `None` when the document does not exist.
    async fn read_total(&self) -> PortResult<Option<i64>>;

    /// Overwrites the total of an existing document.
    async fn write_total(&self, total: i64) -> PortResult<()>;

    /// Creates (or replaces) the document with the given total.
    async fn create(&self, total: i64) -> PortResult<()>;

    /// Subscribes to live snapshots. `None` until the first observation arrives.
    fn subscribe(&self) -> watch::Receiver<Option<ScoreSnapshot>>;
}

#[async_trait]
pub trait ProfileBackend: Send + Sync {
    async fn fetch_profile(&self, token: &str) -> PortResult<Profile>;

    /// Returns the server's representation of the profile after the update.
    async fn update_profile(&self, token: &str, update: &ProfileUpdate) -> PortResult<Profile>;

    async fn sync_account(&self, id_token: &str, account: &AccountSync) -> PortResult<SyncResult>;
}

/// Durable storage for the bearer token.
pub trait TokenStore: Send + Sync {
    fn load(&self) -> PortResult<Option<String>>;

    fn store(&self, token: &str) -> PortResult<()>;

    fn clear(&self) -> PortResult<()>;
}

#[async_trait]
pub trait FileDecoder: Send + Sync {
    /// Reads a file and encodes it as an inline `data:` URL.
    async fn read_as_data_url(&self, file: &UploadFile) -> PortResult<String>;
}

/// Shows a blocking, user-visible message.
pub trait Notifier: Send + Sync {
    fn show(&self, message: &str);
}

/// Asks the user a yes/no question.
pub trait Confirmer: Send + Sync {
    fn confirm(&self, prompt: &str) -> bool;
}
