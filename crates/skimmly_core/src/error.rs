//! crates/skimmly_core/src/error.rs
//!
//! The error type returned by page-level operations.

use crate::ports::PortError;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// Input rejected locally, before any network call.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// An error that propagated up from one of the ports.
    #[error("Service Port Error: {0}")]
    Port(#[from] PortError),

    #[error("No post is open")]
    NoPostOpen,

    #[error("Unknown reward card: {0}")]
    UnknownCard(String),
}

pub type CoreResult<T> = Result<T, CoreError>;
