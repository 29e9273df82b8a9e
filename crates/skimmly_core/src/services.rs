//! crates/skimmly_core/src/services.rs
//!
//! The bundle of port implementations shared by every page controller.

use crate::ports::{
    Confirmer, FileDecoder, IdentityService, Notifier, ProfileBackend, ScoreStore, TokenStore,
};
use std::sync::Arc;

/// Created once at startup and cloned into each page.
#[derive(Clone)]
pub struct Services {
    pub identity: Arc<dyn IdentityService>,
    pub scores: Arc<dyn ScoreStore>,
    pub backend: Arc<dyn ProfileBackend>,
    pub tokens: Arc<dyn TokenStore>,
    pub decoder: Arc<dyn FileDecoder>,
    pub notifier: Arc<dyn Notifier>,
    pub confirmer: Arc<dyn Confirmer>,
}
