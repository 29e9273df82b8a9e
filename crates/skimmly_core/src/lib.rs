pub mod auth;
pub mod comments;
pub mod domain;
pub mod error;
pub mod explore;
pub mod notes;
pub mod pages;
pub mod ports;
pub mod profile;
pub mod rewards;
pub mod services;

pub use domain::{
    AccountSync, AuthUser, Comment, NoteItem, Profile, ProfileUpdate, RewardCard, Route,
    SyncResult, UploadFile,
};
pub use error::{CoreError, CoreResult};
pub use pages::{AuthPage, ExplorePage, LandingPage, ProfilePage};
pub use ports::{
    AuthFailure, Confirmer, FileDecoder, IdentityService, Notifier, PortError, PortResult,
    ProfileBackend, ScoreSnapshot, ScoreStore, TokenStore,
};
pub use services::Services;
