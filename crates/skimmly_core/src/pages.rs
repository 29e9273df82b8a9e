//! crates/skimmly_core/src/pages.rs
//!
//! Per-page controllers. Each page owns the state of its managers and is
//! handed the shared `Services` bundle once, at construction.

use crate::auth::{redirect_for, AccountFlows, NavAction, NavControls};
use crate::comments::CommentsManager;
use crate::domain::{AuthUser, RewardCard, Route};
use crate::error::CoreResult;
use crate::explore::Engagement;
use crate::notes::NotesManager;
use crate::profile::ProfileManager;
use crate::rewards::{RewardBoard, ScoreBoard};
use crate::services::Services;
use tokio::sync::watch;
use tracing::debug;

/// The signed-in user's own page: profile header and uploaded notes.
pub struct ProfilePage {
    pub profile: ProfileManager,
    pub notes: NotesManager,
}

impl ProfilePage {
    pub fn new(services: &Services) -> Self {
        Self {
            profile: ProfileManager::new(services),
            notes: NotesManager::new(services),
        }
    }

    /// Runs the page-load work. A failed profile load leaves the defaults shown.
    pub async fn load(&mut self) {
        let _ = self.profile.load_profile().await;
    }
}

/// The explore feed: comment threads plus like and download counters.
pub struct ExplorePage {
    pub comments: CommentsManager,
    pub engagement: Engagement,
}

impl ExplorePage {
    pub fn new() -> Self {
        Self {
            comments: CommentsManager::seeded(),
            engagement: Engagement::default(),
        }
    }
}

impl Default for ExplorePage {
    fn default() -> Self {
        Self::new()
    }
}

/// The landing page: reward cards, the live score and the auth-aware controls.
pub struct LandingPage {
    pub rewards: RewardBoard,
    pub score: ScoreBoard,
    accounts: AccountFlows,
    auth: watch::Receiver<Option<AuthUser>>,
    nav: NavControls,
}

impl LandingPage {
    pub fn new(services: &Services, cards: Vec<RewardCard>, clear_token_on_sign_out: bool) -> Self {
        let mut auth = services.identity.subscribe();
        let nav = NavControls::for_user(auth.borrow_and_update().as_ref());
        Self {
            rewards: RewardBoard::new(services.scores.clone(), cards),
            score: ScoreBoard::new(services.scores.clone()),
            accounts: AccountFlows::new(services, clear_token_on_sign_out),
            auth,
            nav,
        }
    }

    pub fn nav(&self) -> NavControls {
        self.nav
    }

    /// Waits for the next auth-state notification and rebinds the controls.
    /// Returns `false` once the identity service stops publishing.
    pub async fn next_auth_change(&mut self) -> bool {
        if self.auth.changed().await.is_err() {
            return false;
        }
        self.nav = NavControls::for_user(self.auth.borrow_and_update().as_ref());
        debug!("Landing controls rebound: {:?}", self.nav.sign_in.label);
        true
    }

    /// Performs a control's action. Returns the page to show next, if any.
    pub async fn activate(&self, action: NavAction) -> CoreResult<Option<Route>> {
        match action {
            NavAction::Navigate(route) => Ok(Some(route)),
            NavAction::SignOut => {
                self.accounts.sign_out().await?;
                Ok(Some(Route::Landing))
            }
        }
    }
}

/// The sign-in / sign-up pages: account flows plus the signed-in redirect.
pub struct AuthPage {
    pub accounts: AccountFlows,
    auth: watch::Receiver<Option<AuthUser>>,
}

impl AuthPage {
    pub fn new(services: &Services, clear_token_on_sign_out: bool) -> Self {
        Self {
            accounts: AccountFlows::new(services, clear_token_on_sign_out),
            auth: services.identity.subscribe(),
        }
    }

    pub fn redirect(&self) -> Option<Route> {
        redirect_for(self.auth.borrow().as_ref())
    }
}
