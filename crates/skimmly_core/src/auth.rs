//! crates/skimmly_core/src/auth.rs
//!
//! Sign-up, sign-in and sign-out flows, and the controls that change with the
//! auth state.

use crate::domain::{AccountSync, AuthUser, Route};
use crate::error::{CoreError, CoreResult};
use crate::ports::{AuthFailure, IdentityService, Notifier, PortError, ProfileBackend, TokenStore};
use crate::services::Services;
use std::sync::Arc;
use tracing::{error, info, warn};

pub const MIN_PASSWORD_LEN: usize = 6;

pub const MISSING_FIELDS_MESSAGE: &str = "Please fill out all fields.";
pub const SHORT_PASSWORD_MESSAGE: &str = "Password must be at least 6 characters long.";
pub const ACCOUNT_CREATED_MESSAGE: &str = "Account created successfully!";
pub const ACCOUNT_CREATED_UNSYNCED_MESSAGE: &str =
    "Account created successfully! (Note: Some features may be limited until backend is configured)";
pub const LOGIN_SUCCESS_MESSAGE: &str = "Login successful!";
pub const INVALID_LOGIN_MESSAGE: &str = "Invalid email or password. Please try again.";
pub const GENERIC_ERROR_MESSAGE: &str = "An error occurred. Please try again later.";

//=========================================================================================
// Account Flows
//=========================================================================================

#[derive(Debug, Clone, Default)]
pub struct SignUpForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone)]
pub struct SignUpOutcome {
    pub user: AuthUser,
    /// Whether the best-effort backend sync succeeded.
    pub synced: bool,
}

pub struct AccountFlows {
    identity: Arc<dyn IdentityService>,
    backend: Arc<dyn ProfileBackend>,
    tokens: Arc<dyn TokenStore>,
    notifier: Arc<dyn Notifier>,
    clear_token_on_sign_out: bool,
}

impl AccountFlows {
    pub fn new(services: &Services, clear_token_on_sign_out: bool) -> Self {
        Self {
            identity: services.identity.clone(),
            backend: services.backend.clone(),
            tokens: services.tokens.clone(),
            notifier: services.notifier.clone(),
            clear_token_on_sign_out,
        }
    }

    pub async fn sign_up(&self, form: &SignUpForm) -> CoreResult<SignUpOutcome> {
        let first_name = form.first_name.trim();
        let last_name = form.last_name.trim();
        let email = form.email.trim();

        if first_name.is_empty()
            || last_name.is_empty()
            || email.is_empty()
            || form.password.is_empty()
        {
            return Err(self.reject(MISSING_FIELDS_MESSAGE));
        }
        if form.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(self.reject(SHORT_PASSWORD_MESSAGE));
        }

        let user = match self.identity.sign_up(email, &form.password).await {
            Ok(user) => user,
            Err(e) => {
                error!("Error signing up: {}", e);
                self.notifier.show(&sign_up_failure_message(&e));
                return Err(e.into());
            }
        };
        info!("Account created for {}", user.email);
        self.remember(&user);

        let account = AccountSync {
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
        };
        let synced = match self.backend.sync_account(&user.id_token, &account).await {
            Ok(result) => {
                info!("User synced with backend: {}", result.message);
                self.notifier.show(ACCOUNT_CREATED_MESSAGE);
                true
            }
            Err(e) => {
                warn!("Backend sync failed, but account created: {}", e);
                self.notifier.show(ACCOUNT_CREATED_UNSYNCED_MESSAGE);
                false
            }
        };

        Ok(SignUpOutcome { user, synced })
    }

    pub async fn sign_in(&self, email: &str, password: &str) -> CoreResult<AuthUser> {
        match self.identity.sign_in(email, password).await {
            Ok(user) => {
                info!("Signed in as {}", user.email);
                self.remember(&user);
                self.notifier.show(LOGIN_SUCCESS_MESSAGE);
                Ok(user)
            }
            Err(e) => {
                error!("Error signing in: {}", e);
                let message = match e {
                    PortError::Auth(AuthFailure::InvalidCredential) => INVALID_LOGIN_MESSAGE,
                    _ => GENERIC_ERROR_MESSAGE,
                };
                self.notifier.show(message);
                Err(e.into())
            }
        }
    }

    pub async fn sign_out(&self) -> CoreResult<()> {
        if let Err(e) = self.identity.sign_out().await {
            error!("Error signing out: {}", e);
            return Err(e.into());
        }
        if self.clear_token_on_sign_out {
            self.tokens.clear()?;
        }
        info!("Signed out");
        Ok(())
    }

    fn reject(&self, message: &str) -> CoreError {
        self.notifier.show(message);
        CoreError::Validation(message.to_string())
    }

    fn remember(&self, user: &AuthUser) {
        if let Err(e) = self.tokens.store(&user.id_token) {
            warn!("Failed to persist session token: {}", e);
        }
    }
}

pub fn sign_up_failure_message(error: &PortError) -> String {
    match error {
        PortError::Auth(AuthFailure::EmailInUse) => {
            "This email is already in use. Please sign in or use a different email.".to_string()
        }
        PortError::Auth(AuthFailure::WeakPassword) => {
            "Password is too weak. Please use a stronger password.".to_string()
        }
        PortError::Auth(AuthFailure::InvalidEmail) => "The email address is not valid.".to_string(),
        PortError::Auth(AuthFailure::Other(message)) if !message.is_empty() => {
            format!("Error: {message}")
        }
        PortError::Auth(_) => format!("Error: {GENERIC_ERROR_MESSAGE}"),
        other => format!("Error: {other}"),
    }
}

//=========================================================================================
// Auth-State Presentation
//=========================================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavAction {
    Navigate(Route),
    SignOut,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavButton {
    pub label: &'static str,
    pub action: NavAction,
}

impl NavButton {
    const fn new(label: &'static str, action: NavAction) -> Self {
        Self { label, action }
    }
}

/// The three landing-page controls whose meaning depends on the auth state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavControls {
    pub sign_in: NavButton,
    pub sign_up: NavButton,
    pub get_started: NavButton,
}

impl NavControls {
    pub fn for_user(user: Option<&AuthUser>) -> Self {
        match user {
            Some(_) => Self {
                sign_in: NavButton::new("Profile", NavAction::Navigate(Route::Profile)),
                sign_up: NavButton::new("Sign Out", NavAction::SignOut),
                get_started: NavButton::new("Go to Profile", NavAction::Navigate(Route::Profile)),
            },
            None => Self {
                sign_in: NavButton::new("Sign In", NavAction::Navigate(Route::SignIn)),
                sign_up: NavButton::new("Sign Up", NavAction::Navigate(Route::SignUp)),
                get_started: NavButton::new("Get Started", NavAction::Navigate(Route::SignUp)),
            },
        }
    }
}

/// Sign-in and sign-up pages move a signed-in user on to their profile.
pub fn redirect_for(user: Option<&AuthUser>) -> Option<Route> {
    user.map(|_| Route::Profile)
}
