//! crates/skimmly_core/src/profile.rs
//!
//! Reconciles the locally held profile with the REST backend and owns the
//! display/edit view state of the profile header.

use crate::domain::{Profile, ProfileUpdate, UploadFile};
use crate::error::CoreResult;
use crate::ports::{FileDecoder, Notifier, PortError, PortResult, ProfileBackend, TokenStore};
use crate::services::Services;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

pub const SAVE_FAILED_MESSAGE: &str = "Failed to save profile. Please try again.";

/// Likes are not tracked by the backend yet; the header shows an estimate.
const LIKES_PER_NOTE: u64 = 15;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditMode {
    Display,
    Editing,
}

/// The read-only header fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileDisplay {
    pub name: String,
    pub education: String,
    pub pronouns: String,
    pub followers: u64,
    pub following: u64,
    pub likes: u64,
}

impl ProfileDisplay {
    fn render(profile: &Profile) -> Self {
        Self {
            name: non_empty_or(&profile.username, "Enter your name"),
            education: non_empty_or(&profile.education_level, "Education not set"),
            pronouns: non_empty_or(&profile.pronouns, "Pronouns not set"),
            followers: profile.followers_count,
            following: profile.following_count,
            likes: profile.notes_count.saturating_mul(LIKES_PER_NOTE),
        }
    }
}

/// The edit form inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileForm {
    pub username: String,
    pub education_level: String,
    pub pronouns: String,
}

impl ProfileForm {
    fn render(profile: &Profile) -> Self {
        Self {
            username: profile.username.clone().unwrap_or_default(),
            education_level: profile.education_level.clone().unwrap_or_default(),
            pronouns: profile.pronouns.clone().unwrap_or_default(),
        }
    }

    fn to_update(&self) -> ProfileUpdate {
        ProfileUpdate {
            username: self.username.clone(),
            education_level: self.education_level.clone(),
            pronouns: self.pronouns.clone(),
        }
    }
}

fn non_empty_or(value: &Option<String>, placeholder: &str) -> String {
    match value.as_deref() {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => placeholder.to_string(),
    }
}

pub struct ProfileManager {
    backend: Arc<dyn ProfileBackend>,
    tokens: Arc<dyn TokenStore>,
    decoder: Arc<dyn FileDecoder>,
    notifier: Arc<dyn Notifier>,
    profile: Option<Profile>,
    display: ProfileDisplay,
    form: ProfileForm,
    mode: EditMode,
    avatar: Option<String>,
    cover: Option<String>,
}

impl ProfileManager {
    pub fn new(services: &Services) -> Self {
        Self {
            backend: services.backend.clone(),
            tokens: services.tokens.clone(),
            decoder: services.decoder.clone(),
            notifier: services.notifier.clone(),
            profile: None,
            display: ProfileDisplay::render(&Profile::default()),
            form: ProfileForm::default(),
            mode: EditMode::Display,
            avatar: None,
            cover: None,
        }
    }

    pub fn profile(&self) -> Option<&Profile> {
        self.profile.as_ref()
    }

    pub fn display(&self) -> &ProfileDisplay {
        &self.display
    }

    pub fn form(&self) -> &ProfileForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut ProfileForm {
        &mut self.form
    }

    pub fn mode(&self) -> EditMode {
        self.mode
    }

    pub fn avatar(&self) -> Option<&str> {
        self.avatar.as_deref()
    }

    pub fn cover(&self) -> Option<&str> {
        self.cover.as_deref()
    }

    /// Fetches the profile. Failures are logged and leave the current view as is.
    pub async fn load_profile(&mut self) -> CoreResult<()> {
        match self.fetch().await {
            Ok(profile) => {
                info!("Profile loaded for {:?}", profile.username);
                self.profile = Some(profile);
                self.refresh();
                Ok(())
            }
            Err(e) => {
                error!("Failed to load profile: {}", e);
                Err(e.into())
            }
        }
    }

    /// Sends the edit form. On failure the form keeps the attempted values.
    pub async fn save_profile(&mut self) -> CoreResult<()> {
        let update = self.form.to_update();
        debug!("Saving profile data: {:?}", update);

        match self.push(&update).await {
            Ok(profile) => {
                info!("Profile updated successfully");
                self.profile = Some(profile);
                self.refresh();
                self.mode = EditMode::Display;
                Ok(())
            }
            Err(e) => {
                error!("Failed to save profile: {}", e);
                self.notifier.show(SAVE_FAILED_MESSAGE);
                self.mode = EditMode::Editing;
                Err(e.into())
            }
        }
    }

    pub fn toggle_edit(&mut self) {
        match self.mode {
            EditMode::Display => self.mode = EditMode::Editing,
            EditMode::Editing => self.cancel_edit(),
        }
    }

    /// Discards unsaved edits.
    pub fn cancel_edit(&mut self) {
        self.refresh();
        self.mode = EditMode::Display;
    }

    pub async fn change_profile_picture(&mut self, file: &UploadFile) -> CoreResult<()> {
        let src = self.decode(file).await?;
        self.avatar = Some(src);
        Ok(())
    }

    pub async fn change_cover_photo(&mut self, file: &UploadFile) -> CoreResult<()> {
        let src = self.decode(file).await?;
        self.cover = Some(src);
        Ok(())
    }

    async fn decode(&self, file: &UploadFile) -> PortResult<String> {
        self.decoder.read_as_data_url(file).await.inspect_err(|e| {
            warn!("Failed to read {}: {}", file.name, e);
        })
    }

    async fn fetch(&self) -> PortResult<Profile> {
        let token = self.bearer_token()?;
        self.backend.fetch_profile(&token).await
    }

    async fn push(&self, update: &ProfileUpdate) -> PortResult<Profile> {
        let token = self.bearer_token()?;
        self.backend.update_profile(&token, update).await
    }

    // Read on every call; the token may have changed since the last request.
    fn bearer_token(&self) -> PortResult<String> {
        self.tokens.load()?.ok_or(PortError::Unauthorized)
    }

    fn refresh(&mut self) {
        let Some(profile) = self.profile.as_ref() else {
            return;
        };
        self.display = ProfileDisplay::render(profile);
        self.form = ProfileForm::render(profile);
    }
}
