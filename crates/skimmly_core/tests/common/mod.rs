//! In-memory implementations of every port, shared by the integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use skimmly_core::{
    AccountSync, AuthFailure, AuthUser, Confirmer, FileDecoder, IdentityService, Notifier,
    PortError, PortResult, Profile, ProfileBackend, ProfileUpdate, ScoreSnapshot, ScoreStore,
    Services, SyncResult, TokenStore, UploadFile,
};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::{watch, Barrier};

//=========================================================================================
// REST backend
//=========================================================================================

#[derive(Default)]
pub struct FakeBackend {
    pub profile: Mutex<Profile>,
    pub fail_fetch: AtomicBool,
    pub fail_update: AtomicBool,
    pub fail_sync: AtomicBool,
    pub fetch_calls: AtomicUsize,
    pub update_calls: AtomicUsize,
    pub sync_calls: AtomicUsize,
    pub tokens_seen: Mutex<Vec<String>>,
    pub last_update: Mutex<Option<ProfileUpdate>>,
    pub last_sync: Mutex<Option<AccountSync>>,
}

#[async_trait]
impl ProfileBackend for FakeBackend {
    async fn fetch_profile(&self, token: &str) -> PortResult<Profile> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        self.tokens_seen.lock().unwrap().push(token.to_string());
        if self.fail_fetch.load(Ordering::SeqCst) {
            return Err(PortError::Unexpected("500 Internal Server Error".into()));
        }
        Ok(self.profile.lock().unwrap().clone())
    }

    async fn update_profile(&self, token: &str, update: &ProfileUpdate) -> PortResult<Profile> {
        self.update_calls.fetch_add(1, Ordering::SeqCst);
        self.tokens_seen.lock().unwrap().push(token.to_string());
        *self.last_update.lock().unwrap() = Some(update.clone());
        if self.fail_update.load(Ordering::SeqCst) {
            return Err(PortError::Unexpected("400 Username already exists".into()));
        }
        let mut profile = self.profile.lock().unwrap();
        // The server normalizes usernames; tests can tell its copy from the form's.
        profile.username = Some(update.username.trim().to_lowercase());
        profile.education_level = Some(update.education_level.clone());
        profile.pronouns = Some(update.pronouns.clone());
        Ok(profile.clone())
    }

    async fn sync_account(&self, id_token: &str, account: &AccountSync) -> PortResult<SyncResult> {
        self.sync_calls.fetch_add(1, Ordering::SeqCst);
        self.tokens_seen.lock().unwrap().push(id_token.to_string());
        *self.last_sync.lock().unwrap() = Some(account.clone());
        if self.fail_sync.load(Ordering::SeqCst) {
            return Err(PortError::Unexpected("503 Service Unavailable".into()));
        }
        Ok(SyncResult {
            message: "User synced successfully".into(),
            user: None,
        })
    }
}

//=========================================================================================
// Token store
//=========================================================================================

#[derive(Default)]
pub struct MemoryTokens {
    pub token: Mutex<Option<String>>,
}

impl MemoryTokens {
    pub fn set(&self, token: &str) {
        *self.token.lock().unwrap() = Some(token.to_string());
    }

    pub fn get(&self) -> Option<String> {
        self.token.lock().unwrap().clone()
    }
}

impl TokenStore for MemoryTokens {
    fn load(&self) -> PortResult<Option<String>> {
        Ok(self.get())
    }

    fn store(&self, token: &str) -> PortResult<()> {
        self.set(token);
        Ok(())
    }

    fn clear(&self) -> PortResult<()> {
        *self.token.lock().unwrap() = None;
        Ok(())
    }
}

//=========================================================================================
// File decoding
//=========================================================================================

/// Decodes to `data:<mime>;base64,<name>` after a per-file delay.
#[derive(Default)]
pub struct FakeDecoder {
    pub delays: Mutex<HashMap<String, Duration>>,
    pub failing: Mutex<Vec<String>>,
    pub calls: AtomicUsize,
}

impl FakeDecoder {
    pub fn delay(&self, name: &str, millis: u64) {
        self.delays
            .lock()
            .unwrap()
            .insert(name.to_string(), Duration::from_millis(millis));
    }

    pub fn fail(&self, name: &str) {
        self.failing.lock().unwrap().push(name.to_string());
    }
}

#[async_trait]
impl FileDecoder for FakeDecoder {
    async fn read_as_data_url(&self, file: &UploadFile) -> PortResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let delay = self.delays.lock().unwrap().get(&file.name).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        if self.failing.lock().unwrap().contains(&file.name) {
            return Err(PortError::Unexpected(format!("cannot read {}", file.name)));
        }
        Ok(format!("data:{};base64,{}", file.mime_type, file.name))
    }
}

pub fn image(name: &str) -> UploadFile {
    UploadFile {
        name: name.to_string(),
        mime_type: "image/png".to_string(),
        path: PathBuf::from(name),
    }
}

pub fn document(name: &str) -> UploadFile {
    UploadFile {
        name: name.to_string(),
        mime_type: "application/pdf".to_string(),
        path: PathBuf::from(name),
    }
}

//=========================================================================================
// Prompts
//=========================================================================================

#[derive(Default)]
pub struct RecordingNotifier {
    pub messages: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn show(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_string());
    }
}

pub struct ScriptedConfirmer {
    pub answer: AtomicBool,
    pub prompts: AtomicUsize,
}

impl Default for ScriptedConfirmer {
    fn default() -> Self {
        Self {
            answer: AtomicBool::new(true),
            prompts: AtomicUsize::new(0),
        }
    }
}

impl Confirmer for ScriptedConfirmer {
    fn confirm(&self, _prompt: &str) -> bool {
        self.prompts.fetch_add(1, Ordering::SeqCst);
        self.answer.load(Ordering::SeqCst)
    }
}

//=========================================================================================
// Identity
//=========================================================================================

pub struct FakeIdentity {
    pub state: watch::Sender<Option<AuthUser>>,
    pub failure: Mutex<Option<AuthFailure>>,
    pub sign_up_calls: AtomicUsize,
    pub sign_in_calls: AtomicUsize,
    pub sign_out_calls: AtomicUsize,
}

impl Default for FakeIdentity {
    fn default() -> Self {
        let (state, _) = watch::channel(None);
        Self {
            state,
            failure: Mutex::new(None),
            sign_up_calls: AtomicUsize::new(0),
            sign_in_calls: AtomicUsize::new(0),
            sign_out_calls: AtomicUsize::new(0),
        }
    }
}

impl FakeIdentity {
    pub fn fail_with(&self, failure: AuthFailure) {
        *self.failure.lock().unwrap() = Some(failure);
    }

    fn issue(&self, email: &str) -> PortResult<AuthUser> {
        if let Some(failure) = self.failure.lock().unwrap().clone() {
            return Err(PortError::Auth(failure));
        }
        let user = AuthUser {
            uid: format!("uid-{email}"),
            email: email.to_string(),
            id_token: format!("id-token-{email}"),
        };
        self.state.send_replace(Some(user.clone()));
        Ok(user)
    }
}

#[async_trait]
impl IdentityService for FakeIdentity {
    async fn sign_up(&self, email: &str, _password: &str) -> PortResult<AuthUser> {
        self.sign_up_calls.fetch_add(1, Ordering::SeqCst);
        self.issue(email)
    }

    async fn sign_in(&self, email: &str, _password: &str) -> PortResult<AuthUser> {
        self.sign_in_calls.fetch_add(1, Ordering::SeqCst);
        self.issue(email)
    }

    async fn sign_out(&self) -> PortResult<()> {
        self.sign_out_calls.fetch_add(1, Ordering::SeqCst);
        self.state.send_replace(None);
        Ok(())
    }

    fn subscribe(&self) -> watch::Receiver<Option<AuthUser>> {
        self.state.subscribe()
    }
}

//=========================================================================================
// Score document
//=========================================================================================

pub struct MemoryScores {
    pub total: Mutex<Option<i64>>,
    pub snapshots: watch::Sender<Option<ScoreSnapshot>>,
    /// When set, every read waits here after observing the total.
    pub read_gate: Mutex<Option<Arc<Barrier>>>,
    pub writes: Mutex<Vec<i64>>,
    pub creates: AtomicUsize,
}

impl MemoryScores {
    pub fn with_total(total: Option<i64>) -> Self {
        let (snapshots, _) = watch::channel(None);
        Self {
            total: Mutex::new(total),
            snapshots,
            read_gate: Mutex::new(None),
            writes: Mutex::new(Vec::new()),
            creates: AtomicUsize::new(0),
        }
    }

    pub fn gate_reads(&self, parties: usize) {
        *self.read_gate.lock().unwrap() = Some(Arc::new(Barrier::new(parties)));
    }

    pub fn total(&self) -> Option<i64> {
        *self.total.lock().unwrap()
    }

    pub fn publish(&self) {
        let snapshot = match self.total() {
            Some(total) => ScoreSnapshot::Present(total),
            None => ScoreSnapshot::Missing,
        };
        self.snapshots.send_replace(Some(snapshot));
    }
}

#[async_trait]
impl ScoreStore for MemoryScores {
    async fn read_total(&self) -> PortResult<Option<i64>> {
        let observed = self.total();
        let gate = self.read_gate.lock().unwrap().clone();
        if let Some(gate) = gate {
            gate.wait().await;
        }
        Ok(observed)
    }

    async fn write_total(&self, total: i64) -> PortResult<()> {
        if self.total().is_none() {
            return Err(PortError::NotFound("app-data/scores".into()));
        }
        *self.total.lock().unwrap() = Some(total);
        self.writes.lock().unwrap().push(total);
        self.publish();
        Ok(())
    }

    async fn create(&self, total: i64) -> PortResult<()> {
        self.creates.fetch_add(1, Ordering::SeqCst);
        *self.total.lock().unwrap() = Some(total);
        self.publish();
        Ok(())
    }

    fn subscribe(&self) -> watch::Receiver<Option<ScoreSnapshot>> {
        self.snapshots.subscribe()
    }
}

//=========================================================================================
// Harness
//=========================================================================================

pub struct Harness {
    pub identity: Arc<FakeIdentity>,
    pub scores: Arc<MemoryScores>,
    pub backend: Arc<FakeBackend>,
    pub tokens: Arc<MemoryTokens>,
    pub decoder: Arc<FakeDecoder>,
    pub notifier: Arc<RecordingNotifier>,
    pub confirmer: Arc<ScriptedConfirmer>,
}

impl Harness {
    pub fn new() -> Self {
        Self {
            identity: Arc::new(FakeIdentity::default()),
            scores: Arc::new(MemoryScores::with_total(Some(0))),
            backend: Arc::new(FakeBackend::default()),
            tokens: Arc::new(MemoryTokens::default()),
            decoder: Arc::new(FakeDecoder::default()),
            notifier: Arc::new(RecordingNotifier::default()),
            confirmer: Arc::new(ScriptedConfirmer::default()),
        }
    }

    pub fn services(&self) -> Services {
        Services {
            identity: self.identity.clone(),
            scores: self.scores.clone(),
            backend: self.backend.clone(),
            tokens: self.tokens.clone(),
            decoder: self.decoder.clone(),
            notifier: self.notifier.clone(),
            confirmer: self.confirmer.clone(),
        }
    }
}

pub fn sample_profile() -> Profile {
    Profile {
        id: Some(7),
        username: Some("ada_l".into()),
        education_level: Some("University".into()),
        pronouns: Some("she/her".into()),
        bio: None,
        email: Some("ada@example.com".into()),
        followers_count: 12,
        following_count: 3,
        notes_count: 4,
    }
}
