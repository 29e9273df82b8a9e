//! services/client/src/bin/skimmly.rs

use clap::{Parser, Subcommand};
use client_lib::{
    adapters::{
        upload_from_path, ConsoleConfirmer, ConsoleNotifier, FileTokenStore,
        FirebaseIdentityAdapter, FirestoreScoreAdapter, FsImageDecoder, RestBackendAdapter,
    },
    config::Config,
    error::ClientError,
};
use skimmly_core::{
    auth::SignUpForm,
    rewards::ClickOutcome,
    AuthPage, LandingPage, ProfilePage, RewardCard, ScoreSnapshot, Services,
};
use std::path::PathBuf;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "skimmly", about = "Command-line client for Skimmly", version)]
struct Cli {
    /// Answer yes to every confirmation prompt.
    #[arg(long, global = true)]
    yes: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create an account and sync it with the backend.
    SignUp {
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    SignIn {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    SignOut,
    Profile {
        #[command(subcommand)]
        action: ProfileCommand,
    },
    Notes {
        #[command(subcommand)]
        action: NotesCommand,
    },
    /// Claim a reward card worth the given points.
    Reward {
        #[arg(long)]
        points: i64,
    },
    Score {
        #[command(subcommand)]
        action: ScoreCommand,
    },
}

#[derive(Subcommand)]
enum ProfileCommand {
    Show,
    Edit {
        #[arg(long)]
        username: Option<String>,
        #[arg(long)]
        education: Option<String>,
        #[arg(long)]
        pronouns: Option<String>,
    },
}

#[derive(Subcommand)]
enum NotesCommand {
    /// Upload note images; other files are skipped.
    Add { paths: Vec<PathBuf> },
}

#[derive(Subcommand)]
enum ScoreCommand {
    /// Print the shared score whenever it changes, until interrupted.
    Watch,
}

#[tokio::main]
async fn main() -> Result<(), ClientError> {
    // --- 1. Load Configuration & Set Up Logging ---
    let cli = Cli::parse();
    let config = Config::from_env()?;
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.log_level.to_string()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
    info!("Configuration loaded.");

    // --- 2. Initialize Service Adapters ---
    let http = reqwest::Client::builder().build()?;
    let scores = Arc::new(FirestoreScoreAdapter::new(
        http.clone(),
        &config.firestore_url,
        config.firebase_project_id.as_deref(),
        config.firebase_api_key.clone(),
    ));
    let services = Services {
        identity: Arc::new(FirebaseIdentityAdapter::new(
            http.clone(),
            config.identity_url.clone(),
            config.firebase_api_key.clone(),
        )),
        scores: scores.clone(),
        backend: Arc::new(RestBackendAdapter::new(http, config.api_url.clone())),
        tokens: Arc::new(FileTokenStore::new(config.token_path.clone())),
        decoder: Arc::new(FsImageDecoder),
        notifier: Arc::new(ConsoleNotifier),
        confirmer: Arc::new(ConsoleConfirmer { assume_yes: cli.yes }),
    };

    // --- 3. Run the Command ---
    match cli.command {
        Command::SignUp {
            first_name,
            last_name,
            email,
            password,
        } => {
            let page = AuthPage::new(&services, config.clear_token_on_sign_out);
            let form = SignUpForm {
                first_name,
                last_name,
                email,
                password,
            };
            let outcome = page.accounts.sign_up(&form).await?;
            println!("uid: {} (synced: {})", outcome.user.uid, outcome.synced);
        }
        Command::SignIn { email, password } => {
            let page = AuthPage::new(&services, config.clear_token_on_sign_out);
            page.accounts.sign_in(&email, &password).await?;
        }
        Command::SignOut => {
            let page = AuthPage::new(&services, config.clear_token_on_sign_out);
            page.accounts.sign_out().await?;
        }
        Command::Profile { action } => {
            let mut page = ProfilePage::new(&services);
            match action {
                ProfileCommand::Show => page.profile.load_profile().await?,
                ProfileCommand::Edit {
                    username,
                    education,
                    pronouns,
                } => {
                    page.profile.load_profile().await?;
                    page.profile.toggle_edit();
                    let form = page.profile.form_mut();
                    if let Some(username) = username {
                        form.username = username;
                    }
                    if let Some(education) = education {
                        form.education_level = education;
                    }
                    if let Some(pronouns) = pronouns {
                        form.pronouns = pronouns;
                    }
                    page.profile.save_profile().await?;
                }
            }
            let display = page.profile.display();
            println!("{}", display.name);
            println!("  {} | {}", display.education, display.pronouns);
            println!(
                "  {} followers, {} following, {} likes",
                display.followers, display.following, display.likes
            );
        }
        Command::Notes {
            action: NotesCommand::Add { paths },
        } => {
            let mut page = ProfilePage::new(&services);
            let files: Vec<_> = paths.iter().map(|p| upload_from_path(p)).collect();
            let added = page.notes.add_notes(&files).await;
            for card in page.notes.grid() {
                println!(
                    "{}  {}  {} ({} bytes inline)",
                    card.id,
                    card.title,
                    card.uploaded_label,
                    card.image_src.len()
                );
            }
            println!("{} of {} files added", added, files.len());
        }
        Command::Reward { points } => {
            let page = LandingPage::new(
                &services,
                vec![RewardCard::new("cli", points)],
                config.clear_token_on_sign_out,
            );
            match page.rewards.click("cli").await? {
                ClickOutcome::Awarded { total } => println!("Score: {}", total),
                ClickOutcome::Ignored => println!("Card already claimed"),
            }
        }
        Command::Score {
            action: ScoreCommand::Watch,
        } => {
            let mut page = LandingPage::new(&services, Vec::new(), config.clear_token_on_sign_out);
            let cancel = CancellationToken::new();
            let watcher = scores.clone().watch(config.score_poll_interval, cancel.clone());
            loop {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => break,
                    snapshot = page.score.next_snapshot() => match snapshot {
                        Some(ScoreSnapshot::Present(total)) => println!("Score: {}", total),
                        Some(ScoreSnapshot::Missing) => println!("Score document created"),
                        None => break,
                    },
                }
            }
            cancel.cancel();
            watcher
                .await
                .map_err(|e| ClientError::Internal(e.to_string()))?;
        }
    }

    Ok(())
}
