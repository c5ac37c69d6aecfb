//! Moodify - terminal client for the Moodify mood-to-music service
//!
//! Photograph in, playlists out: authenticate, submit a photo (file or
//! camera), read the emotion analysis and browse the recommended
//! playlists, favorites and history.

#![allow(dead_code)]

mod api;
mod config;
mod core;
mod models;
mod stores;
#[cfg(test)]
mod testutil;
mod utils;
mod views;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::{debug, warn};

use crate::api::{ApiClient, ApiError};
use crate::config::{ClientConfig, Paths};
use crate::models::MoodTag;
use crate::stores::{SessionStore, TokenStore};
use crate::views::dashboard::ImageSource;

/// Moodify - mood-based music playlist generator
#[derive(Parser, Debug)]
#[command(name = "moodify")]
#[command(version = "1.0.0")]
#[command(about = "Analyze your mood from a photo and get playlist recommendations")]
struct Args {
    /// Path to config directory
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Backend base URL (overrides settings.json)
    #[arg(long, global = true)]
    server: Option<String>,

    /// Enable debug mode
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create a new account
    Signup {
        #[arg(long)]
        username: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },

    /// Verify a new account with the emailed code
    Verify {
        #[arg(long)]
        username: String,
        #[arg(long)]
        code: u32,
    },

    /// Log in and store the session token
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },

    /// Log out and clear the session
    Logout,

    /// Analyze a photo and get playlist recommendations
    Analyze {
        /// Image file to analyze
        #[arg(long, conflicts_with = "camera")]
        image: Option<PathBuf>,

        /// Capture the photo from the local camera instead
        #[arg(long)]
        camera: bool,

        /// Camera device index (defaults to the configured one)
        #[arg(long, requires = "camera")]
        device: Option<u32>,

        /// Select the Nth recommended playlist (1-based) for detail
        #[arg(long)]
        pick: Option<usize>,
    },

    /// Show the signed-in overview
    Dashboard,

    /// Browse and toggle favorite playlists
    Favorites {
        #[command(subcommand)]
        action: Option<FavoritesAction>,
    },

    /// Browse past analyses
    History {
        #[command(subcommand)]
        action: Option<HistoryAction>,
    },

    /// View or update your profile
    Profile {
        #[command(subcommand)]
        action: Option<ProfileAction>,
    },
}

#[derive(Subcommand, Debug)]
enum FavoritesAction {
    /// List favorites, optionally filtered by mood
    List {
        /// Mood category: all, joy, sorrow, angry, surprise, chill
        #[arg(long)]
        mood: Option<String>,

        /// Query the favorites endpoint instead of the session aggregate
        #[arg(long)]
        remote: bool,
    },

    /// Flip a playlist's favorite status
    Toggle {
        playlist_id: String,

        /// Mood tag to save under when adding
        #[arg(long)]
        mood: Option<String>,

        /// Playlist name to record when it is not in session data
        #[arg(long)]
        name: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
enum HistoryAction {
    /// List past analyses
    List {
        /// Mood category: all, joy, sorrow, angry, surprise, chill
        #[arg(long)]
        mood: Option<String>,

        #[arg(long, default_value_t = 1)]
        page: usize,

        /// Rows per page (defaults to the configured page size)
        #[arg(long)]
        per_page: Option<usize>,
    },

    /// Show one recommended playlist from history
    Show { id: String },
}

#[derive(Subcommand, Debug)]
enum ProfileAction {
    /// Show the current profile
    Show,

    /// Update mobile number, location and optionally the photo
    Update {
        #[arg(long)]
        mobile: String,

        #[arg(long)]
        location: String,

        #[arg(long)]
        photo: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // initialize logging, keeping dependency noise out of the terminal
    let log_level = if args.debug { "debug" } else { "info" };
    let filter = tracing_subscriber::EnvFilter::new(format!(
        "{},hyper=warn,reqwest=warn,cookie_store=warn",
        log_level
    ));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .init();

    if let Err(err) = run(args).await {
        // every failure degrades to a single inline message
        eprintln!("{err}");
        std::process::exit(1);
    }
}

async fn run(args: Args) -> Result<()> {
    let paths = Paths::init(args.config)?;
    debug!("Config directory: {:?}", paths.config_dir());

    let mut config = ClientConfig::load()?;
    if let Some(server) = args.server {
        config.server_url = server.trim_end_matches('/').to_string();
    }
    debug!("Backend: {}", config.server_url);

    // session services, wired explicitly: token transitions reset the
    // session context through the store's subscription
    let tokens = Arc::new(TokenStore::load(paths.token_path()));
    let cookies = api::load_cookie_store(&paths.cookies_path());
    let client = ApiClient::new(
        config.server_url.clone(),
        Arc::clone(&tokens),
        Arc::clone(&cookies),
    )?;
    let session = SessionStore::new();
    session.attach(&tokens);

    let result = dispatch(args.command, &client, &session, &config, &paths).await;

    // the refresh cookie must survive the process
    if let Err(err) = api::save_cookie_store(&cookies, &paths.cookies_path()) {
        warn!("{}", err);
    }

    result.map_err(Into::into)
}

async fn dispatch(
    command: Command,
    client: &ApiClient,
    session: &SessionStore,
    config: &ClientConfig,
    paths: &Paths,
) -> Result<(), ApiError> {
    match command {
        Command::Signup {
            username,
            email,
            password,
        } => views::auth::signup(client, &username, &email, &password).await,

        Command::Verify { username, code } => views::auth::verify(client, &username, code).await,

        Command::Login { email, password } => {
            views::auth::login(client, session, &email, &password).await
        }

        Command::Logout => views::auth::logout(client).await,

        Command::Analyze {
            image,
            camera,
            device,
            pick,
        } => {
            let source = match (image, camera) {
                (Some(path), _) => ImageSource::File(path),
                (None, true) => ImageSource::Camera {
                    device: device.unwrap_or(config.camera_index),
                },
                (None, false) => {
                    return Err(ApiError::invalid(
                        "image",
                        "Please upload or capture the image",
                    ))
                }
            };
            views::dashboard::analyze(client, paths.captures_dir(), source, pick).await
        }

        Command::Dashboard => views::dashboard::overview(client, session).await,

        Command::Favorites { action } => {
            match action.unwrap_or(FavoritesAction::List {
                mood: None,
                remote: false,
            }) {
                FavoritesAction::List { mood, remote } => {
                    views::favorites::list(client, session, parse_mood(mood)?, remote).await
                }
                FavoritesAction::Toggle {
                    playlist_id,
                    mood,
                    name,
                } => {
                    views::favorites::toggle(client, session, &playlist_id, parse_mood(mood)?, name)
                        .await
                }
            }
        }

        Command::History { action } => match action.unwrap_or(HistoryAction::List {
            mood: None,
            page: 1,
            per_page: None,
        }) {
            HistoryAction::List {
                mood,
                page,
                per_page,
            } => {
                views::history::list(
                    client,
                    parse_mood(mood)?,
                    page,
                    per_page.unwrap_or(config.history_page_size),
                )
                .await
            }
            HistoryAction::Show { id } => views::history::show(client, &id).await,
        },

        Command::Profile { action } => match action.unwrap_or(ProfileAction::Show) {
            ProfileAction::Show => views::profile::show(client, session).await,
            ProfileAction::Update {
                mobile,
                location,
                photo,
            } => views::profile::update(client, &mobile, &location, photo.as_deref()).await,
        },
    }
}

fn parse_mood(value: Option<String>) -> Result<MoodTag, ApiError> {
    match value {
        None => Ok(MoodTag::All),
        Some(v) => MoodTag::from_str(&v).ok_or_else(|| {
            ApiError::invalid(
                "mood",
                format!(
                    "Unknown mood '{}'. Try: all, joy, sorrow, angry, surprise, chill",
                    v
                ),
            )
        }),
    }
}
