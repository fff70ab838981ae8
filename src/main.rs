mod config;
mod dictionary;
mod game;
mod models;
mod routes;
mod utils;

use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use anyhow::Result;
use axum::Router;
use config::Config;
use dashmap::DashMap;
use dictionary::WordList;
use game::GameSession;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

/// How often idle sessions are swept
pub const SESSION_CLEANUP_INTERVAL: Duration = Duration::from_secs(15);

/// A session held by the server, with the wall clock its countdown follows
#[derive(Debug)]
pub struct ActiveSession {
    pub session: GameSession,
    /// Last time the countdown was brought up to date
    pub last_tick: Instant,
}

impl ActiveSession {
    pub fn new(session: GameSession) -> Self {
        Self {
            session,
            last_tick: Instant::now(),
        }
    }

    /// Advance the countdown by the wall time since the last request
    pub fn sync(&mut self, now: Instant) {
        self.session.advance(now.saturating_duration_since(self.last_tick));
        self.last_tick = now;
    }

    pub fn is_idle(&self, now: Instant, timeout: Duration) -> bool {
        now.saturating_duration_since(self.last_tick) > timeout
    }
}

/// Application state shared across all handlers
pub struct AppState {
    pub config: Config,
    pub word_list: WordList,
    pub sessions: DashMap<Uuid, ActiveSession>,
}

impl AppState {
    pub fn new(config: Config, word_list: WordList) -> Self {
        Self {
            config,
            word_list,
            sessions: DashMap::new(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "word_finder_backend=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Word Finder backend server...");

    // Load configuration
    let config = Config::from_env()?;
    tracing::info!("Configuration loaded");

    // Load word list
    let word_list = match WordList::load(&config.game.word_list_path).await {
        Ok(list) if list.is_empty() => {
            tracing::warn!("Word list {} has no words", config.game.word_list_path);
            list
        }
        Ok(list) => list,
        Err(e) => {
            tracing::warn!("Failed to load word list: {:#}. Using an empty list.", e);
            tracing::warn!(
                "Classic and endless sessions need a word list at {}",
                config.game.word_list_path
            );
            WordList::empty()
        }
    };

    let state = Arc::new(AppState::new(config.clone(), word_list));

    // Spawn background task to drop sessions nobody touches any more
    let cleanup_state = state.clone();
    tokio::spawn(async move {
        session_cleanup_task(cleanup_state).await;
    });

    // Configure CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .merge(routes::create_routes())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    let addr = config.server_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Server listening on {}", addr);
    tracing::info!("Health check: http://{}/health", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Remove sessions idle beyond the timeout, returning how many were dropped
fn remove_idle_sessions(state: &AppState, now: Instant) -> usize {
    let timeout = state.config.game.session_idle_timeout;
    let stale: Vec<Uuid> = state
        .sessions
        .iter()
        .filter(|entry| entry.is_idle(now, timeout))
        .map(|entry| *entry.key())
        .collect();

    for session_id in &stale {
        if state.sessions.remove(session_id).is_some() {
            tracing::info!("Removed idle session {}", session_id);
        }
    }
    stale.len()
}

/// Background task that periodically drops idle sessions
async fn session_cleanup_task(state: Arc<AppState>) {
    let mut interval = tokio::time::interval(SESSION_CLEANUP_INTERVAL);

    loop {
        interval.tick().await;
        remove_idle_sessions(&state, Instant::now());
    }
}
