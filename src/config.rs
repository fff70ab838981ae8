use anyhow::{Context, Result};
use std::{env, str::FromStr, time::Duration};

use crate::{
    game::generator::{
        GenerationLimits, MAX_ATTEMPTS_PER_WORD, MAX_GRID_SIZE, MAX_WORD_SUBSTITUTIONS,
    },
    utils::letters::FillerAlphabet,
};

#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub game: GameConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct GameConfig {
    pub word_list_path: String,
    pub filler_alphabet: FillerAlphabet,
    pub limits: GenerationLimits,
    pub max_hints: u32,
    /// Sessions untouched for this long are dropped
    pub session_idle_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 3000,
            },
            game: GameConfig {
                word_list_path: "./words.txt".to_string(),
                filler_alphabet: FillerAlphabet::arabic(),
                limits: GenerationLimits::default(),
                max_hints: 3,
                session_idle_timeout: Duration::from_secs(600),
            },
        }
    }
}

/// Parse an optional variable, falling back to `default` when unset or malformed
fn var_or<T: FromStr>(key: &str, default: T) -> T {
    match env::var(key) {
        Ok(value) => value.trim().parse().unwrap_or_else(|_| {
            tracing::warn!("{} has an invalid value '{}', using the default", key, value);
            default
        }),
        Err(_) => default,
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let server = ServerConfig {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .context("PORT must be a number")?,
        };

        let filler_alphabet = match env::var("FILLER_ALPHABET") {
            Ok(value) => FillerAlphabet::parse(&value).unwrap_or_else(|| {
                tracing::warn!("FILLER_ALPHABET has no usable letters, using the Arabic alphabet");
                FillerAlphabet::arabic()
            }),
            Err(_) => FillerAlphabet::arabic(),
        };

        let game = GameConfig {
            word_list_path: env::var("WORD_LIST_PATH")
                .unwrap_or_else(|_| "./words.txt".to_string()),
            filler_alphabet,
            limits: GenerationLimits {
                max_attempts_per_word: var_or("MAX_PLACEMENT_ATTEMPTS", MAX_ATTEMPTS_PER_WORD)
                    .max(1),
                max_substitutions: var_or("MAX_WORD_SUBSTITUTIONS", MAX_WORD_SUBSTITUTIONS),
                max_grid_size: var_or("MAX_GRID_SIZE", MAX_GRID_SIZE).max(1),
            },
            max_hints: var_or("MAX_HINTS", 3),
            session_idle_timeout: Duration::from_secs(var_or("SESSION_IDLE_TIMEOUT", 600)),
        };

        Ok(Config { server, game })
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
