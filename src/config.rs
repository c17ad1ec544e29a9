//! Engine configuration with defaults and environment overrides.

use std::env;
use std::time::Duration;

use crate::errors::EngineError;

#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Maximum number of sessions in Lobby/Running state; `create` fails
    /// with `EngineError::Capacity` beyond this.
    pub max_games: usize,
    /// Per-speaking-turn agent deadline.
    pub speak_timeout: Duration,
    /// Per-vote agent deadline.
    pub vote_timeout: Duration,
    /// Per-night-proposal agent deadline.
    pub night_timeout: Duration,
    /// How far a live subscriber may lag before its oldest buffered events
    /// are dropped.
    pub subscriber_buffer: usize,
    /// Initial backoff after a persistence write failure.
    pub persist_retry_base: Duration,
    /// Backoff ceiling for persistence retries.
    pub persist_retry_max: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_games: 64,
            speak_timeout: Duration::from_secs(30),
            vote_timeout: Duration::from_secs(20),
            night_timeout: Duration::from_secs(20),
            subscriber_buffer: 256,
            persist_retry_base: Duration::from_millis(50),
            persist_retry_max: Duration::from_secs(5),
        }
    }
}

impl EngineConfig {
    /// Build a config from `WEREWOLF_*` environment variables, falling back
    /// to defaults for anything unset.
    pub fn from_env() -> Result<Self, EngineError> {
        let defaults = Self::default();
        Ok(Self {
            max_games: env_usize("WEREWOLF_MAX_GAMES", defaults.max_games)?,
            speak_timeout: env_millis("WEREWOLF_SPEAK_TIMEOUT_MS", defaults.speak_timeout)?,
            vote_timeout: env_millis("WEREWOLF_VOTE_TIMEOUT_MS", defaults.vote_timeout)?,
            night_timeout: env_millis("WEREWOLF_NIGHT_TIMEOUT_MS", defaults.night_timeout)?,
            subscriber_buffer: env_usize("WEREWOLF_SUBSCRIBER_BUFFER", defaults.subscriber_buffer)?,
            persist_retry_base: env_millis(
                "WEREWOLF_PERSIST_RETRY_BASE_MS",
                defaults.persist_retry_base,
            )?,
            persist_retry_max: env_millis(
                "WEREWOLF_PERSIST_RETRY_MAX_MS",
                defaults.persist_retry_max,
            )?,
        })
    }
}

fn env_usize(var: &str, default: usize) -> Result<usize, EngineError> {
    match env::var(var) {
        Ok(raw) => raw
            .parse()
            .map_err(|_| EngineError::config(format!("{var} must be a non-negative integer, got '{raw}'"))),
        Err(_) => Ok(default),
    }
}

fn env_millis(var: &str, default: Duration) -> Result<Duration, EngineError> {
    match env::var(var) {
        Ok(raw) => raw
            .parse()
            .map(Duration::from_millis)
            .map_err(|_| EngineError::config(format!("{var} must be milliseconds, got '{raw}'"))),
        Err(_) => Ok(default),
    }
}
