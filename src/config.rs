//! Configuration management for the jazz preview player.
//!
//! This module loads configuration values from environment variables and
//! `.env` files. It covers the Spotify client credentials, the two API
//! endpoints and the fixed track query.
//!
//! The configuration system follows a hierarchical approach:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory, or in the working directory
//! 3. Application defaults (everything except the client credentials)

use dotenv;
use std::{env, path::PathBuf};

use crate::error::{PlayerError, PlayerResult};

/// Default Spotify OAuth token endpoint.
pub const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";

/// Default Spotify Web API base URL.
pub const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";

/// Default genre filter for the track search.
pub const DEFAULT_SEARCH_QUERY: &str = "genre:jazz";

/// Upper bound on tracks requested per search; also the API maximum.
pub const MAX_SEARCH_LIMIT: u32 = 50;

/// Parameters of the one track search issued per session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchSettings {
    pub query: String,
    pub limit: u32,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            query: DEFAULT_SEARCH_QUERY.to_string(),
            limit: MAX_SEARCH_LIMIT,
        }
    }
}

impl SearchSettings {
    /// Reads `JAZZBOX_SEARCH_QUERY` and `JAZZBOX_SEARCH_LIMIT`, falling back to
    /// the defaults.
    pub fn from_env() -> Self {
        Self {
            query: search_query(),
            limit: parse_search_limit(env::var("JAZZBOX_SEARCH_LIMIT").ok().as_deref()),
        }
    }
}

/// Loads environment variables from a `.env` file.
///
/// Looks for `jazzbox/.env` in the platform-specific local data directory
/// first (creating the directory when needed) and falls back to a `.env` file
/// in the working directory. A missing file is not an error: the variables
/// may already be set in the process environment.
///
/// # Directory Structure
///
/// - Linux: `~/.local/share/jazzbox/.env`
/// - macOS: `~/Library/Application Support/jazzbox/.env`
/// - Windows: `%LOCALAPPDATA%/jazzbox/.env`
///
/// # Errors
///
/// Returns an error string if the directory cannot be created or an existing
/// `.env` file cannot be parsed.
pub async fn load_env() -> Result<(), String> {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("jazzbox/.env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    if path.is_file() {
        dotenv::from_path(&path).map_err(|e| e.to_string())?;
    } else {
        dotenv::dotenv().ok();
    }

    Ok(())
}

/// Returns the Spotify API client ID.
///
/// # Errors
///
/// `PlayerError::Config` if `SPOTIFY_API_AUTH_CLIENT_ID` is unset or empty.
pub fn spotify_client_id() -> PlayerResult<String> {
    required("SPOTIFY_API_AUTH_CLIENT_ID")
}

/// Returns the Spotify API client secret.
///
/// # Security Note
///
/// The client secret should be kept confidential and never exposed in logs.
///
/// # Errors
///
/// `PlayerError::Config` if `SPOTIFY_API_AUTH_CLIENT_SECRET` is unset or empty.
pub fn spotify_client_secret() -> PlayerResult<String> {
    required("SPOTIFY_API_AUTH_CLIENT_SECRET")
}

/// Returns the Spotify OAuth token exchange URL (`SPOTIFY_API_TOKEN_URL`).
pub fn spotify_apitoken_url() -> String {
    env::var("SPOTIFY_API_TOKEN_URL").unwrap_or_else(|_| DEFAULT_TOKEN_URL.to_string())
}

/// Returns the Spotify Web API base URL (`SPOTIFY_API_URL`).
pub fn spotify_apiurl() -> String {
    env::var("SPOTIFY_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string())
}

/// Returns the track search query (`JAZZBOX_SEARCH_QUERY`).
pub fn search_query() -> String {
    match env::var("JAZZBOX_SEARCH_QUERY") {
        Ok(q) if !q.trim().is_empty() => q,
        _ => DEFAULT_SEARCH_QUERY.to_string(),
    }
}

/// Parses a search limit, clamping to `1..=MAX_SEARCH_LIMIT`.
///
/// Missing or unparsable input yields `MAX_SEARCH_LIMIT`.
pub fn parse_search_limit(raw: Option<&str>) -> u32 {
    raw.and_then(|v| v.trim().parse::<u32>().ok())
        .map(|v| v.clamp(1, MAX_SEARCH_LIMIT))
        .unwrap_or(MAX_SEARCH_LIMIT)
}

fn required(key: &str) -> PlayerResult<String> {
    match env::var(key) {
        Ok(value) if !value.is_empty() => Ok(value),
        _ => Err(PlayerError::Config(format!("{key} must be set"))),
    }
}
