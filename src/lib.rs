//! Jazz Preview Player Library
//!
//! This library authenticates against the Spotify Web API with the OAuth
//! client-credentials grant, fetches one batch of tracks for a fixed genre
//! query and steps through their 30-second preview clips with play, pause,
//! next and previous controls.
//!
//! # Modules
//!
//! - `audio` - Preview decoding and audio device output
//! - `cli` - Command-line interface implementations
//! - `config` - Configuration management and environment variables
//! - `error` - The error taxonomy shared by every layer
//! - `management` - Stateful components: credential broker, playback controller, session
//! - `spotify` - Spotify Web API calls (token exchange, track search)
//! - `types` - Data structures and type definitions
//! - `utils` - Utility functions and helpers
//! - `view` - The rendering contract for the player widget
//!
//! # Example
//!
//! ```
//! use jazzbox::{config, management::{AudioSurface, Session}};
//!
//! #[tokio::main]
//! async fn main() -> jazzbox::Res<()> {
//!     config::load_env().await?;
//!     let (surface, _events) = AudioSurface::new(reqwest::Client::new())?;
//!     let mut session = Session::from_env(surface)?;
//!     session.start().await;
//!     Ok(())
//! }
//! ```

pub mod audio;
pub mod cli;
pub mod config;
pub mod error;
pub mod management;
pub mod spotify;
pub mod types;
pub mod utils;
pub mod view;

/// A convenient Result type alias for the binary and CLI layer.
///
/// Library operations return [`error::PlayerError`]; this alias is used where
/// errors of several kinds are funneled into a single report.
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints an informational message with a blue bullet point.
///
/// # Example
///
/// ```
/// info!("Fetching tracks for {}", query);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
///
/// # Example
///
/// ```
/// success!("Loaded {} playable tracks", count);
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Only the binary and CLI layer use this macro. Library code logs absorbed
/// failures with [`warning!`] and keeps running.
///
/// # Example
///
/// ```
/// error!("Missing required environment variable: {}", var_name);
/// // Program exits here - code after this will not execute
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// Used for every failure that is absorbed rather than propagated: a failed
/// token exchange, a failed search, a missing playback surface or a refused
/// play request.
///
/// # Example
///
/// ```
/// warning!("Track search failed: {}", err);
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
