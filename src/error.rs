//! Error types shared by the broker, the search client and the controller.

use thiserror::Error;

/// Everything that can go wrong while acquiring a token, fetching tracks or
/// driving the playback surface.
///
/// None of these are retried. A failed token exchange leaves the session
/// waiting for a token; a failed search leaves it with an empty playlist.
#[derive(Error, Debug)]
pub enum PlayerError {
    /// Required configuration is missing or malformed
    #[error("Configuration error: {0}")]
    Config(String),

    /// Network or HTTP failure during the client-credentials exchange
    #[error("Failed to acquire access token: {0}")]
    CredentialAcquisition(#[source] reqwest::Error),

    /// The single token exchange of this session already failed
    #[error("No access token available for this session")]
    CredentialUnavailable,

    /// Network or HTTP failure during the track search
    #[error("Track search failed: {0}")]
    Search(#[source] reqwest::Error),

    /// A transport toggle arrived while no playback surface is attached
    #[error("Audio surface not found")]
    MissingAudioSurface,

    /// The playback surface declined to start the given source
    #[error("Playback was refused for {0}")]
    AutoplayRejected(String),

    /// The audio device could not be opened or a clip could not be played
    #[error("Audio output error: {0}")]
    Audio(String),
}

impl PlayerError {
    /// HTTP status of the failed request, if the server answered at all.
    pub fn status(&self) -> Option<reqwest::StatusCode> {
        match self {
            PlayerError::CredentialAcquisition(e) | PlayerError::Search(e) => e.status(),
            _ => None,
        }
    }
}

/// Result type for player operations
pub type PlayerResult<T> = Result<T, PlayerError>;
