use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tabled::Tabled;

/// Body of a successful client-credentials exchange.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub expires_in: Option<u64>,
}

/// Bearer token held in memory for one session.
///
/// Expiry is recorded for display only; the token is never refreshed.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    pub access_token: String,
    pub expires_in: u64,
    pub obtained_at: i64,
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("access_token", &crate::utils::mask_token(&self.access_token))
            .field("expires_in", &self.expires_in)
            .field("obtained_at", &self.obtained_at)
            .finish()
    }
}

impl Credential {
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.obtained_at + self.expires_in as i64, 0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    pub tracks: TrackPage,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackPage {
    pub items: Vec<SearchItem>,
    #[serde(default)]
    pub total: Option<u64>,
}

/// One raw track as returned by the search endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchItem {
    pub name: String,
    #[serde(default)]
    pub preview_url: Option<String>,
    #[serde(default)]
    pub artists: Vec<SearchArtist>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchArtist {
    pub name: String,
}

/// A playable entry of the playlist. `preview_uri` is never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Track {
    pub preview_uri: String,
    pub artist: String,
    pub title: String,
}

#[derive(Tabled)]
pub struct TrackTableRow {
    #[tabled(rename = "#")]
    pub position: usize,
    pub title: String,
    pub artist: String,
    pub preview: String,
}
