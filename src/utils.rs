use base64::{Engine, engine::general_purpose::STANDARD};

use crate::types::{SearchItem, Track, TrackTableRow};

/// Base64 of `client_id:client_secret`, as used in the HTTP Basic scheme.
pub fn basic_credentials(client_id: &str, client_secret: &str) -> String {
    STANDARD.encode(format!("{client_id}:{client_secret}"))
}

/// Maps raw search results to tracks and drops those without a preview.
///
/// Provider order is preserved. Only the first credited artist is kept.
pub fn playlist_from_items(items: Vec<SearchItem>) -> Vec<Track> {
    items
        .into_iter()
        .map(|item| Track {
            preview_uri: item.preview_url.unwrap_or_default(),
            artist: item
                .artists
                .into_iter()
                .next()
                .map(|a| a.name)
                .unwrap_or_default(),
            title: item.name,
        })
        .filter(|track| !track.preview_uri.trim().is_empty())
        .collect()
}

pub fn track_table_rows(tracks: &[Track]) -> Vec<TrackTableRow> {
    tracks
        .iter()
        .enumerate()
        .map(|(i, t)| TrackTableRow {
            position: i + 1,
            title: t.title.clone(),
            artist: t.artist.clone(),
            preview: t.preview_uri.clone(),
        })
        .collect()
}

/// Keeps the first and last four characters of a token.
pub fn mask_token(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    if chars.len() <= 8 {
        return "*".repeat(chars.len());
    }

    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}…{tail}")
}
