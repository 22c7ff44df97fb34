use reqwest::Client;

use crate::{
    config::SearchSettings,
    error::{PlayerError, PlayerResult},
    types::{SearchItem, SearchResponse, Track},
    utils,
};

/// Runs one track search and returns the raw result page.
///
/// Issues `GET {api_url}/search?q=<query>&type=track&limit=<limit>` with the
/// bearer token. Only the first page is requested.
///
/// # Errors
///
/// `PlayerError::Search` for network failures, non-success statuses and
/// malformed bodies.
///
/// # Example
///
/// ```
/// let items = search_tracks(&client, "https://api.spotify.com/v1", token, &SearchSettings::default()).await?;
/// ```
pub async fn search_tracks(
    client: &Client,
    api_url: &str,
    token: &str,
    settings: &SearchSettings,
) -> PlayerResult<Vec<SearchItem>> {
    let url = format!("{}/search", api_url.trim_end_matches('/'));
    let limit = settings.limit.to_string();

    let response = client
        .get(&url)
        .bearer_auth(token)
        .query(&[
            ("q", settings.query.as_str()),
            ("type", "track"),
            ("limit", limit.as_str()),
        ])
        .send()
        .await
        .map_err(PlayerError::Search)?
        .error_for_status()
        .map_err(PlayerError::Search)?;

    let res = response
        .json::<SearchResponse>()
        .await
        .map_err(PlayerError::Search)?;

    Ok(res.tracks.items)
}

/// Searches and derives the playlist: mapped to [`Track`], in provider
/// order, with every preview-less result dropped.
///
/// One-shot. An empty result is returned as-is; no further pages are fetched.
pub async fn fetch_playlist(
    client: &Client,
    api_url: &str,
    token: &str,
    settings: &SearchSettings,
) -> PlayerResult<Vec<Track>> {
    let items = search_tracks(client, api_url, token, settings).await?;
    Ok(utils::playlist_from_items(items))
}
