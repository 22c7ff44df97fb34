use chrono::Utc;
use reqwest::{
    Client,
    header::{AUTHORIZATION, CONTENT_TYPE},
};

use crate::{
    error::{PlayerError, PlayerResult},
    types::{Credential, TokenResponse},
    utils,
};

/// Token lifetime assumed when the response omits `expires_in`.
const DEFAULT_EXPIRES_IN: u64 = 3600;

/// Exchanges a client ID and secret for a bearer token.
///
/// Sends `grant_type=client_credentials` as a form-encoded body with an HTTP
/// Basic `Authorization` header built from `client_id:client_secret`.
///
/// # Arguments
///
/// * `client` - Shared HTTP client
/// * `token_url` - Full URL of the token endpoint
/// * `client_id` - Spotify application client ID
/// * `client_secret` - Spotify application client secret
///
/// # Errors
///
/// `PlayerError::CredentialAcquisition` for network failures, non-success
/// statuses and bodies without an `access_token`. The request is never
/// retried.
///
/// # Example
///
/// ```
/// let client = reqwest::Client::new();
/// let credential = request_client_credentials(
///     &client,
///     "https://accounts.spotify.com/api/token",
///     "abc123",
///     "def456",
/// )
/// .await?;
/// ```
pub async fn request_client_credentials(
    client: &Client,
    token_url: &str,
    client_id: &str,
    client_secret: &str,
) -> PlayerResult<Credential> {
    let response = client
        .post(token_url)
        .header(
            AUTHORIZATION,
            format!(
                "Basic {}",
                utils::basic_credentials(client_id, client_secret)
            ),
        )
        .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
        .form(&[("grant_type", "client_credentials")])
        .send()
        .await
        .map_err(PlayerError::CredentialAcquisition)?
        .error_for_status()
        .map_err(PlayerError::CredentialAcquisition)?;

    let token = response
        .json::<TokenResponse>()
        .await
        .map_err(PlayerError::CredentialAcquisition)?;

    Ok(Credential {
        access_token: token.access_token,
        expires_in: token.expires_in.unwrap_or(DEFAULT_EXPIRES_IN),
        obtained_at: Utc::now().timestamp(),
    })
}
