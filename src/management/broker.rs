use reqwest::Client;

use crate::{
    config,
    error::{PlayerError, PlayerResult},
    spotify,
    types::Credential,
};

/// Acquires and holds the session's bearer token.
///
/// The exchange is attempted at most once. A success is kept in memory for the
/// rest of the session; a failure makes every later call return
/// `PlayerError::CredentialUnavailable`.
pub struct CredentialBroker {
    client: Client,
    token_url: String,
    client_id: String,
    client_secret: String,
    credential: Option<Credential>,
    attempted: bool,
}

impl std::fmt::Debug for CredentialBroker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialBroker")
            .field("token_url", &self.token_url)
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .field("attempted", &self.attempted)
            .finish()
    }
}

impl CredentialBroker {
    /// # Errors
    ///
    /// `PlayerError::Config` if the client ID or secret is empty.
    pub fn new(
        client: Client,
        token_url: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> PlayerResult<Self> {
        let client_id = client_id.into();
        let client_secret = client_secret.into();
        if client_id.is_empty() || client_secret.is_empty() {
            return Err(PlayerError::Config(
                "client ID and client secret must not be empty".to_string(),
            ));
        }

        Ok(Self {
            client,
            token_url: token_url.into(),
            client_id,
            client_secret,
            credential: None,
            attempted: false,
        })
    }

    /// Builds a broker from `SPOTIFY_API_AUTH_CLIENT_ID`,
    /// `SPOTIFY_API_AUTH_CLIENT_SECRET` and `SPOTIFY_API_TOKEN_URL`.
    pub fn from_env(client: Client) -> PlayerResult<Self> {
        Self::new(
            client,
            config::spotify_apitoken_url(),
            config::spotify_client_id()?,
            config::spotify_client_secret()?,
        )
    }

    pub async fn acquire_token(&mut self) -> PlayerResult<Credential> {
        if let Some(credential) = &self.credential {
            return Ok(credential.clone());
        }

        if self.attempted {
            return Err(PlayerError::CredentialUnavailable);
        }

        self.attempted = true;
        let credential = spotify::auth::request_client_credentials(
            &self.client,
            &self.token_url,
            &self.client_id,
            &self.client_secret,
        )
        .await?;

        self.credential = Some(credential.clone());
        Ok(credential)
    }

    pub fn credential(&self) -> Option<&Credential> {
        self.credential.as_ref()
    }
}
