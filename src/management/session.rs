use reqwest::Client;

use crate::{
    config::{self, SearchSettings},
    error::PlayerResult,
    management::{
        CredentialBroker,
        playback::{Phase, PlaybackController},
        surface::PlaybackSurface,
    },
    spotify, success, warning,
};

/// All state of one player session, owned in one place.
///
/// `start` runs the startup sequence: mount, acquire the token, search once,
/// load. Afterwards the session is driven only through the controller's
/// transport operations.
pub struct Session<S> {
    client: Client,
    api_url: String,
    settings: SearchSettings,
    broker: CredentialBroker,
    controller: PlaybackController<S>,
}

impl<S: PlaybackSurface> Session<S> {
    pub fn new(
        client: Client,
        broker: CredentialBroker,
        api_url: impl Into<String>,
        settings: SearchSettings,
        controller: PlaybackController<S>,
    ) -> Self {
        Self {
            client,
            api_url: api_url.into(),
            settings,
            broker,
            controller,
        }
    }

    /// Session wired from the environment with `surface` attached.
    pub fn from_env(surface: S) -> PlayerResult<Self> {
        let client = Client::new();
        let broker = CredentialBroker::from_env(client.clone())?;
        Ok(Self::new(
            client,
            broker,
            config::spotify_apiurl(),
            SearchSettings::from_env(),
            PlaybackController::with_surface(surface),
        ))
    }

    /// Runs the startup sequence. Failures are logged and absorbed:
    ///
    /// - no token: the controller stays in `AwaitingToken`, no search is sent
    /// - failed search: the controller loads an empty playlist
    pub async fn start(&mut self) {
        self.controller.mount();

        let credential = match self.broker.acquire_token().await {
            Ok(credential) => credential,
            Err(e) => {
                warning!("{}", e);
                return;
            }
        };

        let tracks = match spotify::search::fetch_playlist(
            &self.client,
            &self.api_url,
            &credential.access_token,
            &self.settings,
        )
        .await
        {
            Ok(tracks) => tracks,
            Err(e) => {
                warning!("{}", e);
                Vec::new()
            }
        };

        if !tracks.is_empty() {
            success!("Loaded {} playable tracks", tracks.len());
        }

        self.controller.load(tracks);
    }

    pub fn phase(&self) -> Phase {
        self.controller.phase()
    }

    pub fn broker(&self) -> &CredentialBroker {
        &self.broker
    }

    pub fn settings(&self) -> &SearchSettings {
        &self.settings
    }

    pub fn controller(&self) -> &PlaybackController<S> {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut PlaybackController<S> {
        &mut self.controller
    }
}
