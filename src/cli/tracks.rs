use reqwest::Client;
use tabled::Table;

use crate::{
    config::{self, SearchSettings},
    error,
    management::CredentialBroker,
    spotify, utils, warning,
};

pub async fn tracks() {
    let client = Client::new();
    let mut broker = match CredentialBroker::from_env(client.clone()) {
        Ok(broker) => broker,
        Err(e) => error!("Cannot load credentials. Err: {}", e),
    };
    let settings = SearchSettings::from_env();

    let pb = super::spinner("Fetching tracks...");
    let credential = match broker.acquire_token().await {
        Ok(credential) => credential,
        Err(e) => {
            pb.finish_and_clear();
            error!("Cannot acquire access token. Err: {}", e);
        }
    };

    let tracks = match spotify::search::fetch_playlist(
        &client,
        &config::spotify_apiurl(),
        &credential.access_token,
        &settings,
    )
    .await
    {
        Ok(tracks) => tracks,
        Err(e) => {
            pb.finish_and_clear();
            error!("Cannot fetch tracks. Err: {}", e);
        }
    };
    pb.finish_and_clear();

    if tracks.is_empty() {
        warning!("No playable previews for {}", settings.query);
        return;
    }

    println!("{}", Table::new(utils::track_table_rows(&tracks)));
}
