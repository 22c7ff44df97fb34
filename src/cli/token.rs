use reqwest::Client;

use crate::{error, info, management::CredentialBroker, success, utils};

pub async fn token() {
    let mut broker = match CredentialBroker::from_env(Client::new()) {
        Ok(broker) => broker,
        Err(e) => error!("Cannot load credentials. Err: {}", e),
    };

    let pb = super::spinner("Requesting access token...");
    let credential = match broker.acquire_token().await {
        Ok(credential) => credential,
        Err(e) => {
            pb.finish_and_clear();
            error!("Cannot acquire access token. Err: {}", e);
        }
    };
    pb.finish_and_clear();

    success!(
        "Access token acquired: {}",
        utils::mask_token(&credential.access_token)
    );
    match credential.expires_at() {
        Some(at) => info!("Valid until {} (not refreshed)", at.format("%Y-%m-%d %H:%M:%S UTC")),
        None => info!("Valid for {}s (not refreshed)", credential.expires_in),
    }
}
