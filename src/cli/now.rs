use tokio_util::sync::CancellationToken;

use crate::{config, error, info, management::TokenManager, spotify::player, utils};

/// Prints the currently playing track as `<name> by <artists> from <album>`.
pub async fn now() {
    let credentials = match config::Credentials::from_env() {
        Ok(c) => c,
        Err(e) => error!("Cannot load credentials: {}", e),
    };

    let mut manager = match TokenManager::load(credentials).await {
        Ok(m) => m,
        Err(e) => error!(
            "Failed to load token. Please run sporemote auth\n Error: {}",
            e
        ),
    };

    let cancel = CancellationToken::new();
    let token = match manager.ensure_valid(&cancel).await {
        Ok(t) => t,
        Err(e) => error!("Failed to refresh token: {}", e),
    };

    match player::currently_playing(&token).await {
        Ok(Some(state)) => match state.item {
            Some(item) => info!("{}", utils::format_track_line(&item)),
            None => info!("Nothing is playing"),
        },
        Ok(None) => info!("Nothing is playing"),
        Err(e) => error!("Failed to fetch current track: {}", e),
    }
}
