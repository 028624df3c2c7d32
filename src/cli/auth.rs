use tokio_util::sync::CancellationToken;

use crate::{config, error, management::TokenManager, spotify, success};

/// Runs a fresh authorization flow and persists the token, replacing
/// whatever was stored before.
pub async fn auth() {
    let credentials = match config::Credentials::from_env() {
        Ok(c) => c,
        Err(e) => error!("Cannot load credentials: {}", e),
    };

    let cancel = CancellationToken::new();

    match spotify::auth::authorize(&credentials, &cancel).await {
        Ok(token) => {
            let manager = TokenManager::new(token, credentials);
            if let Err(e) = manager.persist().await {
                error!("Failed to save token to cache: {}", e);
            }

            success!("Authentication successful!");
        }
        Err(e) => {
            error!("Authentication failed: {}", e);
        }
    }
}
