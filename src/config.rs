//! Configuration for the Spotify remote control.
//!
//! Credentials are read from environment variables, optionally loaded from a
//! `.env` file in the local data directory. The Spotify endpoint URLs are
//! service constants rather than configuration: they never vary per
//! deployment, only the application credentials do.

use std::{env, path::PathBuf};

use dotenv;

use crate::error::{Error, Result};

/// Spotify OAuth authorization endpoint (browser redirect target).
pub const AUTH_URL: &str = "https://accounts.spotify.com/authorize";

/// Spotify OAuth token exchange endpoint.
pub const TOKEN_URL: &str = "https://accounts.spotify.com/api/token";

/// Spotify Web API base URL.
pub const API_URL: &str = "https://api.spotify.com/v1";

/// Scopes required to read and steer playback.
pub const SCOPE: &str = "user-read-playback-state user-modify-playback-state";

/// Immutable application credentials, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
}

impl Credentials {
    /// Reads the three credential keys from the environment.
    ///
    /// Call [`load_env`] first so a `.env` file in the local data directory
    /// is taken into account. Fails with `MissingCredential` naming the
    /// first absent key.
    pub fn from_env() -> Result<Self> {
        Ok(Credentials {
            client_id: require("SPOTIFY_CLIENT_ID")?,
            client_secret: require("SPOTIFY_CLIENT_SECRET")?,
            redirect_uri: require("SPOTIFY_REDIRECT_URI")?,
        })
    }
}

fn require(key: &'static str) -> Result<String> {
    env::var(key).map_err(|_| Error::MissingCredential(key))
}

/// Loads environment variables from a `.env` file in the local data directory.
///
/// Looks for the file under the platform-specific data directory:
/// - Linux: `~/.local/share/sporemote/.env`
/// - macOS: `~/Library/Application Support/sporemote/.env`
/// - Windows: `%LOCALAPPDATA%/sporemote/.env`
///
/// A missing file is not an error — the variables may come from the process
/// environment instead; `Credentials::from_env` does the final check.
pub async fn load_env() -> Result<()> {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("sporemote/.env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent).await?;
    }

    if path.is_file() {
        let _ = dotenv::from_path(path);
    }
    Ok(())
}
