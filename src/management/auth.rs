use std::path::PathBuf;

use tokio_util::sync::CancellationToken;

use crate::{config::Credentials, error::Result, spotify, types::Token};

/// Owns the access token for the lifetime of the process.
///
/// All other components borrow the token per call through [`ensure_valid`],
/// which replaces it wholesale (full re-authentication, no refresh grant)
/// once it has expired. Shared as `Arc<Mutex<TokenManager>>`, so replacement
/// happens under a single writer and readers never observe a torn update.
///
/// [`ensure_valid`]: TokenManager::ensure_valid
pub struct TokenManager {
    token: Token,
    credentials: Credentials,
}

impl TokenManager {
    pub fn new(token: Token, credentials: Credentials) -> Self {
        TokenManager { token, credentials }
    }

    /// Reads the persisted token from the cache file.
    pub async fn load(credentials: Credentials) -> Result<Self> {
        let content = async_fs::read_to_string(Self::token_path()).await?;
        let token: Token = serde_json::from_str(&content)?;
        Ok(Self { token, credentials })
    }

    /// Returns a manager around the stored token if it is still valid,
    /// otherwise runs the full OAuth flow and persists the fresh token.
    pub async fn load_or_authenticate(
        credentials: Credentials,
        cancel: &CancellationToken,
    ) -> Result<Self> {
        match Self::load(credentials.clone()).await {
            Ok(manager) if manager.token.is_valid() => Ok(manager),
            _ => {
                let token = spotify::auth::authorize(&credentials, cancel).await?;
                let manager = Self::new(token, credentials);
                manager.persist().await?;
                Ok(manager)
            }
        }
    }

    /// Writes the token file, replacing any previous content.
    pub async fn persist(&self) -> Result<()> {
        let path = Self::token_path();
        if let Some(parent) = path.parent() {
            async_fs::create_dir_all(parent).await?;
        }

        let json = serde_json::to_string_pretty(&self.token)?;
        async_fs::write(path, json).await?;
        Ok(())
    }

    /// Returns a token that is valid right now.
    ///
    /// An expired token triggers a complete re-authentication (browser
    /// round-trip included) before this returns; the result is persisted.
    /// A still-valid token comes back unchanged.
    pub async fn ensure_valid(&mut self, cancel: &CancellationToken) -> Result<Token> {
        if !self.token.is_valid() {
            self.token = spotify::auth::authorize(&self.credentials, cancel).await?;
            self.persist().await?;
        }

        Ok(self.token.clone())
    }

    pub fn current_token(&self) -> &Token {
        &self.token
    }

    fn token_path() -> PathBuf {
        let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push("sporemote/cache/token.json");
        path
    }
}
