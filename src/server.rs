use axum::{Extension, Router, routing::get};
use std::{net::SocketAddr, sync::Arc};
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;

use crate::{api, error::Result, types::AuthCallback};

/// Serves the OAuth callback on `addr` until `shutdown` fires.
///
/// The route path comes from the configured redirect URI, so the listener
/// answers exactly the URL the accounts service redirects to.
pub async fn start_callback_server(
    addr: SocketAddr,
    path: String,
    state: Arc<Mutex<Option<AuthCallback>>>,
    shutdown: CancellationToken,
) -> Result<()> {
    let app = Router::new()
        .route("/health", get(api::health))
        .route(&path, get(api::callback).layer(Extension(state)));

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await?;
    Ok(())
}
