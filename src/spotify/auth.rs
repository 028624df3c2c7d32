use std::{sync::Arc, time::Duration};

use base64::{Engine, engine::general_purpose::STANDARD};
use indicatif::{ProgressBar, ProgressStyle};
use reqwest::{Client, Url, header::AUTHORIZATION};
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;

use crate::{
    config::{self, Credentials},
    error::{Error, Result},
    server::start_callback_server,
    types::{AuthCallback, Token, TokenResponse},
    utils, warning,
};

/// Runs the complete OAuth 2.0 authorization-code flow.
///
/// 1. Starts a local callback server on the address embedded in the
///    redirect URI
/// 2. Opens the authorization URL in the user's default browser
/// 3. Waits for the single OAuth redirect and extracts the `code` parameter
/// 4. Exchanges the code for an access token using Basic client
///    authentication
///
/// The callback server is torn down as soon as the redirect has been
/// observed (or the wait gave up); it never outlives the exchange.
///
/// # Errors
///
/// - `AuthCodeMissing` - the redirect arrived without a `code` parameter
/// - `AuthTimeout` - no redirect within 60 seconds
/// - `Cancelled` - shutdown was requested while waiting
/// - `RemoteApi`/`Http` - the token endpoint rejected or failed the exchange
pub async fn authorize(credentials: &Credentials, cancel: &CancellationToken) -> Result<Token> {
    let shared_state: Arc<Mutex<Option<AuthCallback>>> = Arc::new(Mutex::new(None));

    let (addr, path) = utils::redirect_bind_addr(&credentials.redirect_uri)?;

    // Listener scoped to this one exchange
    let server_stop = cancel.child_token();
    let server_state = Arc::clone(&shared_state);
    let server_token = server_stop.clone();
    let server_task = tokio::spawn(async move {
        if let Err(e) = start_callback_server(addr, path, server_state, server_token).await {
            warning!("Callback server failed: {}", e);
        }
    });

    // Construct the authorization URL
    let auth_url = Url::parse_with_params(
        config::AUTH_URL,
        &[
            ("client_id", credentials.client_id.as_str()),
            ("response_type", "code"),
            ("redirect_uri", credentials.redirect_uri.as_str()),
            ("scope", config::SCOPE),
        ],
    )
    .map_err(|e| Error::InvalidArgument(format!("bad authorization URL: {e}")))?;

    // Open the authorization URL in the default browser
    if webbrowser::open(auth_url.as_str()).is_err() {
        warning!(
            "Failed to open browser. Please navigate to the following URL manually:\n{}",
            auth_url
        )
    }

    // Wait for the redirect, then tear the listener down either way
    let code = wait_for_code(shared_state, cancel).await;
    server_stop.cancel();
    let _ = server_task.await;

    exchange_code(credentials, &code?).await
}

/// Polls the shared callback state until the redirect has been recorded.
///
/// Checks once per second for up to 60 seconds, aborting early when the
/// cancellation token fires. A recorded callback without a code yields
/// `AuthCodeMissing`.
async fn wait_for_code(
    shared_state: Arc<Mutex<Option<AuthCallback>>>,
    cancel: &CancellationToken,
) -> Result<String> {
    use std::time::Instant;

    let pb = ProgressBar::new_spinner();
    pb.set_message("Waiting for authorization in the browser...");
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );

    let max_wait = Duration::from_secs(60);
    let start = Instant::now();

    let outcome = loop {
        {
            let lock = shared_state.lock().await;
            if let Some(callback) = lock.as_ref() {
                break match &callback.code {
                    Some(code) => Ok(code.clone()),
                    None => Err(Error::AuthCodeMissing),
                };
            }
        }

        if start.elapsed() >= max_wait {
            break Err(Error::AuthTimeout);
        }

        tokio::select! {
            _ = cancel.cancelled() => break Err(Error::Cancelled),
            _ = tokio::time::sleep(Duration::from_secs(1)) => {}
        }
    };

    pb.finish_and_clear();
    outcome
}

/// Exchanges an authorization code for an access token.
///
/// Sends the form-encoded `authorization_code` grant with an
/// `Authorization: Basic base64(client_id:client_secret)` header and stamps
/// the response with the current time as its issue instant.
async fn exchange_code(credentials: &Credentials, code: &str) -> Result<Token> {
    let basic = STANDARD.encode(format!(
        "{}:{}",
        credentials.client_id, credentials.client_secret
    ));

    let client = Client::new();
    let response = client
        .post(config::TOKEN_URL)
        .header(AUTHORIZATION, format!("Basic {basic}"))
        .form(&[
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", credentials.redirect_uri.as_str()),
        ])
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        return Err(Error::RemoteApi { status });
    }

    let parsed: TokenResponse = response.json().await?;
    Ok(Token::issued_now(parsed))
}
