use std::{collections::HashMap, sync::Arc};

use axum::{Extension, extract::Query, response::Html};
use tokio::sync::Mutex;

use crate::types::AuthCallback;

/// Handles the OAuth redirect from the accounts service.
///
/// Records the received authorization code in the shared flow state; the
/// waiting auth flow picks it up from there. A redirect without a `code`
/// parameter is recorded too, so the flow can fail with a proper error
/// instead of waiting out its timeout.
pub async fn callback(
    Query(params): Query<HashMap<String, String>>,
    Extension(shared_state): Extension<Arc<Mutex<Option<AuthCallback>>>>,
) -> Html<&'static str> {
    let code = params.get("code").cloned();
    let received = code.is_some();

    let mut state = shared_state.lock().await;
    // Only the first redirect counts; the listener is about to go away.
    if state.is_none() {
        *state = Some(AuthCallback { code });
    }

    if received {
        Html("<h2>Authentication successful.</h2><p>You can close this window now.</p>")
    } else {
        Html("<h4>Login failed: no authorization code received.</h4>")
    }
}
