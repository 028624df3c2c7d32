use std::{sync::Arc, time::Duration};

use tokio::{
    sync::{Mutex, Notify, mpsc},
    task::JoinHandle,
};
use tokio_util::sync::CancellationToken;

use crate::{bridge, error::Result, management::TokenManager, spotify::player, types::WebMessage, warning};

/// Cadence of the scheduled playback-state fetch.
pub const POLL_INTERVAL: Duration = Duration::from_millis(750);

/// Background task that periodically fetches the player state and publishes
/// it as a `track` message. An extra fetch can be forced through the
/// refresh handle; the coordinator uses that right after a transport
/// command has settled.
pub struct Poller {
    handle: JoinHandle<()>,
    refresh: Arc<Notify>,
}

impl Poller {
    pub fn spawn(
        tokens: Arc<Mutex<TokenManager>>,
        events: mpsc::UnboundedSender<WebMessage>,
        cancel: CancellationToken,
    ) -> Self {
        let refresh = Arc::new(Notify::new());
        let task_refresh = Arc::clone(&refresh);
        let handle = tokio::spawn(run(tokens, events, task_refresh, cancel));

        Poller { handle, refresh }
    }

    /// Handle the coordinator notifies to force an out-of-band poll.
    pub fn refresh_handle(&self) -> Arc<Notify> {
        Arc::clone(&self.refresh)
    }

    /// Waits for the loop to exit. Called at shutdown, after cancellation.
    pub async fn shutdown(self) {
        let _ = self.handle.await;
    }
}

async fn run(
    tokens: Arc<Mutex<TokenManager>>,
    events: mpsc::UnboundedSender<WebMessage>,
    refresh: Arc<Notify>,
    cancel: CancellationToken,
) {
    loop {
        tokio::select! {
            _ = cancel.cancelled() => return,
            _ = tokio::time::sleep(POLL_INTERVAL) => {}
            _ = refresh.notified() => {}
        }

        if let Err(e) = tick(&tokens, &events, &cancel).await {
            if e.is_cancelled() {
                return;
            }
            warning!("Failed to poll playback state: {}", e);
        }
    }
}

/// One poll: fetch the player state and publish it. No active session is a
/// normal outcome and publishes the empty snapshot.
async fn tick(
    tokens: &Arc<Mutex<TokenManager>>,
    events: &mpsc::UnboundedSender<WebMessage>,
    cancel: &CancellationToken,
) -> Result<()> {
    let token = tokens.lock().await.ensure_valid(cancel).await?;
    let snapshot = player::get_player(&token).await?.unwrap_or_default();

    let message = bridge::track_message(&snapshot)?;
    let _ = events.send(message);
    Ok(())
}
