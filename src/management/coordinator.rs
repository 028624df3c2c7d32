use std::{sync::Arc, time::Duration};

use tokio::sync::{Mutex, Notify};
use tokio_util::sync::CancellationToken;

use crate::{
    error::{Error, Result},
    management::{TokenManager, VolumeDebouncer, VolumeSink},
    spotify::player,
    types::{ControlCommand, Token},
};

/// Delay between sending a command and trusting the next poll-driven
/// refresh; the remote applies commands with a short propagation lag. The
/// same interval paces the volume flush task.
pub const BUFFER_TIME: Duration = Duration::from_millis(250);

struct ApiVolumeSink {
    tokens: Arc<Mutex<TokenManager>>,
    cancel: CancellationToken,
}

impl VolumeSink for ApiVolumeSink {
    async fn send_volume(&self, percent: u8) -> Result<()> {
        let token = self.tokens.lock().await.ensure_valid(&self.cancel).await?;
        player::set_volume(&token, percent, None).await
    }
}

/// Turns user commands into playback API calls.
///
/// Transport commands run to completion one at a time per handler: take a
/// valid token, issue the call, wait out the propagation buffer, then nudge
/// the poller so the shell sees the effect before the next scheduled tick.
/// Volume changes go through the debouncer instead — they arrive at drag
/// frequency and only the settled value must reach the API.
///
/// A failed command surfaces its error to the caller and leaves the
/// coordinator ready for the next one.
pub struct ControlCoordinator {
    tokens: Arc<Mutex<TokenManager>>,
    volume: VolumeDebouncer<ApiVolumeSink>,
    refresh: Arc<Notify>,
    cancel: CancellationToken,
}

impl ControlCoordinator {
    pub fn new(
        tokens: Arc<Mutex<TokenManager>>,
        refresh: Arc<Notify>,
        cancel: CancellationToken,
    ) -> Self {
        let sink = ApiVolumeSink {
            tokens: Arc::clone(&tokens),
            cancel: cancel.clone(),
        };

        ControlCoordinator {
            volume: VolumeDebouncer::new(sink, BUFFER_TIME, cancel.clone()),
            tokens,
            refresh,
            cancel,
        }
    }

    /// Executes one control command.
    pub async fn handle(&self, command: ControlCommand) -> Result<()> {
        match command {
            ControlCommand::SetVolume(percent) => {
                self.volume.submit(percent).await;
                Ok(())
            }
            ControlCommand::Play => {
                let token = self.valid_token().await?;
                player::start_playback(&token, None).await?;
                self.settle().await
            }
            ControlCommand::Pause => {
                let token = self.valid_token().await?;
                player::pause_playback(&token, None).await?;
                self.settle().await
            }
            ControlCommand::Next => {
                let token = self.valid_token().await?;
                player::skip_next(&token, None).await?;
                self.settle().await
            }
            ControlCommand::Previous => {
                let token = self.valid_token().await?;
                player::skip_previous(&token, None).await?;
                self.settle().await
            }
            ControlCommand::Seek(target) => {
                let token = self.valid_token().await?;
                player::start_playback_at(&token, &target).await?;
                self.settle().await
            }
        }
    }

    async fn valid_token(&self) -> Result<Token> {
        self.tokens.lock().await.ensure_valid(&self.cancel).await
    }

    /// Waits out the propagation buffer, then requests an immediate
    /// out-of-band poll.
    async fn settle(&self) -> Result<()> {
        tokio::select! {
            _ = self.cancel.cancelled() => return Err(Error::Cancelled),
            _ = tokio::time::sleep(BUFFER_TIME) => {}
        }

        self.refresh.notify_one();
        Ok(())
    }

    /// Joins the volume flush task. Called at shutdown, after cancellation.
    pub async fn shutdown(&self) {
        self.volume.shutdown().await;
    }
}
