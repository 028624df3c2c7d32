use std::{future::Future, sync::Arc, time::Duration};

use tokio::{sync::Mutex, task::JoinHandle};
use tokio_util::sync::CancellationToken;

use crate::warning;

/// Receives settled volume values from the debouncer. The production sink
/// forwards to the playback API; tests substitute a recording one.
pub trait VolumeSink: Send + Sync + 'static {
    fn send_volume(&self, percent: u8) -> impl Future<Output = crate::error::Result<()>> + Send;
}

/// Latest desired volume not yet guaranteed sent, plus the single-task
/// guard. All three fields live behind one lock so the flush task's exit
/// decision and a concurrent submit can never miss each other.
#[derive(Debug, Default)]
struct VolumeState {
    pending: u8,
    dirty: bool,
    running: bool,
}

/// Coalesces high-frequency volume input into debounced API calls.
///
/// Volume events may arrive far faster than the remote can absorb them (a
/// continuous slider drag). Each event only records the newest value; a
/// single background flush task drains the cell once per interval until an
/// interval passes with no new value. Intermediate values are skipped —
/// only the latest matters — but the final settled value is always sent.
pub struct VolumeDebouncer<S: VolumeSink> {
    sink: Arc<S>,
    state: Arc<Mutex<VolumeState>>,
    task: Mutex<Option<JoinHandle<()>>>,
    interval: Duration,
    cancel: CancellationToken,
}

impl<S: VolumeSink> VolumeDebouncer<S> {
    pub fn new(sink: S, interval: Duration, cancel: CancellationToken) -> Self {
        VolumeDebouncer {
            sink: Arc::new(sink),
            state: Arc::new(Mutex::new(VolumeState::default())),
            task: Mutex::new(None),
            interval,
            cancel,
        }
    }

    /// Records the latest desired volume and ensures a flush task is
    /// running. While one runs, new values only update the shared cell.
    pub async fn submit(&self, percent: u8) {
        let spawn = {
            let mut state = self.state.lock().await;
            state.pending = percent;
            state.dirty = true;
            if state.running {
                false
            } else {
                state.running = true;
                true
            }
        };

        if spawn {
            let sink = Arc::clone(&self.sink);
            let state = Arc::clone(&self.state);
            let interval = self.interval;
            let cancel = self.cancel.clone();

            let handle = tokio::spawn(flush(sink, state, interval, cancel));
            // Any previously stored handle belongs to a task that already
            // cleared `running`, so it has finished.
            *self.task.lock().await = Some(handle);
        }
    }

    /// Waits for the in-flight flush task to finish. Called at shutdown,
    /// after the cancellation token has fired.
    pub async fn shutdown(&self) {
        let handle = self.task.lock().await.take();
        if let Some(handle) = handle {
            let _ = handle.await;
        }
    }
}

/// Drains the volume cell once per interval until it stays clean.
///
/// Each round: wait the debounce interval, atomically read-and-clear the
/// dirty flag, and send the pending value if it was set. A round that finds
/// the cell clean clears `running` under the same lock and exits, so a
/// submit racing the exit either sees `running` still set (and its value is
/// picked up by this loop) or spawns the next task itself.
async fn flush<S: VolumeSink>(
    sink: Arc<S>,
    state: Arc<Mutex<VolumeState>>,
    interval: Duration,
    cancel: CancellationToken,
) {
    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                state.lock().await.running = false;
                return;
            }
            _ = tokio::time::sleep(interval) => {}
        }

        let value = {
            let mut state = state.lock().await;
            if !state.dirty {
                state.running = false;
                return;
            }
            state.dirty = false;
            state.pending
        };

        if let Err(e) = sink.send_volume(value).await {
            if e.is_cancelled() {
                state.lock().await.running = false;
                return;
            }
            warning!("Failed to set volume: {}", e);
        }
    }
}
