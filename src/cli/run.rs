use std::sync::Arc;

use tokio::{
    io::{AsyncBufReadExt, AsyncWriteExt, BufReader},
    sync::{Mutex, mpsc},
    task::JoinSet,
};
use tokio_util::sync::CancellationToken;

use crate::{
    bridge, config, error, info,
    management::{ControlCoordinator, Poller, TokenManager},
    spotify::player,
    success,
    types::WebMessage,
    warning,
};

/// Runs the remote-control session.
///
/// Authenticates (reusing a stored token when still valid), publishes the
/// initial volume and one immediate snapshot, then pumps shell messages
/// from stdin while the poller republishes the player state on stdout.
/// Ctrl-C or stdin EOF triggers the shutdown sequence: cancel everything,
/// then join the command tasks, the volume flush task and the poller
/// before returning.
pub async fn run() {
    let credentials = match config::Credentials::from_env() {
        Ok(c) => c,
        Err(e) => error!("Cannot load credentials: {}", e),
    };

    let cancel = CancellationToken::new();

    let manager = match TokenManager::load_or_authenticate(credentials, &cancel).await {
        Ok(m) => m,
        Err(e) => error!("Authentication failed: {}", e),
    };
    let tokens = Arc::new(Mutex::new(manager));

    let (events_tx, events_rx) = mpsc::unbounded_channel::<WebMessage>();

    // Initial volume for the shell, read from the first device that has one
    {
        let token = tokens.lock().await.current_token().clone();
        match player::get_devices(&token).await {
            Ok(devices) => {
                if let Some(device) = devices.iter().find(|d| d.supports_volume) {
                    let volume = device.volume_percent.unwrap_or(0);
                    let _ = events_tx.send(bridge::volume_message(volume));
                    info!("Volume started at {}", volume);
                }
            }
            Err(e) => warning!("Failed to fetch devices: {}", e),
        }
    }

    let writer = tokio::spawn(write_events(events_rx));

    let poller = Poller::spawn(Arc::clone(&tokens), events_tx.clone(), cancel.clone());
    let coordinator = Arc::new(ControlCoordinator::new(
        Arc::clone(&tokens),
        poller.refresh_handle(),
        cancel.clone(),
    ));

    // One immediate snapshot so the shell has state before the first tick
    poller.refresh_handle().notify_one();

    success!("Everything is loaded, ready to go");

    let mut commands = JoinSet::new();
    let stdin = BufReader::new(tokio::io::stdin());
    let mut lines = stdin.lines();

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            _ = cancel.cancelled() => break,
            line = lines.next_line() => match line {
                Ok(Some(line)) => {
                    if line.trim().is_empty() {
                        continue;
                    }
                    dispatch(&line, &coordinator, &mut commands);
                }
                // Shell hung up
                Ok(None) => break,
                Err(e) => {
                    warning!("Failed to read message: {}", e);
                    break;
                }
            }
        }
    }

    info!("Ending all tasks");
    cancel.cancel();

    while commands.join_next().await.is_some() {}
    coordinator.shutdown().await;
    poller.shutdown().await;

    drop(events_tx);
    let _ = writer.await;
    info!("All tasks ended");
}

/// Decodes one stdin line and spawns its handler into the supervised set.
/// A failing command is logged and never takes the session down.
fn dispatch(line: &str, coordinator: &Arc<ControlCoordinator>, commands: &mut JoinSet<()>) {
    let message: WebMessage = match serde_json::from_str(line) {
        Ok(m) => m,
        Err(e) => {
            warning!("Ignoring malformed message: {}", e);
            return;
        }
    };

    let command = match bridge::decode(&message) {
        Ok(c) => c,
        Err(e) => {
            warning!("Rejected {} message: {}", message.id, e);
            return;
        }
    };

    let coordinator = Arc::clone(coordinator);
    commands.spawn(async move {
        if let Err(e) = coordinator.handle(command).await {
            if !e.is_cancelled() {
                warning!("Command failed: {}", e);
            }
        }
    });
}

async fn write_events(mut events: mpsc::UnboundedReceiver<WebMessage>) {
    let mut stdout = tokio::io::stdout();

    while let Some(message) = events.recv().await {
        match serde_json::to_string(&message) {
            Ok(mut line) => {
                line.push('\n');
                if stdout.write_all(line.as_bytes()).await.is_err() {
                    return;
                }
                let _ = stdout.flush().await;
            }
            Err(e) => warning!("Failed to encode event: {}", e),
        }
    }
}
