//! Translation between the presentation shell's messages and the crate's
//! command/event types.
//!
//! The shell speaks `{id, content}` envelopes ([`crate::types::WebMessage`]).
//! Inbound ids map onto the closed [`ControlCommand`] enum, so an
//! unrecognized or malformed message is rejected here and never reaches the
//! coordinator. Outbound messages carry playback snapshots (`track`) and
//! the initial volume (`set-volume`).

use crate::{
    error::{Error, Result},
    types::{ControlCommand, PlaybackState, SeekTarget, WebMessage},
};

/// Decodes an inbound shell message into a control command.
pub fn decode(message: &WebMessage) -> Result<ControlCommand> {
    match message.id.as_str() {
        "volume" => {
            let percent: u8 = message.content.trim().parse().map_err(|_| {
                Error::InvalidArgument(format!(
                    "volume content must be an integer percent, got {:?}",
                    message.content
                ))
            })?;
            if percent > 100 {
                return Err(Error::InvalidArgument(format!(
                    "volume must be between 0 and 100, got {percent}"
                )));
            }
            Ok(ControlCommand::SetVolume(percent))
        }
        "play" => Ok(ControlCommand::Play),
        "pause" => Ok(ControlCommand::Pause),
        "next" => Ok(ControlCommand::Next),
        "previous" => Ok(ControlCommand::Previous),
        "set_time" => {
            let target: SeekTarget = serde_json::from_str(&message.content)?;
            Ok(ControlCommand::Seek(target))
        }
        other => Err(Error::InvalidArgument(format!(
            "unknown message id {other:?}"
        ))),
    }
}

/// Wraps a playback snapshot into the outbound `track` message.
pub fn track_message(state: &PlaybackState) -> Result<WebMessage> {
    Ok(WebMessage::new("track", serde_json::to_string(state)?))
}

/// Outbound `set-volume` message, sent once at startup so the shell can
/// initialize its slider.
pub fn volume_message(percent: u8) -> WebMessage {
    WebMessage::new("set-volume", percent.to_string())
}
