use std::str::FromStr;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tabled::Tabled;

use crate::error::Error;

/// Access token as persisted to disk. The `CreatedAt` casing matches the
/// legacy token file format so existing files keep loading.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
    #[serde(rename = "CreatedAt")]
    pub created_at: i64,
}

impl Token {
    /// Stamps a token-endpoint response with the current time.
    pub fn issued_now(response: TokenResponse) -> Self {
        Token {
            access_token: response.access_token,
            token_type: response.token_type,
            expires_in: response.expires_in,
            created_at: Utc::now().timestamp(),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.is_valid_at(Utc::now().timestamp())
    }

    /// A token is valid strictly before `created_at + expires_in`.
    pub fn is_valid_at(&self, now: i64) -> bool {
        now < self.created_at + self.expires_in as i64
    }
}

/// Body of a successful token-endpoint response.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
}

/// Outcome of the OAuth redirect, filled in by the callback handler.
#[derive(Debug, Clone)]
pub struct AuthCallback {
    pub code: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Device {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub is_private_session: bool,
    #[serde(default)]
    pub is_restricted: bool,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub volume_percent: Option<u8>,
    #[serde(default)]
    pub supports_volume: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DevicesResponse {
    pub devices: Vec<Device>,
}

#[derive(Tabled)]
pub struct DeviceTableRow {
    pub name: String,
    pub kind: String,
    pub active: bool,
    pub volume: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlayContext {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub href: String,
    #[serde(default)]
    pub uri: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArtistRef {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub uri: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Image {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AlbumInfo {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub uri: String,
    #[serde(default)]
    pub images: Vec<Image>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrackItem {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub uri: String,
    #[serde(default)]
    pub duration_ms: u64,
    #[serde(default)]
    pub artists: Vec<ArtistRef>,
    #[serde(default)]
    pub album: AlbumInfo,
}

/// Point-in-time view of remote playback. Every poll replaces the previous
/// snapshot in full; the all-default value is the legal "nothing is playing"
/// state.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlaybackState {
    #[serde(default)]
    pub device: Option<Device>,
    #[serde(default)]
    pub repeat_state: RepeatState,
    #[serde(default)]
    pub shuffle_state: bool,
    #[serde(default)]
    pub context: Option<PlayContext>,
    #[serde(default)]
    pub progress_ms: Option<u64>,
    #[serde(default)]
    pub is_playing: bool,
    #[serde(default)]
    pub item: Option<TrackItem>,
    #[serde(default)]
    pub currently_playing_type: Option<String>,
}

/// Repeat setting of the player.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepeatState {
    Track,
    Context,
    #[default]
    Off,
}

impl RepeatState {
    pub fn as_str(&self) -> &'static str {
        match self {
            RepeatState::Track => "track",
            RepeatState::Context => "context",
            RepeatState::Off => "off",
        }
    }
}

impl FromStr for RepeatState {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "track" => Ok(RepeatState::Track),
            "context" => Ok(RepeatState::Context),
            "off" => Ok(RepeatState::Off),
            other => Err(Error::InvalidArgument(format!(
                "repeat state must be track, context or off, got {other:?}"
            ))),
        }
    }
}

/// Envelope of the presentation boundary protocol, one JSON object per line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebMessage {
    pub id: String,
    pub content: String,
}

impl WebMessage {
    pub fn new(id: impl Into<String>, content: impl Into<String>) -> Self {
        WebMessage {
            id: id.into(),
            content: content.into(),
        }
    }
}

/// Content of a `set_time` message: restart a context at a track and offset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeekTarget {
    pub context_uri: String,
    pub position: u32,
    pub position_ms: u64,
}

/// A user-originated control action, consumed exactly once by the
/// coordinator. Decoded from inbound shell messages by `bridge::decode`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControlCommand {
    SetVolume(u8),
    Seek(SeekTarget),
    Play,
    Pause,
    Next,
    Previous,
}
