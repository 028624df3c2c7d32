use sporemote::Error;
use sporemote::bridge;
use sporemote::types::{ControlCommand, PlaybackState, SeekTarget, WebMessage};

fn create_message(id: &str, content: &str) -> WebMessage {
    WebMessage::new(id, content)
}

#[test]
fn test_decode_transport_commands() {
    assert_eq!(
        bridge::decode(&create_message("play", "")).unwrap(),
        ControlCommand::Play
    );
    assert_eq!(
        bridge::decode(&create_message("pause", "")).unwrap(),
        ControlCommand::Pause
    );
    assert_eq!(
        bridge::decode(&create_message("next", "")).unwrap(),
        ControlCommand::Next
    );
    assert_eq!(
        bridge::decode(&create_message("previous", "")).unwrap(),
        ControlCommand::Previous
    );
}

#[test]
fn test_decode_volume() {
    assert_eq!(
        bridge::decode(&create_message("volume", "45")).unwrap(),
        ControlCommand::SetVolume(45)
    );
    assert_eq!(
        bridge::decode(&create_message("volume", " 100 ")).unwrap(),
        ControlCommand::SetVolume(100)
    );
    assert_eq!(
        bridge::decode(&create_message("volume", "0")).unwrap(),
        ControlCommand::SetVolume(0)
    );
}

#[test]
fn test_volume_out_of_range_rejected() {
    assert!(matches!(
        bridge::decode(&create_message("volume", "101")),
        Err(Error::InvalidArgument(_))
    ));
    assert!(matches!(
        bridge::decode(&create_message("volume", "-1")),
        Err(Error::InvalidArgument(_))
    ));
    assert!(matches!(
        bridge::decode(&create_message("volume", "loud")),
        Err(Error::InvalidArgument(_))
    ));
}

#[test]
fn test_decode_seek() {
    let content = r#"{"context_uri":"spotify:album:123","position":3,"position_ms":41000}"#;
    let command = bridge::decode(&create_message("set_time", content)).unwrap();

    assert_eq!(
        command,
        ControlCommand::Seek(SeekTarget {
            context_uri: "spotify:album:123".to_string(),
            position: 3,
            position_ms: 41000,
        })
    );
}

#[test]
fn test_malformed_seek_content_rejected() {
    assert!(bridge::decode(&create_message("set_time", "not json")).is_err());
    assert!(bridge::decode(&create_message("set_time", "{}")).is_err());
}

#[test]
fn test_unknown_id_rejected() {
    let err = bridge::decode(&create_message("teleport", "")).unwrap_err();
    assert!(matches!(err, Error::InvalidArgument(_)));
}

#[test]
fn test_track_message_carries_snapshot() {
    let state = PlaybackState {
        is_playing: true,
        progress_ms: Some(1234),
        ..PlaybackState::default()
    };

    let message = bridge::track_message(&state).unwrap();
    assert_eq!(message.id, "track");

    let decoded: PlaybackState = serde_json::from_str(&message.content).unwrap();
    assert!(decoded.is_playing);
    assert_eq!(decoded.progress_ms, Some(1234));
}

#[test]
fn test_empty_snapshot_encodes() {
    // The "nothing is playing" snapshot must be encodable as-is
    let message = bridge::track_message(&PlaybackState::default()).unwrap();
    let decoded: PlaybackState = serde_json::from_str(&message.content).unwrap();

    assert!(!decoded.is_playing);
    assert!(decoded.item.is_none());
}

#[test]
fn test_volume_message() {
    let message = bridge::volume_message(67);

    assert_eq!(message.id, "set-volume");
    assert_eq!(message.content, "67");
}
