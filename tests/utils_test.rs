use sporemote::types::{AlbumInfo, ArtistRef, TrackItem};
use sporemote::utils::*;

// Helper function to create a test track
fn create_test_track(name: &str, artists: &[&str], album: &str) -> TrackItem {
    TrackItem {
        id: "test_id".to_string(),
        name: name.to_string(),
        uri: format!("spotify:track:{}", name),
        duration_ms: 200_000,
        artists: artists
            .iter()
            .map(|a| ArtistRef {
                id: format!("{}_id", a),
                name: a.to_string(),
                uri: String::new(),
            })
            .collect(),
        album: AlbumInfo {
            id: "album_id".to_string(),
            name: album.to_string(),
            uri: String::new(),
            images: vec![],
        },
    }
}

#[test]
fn test_format_track_line_single_artist() {
    let track = create_test_track("Breathe", &["Pink Floyd"], "The Dark Side of the Moon");

    assert_eq!(
        format_track_line(&track),
        "Breathe by Pink Floyd from The Dark Side of the Moon"
    );
}

#[test]
fn test_format_track_line_multiple_artists() {
    let track = create_test_track("Under Pressure", &["Queen", "David Bowie"], "Hot Space");

    assert_eq!(
        format_track_line(&track),
        "Under Pressure by Queen and David Bowie from Hot Space"
    );
}

#[test]
fn test_redirect_bind_addr_with_port() {
    let (addr, path) = redirect_bind_addr("http://127.0.0.1:8888/callback").unwrap();

    assert_eq!(addr.to_string(), "127.0.0.1:8888");
    assert_eq!(path, "/callback");
}

#[test]
fn test_redirect_bind_addr_resolves_localhost() {
    let (addr, path) = redirect_bind_addr("http://localhost:8888/callback").unwrap();

    assert_eq!(addr.to_string(), "127.0.0.1:8888");
    assert_eq!(path, "/callback");
}

#[test]
fn test_redirect_bind_addr_default_port() {
    let (addr, _) = redirect_bind_addr("http://127.0.0.1/callback").unwrap();

    assert_eq!(addr.port(), 80);
}

#[test]
fn test_redirect_bind_addr_rejects_garbage() {
    assert!(redirect_bind_addr("not a url").is_err());
}
