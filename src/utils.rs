use std::net::SocketAddr;

use reqwest::Url;

use crate::{
    error::{Error, Result},
    types::TrackItem,
};

/// Splits a redirect URI into the socket address the callback listener must
/// bind and the route path the callback is served on.
///
/// `http://127.0.0.1:8888/callback` becomes `(127.0.0.1:8888, "/callback")`.
/// Hostnames are resolved to loopback: the listener only ever serves the
/// single local OAuth redirect.
pub fn redirect_bind_addr(redirect_uri: &str) -> Result<(SocketAddr, String)> {
    let url = Url::parse(redirect_uri)
        .map_err(|e| Error::InvalidArgument(format!("bad redirect URI: {e}")))?;

    let port = url
        .port_or_known_default()
        .ok_or_else(|| Error::InvalidArgument("redirect URI has no port".into()))?;

    let host = match url.host_str() {
        Some("localhost") | None => "127.0.0.1".to_string(),
        Some(other) => other.to_string(),
    };

    let addr: SocketAddr = format!("{host}:{port}")
        .parse()
        .map_err(|e| Error::InvalidArgument(format!("bad redirect host: {e}")))?;

    let path = match url.path() {
        "" => "/".to_string(),
        p => p.to_string(),
    };

    Ok((addr, path))
}

/// One-line description of a track: `<name> by <artists> from <album>`.
pub fn format_track_line(item: &TrackItem) -> String {
    let mut line = format!("{} by", item.name);

    for (i, artist) in item.artists.iter().enumerate() {
        if i == 0 {
            line.push_str(&format!(" {}", artist.name));
        } else {
            line.push_str(&format!(" and {}", artist.name));
        }
    }

    line.push_str(&format!(" from {}", item.album.name));
    line
}
