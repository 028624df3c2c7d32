use reqwest::{
    Client, RequestBuilder, Response, StatusCode,
    header::{AUTHORIZATION, CONTENT_TYPE},
};

use crate::{
    config,
    error::{Error, Result},
    types::{Device, DevicesResponse, PlaybackState, RepeatState, SeekTarget, Token},
};

fn authorized(request: RequestBuilder, token: &Token) -> RequestBuilder {
    request.header(
        AUTHORIZATION,
        format!("{} {}", token.token_type, token.access_token),
    )
}

fn check(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(Error::RemoteApi { status })
    }
}

fn with_device(mut url: String, device_id: Option<&str>) -> String {
    if let Some(id) = device_id {
        if url.contains('?') {
            url.push_str(&format!("&device_id={id}"));
        } else {
            url.push_str(&format!("?device_id={id}"));
        }
    }
    url
}

/// Fetches the full player state.
///
/// A 204 or empty body means no playback session exists anywhere; that is a
/// normal condition and comes back as `None`, never as an error.
pub async fn get_player(token: &Token) -> Result<Option<PlaybackState>> {
    let api_url = format!("{}/me/player", config::API_URL);

    let client = Client::new();
    let response = check(authorized(client.get(&api_url), token).send().await?)?;

    if response.status() == StatusCode::NO_CONTENT {
        return Ok(None);
    }

    let body = response.text().await?;
    if body.is_empty() {
        return Ok(None);
    }

    Ok(Some(serde_json::from_str(&body)?))
}

/// Fetches the currently playing track. Same empty-session handling as
/// [`get_player`], but the response never carries device or shuffle/repeat
/// fields.
pub async fn currently_playing(token: &Token) -> Result<Option<PlaybackState>> {
    let api_url = format!("{}/me/player/currently-playing", config::API_URL);

    let client = Client::new();
    let response = check(authorized(client.get(&api_url), token).send().await?)?;

    if response.status() == StatusCode::NO_CONTENT {
        return Ok(None);
    }

    let body = response.text().await?;
    if body.is_empty() {
        return Ok(None);
    }

    Ok(Some(serde_json::from_str(&body)?))
}

/// Lists the devices currently known to the user's account.
pub async fn get_devices(token: &Token) -> Result<Vec<Device>> {
    let api_url = format!("{}/me/player/devices", config::API_URL);

    let client = Client::new();
    let response = check(authorized(client.get(&api_url), token).send().await?)?;

    let parsed: DevicesResponse = response.json().await?;
    Ok(parsed.devices)
}

/// Sets the playback volume in percent. Targets the active device when
/// `device_id` is `None`.
pub async fn set_volume(token: &Token, percent: u8, device_id: Option<&str>) -> Result<()> {
    let api_url = with_device(
        format!(
            "{}/me/player/volume?volume_percent={}",
            config::API_URL,
            percent
        ),
        device_id,
    );

    let client = Client::new();
    check(authorized(client.put(&api_url), token).send().await?)?;
    Ok(())
}

/// Resumes playback where the player left off.
pub async fn start_playback(token: &Token, device_id: Option<&str>) -> Result<()> {
    let api_url = with_device(format!("{}/me/player/play", config::API_URL), device_id);

    let client = Client::new();
    check(
        authorized(client.put(&api_url), token)
            .header(CONTENT_TYPE, "application/json")
            .body("")
            .send()
            .await?,
    )?;
    Ok(())
}

/// Starts playback of a context at a given track index and position.
pub async fn start_playback_at(token: &Token, target: &SeekTarget) -> Result<()> {
    let api_url = format!("{}/me/player/play", config::API_URL);

    let body = serde_json::json!({
        "context_uri": target.context_uri,
        "position_ms": target.position_ms,
        "offset": { "position": target.position },
    });

    let client = Client::new();
    check(
        authorized(client.put(&api_url), token)
            .json(&body)
            .send()
            .await?,
    )?;
    Ok(())
}

pub async fn pause_playback(token: &Token, device_id: Option<&str>) -> Result<()> {
    let api_url = with_device(format!("{}/me/player/pause", config::API_URL), device_id);

    let client = Client::new();
    check(authorized(client.put(&api_url), token).send().await?)?;
    Ok(())
}

pub async fn skip_next(token: &Token, device_id: Option<&str>) -> Result<()> {
    let api_url = with_device(format!("{}/me/player/next", config::API_URL), device_id);

    let client = Client::new();
    check(authorized(client.post(&api_url), token).send().await?)?;
    Ok(())
}

pub async fn skip_previous(token: &Token, device_id: Option<&str>) -> Result<()> {
    let api_url = with_device(format!("{}/me/player/previous", config::API_URL), device_id);

    let client = Client::new();
    check(authorized(client.post(&api_url), token).send().await?)?;
    Ok(())
}

/// Sets the repeat mode. `state` must be one of `track`, `context` or `off`;
/// anything else is rejected with `InvalidArgument` before any request goes
/// out.
pub async fn set_repeat(token: &Token, state: &str, device_id: Option<&str>) -> Result<()> {
    let state: RepeatState = state.parse()?;

    let api_url = with_device(
        format!("{}/me/player/repeat?state={}", config::API_URL, state.as_str()),
        device_id,
    );

    let client = Client::new();
    check(authorized(client.put(&api_url), token).send().await?)?;
    Ok(())
}

/// Switches shuffle on or off.
pub async fn set_shuffle(token: &Token, state: bool, device_id: Option<&str>) -> Result<()> {
    let api_url = with_device(
        format!("{}/me/player/shuffle?state={}", config::API_URL, state),
        device_id,
    );

    let client = Client::new();
    check(authorized(client.put(&api_url), token).send().await?)?;
    Ok(())
}
