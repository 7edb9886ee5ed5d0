use reqwest::{Client, StatusCode};

use crate::{
    config::SpotifyConfig,
    info,
    spotify::{SpotifyError, status_error},
    types::{AuthOptions, TopTracksResponse, Track, UserProfile},
};

/// Marker Spotify puts in the 403 body for accounts that are not on an app's
/// development-mode allow list.
const UNREGISTERED_MARKER: &str = "not be registered";

/// Retrieves the listener's profile.
///
/// # Errors
///
/// - [`SpotifyError::UnregisteredUser`] when Spotify answers 403 because the
///   account is not added to the app in the Developer Dashboard
/// - [`SpotifyError::InvalidProfile`] when neither a display name nor an id
///   is present
/// - [`SpotifyError::Status`] / [`SpotifyError::Http`] otherwise
pub async fn get_profile(
    client: &Client,
    config: &SpotifyConfig,
    access_token: &str,
) -> Result<UserProfile, SpotifyError> {
    let res = client
        .get(format!("{}/me", config.api_url))
        .bearer_auth(access_token)
        .send()
        .await?;

    if res.status() == StatusCode::FORBIDDEN {
        let body = res.text().await.unwrap_or_default();
        if body.contains(UNREGISTERED_MARKER) {
            return Err(SpotifyError::UnregisteredUser);
        }
        return Err(SpotifyError::Status {
            status: StatusCode::FORBIDDEN,
            body,
        });
    }
    if !res.status().is_success() {
        return Err(status_error(res).await);
    }

    let profile: UserProfile = res.json().await?;
    if profile.name().is_none() {
        return Err(SpotifyError::InvalidProfile);
    }
    Ok(profile)
}

/// Retrieves the listener's top tracks for the selected range and limit.
///
/// Only the track name and its first credited artist are kept.
pub async fn get_top_tracks(
    client: &Client,
    config: &SpotifyConfig,
    access_token: &str,
    options: &AuthOptions,
) -> Result<Vec<Track>, SpotifyError> {
    let limit = options.track_limit.to_string();
    let res = client
        .get(format!("{}/me/top/tracks", config.api_url))
        .bearer_auth(access_token)
        .query(&[
            ("time_range", options.time_range.as_str()),
            ("limit", limit.as_str()),
        ])
        .send()
        .await?;

    if !res.status().is_success() {
        return Err(status_error(res).await);
    }

    let page: TopTracksResponse = res.json().await?;
    info!(
        "Fetched {} of {} top tracks ({}, limit {})",
        page.items.len(),
        page.total.unwrap_or(page.items.len() as u64),
        options.time_range,
        options.track_limit
    );

    Ok(page.items.into_iter().map(Track::from).collect())
}
