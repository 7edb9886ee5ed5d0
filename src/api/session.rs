use std::sync::Arc;

use axum::{
    Json,
    body::Bytes,
    extract::{Query, State},
    response::Redirect,
};
use axum_extra::extract::cookie::CookieJar;
use serde_json::{Value, json};

use crate::{
    api::ApiError,
    info,
    management::SessionManager,
    server::AppState,
    spotify::{self, SpotifyError},
    success,
    types::{AuthOptions, SessionView},
    warning,
};

pub const CONFIG_ERROR_REDIRECT: &str = "/?error=config";

/// Redirects the browser to the Spotify consent page, carrying the chosen
/// options through the OAuth `state` parameter.
pub async fn login(
    State(state): State<Arc<AppState>>,
    Query(options): Query<AuthOptions>,
) -> Redirect {
    match spotify::auth::authorize_url(&state.config.spotify, Some(&options)) {
        Ok(url) => {
            info!(
                "Redirecting to Spotify ({}, limit {})",
                options.time_range, options.track_limit
            );
            Redirect::temporary(&url)
        }
        Err(e) => {
            warning!("Cannot build authorization URL: {}", e);
            Redirect::to(CONFIG_ERROR_REDIRECT)
        }
    }
}

pub async fn session(State(state): State<Arc<AppState>>, jar: CookieJar) -> Json<SessionView> {
    Json(SessionManager::new(jar, state.config.secure_cookies).view())
}

pub async fn logout(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
) -> (CookieJar, Json<Value>) {
    let jar = SessionManager::new(jar, state.config.secure_cookies)
        .clear()
        .into_jar();
    info!("Session cleared");
    (jar, Json(json!({ "success": true })))
}

/// Re-reads profile and top tracks with a fresh access token.
///
/// The body carries the options to use from now on; anything missing or
/// unparsable falls back to the defaults.
pub async fn refresh(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    body: Bytes,
) -> Result<(CookieJar, Json<Value>), ApiError> {
    let session = SessionManager::new(jar, state.config.secure_cookies);
    let Some(refresh_token) = session.refresh_token() else {
        return Err(ApiError::NoRefreshToken);
    };

    let options: AuthOptions = serde_json::from_slice(&body).unwrap_or_default();
    let spotify_config = &state.config.spotify;

    let token = spotify::auth::refresh_access_token(&state.http, spotify_config, &refresh_token)
        .await
        .map_err(ApiError::Refresh)?;

    let profile = spotify::tracks::get_profile(&state.http, spotify_config, &token.access_token)
        .await
        .map_err(ApiError::Refresh)?;
    let name = profile
        .name()
        .ok_or(ApiError::Refresh(SpotifyError::InvalidProfile))?
        .to_string();

    let tracks =
        spotify::tracks::get_top_tracks(&state.http, spotify_config, &token.access_token, &options)
            .await
            .map_err(ApiError::Refresh)?;

    let mut session = session.store_profile(&name, &tracks, options);
    if let Some(rotated) = token.refresh_token.as_deref() {
        session = session.store_refresh_token(rotated);
    }

    success!("Refreshed {} top tracks for {}", tracks.len(), name);

    let view = session.view();

    Ok((
        session.into_jar(),
        Json(json!({ "success": true, "session": view })),
    ))
}
