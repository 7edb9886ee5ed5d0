use std::sync::Arc;

use axum::{
    extract::{Query, State},
    response::Redirect,
};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;

use crate::{
    info,
    management::SessionManager,
    server::AppState,
    spotify::{self, SpotifyError},
    success,
    types::{AuthOptions, Track},
    utils, warning,
};

pub const AUTH_FAILED_REDIRECT: &str = "/?error=auth_failed";
pub const UNREGISTERED_REDIRECT: &str = "/?error=unregistered_user";

#[derive(Debug, Deserialize)]
pub struct CallbackParams {
    pub code: Option<String>,
    pub state: Option<String>,
    pub error: Option<String>,
}

struct CompletedLogin {
    name: String,
    refresh_token: String,
    tracks: Vec<Track>,
}

/// Completes the authorization-code flow.
///
/// Single pass, no retries: exchange the code, read profile and top tracks,
/// then redirect home with the session cookies set. Any failure clears the
/// session and redirects home with an error code instead; the token endpoint
/// is never called without a code.
pub async fn callback(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Query(params): Query<CallbackParams>,
) -> (CookieJar, Redirect) {
    let session = SessionManager::new(jar, state.config.secure_cookies);

    if let Some(err) = params.error.as_deref() {
        warning!("Authorization denied by Spotify: {}", err);
        return failure(session, AUTH_FAILED_REDIRECT);
    }

    let Some(code) = params.code.filter(|c| !c.trim().is_empty()) else {
        warning!("Callback missing code param");
        return failure(session, AUTH_FAILED_REDIRECT);
    };

    let options = utils::decode_state(params.state.as_deref());
    info!(
        "Auth callback received (code {}, {}, limit {})",
        utils::preview(&code),
        options.time_range,
        options.track_limit
    );

    match complete_login(&state, &code, &options).await {
        Ok(login) => {
            success!(
                "Signed in {} with {} top tracks",
                login.name,
                login.tracks.len()
            );
            let jar = session
                .store_refresh_token(&login.refresh_token)
                .store_profile(&login.name, &login.tracks, options)
                .into_jar();
            (jar, Redirect::to("/"))
        }
        Err(SpotifyError::UnregisteredUser) => {
            warning!("User needs to be registered in the Spotify Developer Dashboard");
            failure(session, UNREGISTERED_REDIRECT)
        }
        Err(e) => {
            warning!("Error during Spotify authentication: {}", e);
            failure(session, AUTH_FAILED_REDIRECT)
        }
    }
}

async fn complete_login(
    state: &AppState,
    code: &str,
    options: &AuthOptions,
) -> Result<CompletedLogin, SpotifyError> {
    let spotify_config = &state.config.spotify;

    let token = spotify::auth::exchange_code(&state.http, spotify_config, code).await?;
    let refresh_token = token
        .refresh_token
        .ok_or(SpotifyError::MissingField("refresh_token"))?;

    let profile =
        spotify::tracks::get_profile(&state.http, spotify_config, &token.access_token).await?;
    let name = profile
        .name()
        .ok_or(SpotifyError::InvalidProfile)?
        .to_string();

    let tracks =
        spotify::tracks::get_top_tracks(&state.http, spotify_config, &token.access_token, options)
            .await?;

    Ok(CompletedLogin {
        name,
        refresh_token,
        tracks,
    })
}

fn failure(session: SessionManager, location: &str) -> (CookieJar, Redirect) {
    (session.clear().into_jar(), Redirect::to(location))
}
