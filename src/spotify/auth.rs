use chrono::Utc;
use reqwest::{
    Client, Response, Url,
    header::{ACCEPT, AUTHORIZATION},
};

use crate::{
    config::{ConfigError, SpotifyConfig},
    info,
    spotify::{SpotifyError, status_error},
    types::{AuthOptions, Token, TokenResponse},
    utils,
};

/// Permissions requested from the listener.
pub const SCOPES: [&str; 4] = [
    "user-read-currently-playing",
    "user-top-read",
    "user-read-recently-played",
    "user-library-read",
];

/// Builds the Spotify authorization URL the listener is sent to.
///
/// The URL carries `response_type=code`, the client id, the space-joined
/// [`SCOPES`], the redirect URI, `show_dialog=true` and, when `options` is
/// given, a JSON `state` parameter (`{"timeRange": .., "trackLimit": ..}`)
/// that comes back unchanged on the callback.
///
/// # Arguments
///
/// * `config` - Spotify credentials and the authorize endpoint
/// * `options` - Time range and track count to carry through the redirect
///
/// # Errors
///
/// Returns [`ConfigError::Missing`] when the client id or redirect URI is
/// empty and [`ConfigError::Invalid`] when the authorize endpoint is not a URL.
///
/// # Example
///
/// ```
/// let config = SpotifyConfig::new("id", "secret", "http://127.0.0.1:3000/callback");
/// let url = authorize_url(&config, Some(&AuthOptions::default()))?;
/// assert!(url.contains("response_type=code"));
/// ```
pub fn authorize_url(
    config: &SpotifyConfig,
    options: Option<&AuthOptions>,
) -> Result<String, ConfigError> {
    if config.client_id.trim().is_empty() {
        return Err(ConfigError::Missing("SPOTIFY_CLIENT_ID"));
    }
    if config.redirect_uri.trim().is_empty() {
        return Err(ConfigError::Missing("SPOTIFY_REDIRECT_URI"));
    }

    let mut url = Url::parse(&config.auth_url).map_err(|e| ConfigError::Invalid {
        key: "SPOTIFY_AUTH_URL",
        reason: e.to_string(),
    })?;

    {
        let mut query = url.query_pairs_mut();
        query
            .append_pair("response_type", "code")
            .append_pair("client_id", &config.client_id)
            .append_pair("scope", &SCOPES.join(" "))
            .append_pair("redirect_uri", &config.redirect_uri);
        if let Some(options) = options {
            query.append_pair("state", &utils::encode_state(options));
        }
        query.append_pair("show_dialog", "true");
    }

    Ok(url.to_string())
}

/// Exchanges an authorization code for access and refresh tokens.
///
/// Posts `grant_type=authorization_code` to the token endpoint, authenticating
/// the client with HTTP Basic auth of `client_id:client_secret`. The code is
/// single-use and short-lived, so the exchange happens right inside the
/// callback request.
///
/// # Errors
///
/// - [`SpotifyError::Status`] for any non-2xx answer (invalid or reused code,
///   bad credentials, redirect URI mismatch)
/// - [`SpotifyError::MissingField`] when `access_token` or `refresh_token` is
///   absent from an otherwise successful answer
/// - [`SpotifyError::Http`] for network and decoding failures
pub async fn exchange_code(
    client: &Client,
    config: &SpotifyConfig,
    code: &str,
) -> Result<Token, SpotifyError> {
    info!("Requesting access token (code {})", utils::preview(code));

    let res = client
        .post(&config.token_url)
        .header(
            AUTHORIZATION,
            utils::basic_auth_header(&config.client_id, &config.client_secret),
        )
        .header(ACCEPT, "application/json")
        .form(&[
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", config.redirect_uri.as_str()),
        ])
        .send()
        .await?;

    read_token(res, true).await
}

/// Refreshes an access token using a refresh token.
///
/// Spotify may or may not rotate the refresh token; when it does, the new one
/// is returned in [`Token::refresh_token`] and the caller should store it.
///
/// # Errors
///
/// Same as [`exchange_code`], except that a missing `refresh_token` in the
/// answer is not an error.
pub async fn refresh_access_token(
    client: &Client,
    config: &SpotifyConfig,
    refresh_token: &str,
) -> Result<Token, SpotifyError> {
    let res = client
        .post(&config.token_url)
        .header(
            AUTHORIZATION,
            utils::basic_auth_header(&config.client_id, &config.client_secret),
        )
        .header(ACCEPT, "application/json")
        .form(&[
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token),
        ])
        .send()
        .await?;

    read_token(res, false).await
}

async fn read_token(res: Response, require_refresh: bool) -> Result<Token, SpotifyError> {
    if !res.status().is_success() {
        return Err(status_error(res).await);
    }

    let payload: TokenResponse = res.json().await?;

    let access_token = payload
        .access_token
        .filter(|t| !t.is_empty())
        .ok_or(SpotifyError::MissingField("access_token"))?;
    let refresh_token = payload.refresh_token.filter(|t| !t.is_empty());
    if require_refresh && refresh_token.is_none() {
        return Err(SpotifyError::MissingField("refresh_token"));
    }

    let token = Token {
        access_token,
        refresh_token,
        scope: payload.scope.unwrap_or_default(),
        expires_in: payload.expires_in.unwrap_or(3600),
        obtained_at: Utc::now().timestamp() as u64,
    };

    info!(
        "Access token {} valid until {} (scopes: {})",
        utils::preview(&token.access_token),
        token
            .expires_at()
            .map(|t| t.format("%H:%M:%S UTC").to_string())
            .unwrap_or_else(|| "-".to_string()),
        if token.scope.is_empty() { "-" } else { token.scope.as_str() }
    );

    Ok(token)
}
