use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use time::Duration;

use crate::{
    types::{AuthOptions, SessionView, TimeRange, Track, TrackLimit},
    utils, warning,
};

pub const NAME_COOKIE: &str = "spotify_name";
pub const TRACKS_COOKIE: &str = "spotify_tracks";
pub const REFRESH_TOKEN_COOKIE: &str = "spotify_refresh_token";
pub const TIME_RANGE_COOKIE: &str = "spotify_timeRange";
pub const TRACK_LIMIT_COOKIE: &str = "spotify_trackLimit";

pub const SESSION_COOKIES: [&str; 5] = [
    NAME_COOKIE,
    TRACKS_COOKIE,
    REFRESH_TOKEN_COOKIE,
    TIME_RANGE_COOKIE,
    TRACK_LIMIT_COOKIE,
];

pub const SESSION_MAX_AGE_SECS: i64 = 3600;

/// Reads and writes the cookie-encoded session.
///
/// The browser cookie jar is the only persistence layer: every accessor
/// decodes from the jar it wraps, and every mutation returns the manager with
/// an updated jar that the handler hands back as part of its response. Values
/// that fail to decode are treated as absent.
pub struct SessionManager {
    jar: CookieJar,
    secure: bool,
}

impl SessionManager {
    pub fn new(jar: CookieJar, secure: bool) -> Self {
        Self { jar, secure }
    }

    pub fn name(&self) -> Option<String> {
        self.value(NAME_COOKIE)
    }

    pub fn refresh_token(&self) -> Option<String> {
        self.value(REFRESH_TOKEN_COOKIE)
    }

    /// Tracks from the `spotify_tracks` cookie, empty when absent or malformed.
    pub fn tracks(&self) -> Vec<Track> {
        let Some(raw) = self.value(TRACKS_COOKIE) else {
            return Vec::new();
        };

        match utils::decode_tracks(&raw) {
            Ok(tracks) => tracks,
            Err(e) => {
                warning!("Discarding malformed {} cookie: {}", TRACKS_COOKIE, e);
                Vec::new()
            }
        }
    }

    pub fn options(&self) -> AuthOptions {
        let time_range = self
            .value(TIME_RANGE_COOKIE)
            .map(|v| TimeRange::parse_or_default(&v))
            .unwrap_or_default();
        let track_limit = self
            .value(TRACK_LIMIT_COOKIE)
            .map(|v| TrackLimit::parse_or_default(&v))
            .unwrap_or_default();
        AuthOptions::new(time_range, track_limit)
    }

    pub fn view(&self) -> SessionView {
        let name = self.name();
        let options = self.options();
        SessionView {
            connected: name.is_some(),
            name,
            tracks: self.tracks(),
            time_range: options.time_range,
            track_limit: options.track_limit,
        }
    }

    /// Writes the user-visible part of the session.
    ///
    /// Tracks beyond what fits in one cookie are dropped from the end.
    #[must_use]
    pub fn store_profile(self, name: &str, tracks: &[Track], options: AuthOptions) -> Self {
        self.set(NAME_COOKIE, name.to_string(), false)
            .set(TRACKS_COOKIE, utils::encode_tracks(utils::fit_tracks(tracks)), false)
            .set(TIME_RANGE_COOKIE, options.time_range.to_string(), false)
            .set(TRACK_LIMIT_COOKIE, options.track_limit.to_string(), false)
    }

    #[must_use]
    pub fn store_refresh_token(self, refresh_token: &str) -> Self {
        self.set(REFRESH_TOKEN_COOKIE, refresh_token.to_string(), true)
    }

    /// Expires every session cookie.
    #[must_use]
    pub fn clear(mut self) -> Self {
        for name in SESSION_COOKIES {
            self.jar = self.jar.add(removal_cookie(name));
        }
        self
    }

    pub fn into_jar(self) -> CookieJar {
        self.jar
    }

    fn value(&self, name: &str) -> Option<String> {
        self.jar
            .get(name)
            .map(|c| c.value().trim().to_string())
            .filter(|v| !v.is_empty())
    }

    fn set(mut self, name: &'static str, value: String, http_only: bool) -> Self {
        self.jar = self
            .jar
            .add(session_cookie(name, value, http_only, self.secure));
        self
    }
}

fn session_cookie(
    name: &'static str,
    value: String,
    http_only: bool,
    secure: bool,
) -> Cookie<'static> {
    Cookie::build((name, value))
        .http_only(http_only)
        .secure(secure)
        .same_site(SameSite::Lax)
        .path("/")
        .max_age(Duration::seconds(SESSION_MAX_AGE_SECS))
        .build()
}

fn removal_cookie(name: &'static str) -> Cookie<'static> {
    Cookie::build((name, ""))
        .path("/")
        .max_age(Duration::ZERO)
        .build()
}
