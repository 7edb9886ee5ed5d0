use base64::{Engine, engine::general_purpose::STANDARD};

use crate::{
    types::{AuthOptions, Track, TrackTableRow},
    warning,
};

/// Serializes tracks for the `spotify_tracks` cookie.
pub fn encode_tracks(tracks: &[Track]) -> String {
    serde_json::to_string(tracks).unwrap_or_else(|_| "[]".to_string())
}

/// Decodes a `spotify_tracks` cookie value.
///
/// Accepts the plain JSON array as well as a percent-encoded copy of it, which
/// is what page scripts write with `encodeURIComponent`. Decoding is pure, so
/// feeding the same value twice always yields the same result.
pub fn decode_tracks(raw: &str) -> Result<Vec<Track>, serde_json::Error> {
    let raw = raw.trim();
    match serde_json::from_str::<Vec<Track>>(raw) {
        Ok(tracks) => Ok(tracks),
        Err(e) => match urlencoding::decode(raw) {
            Ok(decoded) if decoded.as_ref() != raw => serde_json::from_str(&decoded),
            _ => Err(e),
        },
    }
}

/// Budget for the percent-encoded `spotify_tracks` value. Name and attributes
/// must still fit in the 4096 bytes browsers accept per cookie.
pub const MAX_TRACKS_COOKIE_BYTES: usize = 3800;

/// Longest prefix of `tracks` whose percent-encoded cookie value stays within
/// [`MAX_TRACKS_COOKIE_BYTES`].
pub fn fit_tracks(tracks: &[Track]) -> &[Track] {
    let mut len = tracks.len();
    while len > 0
        && urlencoding::encode(&encode_tracks(&tracks[..len])).len() > MAX_TRACKS_COOKIE_BYTES
    {
        len -= 1;
    }

    if len < tracks.len() {
        warning!(
            "Keeping {} of {} tracks to fit the session cookie",
            len,
            tracks.len()
        );
    }
    &tracks[..len]
}

/// Serializes options into the OAuth `state` parameter.
pub fn encode_state(options: &AuthOptions) -> String {
    serde_json::to_string(options).unwrap_or_default()
}

/// Parses the OAuth `state` parameter, falling back to default options when it
/// is absent or unreadable.
pub fn decode_state(raw: Option<&str>) -> AuthOptions {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => AuthOptions::default(),
        Some(raw) => serde_json::from_str(raw).unwrap_or_else(|e| {
            warning!("Error parsing state parameter, using defaults: {}", e);
            AuthOptions::default()
        }),
    }
}

pub fn basic_auth_header(client_id: &str, client_secret: &str) -> String {
    format!(
        "Basic {}",
        STANDARD.encode(format!("{}:{}", client_id, client_secret))
    )
}

/// Shortens secrets for log output.
pub fn preview(value: &str) -> String {
    let head: String = value.chars().take(10).collect();
    format!("{}...", head)
}

/// Numbered, one track per line: `1. Name by Artist`.
pub fn format_track_list(tracks: &[Track]) -> String {
    tracks
        .iter()
        .enumerate()
        .map(|(i, t)| format!("{}. {} by {}", i + 1, t.name, t.artist))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Comma separated: `Name by Artist, Name by Artist`.
pub fn format_track_inline(tracks: &[Track]) -> String {
    tracks
        .iter()
        .map(|t| format!("{} by {}", t.name, t.artist))
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn tracks_to_rows(tracks: &[Track]) -> Vec<TrackTableRow> {
    tracks
        .iter()
        .enumerate()
        .map(|(i, t)| TrackTableRow {
            rank: i + 1,
            name: t.name.clone(),
            artist: t.artist.clone(),
        })
        .collect()
}
