use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tabled::Tabled;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    pub name: String,
    pub artist: String,
}

#[derive(Tabled)]
pub struct TrackTableRow {
    #[tabled(rename = "#")]
    pub rank: usize,
    pub name: String,
    pub artist: String,
}

/// Listening window for Spotify's top-items endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeRange {
    #[default]
    ShortTerm,
    MediumTerm,
    LongTerm,
}

impl TimeRange {
    pub const ALL: [TimeRange; 3] = [
        TimeRange::ShortTerm,
        TimeRange::MediumTerm,
        TimeRange::LongTerm,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TimeRange::ShortTerm => "short_term",
            TimeRange::MediumTerm => "medium_term",
            TimeRange::LongTerm => "long_term",
        }
    }

    /// Parses a raw value, falling back to the default for anything unknown.
    pub fn parse_or_default(raw: &str) -> Self {
        raw.parse().unwrap_or_default()
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeRange {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        TimeRange::ALL
            .into_iter()
            .find(|r| r.as_str() == normalized)
            .ok_or_else(|| {
                format!(
                    "invalid time range '{}'. Allowed: short_term, medium_term, long_term",
                    s.trim()
                )
            })
    }
}

/// Number of top tracks to fetch, always within Spotify's 1..=50 page limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TrackLimit(u32);

impl TrackLimit {
    pub const MIN: u32 = 1;
    pub const MAX: u32 = 50;
    pub const DEFAULT: u32 = 10;

    pub fn new(limit: u32) -> Self {
        TrackLimit(limit.clamp(Self::MIN, Self::MAX))
    }

    pub fn get(&self) -> u32 {
        self.0
    }

    /// Parses a raw value, falling back to the default when it is not a number.
    pub fn parse_or_default(raw: &str) -> Self {
        raw.parse().unwrap_or_default()
    }
}

impl Default for TrackLimit {
    fn default() -> Self {
        TrackLimit(Self::DEFAULT)
    }
}

impl<'de> Deserialize<'de> for TrackLimit {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        lenient_track_limit(deserializer)
    }
}

impl fmt::Display for TrackLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TrackLimit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u32>()
            .map(TrackLimit::new)
            .map_err(|_| format!("invalid track limit '{}'", s.trim()))
    }
}

/// User-selected options carried through the OAuth `state` parameter and the
/// refresh request body.
///
/// Deserialization never fails on individual fields: unknown time ranges and
/// non-numeric limits fall back to their defaults. Limits are accepted both as
/// JSON numbers and as numeric strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthOptions {
    #[serde(default, deserialize_with = "lenient_time_range")]
    pub time_range: TimeRange,
    #[serde(default)]
    pub track_limit: TrackLimit,
}

impl AuthOptions {
    pub fn new(time_range: TimeRange, track_limit: TrackLimit) -> Self {
        Self {
            time_range,
            track_limit,
        }
    }
}

fn lenient_time_range<'de, D>(deserializer: D) -> Result<TimeRange, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => TimeRange::parse_or_default(&s),
        _ => TimeRange::default(),
    })
}

fn lenient_track_limit<'de, D>(deserializer: D) -> Result<TrackLimit, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n
            .as_u64()
            .map(|n| TrackLimit::new(n.min(u32::MAX as u64) as u32))
            .unwrap_or_default(),
        Value::String(s) => TrackLimit::parse_or_default(&s),
        _ => TrackLimit::default(),
    })
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub scope: String,
    pub expires_in: u64,
    pub obtained_at: u64,
}

impl Token {
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.obtained_at.saturating_add(self.expires_in) as i64, 0)
    }
}

/// Decoded session as returned to the page by `GET /api/session`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionView {
    pub connected: bool,
    pub name: Option<String>,
    pub tracks: Vec<Track>,
    pub time_range: TimeRange,
    pub track_limit: TrackLimit,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    pub analysis: String,
    pub model: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedImage {
    #[serde(rename = "imageUrl")]
    pub image_url: String,
}

// Spotify wire types

#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
    pub scope: Option<String>,
    pub expires_in: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub display_name: Option<String>,
}

impl UserProfile {
    /// Display name, or the account id for profiles without one.
    pub fn name(&self) -> Option<&str> {
        self.display_name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .or_else(|| Some(self.id.trim()).filter(|id| !id.is_empty()))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TopTracksResponse {
    pub items: Vec<SpotifyTrack>,
    pub total: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SpotifyTrack {
    pub name: String,
    #[serde(default)]
    pub artists: Vec<SpotifyArtist>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SpotifyArtist {
    pub name: String,
}

impl From<SpotifyTrack> for Track {
    fn from(track: SpotifyTrack) -> Self {
        Track {
            name: track.name,
            artist: track
                .artists
                .into_iter()
                .next()
                .map(|a| a.name)
                .unwrap_or_default(),
        }
    }
}

// OpenAI wire types

#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatCompletionResponse {
    pub id: Option<String>,
    pub model: Option<String>,
    #[serde(default)]
    pub choices: Vec<ChatChoice>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatChoice {
    pub message: ChatChoiceMessage,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatChoiceMessage {
    pub content: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ImageGenerationRequest {
    pub model: String,
    pub prompt: String,
    pub n: u32,
    pub size: String,
    pub quality: String,
    pub style: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ImageGenerationResponse {
    #[serde(default)]
    pub data: Vec<ImageData>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ImageData {
    pub url: Option<String>,
    pub b64_json: Option<String>,
    pub revised_prompt: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OpenAiErrorBody {
    pub error: OpenAiErrorDetail,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OpenAiErrorDetail {
    pub message: String,
}
