//! Configuration management for the music nerd profile service.
//!
//! All settings are read from the process environment exactly once, at
//! start-up, into an immutable [`Config`] that is handed to the server and the
//! CLI commands. Nothing else in the crate reads environment variables.
//!
//! The configuration system follows a hierarchical approach:
//! 1. Environment variables (highest priority)
//! 2. `.env` in the current working directory
//! 3. `.env` file in the local data directory
//! 4. Application defaults (for optional values)

use std::{env, fmt, net::SocketAddr, path::PathBuf};

use reqwest::Url;

pub const DEFAULT_SERVER_ADDRESS: &str = "127.0.0.1:3000";
pub const SPOTIFY_AUTH_URL: &str = "https://accounts.spotify.com/authorize";
pub const SPOTIFY_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
pub const SPOTIFY_API_URL: &str = "https://api.spotify.com/v1";
pub const OPENAI_API_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
pub const DEFAULT_IMAGE_MODEL: &str = "dall-e-3";

/// Loads environment variables from `.env` files.
///
/// A `.env` in the working directory is tried first, then the one in the
/// platform-specific local data directory under `mnprofile/.env`. Variables
/// already present in the process environment are never overwritten, and a
/// missing file is not an error: the service can be configured purely
/// through the environment.
///
/// # Directory Structure
///
/// - Linux: `~/.local/share/mnprofile/.env`
/// - macOS: `~/Library/Application Support/mnprofile/.env`
/// - Windows: `%LOCALAPPDATA%/mnprofile/.env`
///
/// # Errors
///
/// Returns an error string if the data directory cannot be created.
pub async fn load_env() -> Result<(), String> {
    let _ = dotenv::dotenv();

    let path = env_file_path();
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    if path.is_file() {
        dotenv::from_path(&path).map_err(|e| e.to_string())?;
    }
    Ok(())
}

fn env_file_path() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("mnprofile/.env");
    path
}

#[derive(Debug)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid { key: &'static str, reason: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "{key} must be set"),
            ConfigError::Invalid { key, reason } => write!(f, "{key} is invalid: {reason}"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Spotify application credentials and endpoints.
#[derive(Clone)]
pub struct SpotifyConfig {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
    pub auth_url: String,
    pub token_url: String,
    pub api_url: String,
}

impl SpotifyConfig {
    /// Creates a config pointing at the public Spotify endpoints.
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        redirect_uri: impl Into<String>,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            redirect_uri: redirect_uri.into(),
            auth_url: SPOTIFY_AUTH_URL.to_string(),
            token_url: SPOTIFY_TOKEN_URL.to_string(),
            api_url: SPOTIFY_API_URL.to_string(),
        }
    }

    #[must_use]
    pub fn with_auth_url(mut self, url: impl Into<String>) -> Self {
        self.auth_url = url.into();
        self
    }

    #[must_use]
    pub fn with_token_url(mut self, url: impl Into<String>) -> Self {
        self.token_url = url.into();
        self
    }

    #[must_use]
    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into();
        self
    }
}

impl fmt::Debug for SpotifyConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpotifyConfig")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("redirect_uri", &self.redirect_uri)
            .field("auth_url", &self.auth_url)
            .field("token_url", &self.token_url)
            .field("api_url", &self.api_url)
            .finish()
    }
}

/// OpenAI credentials and model selection.
///
/// The API key is optional at start-up so the Spotify half of the service
/// keeps working without it; the generation endpoints answer 500 when it is
/// missing.
#[derive(Clone)]
pub struct OpenAiConfig {
    pub api_key: Option<String>,
    pub api_url: String,
    pub model: String,
    pub image_model: String,
}

impl OpenAiConfig {
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            api_key,
            api_url: OPENAI_API_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            image_model: DEFAULT_IMAGE_MODEL.to_string(),
        }
    }

    #[must_use]
    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into();
        self
    }

    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    #[must_use]
    pub fn with_image_model(mut self, model: impl Into<String>) -> Self {
        self.image_model = model.into();
        self
    }
}

impl fmt::Debug for OpenAiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenAiConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("api_url", &self.api_url)
            .field("model", &self.model)
            .field("image_model", &self.image_model)
            .finish()
    }
}

/// Complete service configuration, built once and shared read-only.
#[derive(Debug, Clone)]
pub struct Config {
    pub server_addr: String,
    pub secure_cookies: bool,
    pub spotify: SpotifyConfig,
    pub openai: OpenAiConfig,
}

impl Config {
    pub fn new(spotify: SpotifyConfig, openai: OpenAiConfig) -> Self {
        Self {
            server_addr: DEFAULT_SERVER_ADDRESS.to_string(),
            secure_cookies: false,
            spotify,
            openai,
        }
    }

    #[must_use]
    pub fn with_server_addr(mut self, addr: impl Into<String>) -> Self {
        self.server_addr = addr.into();
        self
    }

    #[must_use]
    pub fn with_secure_cookies(mut self, secure: bool) -> Self {
        self.secure_cookies = secure;
        self
    }

    /// Builds the configuration from environment variables.
    ///
    /// # Required env vars
    /// - `SPOTIFY_CLIENT_ID`
    /// - `SPOTIFY_CLIENT_SECRET`
    /// - `SPOTIFY_REDIRECT_URI` (must be an absolute URL)
    ///
    /// # Optional env vars
    /// - `SERVER_ADDRESS` (default `127.0.0.1:3000`)
    /// - `SPOTIFY_AUTH_URL`, `SPOTIFY_TOKEN_URL`, `SPOTIFY_API_URL`
    /// - `OPENAI_API_KEY`, `OPENAI_API_URL`, `OPENAI_MODEL`, `OPENAI_IMAGE_MODEL`
    /// - `COOKIE_SECURE`: `1` or `true` marks cookies `Secure`
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] naming the first missing or malformed variable.
    pub fn from_env() -> Result<Self, ConfigError> {
        let client_id = required("SPOTIFY_CLIENT_ID")?;
        let client_secret = required("SPOTIFY_CLIENT_SECRET")?;
        let redirect_uri = required("SPOTIFY_REDIRECT_URI")?;
        Url::parse(&redirect_uri).map_err(|e| ConfigError::Invalid {
            key: "SPOTIFY_REDIRECT_URI",
            reason: e.to_string(),
        })?;

        let mut spotify = SpotifyConfig::new(client_id, client_secret, redirect_uri);
        if let Some(url) = optional("SPOTIFY_AUTH_URL") {
            spotify = spotify.with_auth_url(url);
        }
        if let Some(url) = optional("SPOTIFY_TOKEN_URL") {
            spotify = spotify.with_token_url(url);
        }
        if let Some(url) = optional("SPOTIFY_API_URL") {
            spotify = spotify.with_api_url(url);
        }

        let mut openai = OpenAiConfig::new(optional("OPENAI_API_KEY"));
        if let Some(url) = optional("OPENAI_API_URL") {
            openai = openai.with_api_url(url);
        }
        if let Some(model) = optional("OPENAI_MODEL") {
            openai = openai.with_model(model);
        }
        if let Some(model) = optional("OPENAI_IMAGE_MODEL") {
            openai = openai.with_image_model(model);
        }

        let secure = matches!(optional("COOKIE_SECURE").as_deref(), Some("1") | Some("true"));

        let mut config = Config::new(spotify, openai).with_secure_cookies(secure);
        if let Some(addr) = optional("SERVER_ADDRESS") {
            config = config.with_server_addr(addr);
        }
        config.socket_addr()?;

        Ok(config)
    }

    /// Parses the configured server address.
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        self.server_addr
            .parse()
            .map_err(|e: std::net::AddrParseError| ConfigError::Invalid {
                key: "SERVER_ADDRESS",
                reason: e.to_string(),
            })
    }
}

fn required(key: &'static str) -> Result<String, ConfigError> {
    optional(key).ok_or(ConfigError::Missing(key))
}

fn optional(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
