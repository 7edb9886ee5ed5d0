//! # Spotify Integration Module
//!
//! This module is the integration layer between the service and the Spotify
//! Web API. It covers the two halves of the authorization-code flow and the
//! two reads the profile needs.
//!
//! ## Core Modules
//!
//! ### Authentication
//!
//! [`auth`] - OAuth 2.0 authorization-code flow with a client secret:
//! - **Authorization URL**: Builds the consent URL, threading the listener's
//!   options through the opaque `state` parameter
//! - **Code Exchange**: Trades the callback `code` for access and refresh tokens
//! - **Token Refresh**: Trades a stored refresh token for a new access token
//!
//! ### Listening Data
//!
//! [`tracks`] - Reads on behalf of the listener:
//! - **Profile**: `GET /me`, including detection of accounts that are not
//!   registered for an app in development mode
//! - **Top Tracks**: `GET /me/top/tracks` for a time range and limit
//!
//! ## Error Handling
//!
//! Every call returns [`SpotifyError`]. Nothing retries: a failed exchange or
//! read fails the whole request immediately and the handler decides whether
//! that is a redirect or a JSON error.
//!
//! ## API Coverage
//!
//! - `POST /api/token` - code exchange and refresh (HTTP Basic client auth)
//! - `GET /me` - display name
//! - `GET /me/top/tracks` - top tracks
//!
//! All endpoint base URLs come from [`crate::config::SpotifyConfig`], which
//! lets tests point the client at a local mock server.

use std::fmt;

use reqwest::StatusCode;

pub mod auth;
pub mod tracks;

#[derive(Debug)]
pub enum SpotifyError {
    Http(reqwest::Error),
    Status { status: StatusCode, body: String },
    MissingField(&'static str),
    UnregisteredUser,
    InvalidProfile,
}

impl fmt::Display for SpotifyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpotifyError::Http(e) => write!(f, "request to Spotify failed: {e}"),
            SpotifyError::Status { status, body } => {
                write!(f, "Spotify responded with {status}: {body}")
            }
            SpotifyError::MissingField(field) => {
                write!(f, "Spotify response is missing `{field}`")
            }
            SpotifyError::UnregisteredUser => write!(
                f,
                "This Spotify account needs to be registered in the Developer Dashboard"
            ),
            SpotifyError::InvalidProfile => write!(f, "Invalid user profile data received"),
        }
    }
}

impl std::error::Error for SpotifyError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SpotifyError::Http(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for SpotifyError {
    fn from(err: reqwest::Error) -> Self {
        SpotifyError::Http(err)
    }
}

/// Reads a non-2xx body for error reporting.
pub(crate) async fn status_error(res: reqwest::Response) -> SpotifyError {
    let status = res.status();
    let body = res
        .text()
        .await
        .unwrap_or_else(|_| "Failed to read error body".to_string());
    SpotifyError::Status { status, body }
}
