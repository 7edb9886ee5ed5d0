use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::{Value, json};

use crate::{openai::OpenAiError, spotify::SpotifyError, warning};

/// Failures of the JSON endpoints.
///
/// Every variant maps to a JSON body `{"error": .., "details"?: {"message": ..}}`
/// so the page can show the upstream message without the process ever
/// crashing.
#[derive(Debug)]
pub enum ApiError {
    NoTracks,
    NoRefreshToken,
    Refresh(SpotifyError),
    Analysis(OpenAiError),
    Image(OpenAiError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NoTracks => StatusCode::BAD_REQUEST,
            ApiError::NoRefreshToken => StatusCode::UNAUTHORIZED,
            ApiError::Refresh(_) | ApiError::Analysis(_) | ApiError::Image(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn body(&self) -> Value {
        match self {
            ApiError::NoTracks => json!({ "error": "No tracks found" }),
            ApiError::NoRefreshToken => json!({ "error": "No refresh token found" }),
            ApiError::Analysis(OpenAiError::NotConfigured)
            | ApiError::Image(OpenAiError::NotConfigured) => {
                json!({ "error": "OpenAI API key not configured" })
            }
            ApiError::Refresh(e) => with_details("Failed to refresh data", e),
            ApiError::Analysis(e) => with_details("Failed to analyze tracks", e),
            ApiError::Image(e) => with_details("Failed to generate image", e),
        }
    }
}

fn with_details(error: &str, source: &dyn std::fmt::Display) -> Value {
    json!({
        "error": error,
        "details": { "message": source.to_string() },
    })
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            warning!("{}: {:?}", status, self);
        }
        (status, Json(self.body())).into_response()
    }
}
