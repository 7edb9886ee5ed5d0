//! # OpenAI Integration Module
//!
//! Text and image generation for the listener profile, spoken over the plain
//! OpenAI REST API with `reqwest`.
//!
//! - [`analysis`] - Persona prompt and chat completion producing the profile text
//! - [`image`] - Scene prompt and image generation (hosted URL or data URL)
//!
//! Both calls require [`crate::config::OpenAiConfig::api_key`]; without it they
//! fail with [`OpenAiError::NotConfigured`] before touching the network.
//! Upstream error bodies of the form `{"error": {"message": ..}}` are surfaced
//! through [`OpenAiError::Upstream`] so handlers can echo the message.

use std::fmt;

use reqwest::StatusCode;

use crate::{config::OpenAiConfig, types::OpenAiErrorBody};

pub mod analysis;
pub mod image;

#[derive(Debug)]
pub enum OpenAiError {
    NotConfigured,
    Http(reqwest::Error),
    Upstream { status: StatusCode, message: String },
    EmptyResponse(&'static str),
}

impl fmt::Display for OpenAiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OpenAiError::NotConfigured => write!(f, "OpenAI API key not configured"),
            OpenAiError::Http(e) => write!(f, "request to OpenAI failed: {e}"),
            OpenAiError::Upstream { message, .. } => write!(f, "{message}"),
            OpenAiError::EmptyResponse(what) => write!(f, "OpenAI returned no {what}"),
        }
    }
}

impl std::error::Error for OpenAiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            OpenAiError::Http(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for OpenAiError {
    fn from(err: reqwest::Error) -> Self {
        OpenAiError::Http(err)
    }
}

pub(crate) fn api_key(config: &OpenAiConfig) -> Result<&str, OpenAiError> {
    config
        .api_key
        .as_deref()
        .filter(|k| !k.is_empty())
        .ok_or(OpenAiError::NotConfigured)
}

/// Turns a non-2xx answer into [`OpenAiError::Upstream`], preferring the
/// structured `error.message` over the raw body.
pub(crate) async fn upstream_error(res: reqwest::Response) -> OpenAiError {
    let status = res.status();
    let body = res.text().await.unwrap_or_default();
    let message = match serde_json::from_str::<OpenAiErrorBody>(&body) {
        Ok(parsed) => parsed.error.message,
        Err(_) if body.trim().is_empty() => format!("OpenAI responded with {status}"),
        Err(_) => body,
    };
    OpenAiError::Upstream { status, message }
}
