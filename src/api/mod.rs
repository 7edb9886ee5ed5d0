//! # API Module
//!
//! HTTP handlers for the mnprofile web server. Every handler is a plain async
//! function taking axum extractors, so they can be mounted in any router; the
//! crate's own routing lives in [`crate::server::router`].
//!
//! ## Endpoints
//!
//! ### Page
//!
//! - [`index`] - The single embedded HTML page
//!
//! ### Authentication
//!
//! - [`login`] - Redirects to the Spotify consent page with the chosen options
//! - [`callback`] - Completes the authorization-code flow and stores the session
//!
//! ### Session
//!
//! - [`session`] - Returns the decoded cookie session as JSON
//! - [`logout`] - Expires every session cookie
//! - [`refresh`] - Re-fetches profile and top tracks with the stored refresh token
//!
//! ### Generation
//!
//! - [`analyze`] - Music nerd profile text
//! - [`generate_image`] - Illustration of the listener's room
//! - [`profile`] - Both of the above as a server-sent-event stream, text first
//!
//! ### Monitoring
//!
//! - [`health`] - Status and version
//!
//! ## Errors
//!
//! JSON endpoints fail with [`ApiError`], which renders as
//! `{"error": .., "details"?: {"message": ..}}`. The callback never fails with
//! a body: it always redirects home, with `?error=` on failure.
//!
//! ## Usage Example
//!
//! ```rust,ignore
//! use axum::{Router, routing::get};
//! use mnprofile::api::{callback, health};
//!
//! let app = Router::new()
//!     .route("/callback", get(callback))
//!     .route("/health", get(health))
//!     .with_state(state);
//! ```

mod callback;
mod error;
mod generate;
mod health;
mod page;
mod session;

pub use callback::{AUTH_FAILED_REDIRECT, CallbackParams, UNREGISTERED_REDIRECT, callback};
pub use error::ApiError;
pub use generate::{AnalyzeRequest, FALLBACK_DISPLAY_NAME, analyze, generate_image, profile};
pub use health::health;
pub use page::index;
pub use session::{CONFIG_ERROR_REDIRECT, login, logout, refresh, session};
