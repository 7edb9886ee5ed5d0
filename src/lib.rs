//! Music Nerd Profile Library
//!
//! This library provides the building blocks for a small web service that
//! connects to a listener's Spotify account, reads their top tracks, and asks
//! an OpenAI-compatible API for a playful "music nerd" profile and an
//! illustrative image. Session state lives entirely in browser cookies.
//!
//! # Modules
//!
//! - `api` - HTTP handlers for the page, OAuth callback and JSON endpoints
//! - `cli` - Command-line interface implementations
//! - `config` - Configuration loading from environment variables
//! - `management` - Cookie-backed session management
//! - `openai` - Text and image generation clients
//! - `server` - Router assembly and the HTTP server
//! - `spotify` - Spotify Web API client implementation
//! - `types` - Data structures and type definitions
//! - `utils` - Codecs and small helpers
//!
//! # Example
//!
//! ```
//! use mnprofile::{config, server};
//!
//! #[tokio::main]
//! async fn main() -> mnprofile::Res<()> {
//!     config::load_env().await?;
//!     let config = config::Config::from_env()?;
//!     server::start_api_server(config).await?;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod management;
pub mod openai;
pub mod server;
pub mod spotify;
pub mod types;
pub mod utils;

/// A convenient Result type alias for operations that may fail.
///
/// Used on the command-line and start-up paths where any error simply ends
/// the program with a message. Request handlers use the typed errors from
/// [`spotify`], [`openai`] and [`api`] instead.
///
/// # Example
///
/// ```
/// use mnprofile::Res;
///
/// async fn fetch_data() -> Res<String> {
///     Ok("data".to_string())
/// }
/// ```
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints an informational message with a blue bullet point.
///
/// # Example
///
/// ```
/// info!("Listening on {}", addr);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
///
/// # Example
///
/// ```
/// success!("Stored session for {}", name);
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Only for unrecoverable start-up and CLI failures. Request handlers must
/// never call this; they log with [`warning!`] and answer with an error
/// response instead.
///
/// # Example
///
/// ```
/// error!("Failed to load configuration: {}", e);
/// // Program exits here - code after this will not execute
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// Used for every recoverable failure inside request handlers: failed token
/// exchanges, upstream errors, malformed cookies.
///
/// # Example
///
/// ```
/// warning!("Discarding malformed tracks cookie: {}", e);
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
