//! # CLI Module
//!
//! Command implementations for the `mnprofile` binary. Each command is an
//! async function that reports progress with the crate's console macros and
//! ends the process through [`crate::error!`] on unrecoverable failures.
//!
//! ## Commands
//!
//! - [`serve`] - Starts the web server, optionally opening the page in a browser
//! - [`auth_url`] - Prints the Spotify authorization URL for the given options
//! - [`profile`] - Generates a profile offline from a JSON track file
//!
//! ## Usage Patterns
//!
//! ```bash
//! mnprofile serve --open
//! mnprofile auth-url --time-range long_term --track-limit 25
//! mnprofile profile --tracks tracks.json --name Sam --image
//! ```

mod auth_url;
mod profile;
mod serve;

pub use auth_url::auth_url;
pub use profile::profile;
pub use serve::serve;
