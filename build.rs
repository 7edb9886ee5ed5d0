//! Build script for the Music Nerd Profile server.
//!
//! Copies the `.env.example` template into the user's local data directory
//! (`<data_local_dir>/mnprofile/`), next to where the binary looks for its
//! `.env` file.

use std::{env, fs, path::PathBuf};

/// Copies `.env.example` from the crate root to the local data directory.
///
/// A missing template only produces a cargo warning; directory and write
/// failures fail the build.
///
/// Destinations:
/// - Linux: `~/.local/share/mnprofile/.env.example`
/// - macOS: `~/Library/Application Support/mnprofile/.env.example`
/// - Windows: `%LOCALAPPDATA%/mnprofile/.env.example`
fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("cargo:rerun-if-changed=.env.example");
    println!("cargo:rerun-if-changed=assets/index.html");

    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR")?);
    let env_example_path = manifest_dir.join(".env.example");

    let mut out_dir = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    out_dir.push("mnprofile");
    fs::create_dir_all(&out_dir)?;

    if env_example_path.is_file() {
        let contents = fs::read_to_string(&env_example_path)?;
        fs::write(out_dir.join(".env.example"), contents)?;
    } else {
        println!(
            "cargo:warning=.env.example not found at {}",
            env_example_path.display()
        );
    }

    Ok(())
}
