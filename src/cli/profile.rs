use std::{path::Path, time::Duration};

use indicatif::{ProgressBar, ProgressStyle};
use tabled::Table;

use crate::{
    Res,
    api::FALLBACK_DISPLAY_NAME,
    config::OpenAiConfig,
    error, openai, success,
    types::Track,
    utils,
};

/// Generates a profile from a JSON array of `{name, artist}` tracks without
/// going through Spotify.
pub async fn profile(config: &OpenAiConfig, tracks_file: &Path, name: Option<String>, image: bool) {
    let tracks = match load_tracks(tracks_file).await {
        Ok(tracks) if tracks.is_empty() => error!("No tracks found in {}", tracks_file.display()),
        Ok(tracks) => tracks,
        Err(e) => error!("Cannot read tracks from {}. Err: {}", tracks_file.display(), e),
    };

    println!("{}", Table::new(utils::tracks_to_rows(&tracks)));

    let name = name.unwrap_or_else(|| FALLBACK_DISPLAY_NAME.to_string());
    let client = reqwest::Client::new();

    let pb = spinner(format!("Asking {} about {}...", config.model, name));
    let analysis = openai::analysis::analyze(&client, config, &name, &tracks).await;
    pb.finish_and_clear();

    match analysis {
        Ok(analysis) => {
            success!("Profile by {}", analysis.model);
            println!("\n{}\n", analysis.analysis);
        }
        Err(e) => error!("Failed to analyze tracks. Err: {}", e),
    }

    if !image {
        return;
    }

    let pb = spinner(format!("Painting with {}...", config.image_model));
    let generated = openai::image::generate_image(&client, config, &tracks).await;
    pb.finish_and_clear();

    match generated {
        Ok(generated) if generated.image_url.starts_with("data:") => {
            success!(
                "Image generated ({} bytes inline data URL)",
                generated.image_url.len()
            );
        }
        Ok(generated) => success!("Image: {}", generated.image_url.underline()),
        Err(e) => error!("Failed to generate image. Err: {}", e),
    }
}

async fn load_tracks(path: &Path) -> Res<Vec<Track>> {
    let raw = async_fs::read_to_string(path).await?;
    Ok(utils::decode_tracks(&raw)?)
}

fn spinner(message: String) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );
    pb
}
