use reqwest::Client;

use crate::{
    config::OpenAiConfig,
    info,
    openai::{OpenAiError, api_key, upstream_error},
    types::{GeneratedImage, ImageGenerationRequest, ImageGenerationResponse, Track},
    utils,
};

const IMAGE_SIZE: &str = "1024x1024";
const IMAGE_QUALITY: &str = "standard";
const IMAGE_STYLE: &str = "vivid";

pub fn build_image_prompt(tracks: &[Track]) -> String {
    format!(
        "Generate an image of college me in my dorm bedroom. I'm wearing fan clothing \
         and accessories, and I'm listening intently to music. The room is cluttered \
         yet tastefully filled with CDs, records, posters, books, and other memorabilia \
         and merch that reflect my obsessiveness with the music style, national origin, \
         and aesthetic of the musicians who made these tracks: {}",
        utils::format_track_inline(tracks)
    )
}

/// Generates the dorm-room scene for the listener's tracks.
///
/// Returns the hosted image URL, or a `data:image/png;base64,..` URL when the
/// API answers with inline image data instead.
pub async fn generate_image(
    client: &Client,
    config: &OpenAiConfig,
    tracks: &[Track],
) -> Result<GeneratedImage, OpenAiError> {
    let key = api_key(config)?;
    let prompt = build_image_prompt(tracks);

    info!(
        "Requesting {} image from {} ({} prompt chars)",
        IMAGE_SIZE,
        config.image_model,
        prompt.len()
    );

    let request = ImageGenerationRequest {
        model: config.image_model.clone(),
        prompt,
        n: 1,
        size: IMAGE_SIZE.to_string(),
        quality: IMAGE_QUALITY.to_string(),
        style: IMAGE_STYLE.to_string(),
    };

    let res = client
        .post(format!("{}/images/generations", config.api_url))
        .bearer_auth(key)
        .json(&request)
        .send()
        .await?;

    if !res.status().is_success() {
        return Err(upstream_error(res).await);
    }

    let generated: ImageGenerationResponse = res.json().await?;
    let image = generated
        .data
        .into_iter()
        .next()
        .ok_or(OpenAiError::EmptyResponse("image"))?;

    if let Some(revised) = &image.revised_prompt {
        info!("Image prompt revised upstream ({} chars)", revised.len());
    }

    let image_url = match (image.url, image.b64_json) {
        (Some(url), _) if !url.is_empty() => url,
        (_, Some(b64)) if !b64.is_empty() => format!("data:image/png;base64,{}", b64),
        _ => return Err(OpenAiError::EmptyResponse("image url")),
    };

    Ok(GeneratedImage { image_url })
}
