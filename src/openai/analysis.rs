use reqwest::Client;

use crate::{
    config::OpenAiConfig,
    info,
    openai::{OpenAiError, api_key, upstream_error},
    types::{Analysis, ChatCompletionRequest, ChatCompletionResponse, ChatMessage, Track},
    utils,
};

const TEMPERATURE: f32 = 0.7;

pub fn build_prompt(display_name: &str, tracks: &[Track]) -> String {
    format!(
        "You are the apex music nerd. You are fun, engaging, and know your stuff. \
         You can also be teasing but in a playful and fun way. \
         Generate a music nerd profile of {} given their top tracks:\n\n{}",
        display_name,
        utils::format_track_list(tracks)
    )
}

/// Asks the chat completion endpoint for a music nerd profile.
///
/// The returned [`Analysis::model`] is the model reported by the API, which
/// may be a dated snapshot of the configured one.
pub async fn analyze(
    client: &Client,
    config: &OpenAiConfig,
    display_name: &str,
    tracks: &[Track],
) -> Result<Analysis, OpenAiError> {
    let key = api_key(config)?;
    let prompt = build_prompt(display_name, tracks);

    info!(
        "Requesting profile from {} ({} tracks, {} prompt chars)",
        config.model,
        tracks.len(),
        prompt.len()
    );

    let request = ChatCompletionRequest {
        model: config.model.clone(),
        messages: vec![ChatMessage {
            role: "user".to_string(),
            content: prompt,
        }],
        temperature: TEMPERATURE,
    };

    let res = client
        .post(format!("{}/chat/completions", config.api_url))
        .bearer_auth(key)
        .json(&request)
        .send()
        .await?;

    if !res.status().is_success() {
        return Err(upstream_error(res).await);
    }

    let completion: ChatCompletionResponse = res.json().await?;
    let model = completion.model.unwrap_or_else(|| config.model.clone());
    let analysis = completion
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .filter(|c| !c.trim().is_empty())
        .ok_or(OpenAiError::EmptyResponse("completion text"))?;

    info!(
        "Completion {} from {} ({} chars)",
        completion.id.as_deref().unwrap_or("-"),
        model,
        analysis.len()
    );

    Ok(Analysis { analysis, model })
}
