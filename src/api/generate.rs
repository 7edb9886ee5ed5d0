use std::{convert::Infallible, sync::Arc};

use async_stream::stream;
use axum::{
    Json,
    body::Bytes,
    extract::State,
    response::sse::{Event, KeepAlive, Sse},
};
use axum_extra::extract::cookie::CookieJar;
use futures::Stream;
use serde::Deserialize;
use serde_json::{Value, json};

use crate::{
    api::ApiError,
    management::SessionManager,
    openai::{self, OpenAiError},
    server::AppState,
    success,
    types::{Analysis, GeneratedImage, Track},
};

pub const FALLBACK_DISPLAY_NAME: &str = "this listener";

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub display_name: Option<String>,
}

struct ProfileInput {
    name: String,
    tracks: Vec<Track>,
}

/// Reads the tracks and display name the generation endpoints work on.
///
/// Tracks only ever come from the session cookie; the body may override the
/// name. The key check runs here too so no endpoint starts work it cannot
/// finish.
fn profile_input(
    state: &AppState,
    jar: CookieJar,
    body: &Bytes,
    on_missing_key: fn(OpenAiError) -> ApiError,
) -> Result<ProfileInput, ApiError> {
    let session = SessionManager::new(jar, state.config.secure_cookies);
    let tracks = session.tracks();
    if tracks.is_empty() {
        return Err(ApiError::NoTracks);
    }

    if state
        .config
        .openai
        .api_key
        .as_deref()
        .is_none_or(str::is_empty)
    {
        return Err(on_missing_key(OpenAiError::NotConfigured));
    }

    let request: AnalyzeRequest = serde_json::from_slice(body).unwrap_or_default();
    let name = request
        .display_name
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty())
        .or_else(|| session.name())
        .unwrap_or_else(|| FALLBACK_DISPLAY_NAME.to_string());

    Ok(ProfileInput { name, tracks })
}

pub async fn analyze(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    body: Bytes,
) -> Result<Json<Analysis>, ApiError> {
    let input = profile_input(&state, jar, &body, ApiError::Analysis)?;
    let analysis = openai::analysis::analyze(
        &state.http,
        &state.config.openai,
        &input.name,
        &input.tracks,
    )
    .await
    .map_err(ApiError::Analysis)?;

    success!("Analysis generated with {}", analysis.model);
    Ok(Json(analysis))
}

pub async fn generate_image(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    body: Bytes,
) -> Result<Json<GeneratedImage>, ApiError> {
    let input = profile_input(&state, jar, &body, ApiError::Image)?;
    let image = openai::image::generate_image(&state.http, &state.config.openai, &input.tracks)
        .await
        .map_err(ApiError::Image)?;

    success!("Image generated");
    Ok(Json(image))
}

/// Streams the profile as server-sent events.
///
/// Emits `analysis`, then `image`, then `done`. The first failing step emits a
/// single `error` event carrying the same body the JSON endpoints would return
/// and ends the stream.
pub async fn profile(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    body: Bytes,
) -> Result<Sse<impl Stream<Item = Result<Event, Infallible>>>, ApiError> {
    let input = profile_input(&state, jar, &body, ApiError::Analysis)?;

    let events = stream! {
        let analysis = openai::analysis::analyze(
            &state.http,
            &state.config.openai,
            &input.name,
            &input.tracks,
        )
        .await;

        match analysis {
            Ok(analysis) => {
                yield Ok::<Event, Infallible>(json_event("analysis", &json!(analysis)));

                match openai::image::generate_image(&state.http, &state.config.openai, &input.tracks).await {
                    Ok(image) => {
                        yield Ok(json_event("image", &json!(image)));
                        yield Ok(Event::default().event("done").data("{}"));
                        success!("Profile streamed for {}", input.name);
                    }
                    Err(e) => yield Ok(json_event("error", &ApiError::Image(e).body())),
                }
            }
            Err(e) => yield Ok(json_event("error", &ApiError::Analysis(e).body())),
        }
    };

    Ok(Sse::new(events).keep_alive(KeepAlive::default()))
}

fn json_event(name: &str, data: &Value) -> Event {
    Event::default().event(name).data(data.to_string())
}
