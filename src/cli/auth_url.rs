use crate::{
    config::SpotifyConfig,
    error, info, spotify,
    types::{AuthOptions, TimeRange, TrackLimit},
};

pub async fn auth_url(config: &SpotifyConfig, time_range: TimeRange, track_limit: TrackLimit) {
    let options = AuthOptions::new(time_range, track_limit);

    match spotify::auth::authorize_url(config, Some(&options)) {
        Ok(url) => {
            info!(
                "Open this URL to authorize ({}, limit {}):",
                time_range, track_limit
            );
            println!("{}", url);
        }
        Err(e) => error!("Cannot build authorization URL. Err: {}", e),
    }
}
