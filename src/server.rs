use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tokio::net::TcpListener;

use crate::{Res, api, config::Config, info};

/// Shared, immutable request state.
pub struct AppState {
    pub config: Config,
    pub http: reqwest::Client,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
        }
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(api::index))
        .route("/health", get(api::health))
        .route("/login", get(api::login))
        .route("/callback", get(api::callback))
        .route("/api/auth/callback", get(api::callback))
        .route("/api/session", get(api::session))
        .route("/api/logout", post(api::logout))
        .route("/api/refresh", post(api::refresh))
        .route("/api/analyze", post(api::analyze))
        .route("/api/generate-image", post(api::generate_image))
        .route("/api/profile", post(api::profile))
        .with_state(state)
}

/// Serves the app on an already bound listener until the process ends.
pub async fn serve(listener: TcpListener, config: Config) -> Res<()> {
    let app = router(Arc::new(AppState::new(config)));
    info!("Listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}

/// Binds the configured address and serves the app.
pub async fn start_api_server(config: Config) -> Res<()> {
    let addr = config.socket_addr()?;
    let listener = TcpListener::bind(addr).await?;
    serve(listener, config).await
}
