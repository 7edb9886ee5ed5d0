use tokio::net::TcpListener;

use crate::{config::Config, error, info, server, warning};

pub async fn serve(config: Config, open: bool) {
    let addr = match config.socket_addr() {
        Ok(addr) => addr,
        Err(e) => error!("Failed to parse server address: {}", e),
    };

    let listener = match TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => error!("Cannot bind {}. Err: {}", addr, e),
    };

    if open {
        let url = format!("http://{}/", addr);
        info!("Opening {} in your browser", url);
        if let Err(e) = webbrowser::open(&url) {
            warning!("Cannot open browser. Err: {}", e);
        }
    }

    if let Err(e) = server::serve(listener, config).await {
        error!("Server stopped. Err: {}", e);
    }
}
