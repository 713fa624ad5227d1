use std::sync::Arc;
use video_chat::{handlers, logging, AppConfig, AppState, BackendClient, VideoChatBackend};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    logging::init_logging("YouTube video chat")?;

    let config = AppConfig::from_env()?;
    tracing::info!(
        "Configuration - Backend: {}, Timeout: {}s, Bind: {}",
        config.backend_url,
        config.request_timeout.as_secs(),
        config.bind_addr
    );

    let backend = BackendClient::new(config.backend_url.clone(), config.request_timeout)?;
    match backend.health().await {
        Ok(code) => tracing::info!("✅ Backend reachable at {} (HTTP {})", config.backend_url, code),
        Err(e) => tracing::warn!(
            "Backend not reachable at {}: {}. Set VIDEO_CHAT_BACKEND_URL if it lives elsewhere.",
            config.backend_url,
            e
        ),
    }

    let shared_state = Arc::new(AppState::new(Arc::new(backend), config.backend_url.clone()));
    let app = handlers::app_router(shared_state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}
