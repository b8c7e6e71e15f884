mod config;
mod cors;
mod identity;
mod routes;
mod services;
mod state;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let config = config::AppConfig::from_env();
    if config.deploy_cdn.is_empty() {
        tracing::warn!("DEPLOY_CDN not set — the CDN origin will be dropped from the CORS allow-list");
    }

    let port = config.port;
    let state = state::AppState::new(config);

    let app = routes::app(state).expect("router assembly failed");
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .expect("failed to bind");

    tracing::info!(%port, "waypost listening");
    axum::serve(listener, app).await.expect("server failed");
}
