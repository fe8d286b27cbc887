use tracing::info;

use canned::CannedLayer;
use canned_server::config::ServerConfig;
use canned_server::router::build_router;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let config = ServerConfig::from_env();

    let mock = CannedLayer::new(&config.root).expect("failed to build mock catalog");
    let router = build_router(mock);

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind");

    info!("canned server serving mocks from {} on {addr}", config.root);
    axum::serve(listener, router).await.expect("server error");
}
