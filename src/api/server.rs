//! API server bootstrap

use super::handlers::AppState;
use super::routes::create_router;
use crate::config::ApiConfig;
use crate::coordinator::WagerCoordinator;
use std::sync::Arc;
use std::time::Duration;
use tokio::signal;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};
use tracing::info;

pub struct ApiServer {
    config: ApiConfig,
    coordinator: Arc<WagerCoordinator>,
}

impl ApiServer {
    pub fn new(config: ApiConfig, coordinator: Arc<WagerCoordinator>) -> Self {
        Self {
            config,
            coordinator,
        }
    }

    /// Serve until ctrl-c.
    pub async fn run(self) -> Result<(), Box<dyn std::error::Error>> {
        let state = AppState {
            coordinator: self.coordinator,
        };

        let app = create_router(state)
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive())
            .layer(TimeoutLayer::new(Duration::from_secs(
                self.config.request_timeout_secs,
            )));

        let addr = format!("{}:{}", self.config.listen_address, self.config.port);
        let listener = tokio::net::TcpListener::bind(&addr).await?;
        info!("wagerhouse API listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        info!("API server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    let _ = signal::ctrl_c().await;
    info!("shutdown signal received");
}
