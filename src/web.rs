use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};

use crate::api;
use crate::service::ForecastService;
use crate::transfer::DocumentFetcher;

pub async fn run<F: DocumentFetcher + 'static>(
    service: ForecastService<F>,
    address: &str,
    port: u16,
) -> Result<()> {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .nest("/api", api::router(Arc::new(service)))
        .layer(cors);

    let addr = format!("{}:{}", address, port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Web server running at http://{}", addr);
    axum::serve(listener, app)
        .await
        .context("Web server terminated")?;
    Ok(())
}
