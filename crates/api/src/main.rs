use std::sync::Arc;

use anyhow::Context;

use rxbridge_books::{BooksConfig, HttpBooksGateway};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    rxbridge_observability::init();

    let config = BooksConfig::from_env().context("loading accounting configuration")?;
    let gateway =
        HttpBooksGateway::new(config).context("building accounting HTTP client")?;

    let api_key = std::env::var("RXBRIDGE_API_KEY")
        .ok()
        .filter(|k| !k.trim().is_empty());
    if api_key.is_none() {
        tracing::warn!("RXBRIDGE_API_KEY not set; invoice endpoint is unauthenticated");
    }

    let app = rxbridge_api::app::build_app(Arc::new(gateway), api_key);

    let bind_addr =
        std::env::var("RXBRIDGE_BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {bind_addr}"))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
