use std::sync::Arc;

use anyhow::Context;

use stockhub_api::app::{build_app, services};
use stockhub_api::config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    stockhub_observability::init();

    let config = AppConfig::from_env().context("invalid configuration")?;
    let services = Arc::new(services::build_services(&config.storage).await?);
    let app = build_app(services);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    tracing::info!(addr = %listener.local_addr()?, "listening");

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
