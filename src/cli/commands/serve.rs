use anyhow::Context;

use crate::app::{serve, AppState};
use crate::config::AppConfig;
use crate::is_production;

pub async fn handle(config: AppConfig, port: Option<u16>) -> anyhow::Result<()> {
    if is_production!() && config.security.secret_key.is_empty() {
        tracing::warn!("FLASKR_SECRET_KEY is not set; logins will fail");
    }

    let port = port.unwrap_or(config.server.port);
    tracing::info!(
        "Starting Flaskr in {:?} mode with database {}",
        config.environment,
        config.database.path.display()
    );

    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("Flaskr listening on http://{}", bind_addr);
    serve(listener, AppState::new(config)).await?;
    Ok(())
}
