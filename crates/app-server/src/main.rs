use std::sync::Arc;

use anyhow::{Context, Result};
use observability::init_tracing;
use platform_core::AppConfig;
use table_service::LobbyService;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::load().context("loading configuration")?;
    init_tracing(&config.app.service_name, &config.observability.log_filter);

    let lobby = Arc::new(LobbyService::new(&config.table));
    let router = ops_http::build_router(Arc::clone(&lobby));

    let listener = tokio::net::TcpListener::bind(&config.app.ops_http_bind_addr)
        .await
        .with_context(|| format!("binding ops http on {}", config.app.ops_http_bind_addr))?;
    info!(
        env = config.app.env.as_str(),
        addr = %config.app.ops_http_bind_addr,
        big_blind = config.table.big_blind,
        "holdem server ready; tables are created as players join"
    );

    axum::serve(listener, router)
        .await
        .context("serving ops http")?;
    Ok(())
}
