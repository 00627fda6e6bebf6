use anyhow::Context;

use lexis_api::app::{self, services::AppServices};
use lexis_infra::ServiceConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    lexis_observability::init();

    let config = ServiceConfig::from_env().context("invalid configuration")?;
    tracing::info!(?config, "starting lexis");

    let app = app::build_app(AppServices::from_config(&config));

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await.context("server terminated")?;
    Ok(())
}
