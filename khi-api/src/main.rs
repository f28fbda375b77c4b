use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use khi_api::{app, AppState};
use khi_core::DealRepository;
use khi_store::{app_config::Config, InMemoryDealRepository};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load().context("Failed to load config")?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.logging.filter.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting KHI deals API on port {}", config.server.port);

    let deal_repo: Arc<dyn DealRepository> = if config.store.seed_demo_deals {
        Arc::new(InMemoryDealRepository::seeded().context("Failed to seed deal store")?)
    } else {
        Arc::new(InMemoryDealRepository::new())
    };

    let app = app(AppState::new(deal_repo));

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .context("Invalid server address")?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app).await?;

    Ok(())
}
