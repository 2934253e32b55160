use std::sync::Arc;

use plantwise_api::{
    config::Config,
    routes::{create_router, AppState},
    services::{
        providers::{OpenWeatherProvider, TrefleCatalog},
        RecommendationEngine,
    },
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "plantwise_api=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    // Missing weather credentials stop startup before any request is served
    let weather = OpenWeatherProvider::from_config(&config)?;
    let catalog = TrefleCatalog::from_config(&config)?;

    let engine = RecommendationEngine::from_config(&config, Arc::new(weather), Arc::new(catalog));
    let app = create_router(Arc::new(AppState::new(engine)));

    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address).await?;
    tracing::info!(address = %address, "Server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
