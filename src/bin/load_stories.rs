use log::info;
use story_recommendations_api::{config::Config, error::Result, scripts::load_stories};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "story_recommendations_api=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;
    info!(
        "Loading stories into instance {} (workspace {})",
        config.instance_handle, config.workspace_handle
    );

    load_stories::load_stories(&config).await
}
