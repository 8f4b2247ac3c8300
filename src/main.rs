use anyhow::Result;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "config.yaml".to_string());

    let config = geoecho::config::load_config(&config_path)?;

    // RUST_LOG 优先，否则用配置文件里的级别
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log.level)),
        )
        .init();

    info!("GeoEcho starting...");
    info!(path = config_path, "config loaded");

    let app = geoecho::app::App::new(config)?;
    app.run().await?;

    Ok(())
}
