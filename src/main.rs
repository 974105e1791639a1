use anyhow::Result;
use bom_forecast::{BomConfig, ForecastService, telemetry, web};

#[tokio::main]
async fn main() -> Result<()> {
    let config = BomConfig::load()?;
    telemetry::init_tracing(&config.logging)?;

    tracing::info!(
        "Serving forecasts from {}:{}{}",
        config.ftp.host,
        config.ftp.port,
        config.ftp.directory
    );

    let service = ForecastService::ftp(config.ftp.clone(), config.download_dir());
    web::run(service, &config.server.address, config.server.port).await
}
