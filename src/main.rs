use anyhow::Context;
use catalog_kernel::settings::Settings;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load().with_context(|| "failed to load catalog settings")?;
    catalog_telemetry::init(&settings.telemetry)?;

    tracing::info!(
        env = ?settings.environment,
        seed_demo_data = settings.store.seed_demo_data,
        "catalog-app bootstrap starting"
    );

    catalog_app::run(settings).await?;

    tracing::info!("catalog-app shut down");
    Ok(())
}
