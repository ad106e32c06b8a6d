use anyhow::Context;
use catalog_kernel::settings::Settings;
use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "catalog-cli", version, about = "Library catalog service")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the HTTP server
    Serve,
    /// Print every documented route
    Routes,
    /// Load the layered configuration and print the effective values
    CheckConfig,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let settings = Settings::load().with_context(|| "failed to load catalog settings")?;

    match cli.command {
        Command::Serve => {
            catalog_telemetry::init(&settings.telemetry)?;
            tracing::info!(env = ?settings.environment, "catalog-cli serving");
            catalog_app::run(settings).await
        }
        Command::Routes => {
            let mut settings = settings;
            settings.store.seed_demo_data = false;
            let store = catalog_app::build_store(&settings).await?;
            let registry = catalog_app::build_registry(&store);

            let spec = catalog_http::router::merged_openapi(&registry);
            for (method, path) in catalog_http::router::documented_routes(&spec) {
                println!("{method:<6} {path}");
            }
            Ok(())
        }
        Command::CheckConfig => {
            println!("environment     {:?}", settings.environment);
            println!("listen          {}", settings.server.bind_address());
            println!("request timeout {} ms", settings.server.request_timeout_ms);
            println!("seed demo data  {}", settings.store.seed_demo_data);
            println!("log format      {:?}", settings.telemetry.log_format);
            println!("log filter      {}", settings.telemetry.filter);
            Ok(())
        }
    }
}
