//! Application bootstrap: store, module registry, server lifecycle.

use std::sync::Arc;

use anyhow::Context;
use catalog_db::{seed, MemoryStore, SharedStore};
use catalog_kernel::{settings::Settings, InitCtx, ModuleRegistry};

use crate::modules;

/// Build the store, seeding the demo catalog when configured.
pub async fn build_store(settings: &Settings) -> anyhow::Result<SharedStore> {
    let store = MemoryStore::new();
    if settings.store.seed_demo_data {
        seed::demo(&store)
            .await
            .context("failed to seed demo catalog")?;
    }
    Ok(Arc::new(store))
}

/// Registry holding every catalog module bound to `store`.
pub fn build_registry(store: &SharedStore) -> ModuleRegistry {
    let mut registry = ModuleRegistry::new();
    modules::register_all(&mut registry, store);
    registry
}

/// Run the service until shutdown.
pub async fn run(settings: Settings) -> anyhow::Result<()> {
    let store = build_store(&settings).await?;
    let registry = build_registry(&store);
    let ctx = InitCtx {
        settings: &settings,
        store: &store,
    };

    registry.init_all(&ctx).await?;
    registry.start_all(&ctx).await?;

    let served = catalog_http::start_server(&registry, &settings).await;

    registry.stop_all().await?;
    served
}
