pub mod bookinstances;
pub mod genres;

use catalog_db::SharedStore;
use catalog_kernel::ModuleRegistry;

/// Register every catalog module with the registry
pub fn register_all(registry: &mut ModuleRegistry, store: &SharedStore) {
    registry.register(genres::create_module(store.clone()));
    registry.register(bookinstances::create_module(store.clone()));
}
