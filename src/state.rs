use std::sync::Arc;

use crate::config::AppConfig;
use crate::document::{FileTemplateSource, PolicyDocumentGenerator};
use crate::vehicles::VehicleCatalogCache;

/// Shared by every worker; cloning is cheap.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub generator: Arc<PolicyDocumentGenerator>,
    pub catalog: VehicleCatalogCache,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        let source = Arc::new(FileTemplateSource::new(config.template_path.clone()));
        let generator = PolicyDocumentGenerator::new(source);
        let catalog = VehicleCatalogCache::new(config.catalog_path.clone(), config.catalog_ttl);
        Self::from_parts(config, generator, catalog)
    }

    pub fn from_parts(
        config: AppConfig,
        generator: PolicyDocumentGenerator,
        catalog: VehicleCatalogCache,
    ) -> Self {
        Self {
            config: Arc::new(config),
            generator: Arc::new(generator),
            catalog,
        }
    }
}
