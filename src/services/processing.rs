use anyhow::{Context, Result};
use log::info;

use crate::cache::Cache;
use crate::config::settings::AppConfig;
use crate::database::{self, SqliteRatingStore};
use crate::rating::{ItemMeanModel, ItemMeanModelBuilder};

/// Builds the item mean model from the rating store and caches it
pub struct ProcessingService {
    config: AppConfig,
    store: SqliteRatingStore,
    cache: Cache,
}

impl ProcessingService {
    pub fn new(config: AppConfig) -> Result<Self> {
        let pool = database::create_pool(&config.storage.database_path)?;
        let cache = Cache::new(&config.storage.cache_dir)?;
        Ok(Self::with_parts(config, SqliteRatingStore::new(pool), cache))
    }

    pub fn with_parts(config: AppConfig, store: SqliteRatingStore, cache: Cache) -> Self {
        Self {
            config,
            store,
            cache,
        }
    }

    pub fn run(&self) -> Result<ItemMeanModel> {
        info!("=== Building Item Mean Model ===");
        info!(
            "Source DB: {}, item damping: {}",
            self.config.storage.database_path, self.config.damping.item_damping
        );

        self.store.ensure_schema()?;
        let model = ItemMeanModelBuilder::new(&self.store, self.config.damping.item_damping)
            .build()
            .context("Failed to build item mean model")?;
        info!(
            "  → Global mean {:.4} over {} items",
            model.global_mean(),
            model.item_count()
        );

        self.cache.save(self.config.storage.model_key, &model)?;
        info!("=== Model Build Complete ===");
        Ok(model)
    }
}

/// Loads the cached model, failing if none has been built yet
pub fn load_model(cache: &Cache, key: &str) -> Result<ItemMeanModel> {
    cache
        .load(key)?
        .ok_or_else(|| anyhow::anyhow!("No model found in cache; run `build` first"))
}
