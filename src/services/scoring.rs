use anyhow::Result;
use std::sync::Arc;

use crate::cache::Cache;
use crate::config::settings::AppConfig;
use crate::database::{self, SqliteRatingStore};
use crate::rating::{ItemId, ItemMeanModel, ItemUserMeanScorer, ScoreMap, UserId};
use crate::services::processing::load_model;

/// Scores users against the cached model using histories from the store
#[derive(Clone)]
pub struct ScoringService {
    scorer: ItemUserMeanScorer,
    store: SqliteRatingStore,
}

impl ScoringService {
    pub fn new(config: &AppConfig) -> Result<Self> {
        let cache = Cache::new(&config.storage.cache_dir)?;
        let model = load_model(&cache, config.storage.model_key)?;
        let pool = database::create_pool(&config.storage.database_path)?;
        let store = SqliteRatingStore::new(pool);
        store.ensure_schema()?;
        Ok(Self::with_parts(
            ItemUserMeanScorer::new(Arc::new(model), config.damping.user_damping),
            store,
        ))
    }

    pub fn with_parts(scorer: ItemUserMeanScorer, store: SqliteRatingStore) -> Self {
        Self { scorer, store }
    }

    pub fn model(&self) -> &ItemMeanModel {
        self.scorer.model()
    }

    pub fn score(&self, user: UserId, items: &[ItemId]) -> Result<ScoreMap> {
        self.scorer.score(&self.store, user, items.iter().copied())
    }
}

/// Parses a comma-separated item list such as `5,7,10`
pub fn parse_item_list(raw: &str) -> Result<Vec<ItemId>> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<ItemId>()
                .map_err(|e| anyhow::anyhow!("Invalid item id '{}': {}", s, e))
        })
        .collect()
}
