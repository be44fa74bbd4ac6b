use anyhow::{Context, Result};
use log::info;
use std::fs;
use std::path::Path;

use crate::database::{self, SqliteRatingStore};
use crate::errors::with_parse_context;
use crate::rating::Rating;

pub struct IngestionService {
    store: SqliteRatingStore,
}

impl IngestionService {
    pub fn new(database_path: &str) -> Result<Self> {
        let pool = database::create_pool(database_path)?;
        Ok(Self::with_store(SqliteRatingStore::new(pool)))
    }

    pub fn with_store(store: SqliteRatingStore) -> Self {
        Self { store }
    }

    /// Loads a JSON array of ratings into the store
    pub fn run(&self, input: &Path, reset: bool) -> Result<usize> {
        info!("=== Starting Rating Ingestion ===");

        let ratings = read_ratings(input)?;
        info!("  → Read {} rating events from {}", ratings.len(), input.display());

        let inserted = self.ingest(&ratings, reset)?;
        info!("=== Ingestion Complete: {} ratings stored ===", inserted);
        Ok(inserted)
    }

    pub fn ingest(&self, ratings: &[Rating], reset: bool) -> Result<usize> {
        if reset {
            self.store.reset()?;
            info!("  → Database schema reset");
        } else {
            self.store.ensure_schema()?;
        }

        let inserted = self.store.insert_all(ratings)?;
        let unrates = ratings.iter().filter(|r| !r.has_value()).count();
        if unrates > 0 {
            info!("  → {} of them are unrate events", unrates);
        }
        Ok(inserted)
    }
}

pub fn read_ratings(input: &Path) -> Result<Vec<Rating>> {
    let json = fs::read_to_string(input)
        .with_context(|| format!("Failed to read ratings file {}", input.display()))?;
    parse_ratings(&json)
}

pub fn parse_ratings(json: &str) -> Result<Vec<Rating>> {
    with_parse_context(serde_json::from_str(json), "ratings")
}
