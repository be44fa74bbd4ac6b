use anyhow::{Context, Result};
use log::info;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::errors::with_cache_context;

/// File-based JSON cache, one file per key
pub struct Cache {
    cache_dir: PathBuf,
}

impl Cache {
    /// Create a new cache instance
    pub fn new<P: AsRef<Path>>(cache_dir: P) -> Result<Self> {
        let cache_dir = cache_dir.as_ref().to_path_buf();

        fs::create_dir_all(&cache_dir).context("Failed to create cache directory")?;

        Ok(Self { cache_dir })
    }

    /// Save data to cache
    pub fn save<T: Serialize>(&self, key: &str, data: &T) -> Result<()> {
        let file_path = self.build_path(key);

        let json = serde_json::to_string_pretty(data)
            .with_context(|| format!("Failed to serialize data for key: {}", key))?;

        with_cache_context(fs::write(&file_path, json), "write", key)?;

        info!("Saved data to cache: {}", file_path.display());
        Ok(())
    }

    /// Load data from cache
    pub fn load<T: for<'de> Deserialize<'de>>(&self, key: &str) -> Result<Option<T>> {
        let file_path = self.build_path(key);

        if !file_path.exists() {
            return Ok(None);
        }

        let json = with_cache_context(fs::read_to_string(&file_path), "read", key)?;

        let data = serde_json::from_str(&json).with_context(|| {
            format!(
                "Failed to parse JSON from {:?}. First 200 chars: {}",
                file_path,
                json.chars().take(200).collect::<String>()
            )
        })?;

        info!("Loaded data from cache: {}", file_path.display());
        Ok(Some(data))
    }

    /// Check if cached data exists
    pub fn exists(&self, key: &str) -> bool {
        self.build_path(key).exists()
    }

    /// Clear all cached data
    pub fn clear(&self) -> Result<()> {
        fs::remove_dir_all(&self.cache_dir).context("Failed to clear cache")?;

        fs::create_dir_all(&self.cache_dir).context("Failed to recreate cache directory")?;

        info!("Cleared cache directory");
        Ok(())
    }

    fn build_path(&self, key: &str) -> PathBuf {
        self.cache_dir.join(format!("{}.json", key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rating::{Damping, ItemMeanModel, Rating, build_model};

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "item_user_mean_cache_{}_{}",
            name,
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn test_model_survives_round_trip() {
        let dir = scratch_dir("round_trip");
        let cache = Cache::new(&dir).unwrap();
        let ratings = vec![
            Rating::new(1, 5, 3.0),
            Rating::new(1, 7, 4.0),
            Rating::new(8, 4, 5.0),
            Rating::new(8, 5, 4.0),
        ];
        let model = build_model(ratings, Damping::item(2.0).unwrap());

        cache.save("model", &model).unwrap();
        let loaded: ItemMeanModel = cache.load("model").unwrap().unwrap();

        assert!(cache.exists("model"));
        assert_eq!(loaded.global_mean(), model.global_mean());
        assert_eq!(loaded.item_offsets(), model.item_offsets());
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_missing_key_loads_none() {
        let dir = scratch_dir("missing");
        let cache = Cache::new(&dir).unwrap();

        let loaded: Option<ItemMeanModel> = cache.load("absent").unwrap();

        assert!(loaded.is_none());
        assert!(!cache.exists("absent"));
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_corrupt_multibyte_file_is_an_error() {
        let dir = scratch_dir("multibyte");
        let cache = Cache::new(&dir).unwrap();
        // 'é' straddles byte 200 of the preview
        let corrupt = format!("{}é}}", "x".repeat(199));
        fs::write(dir.join("item_mean_model.json"), corrupt).unwrap();

        let err = cache.load::<ItemMeanModel>("item_mean_model").unwrap_err();

        assert!(err.to_string().contains("Failed to parse JSON"));
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_unserializable_data_reports_serialize_failure() {
        let dir = scratch_dir("serialize");
        let cache = Cache::new(&dir).unwrap();
        let bad_keys = std::collections::HashMap::from([(vec![1, 2], 3)]);

        let err = cache.save("bad", &bad_keys).unwrap_err();

        assert!(err.to_string().contains("Failed to serialize data for key: bad"));
        assert!(!cache.exists("bad"));
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_clear_removes_entries() {
        let dir = scratch_dir("clear");
        let cache = Cache::new(&dir).unwrap();
        cache.save("numbers", &vec![1, 2, 3]).unwrap();

        cache.clear().unwrap();

        assert!(!cache.exists("numbers"));
        fs::remove_dir_all(&dir).unwrap();
    }
}
