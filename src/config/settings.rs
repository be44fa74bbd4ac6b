use anyhow::{Context, Result};

use crate::rating::Damping;

#[derive(Debug, Clone, Copy, Default)]
pub struct DampingSettings {
    pub item_damping: Damping,
    pub user_damping: Damping,
}

impl DampingSettings {
    /// Reads `ITEM_DAMPING` / `USER_DAMPING`, defaulting to no damping
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            item_damping: damping_from_env("ITEM_DAMPING", Damping::item)?,
            user_damping: damping_from_env("USER_DAMPING", Damping::user)?,
        })
    }
}

fn damping_from_env(
    var: &str,
    make: fn(f64) -> Result<Damping, crate::errors::BaselineError>,
) -> Result<Damping> {
    match std::env::var(var) {
        Ok(raw) => {
            let value: f64 = raw
                .trim()
                .parse()
                .with_context(|| format!("{} is not a number: {}", var, raw))?;
            Ok(make(value)?)
        }
        Err(_) => Ok(Damping::NONE),
    }
}

#[derive(Debug, Clone)]
pub struct StorageSettings {
    pub database_path: String,
    pub cache_dir: String,
    pub model_key: &'static str,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            database_path: std::env::var("DATABASE_PATH")
                .unwrap_or_else(|_| "ratings.db".to_string()),
            cache_dir: std::env::var("MODEL_CACHE_DIR").unwrap_or_else(|_| "cache".to_string()),
            model_key: "item_mean_model",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub damping: DampingSettings,
    pub storage: StorageSettings,
}

impl AppConfig {
    pub fn new() -> Result<Self> {
        Ok(Self {
            damping: DampingSettings::from_env()?,
            storage: StorageSettings::default(),
        })
    }

    pub fn with_item_damping(mut self, damping: Option<Damping>) -> Self {
        if let Some(d) = damping {
            self.damping.item_damping = d;
        }
        self
    }

    pub fn with_user_damping(mut self, damping: Option<Damping>) -> Self {
        if let Some(d) = damping {
            self.damping.user_damping = d;
        }
        self
    }
}
