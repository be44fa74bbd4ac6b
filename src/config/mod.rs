pub mod settings;

pub use settings::{AppConfig, DampingSettings, StorageSettings};
