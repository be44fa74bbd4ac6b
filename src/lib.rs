pub mod api;
pub mod cache;
pub mod cli;
pub mod config;
pub mod database;
pub mod errors;
pub mod rating;
pub mod services;

use anyhow::Result;
use clap::Parser;
use cli::Cli;
use std::path::Path;

use crate::cli::Command;
use crate::config::settings::AppConfig;
use crate::rating::Damping;
use crate::services::ingestion::IngestionService;
use crate::services::processing::ProcessingService;
use crate::services::scoring::{parse_item_list, ScoringService};
use crate::services::server::ServerService;

pub fn interpret() -> Command {
    let cli = Cli::parse();
    cli.command
}

pub fn handle_ingest(input: &Path, reset: bool) -> Result<()> {
    let config = AppConfig::new()?;
    let service = IngestionService::new(&config.storage.database_path)?;
    service.run(input, reset)?;
    Ok(())
}

pub fn handle_build(item_damping: Option<Damping>) -> Result<()> {
    let config = AppConfig::new()?.with_item_damping(item_damping);
    let service = ProcessingService::new(config)?;
    service.run()?;
    Ok(())
}

pub fn handle_score(user: rating::UserId, items: &str, user_damping: Option<Damping>) -> Result<()> {
    let config = AppConfig::new()?.with_user_damping(user_damping);
    let items = parse_item_list(items)?;
    let service = ScoringService::new(&config)?;
    let scores = service.score(user, &items)?;
    println!("{}", serde_json::to_string_pretty(&scores)?);
    Ok(())
}

pub fn handle_serve(port: u16, user_damping: Option<Damping>) -> Result<()> {
    let config = AppConfig::new()?.with_user_damping(user_damping);
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let service = ServerService::new(port, config);
        service.run().await
    })
}
