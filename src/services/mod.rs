pub mod ingestion;
pub mod processing;
pub mod scoring;
pub mod server;
