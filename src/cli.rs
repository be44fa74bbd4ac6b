use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::rating::{Damping, UserId};

#[derive(Parser, Debug)]
#[command(author, version, about = "item/user mean baseline rating predictor")]
pub struct Cli {
    /// Command
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Load a JSON array of ratings into the rating database
    Ingest {
        /// JSON file with `{"user", "item", "rating"}` records
        #[arg(short, long)]
        input: PathBuf,
        /// Drop existing ratings first
        #[arg(long)]
        reset: bool,
    },
    /// Build the item mean model from the rating database and cache it
    Build {
        /// Damping for item means (overrides ITEM_DAMPING)
        #[arg(long)]
        item_damping: Option<Damping>,
    },
    /// Score items for one user with the cached model
    Score {
        #[arg(short, long)]
        user: UserId,
        /// Comma-separated item ids, e.g. 5,7,10
        #[arg(short, long)]
        items: String,
        /// Damping for the user offset (overrides USER_DAMPING)
        #[arg(long)]
        user_damping: Option<Damping>,
    },
    /// Start the scoring server
    Serve {
        /// Port number (optional, defaults to 3000)
        #[arg(short, long, default_value_t = 3000)]
        port: u16,
        /// Damping for the user offset (overrides USER_DAMPING)
        #[arg(long)]
        user_damping: Option<Damping>,
    },
}
