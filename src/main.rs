use anyhow::Result;

use item_user_mean::cli::Command;
use item_user_mean::{handle_build, handle_ingest, handle_score, handle_serve, interpret};

fn main() {
    setup_logging();
    parse_and_execute().unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        std::process::exit(1);
    });
}

fn setup_logging() {
    sensible_env_logger::init!();
}

fn parse_and_execute() -> Result<()> {
    let command = interpret();
    execute_command(&command)
}

fn execute_command(command: &Command) -> Result<()> {
    match command {
        Command::Ingest { input, reset } => handle_ingest(input, *reset),
        Command::Build { item_damping } => handle_build(*item_damping),
        Command::Score {
            user,
            items,
            user_damping,
        } => handle_score(*user, items, *user_damping),
        Command::Serve { port, user_damping } => handle_serve(*port, *user_damping),
    }
}
