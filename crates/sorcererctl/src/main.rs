//! Sorcerer Control - CLI for Subject Line Sorcerer

use anyhow::Result;
use clap::Parser;
use sorcererctl::cli::{Cli, Commands};
use sorcererctl::{commands, display, errors, logging};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(err) = run(cli).await {
        display::display_error(&err);
        std::process::exit(errors::exit_code_for(&err));
    }
}

async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Generate {
            brief,
            api_key,
            json,
            timeout_secs,
        } => {
            let config = commands::load_config(cli.config.as_deref())?;
            commands::generate(config, brief, api_key, json, timeout_secs).await
        }
        Commands::Prompt { brief } => commands::prompt(brief),
        Commands::Tips => commands::tips(),
    }
}
