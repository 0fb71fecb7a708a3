//! Parley CLI - conversational assistant with intent matching
#![cfg_attr(
    test,
    allow(
        clippy::expect_used,
        clippy::unwrap_used,
        clippy::missing_panics_doc,
        reason = "Allow for tests"
    )
)]

use anyhow::Result;
use clap::Parser as _;
use cli::{Cli, Commands};

mod cli;
mod handlers;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    handlers::init_logging(cli.verbose)?;

    let config = handlers::load_config(cli.offline);

    match cli.command.unwrap_or(Commands::Chat) {
        Commands::Chat => handlers::handle_chat(&config).await?,
        Commands::Ask { text } => handlers::handle_ask(&config, &text).await?,
        Commands::Match { text } => handlers::handle_match(&config, &text),
        Commands::Classify { text, model } => {
            handlers::handle_classify(&config, &text, model.as_deref()).await?;
        }
        Commands::Models => handlers::handle_models(&config).await?,
        Commands::Config => handlers::handle_config(&config)?,
    }

    Ok(())
}
