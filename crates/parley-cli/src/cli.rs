use clap::{Parser, Subcommand};

/// Command-line arguments for the Parley assistant
#[derive(Debug, Parser)]
#[command(name = "parley")]
#[command(about = "Conversational assistant with intent matching and local models", long_about = None)]
pub struct Cli {
    /// Log to stderr instead of ~/.parley/debug.log
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable the local model for this run
    #[arg(long, global = true)]
    pub offline: bool,

    /// Subcommand; defaults to an interactive chat
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Start an interactive chat session
    Chat,

    /// Answer a single message and exit
    Ask {
        /// The message to answer
        text: String,
    },

    /// Show the best matching intent and its similarity
    Match {
        /// The message to match
        text: String,
    },

    /// Classify a message with the local model
    Classify {
        /// The message to classify
        text: String,

        /// Model to use (overrides config)
        #[arg(long)]
        model: Option<String>,
    },

    /// List installed local models
    Models,

    /// Show the effective configuration
    Config,
}
