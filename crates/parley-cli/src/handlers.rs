//! Command handlers for CLI operations

use anyhow::{Context as _, Result, bail};
use core::time::Duration;
use parley_core::{Reply, TextGenerator};
use parley_intent::{ChatOrchestrator, ModelSlot, ParleyConfig};
use parley_local::{ModelInfo, OllamaGenerator, OllamaManager};
use std::fs::{self, OpenOptions};
use std::io::stderr;
use std::path::Path;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt as _, BufReader, stdin};
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::{
    EnvFilter, Registry, fmt, layer::SubscriberExt as _, util::SubscriberInitExt as _,
};

/// Default log filter when `RUST_LOG` is unset.
const DEFAULT_LOG_FILTER: &str = "parley_intent=info,parley_local=info,parley_cli=info";

/// Typed by the user to leave the chat.
const QUIT_COMMAND: &str = "/quit";

/// Install the tracing subscriber.
///
/// Logs go to `debug.log` in the config directory unless `verbose` is set.
///
/// # Errors
/// Returns an error if the log file cannot be created
pub fn init_logging(verbose: bool) -> Result<()> {
    let writer = if verbose {
        BoxMakeWriter::new(stderr)
    } else {
        let log_dir = ParleyConfig::config_dir()?;
        BoxMakeWriter::new(Arc::new(open_log_file(&log_dir)?))
    };

    Registry::default()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()))
        .with(
            fmt::layer()
                .with_writer(writer)
                .with_ansi(verbose)
                .with_target(true)
                .with_level(true),
        )
        .init();

    Ok(())
}

/// Create `dir` and open a fresh `debug.log` inside it.
fn open_log_file(dir: &Path) -> Result<fs::File> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create {}", dir.display()))?;

    let debug_log = dir.join("debug.log");
    if debug_log.exists() {
        fs::remove_file(&debug_log)?;
    }

    Ok(OpenOptions::new()
        .create(true)
        .append(true)
        .open(&debug_log)?)
}

/// Load `~/.parley/config.toml`, falling back to defaults.
pub fn load_config(offline: bool) -> ParleyConfig {
    let mut config = ParleyConfig::load_or_create().unwrap_or_else(|error| {
        tracing::warn!("Failed to load config: {error}");
        tracing::warn!("Using default configuration");
        ParleyConfig::default()
    });

    if offline {
        config.generation.enabled = false;
    }
    config
}

/// Connect to the local model server if generation is enabled and it is running.
async fn connect_generator(config: &ParleyConfig) -> Option<Arc<dyn TextGenerator>> {
    if !config.generation.enabled {
        return None;
    }

    let timeout = Duration::from_secs(config.generation.timeout_seconds);
    let generator = match OllamaGenerator::new(config.generation.base_url.clone(), timeout) {
        Ok(generator) => generator,
        Err(error) => {
            tracing::warn!("Could not create Ollama client: {error}");
            return None;
        }
    };

    if generator.is_available().await {
        tracing::info!(
            "Using {} at {}",
            config.generation.model,
            config.generation.base_url
        );
        Some(Arc::new(generator))
    } else {
        tracing::warn!(
            "Ollama is not running at {}; using pattern matching only",
            config.generation.base_url
        );
        None
    }
}

async fn build_orchestrator(config: &ParleyConfig) -> ChatOrchestrator {
    let generator = connect_generator(config).await;
    ChatOrchestrator::from_config(config, generator, Arc::new(ModelSlot::empty()))
}

#[allow(clippy::print_stdout, reason = "CLI output")]
fn print_reply(reply: &Reply) {
    println!("{}", reply.text);
}

/// Run the interactive chat loop until end of input.
///
/// # Errors
/// Returns an error if stdin cannot be read
pub async fn handle_chat(config: &ParleyConfig) -> Result<()> {
    let orchestrator = build_orchestrator(config).await;
    print_banner(&orchestrator);

    let mut lines = BufReader::new(stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let input = match parse_chat_line(&line) {
            ChatLine::Blank => continue,
            ChatLine::Quit => break,
            ChatLine::Message(input) => input,
        };

        match orchestrator.respond(input).await {
            Ok(Some(reply)) => print_reply(&reply),
            Ok(None) => tracing::debug!("Reply superseded by a newer message"),
            Err(error) => tracing::warn!("Turn rejected: {error}"),
        }
    }

    Ok(())
}

/// One line read by the chat loop.
#[derive(Debug, PartialEq, Eq)]
enum ChatLine<'line> {
    Blank,
    Quit,
    Message(&'line str),
}

fn parse_chat_line(line: &str) -> ChatLine<'_> {
    match line.trim() {
        "" => ChatLine::Blank,
        QUIT_COMMAND => ChatLine::Quit,
        input => ChatLine::Message(input),
    }
}

#[allow(clippy::print_stdout, reason = "CLI output")]
fn print_banner(orchestrator: &ChatOrchestrator) {
    println!(
        "Parley ready ({}). Type {QUIT_COMMAND} or press Ctrl-D to leave.",
        orchestrator.strategy_names().join(" -> ")
    );
}

/// Answer one message.
///
/// # Errors
/// Returns an error if the message cannot be resolved
pub async fn handle_ask(config: &ParleyConfig, text: &str) -> Result<()> {
    let orchestrator = build_orchestrator(config).await;
    if let Some(reply) = orchestrator.respond(text).await? {
        print_reply(&reply);
    }
    Ok(())
}

/// Print the best pattern match.
#[allow(clippy::print_stdout, reason = "CLI output")]
pub fn handle_match(config: &ParleyConfig, text: &str) {
    let orchestrator =
        ChatOrchestrator::from_config(config, None, Arc::new(ModelSlot::empty()));
    let matched = orchestrator.match_input(text);
    println!("{}\t{:.4}", matched.tag, matched.similarity);
}

/// Classify a message with the local model.
///
/// # Errors
/// Returns an error if the model server cannot be reached
#[allow(clippy::print_stdout, reason = "CLI output")]
pub async fn handle_classify(config: &ParleyConfig, text: &str, model: Option<&str>) -> Result<()> {
    let timeout = Duration::from_secs(config.generation.timeout_seconds);
    let generator = OllamaGenerator::new(config.generation.base_url.clone(), timeout)?;
    if !generator.is_available().await {
        bail!("Ollama is not running at {}", config.generation.base_url);
    }

    let model = model.unwrap_or(&config.generation.model);
    let label = generator.classify_intent(text, model).await?;
    println!("{label}");
    Ok(())
}

/// List installed models with their descriptions.
///
/// # Errors
/// Returns an error if the model list cannot be retrieved
#[allow(clippy::print_stdout, reason = "CLI output")]
pub async fn handle_models(config: &ParleyConfig) -> Result<()> {
    let manager = OllamaManager::new().with_url(config.generation.base_url.clone());
    let models = manager
        .describe_models()
        .await
        .context("Please make sure Ollama is running on your system")?;

    if models.is_empty() {
        println!("No models installed. Browse https://ollama.com/library to add one.");
    }
    for info in &models {
        println!("{}", format_model(info));
    }
    Ok(())
}

fn format_model(info: &ModelInfo) -> String {
    let size = if info.size.is_empty() {
        String::new()
    } else {
        format!(" [{}]", info.size)
    };
    format!(
        "{}{size}\t{}: {}",
        info.name, info.category, info.description
    )
}

/// Print the effective configuration.
///
/// # Errors
/// Returns an error if the configuration cannot be serialized
#[allow(clippy::print_stdout, reason = "CLI output")]
pub fn handle_config(config: &ParleyConfig) -> Result<()> {
    let path = ParleyConfig::config_path()?;
    println!("# {}", path.display());
    println!("{}", toml::to_string_pretty(config)?);
    Ok(())
}
