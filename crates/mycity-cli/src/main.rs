//! CLI entry point for the MyCity voice skill.
//!
//! This binary provides the `mycity` command with subcommands for handling a
//! single platform event, listing the registered intents, and simulating a
//! voice session from the terminal.

mod chat;
mod config;

use std::io::{self, Read};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use mycity_intents::{CityDirectory, CityServices};
use mycity_kernel::Dispatcher;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::{DEFAULT_CONFIG_PATH, LoggingConfig, SkillConfig};

// ---------------------------------------------------------------------------
// CLI definition
// ---------------------------------------------------------------------------

/// MyCity: Boston public services voice skill backend.
#[derive(Parser)]
#[command(
    name = "mycity",
    version,
    about = "MyCity: Boston public services voice skill",
    long_about = "Answers trash day, snow emergency parking and city alert questions \
                  for a Boston address, one voice-platform request at a time."
)]
struct Cli {
    /// Configuration file.
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Handle one platform event (JSON) and print the reply.
    Invoke {
        /// Event file; reads stdin when omitted.
        #[arg(long)]
        event: Option<PathBuf>,
    },

    /// List registered intents.
    Intents,

    /// Simulate a voice session interactively.
    Chat,
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    let cli = Cli::parse();

    let _ = dotenvy::dotenv();
    let config = SkillConfig::load(&cli.config)?;
    init_tracing(&config.logging);

    let dispatcher = build_dispatcher(&config)?;

    match cli.command {
        Commands::Invoke { event } => cmd_invoke(&dispatcher, event),
        Commands::Intents => cmd_intents(&dispatcher),
        Commands::Chat => cmd_chat(&dispatcher, &config),
    }
}

fn build_dispatcher(config: &SkillConfig) -> Result<Dispatcher> {
    let directory = CityDirectory::load(&config.directory)
        .with_context(|| format!("failed to load city directory {}", config.directory.display()))?;
    info!(
        path = %config.directory.display(),
        addresses = directory.address_count(),
        "city directory ready"
    );

    let services = CityServices::from_shared(Arc::new(directory));
    let registry = mycity_intents::default_registry(services).context("failed to register intents")?;

    let dispatcher = Dispatcher::new(registry);
    Ok(match &config.application_id {
        Some(id) => dispatcher.with_application_id(id.clone()),
        None => dispatcher,
    })
}

// ---------------------------------------------------------------------------
// Subcommand: invoke
// ---------------------------------------------------------------------------

fn cmd_invoke(dispatcher: &Dispatcher, event: Option<PathBuf>) -> Result<()> {
    let json = match &event {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read event {}", path.display()))?,
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read event from stdin")?;
            buf
        }
    };

    println!("{}", invoke(dispatcher, &json)?);
    Ok(())
}

/// Dispatch one platform event and render the reply JSON.
fn invoke(dispatcher: &Dispatcher, json: &str) -> Result<String> {
    let request = mycity_kernel::parse_event(json).context("invalid platform event")?;
    let response = dispatcher.execute(request).context("dispatch failed")?;
    Ok(mycity_kernel::render_reply(&response)?)
}

// ---------------------------------------------------------------------------
// Subcommand: intents
// ---------------------------------------------------------------------------

fn cmd_intents(dispatcher: &Dispatcher) -> Result<()> {
    for registration in dispatcher.registry().iter() {
        println!("  {:<24} {}", registration.name, registration.precondition);
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Subcommand: chat
// ---------------------------------------------------------------------------

fn cmd_chat(dispatcher: &Dispatcher, config: &SkillConfig) -> Result<()> {
    println!();
    println!("  MyCity v{}", env!("CARGO_PKG_VERSION"));
    println!("  Type `launch`, an intent name (e.g. `SetAddressIntent Address=46 Everdean St`),");
    println!("  `end` to close the session, or `quit` to exit.");
    println!();

    let stdin = io::stdin();
    chat::run(dispatcher, config.application_id.clone(), stdin.lock(), io::stdout())
}

// ---------------------------------------------------------------------------
// Tracing
// ---------------------------------------------------------------------------

/// Initialise the global subscriber.  Logs go to stderr so that `invoke`
/// output on stdout stays valid JSON.
fn init_tracing(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr);

    if logging.json {
        builder.json().init();
    } else {
        builder.compact().init();
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use mycity_kernel::PlatformReply;

    use super::*;

    const LAUNCH: &str = include_str!("../../mycity-kernel/tests/fixtures/launch.json");
    const TRASH_DAY: &str = include_str!("../../mycity-kernel/tests/fixtures/trash_day.json");
    const SET_ADDRESS: &str = include_str!("../../mycity-kernel/tests/fixtures/set_address.json");

    fn dispatcher() -> Dispatcher {
        let directory = CityDirectory::from_toml(
            "[[addresses]]\naddress = \"46 Everdean St\"\ntrash_days = [\"Wednesday\"]\n",
        )
        .unwrap();
        let services = CityServices::from_shared(Arc::new(directory));
        Dispatcher::new(mycity_intents::default_registry(services).unwrap())
    }

    fn reply(json: &str) -> PlatformReply {
        let rendered = invoke(&dispatcher(), json).unwrap();
        serde_json::from_str(&rendered).unwrap()
    }

    fn speech(reply: &PlatformReply) -> &str {
        reply
            .response
            .output_speech
            .as_ref()
            .map(|s| s.text.as_str())
            .unwrap_or_default()
    }

    #[test]
    fn invoke_launch_event() {
        let reply = reply(LAUNCH);
        assert_eq!(reply.version, "1.0");
        assert_eq!(speech(&reply), mycity_kernel::responses::WELCOME_SPEECH);
    }

    #[test]
    fn invoke_prompts_then_resumes() {
        let prompt = reply(TRASH_DAY);
        assert_eq!(
            prompt.session_attributes.prompted_from_intent(),
            Some("TrashDayIntent")
        );

        let answer = reply(SET_ADDRESS);
        assert_eq!(speech(&answer), "Trash and recycling is picked up on Wednesday.");
        assert_eq!(
            answer.response.card.map(|c| c.title).as_deref(),
            Some("TrashDayIntent")
        );
        assert_eq!(answer.session_attributes.address(), Some("46 Everdean Street"));
    }

    #[test]
    fn invoke_rejects_malformed_event() {
        let err = invoke(&dispatcher(), "{ not json").unwrap_err();
        assert_eq!(err.to_string(), "invalid platform event");
    }
}
