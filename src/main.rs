//! Neurosim - Mock AI model chat demo
//!
#![doc = "Neurosim - Mock AI model chat demo"]
#![doc = "Main entry point for the neurosim application."]

use anyhow::Result;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use neurosim::cli::{Cli, Commands, PresetCommand};
use neurosim::commands;
use neurosim::config::Config;
use neurosim::PresetCatalog;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let cli = Cli::parse_args();

    init_tracing(cli.verbose);

    // Load configuration
    let config_path = cli.config.as_deref().unwrap_or("config/config.yaml");
    let config = Config::load(config_path, &cli)?;

    // Validate configuration
    config.validate()?;

    // Execute command
    match cli.command {
        Commands::Chat { preset, seed } => {
            tracing::info!("Starting interactive chat session");
            if let Some(p) = &preset {
                tracing::debug!("Using preset override: {}", p);
            }

            // Moves `config` into the handler (match arms are exclusive)
            commands::chat::run_chat(config, seed).await?;
            Ok(())
        }
        Commands::Ask {
            prompt,
            seed,
            json,
            ..
        } => {
            tracing::info!("Dispatching one-shot prompt");
            commands::ask::run_ask(&config, &prompt, seed, json)?;
            Ok(())
        }
        Commands::Presets { command } => match command {
            PresetCommand::List { json } => {
                let catalog = PresetCatalog::new();
                commands::presets::list_presets(&catalog, json)?;
                Ok(())
            }
            PresetCommand::Info { id } => {
                let catalog = PresetCatalog::new();
                commands::presets::show_preset(&catalog, &id)?;
                Ok(())
            }
            PresetCommand::Create { name, description } => {
                let mut catalog = PresetCatalog::new();
                commands::presets::create_preset(
                    &mut catalog,
                    &name,
                    description.as_deref().unwrap_or(""),
                )?;
                Ok(())
            }
        },
    }
}

/// Initialize tracing subscriber with environment filter
fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "neurosim=debug"
    } else {
        "neurosim=info"
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
