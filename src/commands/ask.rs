//! One-shot dispatch command
//!
//! Resolves the preset, runs the dispatcher once, and prints the simulated
//! response without starting an interactive session. With `--json` the full
//! outcome (reply plus attachment) is printed as JSON for scripting.

use crate::catalog::PresetCatalog;
use crate::config::Config;
use crate::dispatch::{dispatch, AttachmentKind};
use crate::error::Result;
use colored::Colorize;
use rand::{rngs::StdRng, RngCore, SeedableRng};

/// Builds the random source for dispatch: seeded when requested
pub fn build_rng(seed: Option<u64>) -> Box<dyn RngCore> {
    match seed {
        Some(seed) => Box::new(StdRng::seed_from_u64(seed)),
        None => Box::new(StdRng::from_os_rng()),
    }
}

/// Dispatch a single prompt and print the result
///
/// # Arguments
///
/// * `config` - Loaded configuration (supplies the default preset)
/// * `prompt` - Prompt text; must be non-empty after trimming
/// * `seed` - Optional RNG seed for deterministic output
/// * `json` - Print the outcome as JSON
pub fn run_ask(config: &Config, prompt: &str, seed: Option<u64>, json: bool) -> Result<()> {
    if prompt.trim().is_empty() {
        tracing::debug!("Empty prompt ignored");
        return Ok(());
    }

    let catalog = PresetCatalog::new();
    let preset = catalog.resolve(&config.session.default_preset);
    tracing::info!("Dispatching against preset {}", preset.id);

    let mut rng = build_rng(seed);
    let outcome = dispatch(&preset.id, prompt, rng.as_mut());

    if json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
        return Ok(());
    }

    println!(
        "{} {}",
        format!("{} {}:", preset.category.glyph(), preset.name).bold(),
        outcome.reply
    );
    if let Some(attachment) = outcome.attachment {
        match attachment.kind {
            AttachmentKind::Image | AttachmentKind::Video => {
                println!(
                    "  {} {}",
                    attachment.alt_text.unwrap_or_default().dimmed(),
                    attachment.url.unwrap_or_default().underline()
                );
            }
            AttachmentKind::Game => {
                println!(
                    "  {} ({})",
                    attachment.alt_text.unwrap_or_default().dimmed(),
                    attachment.suggested_file_name.unwrap_or_default()
                );
                println!("{}", attachment.inline_content.unwrap_or_default());
            }
        }
    }
    Ok(())
}
