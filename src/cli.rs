//! Command-line interface definition for Neurosim
//!
//! This module defines the CLI structure using clap's derive API,
//! providing commands for interactive chat, one-shot dispatch, and preset
//! management.

use clap::{Parser, Subcommand};

/// Neurosim - Mock AI model chat demo
///
/// Chat with simulated generative-model presets that answer with canned
/// replies and placeholder attachments (images, videos, playable games).
#[derive(Parser, Debug, Clone)]
#[command(name = "neurosim")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/config.yaml")]
    pub config: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands for Neurosim
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Start an interactive chat session
    Chat {
        /// Preset to select at startup (falls back to the first built-in
        /// when unknown)
        #[arg(short, long)]
        preset: Option<String>,

        /// Seed for the random source (deterministic asset selection)
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Dispatch a single prompt and print the simulated response
    Ask {
        /// The prompt text
        prompt: String,

        /// Preset to dispatch against
        #[arg(short, long)]
        preset: Option<String>,

        /// Seed for the random source
        #[arg(long)]
        seed: Option<u64>,

        /// Print the outcome as JSON
        #[arg(long)]
        json: bool,
    },

    /// Manage model presets
    Presets {
        /// Preset management subcommand
        #[command(subcommand)]
        command: PresetCommand,
    },
}

/// Preset management subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum PresetCommand {
    /// List available presets
    List {
        /// Print the list as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show detailed information about a preset
    Info {
        /// Preset id
        id: String,
    },

    /// Create a custom preset and show it
    Create {
        /// Display name
        name: String,

        /// Description (defaults when omitted or empty)
        #[arg(short, long)]
        description: Option<String>,
    },
}

impl Cli {
    /// Parse command line arguments
    ///
    /// # Returns
    ///
    /// Returns the parsed CLI structure
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
