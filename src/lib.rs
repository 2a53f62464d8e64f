//! Neurosim - Mock AI model chat demo library
//!
//! This library provides the core functionality for the Neurosim demo chat
//! application: a catalog of simulated generative-model presets, a keyword
//! dispatcher that fabricates canned replies with placeholder attachments,
//! and a conversation session with explicit scheduled timers.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//!
//! - `catalog`: Preset catalog (built-in and user-created presets)
//! - `dispatch`: Pure prompt-to-content dispatcher (replies, attachments)
//! - `session`: Conversation session state machine and timer queue
//! - `surfaces`: External collaborator seams (sandbox, save, clipboard, notify)
//! - `config`: Configuration management and validation
//! - `error`: Error types and result aliases
//! - `cli`: Command-line interface definition
//!
//! # Example
//!
//! ```
//! use neurosim::catalog::PresetCatalog;
//! use neurosim::dispatch::dispatch;
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let catalog = PresetCatalog::new();
//! let preset = catalog.resolve("gemini");
//! let mut rng = StdRng::seed_from_u64(7);
//! let outcome = dispatch(&preset.id, "сделай змейку", &mut rng);
//! assert!(outcome.attachment.is_some());
//! ```

pub mod catalog;
pub mod cli;
pub mod commands;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod session;
pub mod surfaces;

// Re-export commonly used types
pub use catalog::{Preset, PresetCatalog, PresetCategory};
pub use config::Config;
pub use dispatch::{dispatch, Attachment, AttachmentKind, DispatchOutcome};
pub use error::{NeurosimError, Result};
pub use session::{ConversationSession, Message, Role, SessionDelays};

#[cfg(test)]
pub mod test_utils;
