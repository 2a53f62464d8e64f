//! Command implementations for Neurosim
//!
//! Each CLI subcommand gets a module: the interactive chat REPL, the
//! one-shot `ask` dispatch, preset management, and the parser for the
//! in-chat `/` commands.

pub mod ask;
pub mod chat;
pub mod presets;
pub mod special_commands;
