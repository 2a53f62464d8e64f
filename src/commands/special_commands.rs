//! Special commands parser for the interactive chat session
//!
//! Special commands are `/`-prefixed inputs that act on the session instead
//! of being submitted as prompts. They cover preset selection and creation,
//! per-message attachment actions (save, copy, play), and session status.
//! Commands are case-insensitive; message references are 1-based positions
//! in the conversation log.

use thiserror::Error;

/// Errors that can occur when parsing special commands
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// Unknown command was entered
    #[error("Unknown command: {0}\n\nType '/help' to see available commands")]
    UnknownCommand(String),

    /// Command requires an argument but none was provided
    #[error("Command {command} requires an argument\n\nUsage: {usage}")]
    MissingArgument { command: String, usage: String },

    /// Command was given an argument it cannot use
    #[error("Invalid argument for {command}: {arg}")]
    InvalidArgument { command: String, arg: String },
}

/// Special commands that can be executed during interactive chat
///
/// These commands modify the session state or provide information,
/// rather than being dispatched as prompts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatCommand {
    /// Display help information
    Help,

    /// List all presets in the catalog
    ListPresets,

    /// Select a preset by id
    SelectPreset(String),

    /// Create a custom preset and select it
    ///
    /// The first token after the command is the name; everything after it
    /// is the description (may be empty).
    CreatePreset {
        /// Display name
        name: String,
        /// Description; empty string selects the default
        description: String,
    },

    /// Save the attachment of message N
    Save(usize),

    /// Copy message N (game source when present, text otherwise)
    Copy(usize),

    /// Toggle playback of message N's game
    Play(usize),

    /// Show selected preset and session counters
    Status,

    /// Exit the interactive session
    Exit,

    /// Not a special command
    ///
    /// The input should be submitted as a regular prompt.
    None,
}

/// Parse a user input string into a special command
///
/// Inputs not starting with `/` (except `exit`/`quit`) are regular prompts
/// and parse to [`ChatCommand::None`].
///
/// # Errors
///
/// Returns [`CommandError`] for unknown `/` commands, missing arguments,
/// and non-numeric message references.
///
/// # Examples
///
/// ```
/// use neurosim::commands::special_commands::{parse_chat_command, ChatCommand};
///
/// let cmd = parse_chat_command("/select gemini").unwrap();
/// assert_eq!(cmd, ChatCommand::SelectPreset("gemini".to_string()));
///
/// let cmd = parse_chat_command("сделай тетрис").unwrap();
/// assert_eq!(cmd, ChatCommand::None);
/// ```
pub fn parse_chat_command(input: &str) -> Result<ChatCommand, CommandError> {
    let trimmed = input.trim();
    let lower = trimmed.to_lowercase();

    if lower == "exit" || lower == "quit" {
        return Ok(ChatCommand::Exit);
    }
    if !trimmed.starts_with('/') {
        return Ok(ChatCommand::None);
    }

    let mut parts = trimmed.splitn(2, char::is_whitespace);
    let command = parts.next().unwrap_or_default().to_lowercase();
    let rest = parts.next().unwrap_or("").trim();

    match command.as_str() {
        "/help" => Ok(ChatCommand::Help),
        "/presets" | "/models" => Ok(ChatCommand::ListPresets),
        "/status" => Ok(ChatCommand::Status),
        "/exit" | "/quit" => Ok(ChatCommand::Exit),
        "/select" => {
            if rest.is_empty() {
                Err(CommandError::MissingArgument {
                    command: "/select".to_string(),
                    usage: "/select <preset-id>".to_string(),
                })
            } else {
                Ok(ChatCommand::SelectPreset(rest.to_string()))
            }
        }
        "/create" => {
            if rest.is_empty() {
                return Err(CommandError::MissingArgument {
                    command: "/create".to_string(),
                    usage: "/create <name> [description]".to_string(),
                });
            }
            let mut name_rest = rest.splitn(2, char::is_whitespace);
            let name = name_rest.next().unwrap_or_default().to_string();
            let description = name_rest.next().unwrap_or("").trim().to_string();
            Ok(ChatCommand::CreatePreset { name, description })
        }
        "/save" => parse_index("/save", rest).map(ChatCommand::Save),
        "/copy" => parse_index("/copy", rest).map(ChatCommand::Copy),
        "/play" => parse_index("/play", rest).map(ChatCommand::Play),
        other => Err(CommandError::UnknownCommand(other.to_string())),
    }
}

fn parse_index(command: &str, arg: &str) -> Result<usize, CommandError> {
    if arg.is_empty() {
        return Err(CommandError::MissingArgument {
            command: command.to_string(),
            usage: format!("{} <message-number>", command),
        });
    }
    arg.parse::<usize>()
        .ok()
        .filter(|n| *n >= 1)
        .ok_or_else(|| CommandError::InvalidArgument {
            command: command.to_string(),
            arg: arg.to_string(),
        })
}

/// Help text shown by `/help`
pub fn help_text() -> &'static str {
    "\
Команды:
  /help                     — эта справка
  /presets                  — список нейросетей
  /select <id>              — выбрать нейросеть
  /create <name> [описание] — создать свою нейросеть и выбрать её
  /save <n>                 — сохранить вложение сообщения n
  /copy <n>                 — скопировать сообщение n
  /play <n>                 — запустить/остановить игру сообщения n
  /status                   — состояние сессии
  exit, quit                — выход

Любой другой ввод отправляется выбранной нейросети."
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_is_not_a_command() {
        assert_eq!(parse_chat_command("сделай тетрис").unwrap(), ChatCommand::None);
        assert_eq!(parse_chat_command("  привет  ").unwrap(), ChatCommand::None);
    }

    #[test]
    fn test_exit_aliases() {
        assert_eq!(parse_chat_command("exit").unwrap(), ChatCommand::Exit);
        assert_eq!(parse_chat_command("quit").unwrap(), ChatCommand::Exit);
        assert_eq!(parse_chat_command("/exit").unwrap(), ChatCommand::Exit);
        assert_eq!(parse_chat_command("QUIT").unwrap(), ChatCommand::Exit);
    }

    #[test]
    fn test_help() {
        assert_eq!(parse_chat_command("/help").unwrap(), ChatCommand::Help);
    }

    #[test]
    fn test_presets_aliases() {
        assert_eq!(parse_chat_command("/presets").unwrap(), ChatCommand::ListPresets);
        assert_eq!(parse_chat_command("/models").unwrap(), ChatCommand::ListPresets);
    }

    #[test]
    fn test_select_with_id() {
        assert_eq!(
            parse_chat_command("/select gemini").unwrap(),
            ChatCommand::SelectPreset("gemini".to_string())
        );
    }

    #[test]
    fn test_select_requires_argument() {
        assert!(matches!(
            parse_chat_command("/select"),
            Err(CommandError::MissingArgument { .. })
        ));
    }

    #[test]
    fn test_create_name_only_has_empty_description() {
        assert_eq!(
            parse_chat_command("/create Помощник").unwrap(),
            ChatCommand::CreatePreset {
                name: "Помощник".to_string(),
                description: String::new(),
            }
        );
    }

    #[test]
    fn test_create_with_description() {
        assert_eq!(
            parse_chat_command("/create Помощник творческий ассистент").unwrap(),
            ChatCommand::CreatePreset {
                name: "Помощник".to_string(),
                description: "творческий ассистент".to_string(),
            }
        );
    }

    #[test]
    fn test_create_requires_name() {
        assert!(matches!(
            parse_chat_command("/create"),
            Err(CommandError::MissingArgument { .. })
        ));
    }

    #[test]
    fn test_save_copy_play_parse_index() {
        assert_eq!(parse_chat_command("/save 2").unwrap(), ChatCommand::Save(2));
        assert_eq!(parse_chat_command("/copy 3").unwrap(), ChatCommand::Copy(3));
        assert_eq!(parse_chat_command("/play 1").unwrap(), ChatCommand::Play(1));
    }

    #[test]
    fn test_index_must_be_positive_number() {
        assert!(matches!(
            parse_chat_command("/save abc"),
            Err(CommandError::InvalidArgument { .. })
        ));
        assert!(matches!(
            parse_chat_command("/play 0"),
            Err(CommandError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_index_is_required() {
        assert!(matches!(
            parse_chat_command("/save"),
            Err(CommandError::MissingArgument { .. })
        ));
    }

    #[test]
    fn test_unknown_command_errors() {
        let err = parse_chat_command("/frobnicate").unwrap_err();
        assert!(matches!(err, CommandError::UnknownCommand(_)));
        assert!(err.to_string().contains("/help"));
    }

    #[test]
    fn test_commands_are_case_insensitive() {
        assert_eq!(parse_chat_command("/HELP").unwrap(), ChatCommand::Help);
        assert_eq!(
            parse_chat_command("/Select Gemini").unwrap(),
            ChatCommand::SelectPreset("Gemini".to_string())
        );
    }
}
