//! Interactive chat session
//!
//! A rustyline REPL over the conversation session: regular input is
//! submitted as a prompt (with the simulated thinking delay), `/` commands
//! act on the session, and attachments render as terminal affordances with
//! hints for the save/copy/play actions.

use crate::catalog::PresetCatalog;
use crate::commands::ask::build_rng;
use crate::commands::special_commands::{help_text, parse_chat_command, ChatCommand};
use crate::config::Config;
use crate::dispatch::AttachmentKind;
use crate::error::Result;
use crate::session::{ConversationSession, Message, Role};
use crate::surfaces::terminal::{
    BrowserSandbox, DirectoryFileSaver, Osc52Clipboard, TerminalNotifier,
};
use crate::surfaces::Surfaces;
use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::time::Instant;

/// Run the interactive chat session
///
/// # Arguments
///
/// * `config` - Loaded configuration
/// * `seed` - Optional RNG seed for deterministic attachment selection
pub async fn run_chat(config: Config, seed: Option<u64>) -> Result<()> {
    let delays = config.session.delays();
    let surfaces = Surfaces {
        sandbox: Box::new(BrowserSandbox::new(std::env::temp_dir())),
        files: Box::new(DirectoryFileSaver::new(config.chat.resolve_save_dir())),
        clipboard: Box::new(Osc52Clipboard),
        notifier: Box::new(TerminalNotifier),
    };

    let mut session = ConversationSession::new(
        PresetCatalog::new(),
        config.session.default_preset.clone(),
        delays,
        surfaces,
        build_rng(seed),
    );

    print_banner(&session);

    let mut rl = DefaultEditor::new()?;
    loop {
        // Delivers anything still due and clears expired saved/copied flags
        for id in session.tick(Instant::now()) {
            if let Some(position) = session.messages().iter().position(|m| m.id == id) {
                print_message(position + 1, &session.messages()[position]);
            }
        }

        let prompt = format!("[{}] >> ", session.active_preset().name.green().bold());
        let line = match rl.readline(&prompt) {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => return Err(e.into()),
        };
        if !line.trim().is_empty() {
            let _ = rl.add_history_entry(line.as_str());
        }

        match parse_chat_command(&line) {
            Ok(ChatCommand::None) => {
                submit_prompt(&mut session, &line, delays.response_delay).await
            }
            Ok(ChatCommand::Help) => println!("{}", help_text()),
            Ok(ChatCommand::ListPresets) => list_presets(&session),
            Ok(ChatCommand::SelectPreset(id)) => select_preset(&mut session, &id),
            Ok(ChatCommand::CreatePreset { name, description }) => {
                let preset = session.catalog_mut().create(name, description);
                session.select_preset(preset.id.clone());
                println!(
                    "Создана нейросеть {} ({}): {}",
                    preset.name.bold(),
                    preset.id,
                    preset.description
                );
            }
            Ok(ChatCommand::Save(n)) => save_message(&mut session, n),
            Ok(ChatCommand::Copy(n)) => copy_message(&mut session, n),
            Ok(ChatCommand::Play(n)) => play_message(&mut session, n),
            Ok(ChatCommand::Status) => print_status(&session),
            Ok(ChatCommand::Exit) => break,
            Err(e) => println!("{}", e.to_string().yellow()),
        }
    }

    println!("До встречи!");
    Ok(())
}

/// Submits a prompt and waits out the simulated thinking delay
async fn submit_prompt(
    session: &mut ConversationSession,
    line: &str,
    response_delay: std::time::Duration,
) {
    session.set_input(line);
    let now = Instant::now();
    if session.submit(now).is_none() {
        return;
    }

    let index = session.messages().len();
    print_message(index, &session.messages()[index - 1]);

    tokio::time::sleep(response_delay).await;

    let appended = session.tick(Instant::now());
    for id in appended {
        if let Some(position) = session.messages().iter().position(|m| m.id == id) {
            let message = &session.messages()[position];
            print_message(position + 1, message);
        }
    }
}

fn print_banner(session: &ConversationSession) {
    let preset = session.active_preset();
    println!("{}", "neurosim — демо чата с нейросетями".bold());
    println!(
        "{} {} — {}",
        preset.category.glyph(),
        preset.name.bold(),
        preset.description
    );
    println!("Наши нейросети могут создавать изображения, видео и игры.");
    println!("Введите запрос или '/help' для списка команд.\n");
}

fn list_presets(session: &ConversationSession) {
    for preset in session.catalog().list() {
        let marker = if preset.id == session.active_preset().id {
            "*"
        } else {
            " "
        };
        println!(
            "{} {} {:<12} {} — {}",
            marker,
            preset.category.glyph(),
            preset.id,
            preset.name.bold(),
            preset.description
        );
    }
}

fn select_preset(session: &mut ConversationSession, id: &str) {
    if !session.catalog().contains(id) {
        println!(
            "{}",
            format!("Нейросеть '{}' не найдена, выбрана {}", id, session.catalog().resolve(id).name)
                .yellow()
        );
    }
    session.select_preset(id);
    let preset = session.active_preset();
    println!("Выбрана нейросеть: {} — {}", preset.name.bold(), preset.description);
}

fn print_status(session: &ConversationSession) {
    let preset = session.active_preset();
    println!("Нейросеть: {} ({})", preset.name, preset.id);
    println!("Сообщений: {}", session.messages().len());
    println!("Ожидающих таймеров: {}", session.pending_timers());
}

fn print_message(index: usize, message: &Message) {
    let header = match message.role {
        Role::User => format!("[{}] 🧑", index).cyan(),
        Role::Assistant => format!("[{}] 🤖", index).magenta(),
    };
    println!("{} {}", header, message.content);

    for attachment in &message.attachments {
        match attachment.kind {
            AttachmentKind::Image => println!(
                "    🖼 {} — /save {} для сохранения",
                attachment.url.as_deref().unwrap_or_default().underline(),
                index
            ),
            AttachmentKind::Video => println!(
                "    🎬 {} — /save {} для сохранения",
                attachment.url.as_deref().unwrap_or_default().underline(),
                index
            ),
            AttachmentKind::Game => {
                println!(
                    "    🎮 {} — /play {} для запуска, /copy {} для копирования, /save {} для сохранения",
                    attachment
                        .suggested_file_name
                        .as_deref()
                        .unwrap_or_default()
                        .bold(),
                    index,
                    index,
                    index
                );
            }
        }
    }
}

fn message_id_at(session: &ConversationSession, n: usize) -> Option<String> {
    session.messages().get(n - 1).map(|m| m.id.clone())
}

fn save_message(session: &mut ConversationSession, n: usize) {
    let Some(id) = message_id_at(session, n) else {
        println!("{}", format!("Нет сообщения с номером {}", n).yellow());
        return;
    };
    if session.save_attachment(&id, Instant::now()) {
        println!("{}", "Сохранено ✓".green());
    } else {
        println!("{}", "У этого сообщения нет вложений".yellow());
    }
}

fn copy_message(session: &mut ConversationSession, n: usize) {
    let Some(id) = message_id_at(session, n) else {
        println!("{}", format!("Нет сообщения с номером {}", n).yellow());
        return;
    };
    if session.copy_message(&id, Instant::now()) {
        println!("{}", "Скопировано ✓".green());
    }
}

/// Outcome of a `/play` request, for user feedback
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PlayOutcome {
    /// The message carries no game attachment
    NoGame,
    /// The game was handed to the sandbox and is now playing
    Started,
    /// The game was playing and has been stopped
    Stopped,
    /// The sandbox refused the launch; the session already surfaced a notice
    LaunchFailed,
}

fn toggle_game(session: &mut ConversationSession, id: &str) -> PlayOutcome {
    let has_game = session
        .message(id)
        .map(|m| {
            m.attachments
                .iter()
                .any(|a| a.kind == AttachmentKind::Game)
        })
        .unwrap_or(false);
    if !has_game {
        return PlayOutcome::NoGame;
    }

    let was_playing = session.is_playing(id);
    match (session.toggle_play(id), was_playing) {
        (true, _) => PlayOutcome::Started,
        (false, true) => PlayOutcome::Stopped,
        (false, false) => PlayOutcome::LaunchFailed,
    }
}

fn play_message(session: &mut ConversationSession, n: usize) {
    let Some(id) = message_id_at(session, n) else {
        println!("{}", format!("Нет сообщения с номером {}", n).yellow());
        return;
    };
    match toggle_game(session, &id) {
        PlayOutcome::NoGame => println!("{}", "У этого сообщения нет игры".yellow()),
        PlayOutcome::Started => println!("{}", "Игра запущена в браузере".green()),
        PlayOutcome::Stopped => println!("Игра остановлена"),
        // The sandbox denial notice is already printed by the notifier
        PlayOutcome::LaunchFailed => {}
    }
}
