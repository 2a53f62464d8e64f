//! Terminal implementations of the collaborator surfaces
//!
//! These back the interactive CLI: games open in the platform browser via a
//! scratch file, saves land in the configured save directory, clipboard
//! writes go out as an OSC 52 escape sequence, and notifications print with
//! `colored`.

use crate::error::{NeurosimError, Result};
use crate::surfaces::{ClipboardSurface, FileSaveSurface, NotificationSurface, SandboxSurface, Severity};
use base64::Engine;
use colored::Colorize;
use std::fs;
use std::path::PathBuf;
use std::process::Command;

/// Opens game documents in the platform browser
///
/// The document is written to a scratch file inside `dir` and handed to the
/// platform opener (`xdg-open`/`open`/`cmd /c start`). Either step can fail,
/// which surfaces as a [`NeurosimError::Sandbox`].
pub struct BrowserSandbox {
    dir: PathBuf,
    counter: u32,
}

impl BrowserSandbox {
    /// Creates a sandbox that stages documents in the given directory
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            counter: 0,
        }
    }

    fn opener() -> (&'static str, &'static [&'static str]) {
        #[cfg(target_os = "macos")]
        {
            ("open", &[])
        }
        #[cfg(target_os = "windows")]
        {
            ("cmd", &["/c", "start", ""])
        }
        #[cfg(not(any(target_os = "macos", target_os = "windows")))]
        {
            ("xdg-open", &[])
        }
    }
}

impl SandboxSurface for BrowserSandbox {
    fn launch(&mut self, source: &str) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .map_err(|e| NeurosimError::Sandbox(format!("cannot create scratch dir: {}", e)))?;

        self.counter += 1;
        let path = self.dir.join(format!("neurosim-game-{}.html", self.counter));
        fs::write(&path, source)
            .map_err(|e| NeurosimError::Sandbox(format!("cannot write game file: {}", e)))?;

        let (program, args) = Self::opener();
        Command::new(program)
            .args(args)
            .arg(&path)
            .spawn()
            .map_err(|e| {
                NeurosimError::Sandbox(format!("cannot open browser via {}: {}", program, e))
            })?;

        tracing::info!("Launched game in browser: {}", path.display());
        Ok(())
    }
}

/// Saves attachments into a directory on disk
///
/// Remote assets are persisted as `.url` link files (this demo never
/// downloads); inline payloads are written verbatim. Failures are logged
/// and swallowed, matching the fire-and-forget contract.
pub struct DirectoryFileSaver {
    dir: PathBuf,
}

impl DirectoryFileSaver {
    /// Creates a saver rooted at the given directory
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn write(&self, file_name: &str, content: &str) {
        if let Err(e) = fs::create_dir_all(&self.dir) {
            tracing::warn!("Save directory unavailable: {}", e);
            return;
        }
        let path = self.dir.join(file_name);
        match fs::write(&path, content) {
            Ok(()) => tracing::info!("Saved {}", path.display()),
            Err(e) => tracing::warn!("Failed to save {}: {}", path.display(), e),
        }
    }
}

impl FileSaveSurface for DirectoryFileSaver {
    fn save_url(&mut self, url: &str, file_name: &str) {
        let link_name = format!("{}.url", file_name);
        self.write(&link_name, &format!("[InternetShortcut]\nURL={}\n", url));
    }

    fn save_text(&mut self, content: &str, file_name: &str) {
        self.write(file_name, content);
    }
}

/// OSC 52 terminal clipboard
///
/// Emits the escape sequence modern terminal emulators interpret as a
/// clipboard write. The payload is base64-encoded per the spec of the
/// sequence. No confirmation path exists, matching the assumed-success
/// contract.
#[derive(Debug, Default)]
pub struct Osc52Clipboard;

impl ClipboardSurface for Osc52Clipboard {
    fn copy(&mut self, text: &str) {
        let payload = base64::engine::general_purpose::STANDARD.encode(text);
        print!("\x1b]52;c;{}\x07", payload);
        tracing::debug!("Copied {} bytes to clipboard via OSC 52", text.len());
    }
}

/// Prints transient notices to the terminal
#[derive(Debug, Default)]
pub struct TerminalNotifier;

impl NotificationSurface for TerminalNotifier {
    fn notify(&mut self, title: &str, description: &str, severity: Severity) {
        match severity {
            Severity::Info => println!("{} {}", title.cyan().bold(), description),
            Severity::Destructive => eprintln!("{} {}", title.red().bold(), description),
        }
    }
}
