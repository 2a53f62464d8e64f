//! Shared test helpers
//!
//! Recording surface fakes, seeded random sources, and a session builder
//! used across the unit tests. Compiled only for tests.

use crate::catalog::PresetCatalog;
use crate::error::{NeurosimError, Result};
use crate::session::{ConversationSession, SessionDelays};
use crate::surfaces::{
    ClipboardSurface, FileSaveSurface, NotificationSurface, SandboxSurface, Severity, Surfaces,
};
use rand::{rngs::StdRng, SeedableRng};
use std::sync::{Arc, Mutex};

/// Everything the fake surfaces observed
#[derive(Debug, Default)]
pub struct SurfaceLog {
    /// Game sources handed to the sandbox
    pub launched: Vec<String>,
    /// (url, file name) pairs saved by reference
    pub saved_urls: Vec<(String, String)>,
    /// (content, file name) pairs saved inline
    pub saved_texts: Vec<(String, String)>,
    /// Clipboard payloads
    pub copied: Vec<String>,
    /// (title, description, severity) notices
    pub notices: Vec<(String, String, Severity)>,
}

/// Shared handle to a [`SurfaceLog`]
pub type SharedLog = Arc<Mutex<SurfaceLog>>;

struct FakeSandbox {
    log: SharedLog,
    deny: bool,
}

impl SandboxSurface for FakeSandbox {
    fn launch(&mut self, source: &str) -> Result<()> {
        if self.deny {
            return Err(NeurosimError::Sandbox("popup blocked".to_string()).into());
        }
        self.log.lock().unwrap().launched.push(source.to_string());
        Ok(())
    }
}

struct FakeSaver {
    log: SharedLog,
}

impl FileSaveSurface for FakeSaver {
    fn save_url(&mut self, url: &str, file_name: &str) {
        self.log
            .lock()
            .unwrap()
            .saved_urls
            .push((url.to_string(), file_name.to_string()));
    }

    fn save_text(&mut self, content: &str, file_name: &str) {
        self.log
            .lock()
            .unwrap()
            .saved_texts
            .push((content.to_string(), file_name.to_string()));
    }
}

struct FakeClipboard {
    log: SharedLog,
}

impl ClipboardSurface for FakeClipboard {
    fn copy(&mut self, text: &str) {
        self.log.lock().unwrap().copied.push(text.to_string());
    }
}

struct FakeNotifier {
    log: SharedLog,
}

impl NotificationSurface for FakeNotifier {
    fn notify(&mut self, title: &str, description: &str, severity: Severity) {
        self.log
            .lock()
            .unwrap()
            .notices
            .push((title.to_string(), description.to_string(), severity));
    }
}

/// Builds recording fakes for all four surfaces
///
/// # Arguments
///
/// * `deny_sandbox` - When true, sandbox launches fail like blocked popups
pub fn recording_surfaces(deny_sandbox: bool) -> (Surfaces, SharedLog) {
    let log: SharedLog = Arc::new(Mutex::new(SurfaceLog::default()));
    let surfaces = Surfaces {
        sandbox: Box::new(FakeSandbox {
            log: Arc::clone(&log),
            deny: deny_sandbox,
        }),
        files: Box::new(FakeSaver {
            log: Arc::clone(&log),
        }),
        clipboard: Box::new(FakeClipboard {
            log: Arc::clone(&log),
        }),
        notifier: Box::new(FakeNotifier {
            log: Arc::clone(&log),
        }),
    };
    (surfaces, log)
}

/// Deterministic random source for dispatch tests
pub fn seeded_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Builds a session over a fresh catalog with recording surfaces and a
/// fixed seed
pub fn test_session(preset: &str) -> (ConversationSession, SharedLog) {
    let (surfaces, log) = recording_surfaces(false);
    let session = ConversationSession::new(
        PresetCatalog::new(),
        preset,
        SessionDelays::default(),
        surfaces,
        Box::new(seeded_rng(7)),
    );
    (session, log)
}
