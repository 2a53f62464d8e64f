//! External collaborator surfaces
//!
//! The conversation session does not talk to the outside world directly; it
//! goes through these trait seams. The terminal implementations live in
//! [`terminal`]; tests use recording fakes from `test_utils`.
//!
//! Only the sandbox launch has an observable failure path. File saving and
//! clipboard writes are fire-and-forget from the session's point of view.

pub mod terminal;

use crate::error::Result;

/// Severity of a user-visible notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Informational notice
    Info,
    /// Something went wrong; rendered prominently
    Destructive,
}

/// Sandboxed code execution surface
///
/// Given a complete self-contained HTML document, renders it in an isolated
/// context (for the CLI: a scratch file opened in the platform browser).
/// May fail to open; the caller is expected to roll back its state.
pub trait SandboxSurface {
    /// Launches the document; returns an error when the sandbox cannot open
    fn launch(&mut self, source: &str) -> Result<()>;
}

/// File-save surface
///
/// Persists a URL reference or an in-memory text payload under a suggested
/// file name. Best-effort: failures are logged by implementations, not
/// reported to the caller.
pub trait FileSaveSurface {
    /// Saves a reference to a remote asset
    fn save_url(&mut self, url: &str, file_name: &str);

    /// Saves an in-memory text payload
    fn save_text(&mut self, content: &str, file_name: &str);
}

/// Clipboard surface
pub trait ClipboardSurface {
    /// Copies text to the system clipboard; assumed to succeed
    fn copy(&mut self, text: &str);
}

/// Notification surface
pub trait NotificationSurface {
    /// Displays a transient notice with the given severity
    fn notify(&mut self, title: &str, description: &str, severity: Severity);
}

/// Bundle of all collaborator surfaces owned by a session
pub struct Surfaces {
    /// Sandboxed game execution
    pub sandbox: Box<dyn SandboxSurface>,
    /// File persistence
    pub files: Box<dyn FileSaveSurface>,
    /// System clipboard
    pub clipboard: Box<dyn ClipboardSurface>,
    /// Transient notices
    pub notifier: Box<dyn NotificationSurface>,
}

impl std::fmt::Debug for Surfaces {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Surfaces").finish_non_exhaustive()
    }
}
