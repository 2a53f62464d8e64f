//! Conversation session state machine
//!
//! The session owns the ordered message log, the pending-input buffer, the
//! ephemeral per-message UI flags, and the scheduled-task table that
//! simulates response latency. All mutation happens synchronously in the
//! caller's thread; timers resolve only when the caller drives
//! [`ConversationSession::tick`], so tests can run the whole machine with
//! synthetic instants.

pub mod timers;

use crate::catalog::{Preset, PresetCatalog};
use crate::dispatch::{dispatch, Attachment, AttachmentKind};
use crate::surfaces::{Severity, Surfaces};
use chrono::{DateTime, Utc};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::{Duration, Instant};

pub use timers::{TaskAction, TaskId, TimerQueue};

/// Role of a message sender
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Message typed by the user
    User,
    /// Simulated model response
    Assistant,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::User => write!(f, "user"),
            Self::Assistant => write!(f, "assistant"),
        }
    }
}

/// A message in the conversation log
///
/// Created once, never mutated, appended in creation order. The log is
/// cleared only by dropping the session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    /// Unique id derived from the creation timestamp
    pub id: String,
    /// Sender role
    pub role: Role,
    /// Message text
    pub content: String,
    /// Creation time
    pub created_at: DateTime<Utc>,
    /// Attachments carried by the message (assistant messages only)
    pub attachments: Vec<Attachment>,
}

impl Message {
    fn game_source(&self) -> Option<&str> {
        self.attachments
            .iter()
            .find(|a| a.kind == AttachmentKind::Game)
            .and_then(|a| a.inline_content.as_deref())
    }
}

/// Timing knobs for the session, taken from configuration
#[derive(Debug, Clone, Copy)]
pub struct SessionDelays {
    /// Simulated "assistant is thinking" latency
    pub response_delay: Duration,
    /// Auto-clear interval for the saved/copied flag
    pub flag_reset_delay: Duration,
}

impl Default for SessionDelays {
    fn default() -> Self {
        Self {
            response_delay: Duration::from_millis(1000),
            flag_reset_delay: Duration::from_millis(2000),
        }
    }
}

/// Conversation session
///
/// Owns the catalog, the selected preset, the message log, the input
/// buffer, the flag maps, and the timer table. Submissions append a user
/// message immediately and schedule the assistant response; nothing
/// serializes concurrent submissions — two submissions before the first
/// delivery simply schedule two independent tasks, and both deliver in
/// timer order. That is deliberate, preserved demo behavior.
pub struct ConversationSession {
    catalog: PresetCatalog,
    selected_preset: String,
    input: String,
    messages: Vec<Message>,
    saved: HashMap<String, bool>,
    playing: HashMap<String, bool>,
    timers: TimerQueue,
    surfaces: Surfaces,
    rng: Box<dyn RngCore>,
    delays: SessionDelays,
    last_id_millis: i64,
}

impl std::fmt::Debug for ConversationSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConversationSession")
            .field("selected_preset", &self.selected_preset)
            .field("messages", &self.messages.len())
            .field("pending_timers", &self.timers.pending())
            .finish_non_exhaustive()
    }
}

impl ConversationSession {
    /// Creates a session over a catalog
    ///
    /// # Arguments
    ///
    /// * `catalog` - Preset catalog owned by the session
    /// * `selected_preset` - Initially selected preset id
    /// * `delays` - Response and flag-reset delays
    /// * `surfaces` - External collaborator surfaces
    /// * `rng` - Random source handed to the dispatcher
    pub fn new(
        catalog: PresetCatalog,
        selected_preset: impl Into<String>,
        delays: SessionDelays,
        surfaces: Surfaces,
        rng: Box<dyn RngCore>,
    ) -> Self {
        Self {
            catalog,
            selected_preset: selected_preset.into(),
            input: String::new(),
            messages: Vec::new(),
            saved: HashMap::new(),
            playing: HashMap::new(),
            timers: TimerQueue::new(),
            surfaces,
            rng,
            delays,
            last_id_millis: 0,
        }
    }

    /// The catalog backing this session
    pub fn catalog(&self) -> &PresetCatalog {
        &self.catalog
    }

    /// Mutable catalog access (preset creation)
    pub fn catalog_mut(&mut self) -> &mut PresetCatalog {
        &mut self.catalog
    }

    /// Currently selected preset id, as selected (may be stale)
    pub fn selected_preset_id(&self) -> &str {
        &self.selected_preset
    }

    /// The active preset, resolved with the catalog's fallback rule
    pub fn active_preset(&self) -> &Preset {
        self.catalog.resolve(&self.selected_preset)
    }

    /// Selects a preset
    ///
    /// Pending response timers are untouched: a response scheduled before
    /// the switch still delivers with the preset id captured at submission.
    pub fn select_preset(&mut self, id: impl Into<String>) {
        self.selected_preset = id.into();
    }

    /// Replaces the pending-input buffer
    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    /// The pending-input buffer
    pub fn input(&self) -> &str {
        &self.input
    }

    /// The ordered message log
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Looks up a message by id
    pub fn message(&self, id: &str) -> Option<&Message> {
        self.messages.iter().find(|m| m.id == id)
    }

    /// Whether the saved/copied affordance flag is set for a message
    pub fn is_saved(&self, message_id: &str) -> bool {
        self.saved.get(message_id).copied().unwrap_or(false)
    }

    /// Whether a message's game is currently marked playing
    pub fn is_playing(&self, message_id: &str) -> bool {
        self.playing.get(message_id).copied().unwrap_or(false)
    }

    /// Number of scheduled tasks not yet fired
    pub fn pending_timers(&self) -> usize {
        self.timers.pending()
    }

    /// Submits the pending input
    ///
    /// No-op when the buffer trims to empty (buffer left as-is). Otherwise
    /// appends a user message with the verbatim buffer content, clears the
    /// buffer, and schedules the assistant response for
    /// `now + response_delay` with the prompt and the resolved active preset
    /// id captured at this moment. Capturing the resolved id keeps the
    /// delivered response consistent with what `active_preset` reports: an
    /// unresolvable selection dispatches as the first built-in, not as the
    /// dangling id.
    ///
    /// # Returns
    ///
    /// The id of the scheduled response task, or None when the submission
    /// was rejected. The id can be passed to
    /// [`ConversationSession::cancel_response`].
    pub fn submit(&mut self, now: Instant) -> Option<TaskId> {
        if self.input.trim().is_empty() {
            return None;
        }

        let prompt = std::mem::take(&mut self.input);
        let preset_id = self.active_preset().id.clone();
        let message = self.build_message(Role::User, prompt.clone(), Vec::new());
        tracing::debug!("User message {} appended", message.id);
        self.messages.push(message);

        let task = self.timers.schedule(
            now + self.delays.response_delay,
            TaskAction::DeliverResponse { preset_id, prompt },
        );
        Some(task)
    }

    /// Cancels a pending response task
    ///
    /// Present for completeness of the timer table; the interactive loop
    /// never cancels.
    pub fn cancel_response(&mut self, task: TaskId) -> bool {
        self.timers.cancel(task)
    }

    /// Fires all timers due at `now`
    ///
    /// Delivers pending assistant responses (one per submission, in timer
    /// firing order) and clears expired saved flags.
    ///
    /// # Returns
    ///
    /// Ids of the assistant messages appended by this tick
    pub fn tick(&mut self, now: Instant) -> Vec<String> {
        let mut appended = Vec::new();
        for action in self.timers.fire_due(now) {
            match action {
                TaskAction::DeliverResponse { preset_id, prompt } => {
                    let outcome = dispatch(&preset_id, &prompt, self.rng.as_mut());
                    let attachments = outcome.attachment.into_iter().collect();
                    let message = self.build_message(Role::Assistant, outcome.reply, attachments);
                    tracing::debug!("Assistant message {} appended", message.id);
                    appended.push(message.id.clone());
                    self.messages.push(message);
                }
                TaskAction::ClearSaved { message_id } => {
                    self.saved.insert(message_id, false);
                }
            }
        }
        appended
    }

    /// Sets the saved affordance flag for a message
    ///
    /// The flag auto-clears after the configured interval. Unknown ids are
    /// ignored.
    ///
    /// # Returns
    ///
    /// True when the message exists
    pub fn mark_saved(&mut self, message_id: &str, now: Instant) -> bool {
        if self.message(message_id).is_none() {
            return false;
        }
        self.saved.insert(message_id.to_string(), true);
        self.timers.schedule(
            now + self.delays.flag_reset_delay,
            TaskAction::ClearSaved {
                message_id: message_id.to_string(),
            },
        );
        true
    }

    /// Sets the copied affordance flag for a message
    ///
    /// Shares the saved flag map — the affordance is the same "recently
    /// acknowledged" checkmark.
    pub fn mark_copied(&mut self, message_id: &str, now: Instant) -> bool {
        self.mark_saved(message_id, now)
    }

    /// Copies a message to the clipboard surface
    ///
    /// Game attachments copy their source; other messages copy their text.
    ///
    /// # Returns
    ///
    /// True when the message exists
    pub fn copy_message(&mut self, message_id: &str, now: Instant) -> bool {
        let Some(message) = self.message(message_id) else {
            return false;
        };
        let text = message
            .game_source()
            .map(|s| s.to_string())
            .unwrap_or_else(|| message.content.clone());
        self.surfaces.clipboard.copy(&text);
        self.mark_copied(message_id, now)
    }

    /// Toggles the playing flag for a message's game attachment
    ///
    /// On the off-to-on transition the game source is handed to the sandbox
    /// surface; when the sandbox cannot open, the flag is rolled back and a
    /// destructive notice is surfaced. Messages without a game attachment
    /// are ignored.
    ///
    /// # Returns
    ///
    /// The resulting playing state
    pub fn toggle_play(&mut self, message_id: &str) -> bool {
        let Some(source) = self
            .message(message_id)
            .and_then(|m| m.game_source())
            .map(|s| s.to_string())
        else {
            return false;
        };

        if self.is_playing(message_id) {
            self.playing.insert(message_id.to_string(), false);
            return false;
        }

        self.playing.insert(message_id.to_string(), true);
        match self.surfaces.sandbox.launch(&source) {
            Ok(()) => true,
            Err(e) => {
                self.playing.insert(message_id.to_string(), false);
                tracing::warn!("Sandbox launch failed: {}", e);
                self.surfaces.notifier.notify(
                    "Не удалось запустить игру",
                    "Разрешите всплывающие окна и попробуйте снова.",
                    Severity::Destructive,
                );
                false
            }
        }
    }

    /// Saves a message's attachment through the file-save surface
    ///
    /// Image and video attachments are saved by URL; games save their
    /// inline source under the suggested file name. Fire-and-forget: the
    /// surface reports no outcome. Sets the saved flag on success of the
    /// hand-off.
    ///
    /// # Returns
    ///
    /// True when the message exists and carries an attachment
    pub fn save_attachment(&mut self, message_id: &str, now: Instant) -> bool {
        let Some(attachment) = self
            .message(message_id)
            .and_then(|m| m.attachments.first())
            .cloned()
        else {
            return false;
        };

        match attachment.kind {
            AttachmentKind::Image | AttachmentKind::Video => {
                let url = attachment.url.unwrap_or_default();
                let name = attachment
                    .suggested_file_name
                    .unwrap_or_else(|| "attachment".to_string());
                self.surfaces.files.save_url(&url, &name);
            }
            AttachmentKind::Game => {
                let content = attachment.inline_content.unwrap_or_default();
                let name = attachment
                    .suggested_file_name
                    .unwrap_or_else(|| "game.html".to_string());
                self.surfaces.files.save_text(&content, &name);
            }
        }
        self.mark_saved(message_id, now)
    }

    /// Builds a message with a millis-derived id, bumped on collision
    fn build_message(&mut self, role: Role, content: String, attachments: Vec<Attachment>) -> Message {
        let now = Utc::now();
        let mut millis = now.timestamp_millis();
        if millis <= self.last_id_millis {
            millis = self.last_id_millis + 1;
        }
        self.last_id_millis = millis;

        Message {
            id: millis.to_string(),
            role,
            content,
            created_at: now,
            attachments,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{recording_surfaces, test_session};

    fn start() -> Instant {
        Instant::now()
    }

    #[test]
    fn test_submit_appends_user_message_and_clears_input() {
        let (mut session, _log) = test_session("gemini");
        session.set_input("сделай тетрис");
        let task = session.submit(start());

        assert!(task.is_some());
        assert_eq!(session.messages().len(), 1);
        assert_eq!(session.messages()[0].role, Role::User);
        assert_eq!(session.messages()[0].content, "сделай тетрис");
        assert_eq!(session.input(), "");
    }

    #[test]
    fn test_submit_whitespace_is_noop() {
        let (mut session, _log) = test_session("gemini");
        session.set_input("   ");
        let task = session.submit(start());

        assert!(task.is_none());
        assert!(session.messages().is_empty());
        assert_eq!(session.input(), "   ");
        assert_eq!(session.pending_timers(), 0);
    }

    #[test]
    fn test_response_delivers_after_delay() {
        let (mut session, _log) = test_session("gemini");
        let now = start();
        session.set_input("сделай тетрис");
        session.submit(now);

        // Not due yet
        assert!(session.tick(now + Duration::from_millis(500)).is_empty());
        assert_eq!(session.messages().len(), 1);

        let appended = session.tick(now + Duration::from_millis(1000));
        assert_eq!(appended.len(), 1);
        assert_eq!(session.messages().len(), 2);

        let reply = &session.messages()[1];
        assert_eq!(reply.role, Role::Assistant);
        assert!(reply.content.contains("\"сделай тетрис\""));
        assert_eq!(
            reply.attachments[0].suggested_file_name.as_deref(),
            Some("tetris.html")
        );
    }

    #[test]
    fn test_two_rapid_submissions_deliver_two_responses() {
        let (mut session, _log) = test_session("sora");
        let now = start();
        session.set_input("первое");
        session.submit(now);
        session.set_input("второе");
        session.submit(now + Duration::from_millis(100));

        assert_eq!(session.pending_timers(), 2);
        let appended = session.tick(now + Duration::from_secs(2));
        assert_eq!(appended.len(), 2);

        let assistant: Vec<&Message> = session
            .messages()
            .iter()
            .filter(|m| m.role == Role::Assistant)
            .collect();
        assert!(assistant[0].content.contains("\"первое\""));
        assert!(assistant[1].content.contains("\"второе\""));
    }

    #[test]
    fn test_response_binds_preset_captured_at_submission() {
        let (mut session, _log) = test_session("sora");
        let now = start();
        session.set_input("закат над морем");
        session.submit(now);

        // Preset switch before the timer fires must not retarget the response
        session.select_preset("gemini");
        session.tick(now + Duration::from_secs(1));

        let reply = &session.messages()[1];
        assert_eq!(reply.attachments[0].kind, AttachmentKind::Video);
    }

    #[test]
    fn test_cancel_response_prevents_delivery() {
        let (mut session, _log) = test_session("gemini");
        let now = start();
        session.set_input("отмена");
        let task = session.submit(now).unwrap();

        assert!(session.cancel_response(task));
        assert!(session.tick(now + Duration::from_secs(5)).is_empty());
        assert_eq!(session.messages().len(), 1);
    }

    #[test]
    fn test_mark_saved_sets_and_auto_clears_flag() {
        let (mut session, _log) = test_session("dall-e-3");
        let now = start();
        session.set_input("кот");
        session.submit(now);
        let reply_id = session.tick(now + Duration::from_secs(1)).remove(0);

        assert!(session.mark_saved(&reply_id, now + Duration::from_secs(1)));
        assert!(session.is_saved(&reply_id));

        session.tick(now + Duration::from_secs(3));
        assert!(!session.is_saved(&reply_id));
    }

    #[test]
    fn test_mark_saved_does_not_touch_other_messages() {
        let (mut session, _log) = test_session("dall-e-3");
        let now = start();
        session.set_input("раз");
        session.submit(now);
        session.set_input("два");
        session.submit(now);
        let appended = session.tick(now + Duration::from_secs(1));

        session.mark_saved(&appended[0], now + Duration::from_secs(1));
        assert!(session.is_saved(&appended[0]));
        assert!(!session.is_saved(&appended[1]));
    }

    #[test]
    fn test_mark_saved_unknown_id_is_rejected() {
        let (mut session, _log) = test_session("gemini");
        assert!(!session.mark_saved("999", start()));
        assert_eq!(session.pending_timers(), 0);
    }

    #[test]
    fn test_copy_message_sends_game_source_to_clipboard() {
        let (mut session, log) = test_session("gemini");
        let now = start();
        session.set_input("хочу змейку");
        session.submit(now);
        let reply_id = session.tick(now + Duration::from_secs(1)).remove(0);

        assert!(session.copy_message(&reply_id, now + Duration::from_secs(1)));
        assert!(session.is_saved(&reply_id));
        let copied = log.lock().unwrap().copied.remove(0);
        assert!(copied.contains("Змейка"));
    }

    #[test]
    fn test_toggle_play_launches_sandbox() {
        let (mut session, log) = test_session("gemini");
        let now = start();
        session.set_input("хочу змейку");
        session.submit(now);
        let reply_id = session.tick(now + Duration::from_secs(1)).remove(0);

        assert!(session.toggle_play(&reply_id));
        assert!(session.is_playing(&reply_id));
        assert_eq!(log.lock().unwrap().launched.len(), 1);

        // Second toggle stops without relaunching
        assert!(!session.toggle_play(&reply_id));
        assert!(!session.is_playing(&reply_id));
        assert_eq!(log.lock().unwrap().launched.len(), 1);
    }

    #[test]
    fn test_toggle_play_rolls_back_on_sandbox_denial() {
        let (surfaces, log) = recording_surfaces(true);
        let mut session = ConversationSession::new(
            crate::catalog::PresetCatalog::new(),
            "gemini",
            SessionDelays::default(),
            surfaces,
            Box::new(crate::test_utils::seeded_rng(0)),
        );
        let now = start();
        session.set_input("хочу змейку");
        session.submit(now);
        let reply_id = session.tick(now + Duration::from_secs(1)).remove(0);

        assert!(!session.toggle_play(&reply_id));
        assert!(!session.is_playing(&reply_id));
        let log = log.lock().unwrap();
        assert_eq!(log.notices.len(), 1);
        assert_eq!(log.notices[0].2, Severity::Destructive);
    }

    #[test]
    fn test_toggle_play_ignores_messages_without_game() {
        let (mut session, log) = test_session("dall-e-3");
        let now = start();
        session.set_input("кот");
        session.submit(now);
        let reply_id = session.tick(now + Duration::from_secs(1)).remove(0);

        assert!(!session.toggle_play(&reply_id));
        assert!(log.lock().unwrap().launched.is_empty());
    }

    #[test]
    fn test_save_attachment_image_goes_by_url() {
        let (mut session, log) = test_session("dall-e-3");
        let now = start();
        session.set_input("кот");
        session.submit(now);
        let reply_id = session.tick(now + Duration::from_secs(1)).remove(0);

        assert!(session.save_attachment(&reply_id, now + Duration::from_secs(1)));
        assert!(session.is_saved(&reply_id));
        let log = log.lock().unwrap();
        assert_eq!(log.saved_urls.len(), 1);
        assert!(log.saved_urls[0].0.starts_with("https://"));
    }

    #[test]
    fn test_save_attachment_game_goes_by_inline_content() {
        let (mut session, log) = test_session("gemini");
        let now = start();
        session.set_input("сделай тетрис");
        session.submit(now);
        let reply_id = session.tick(now + Duration::from_secs(1)).remove(0);

        assert!(session.save_attachment(&reply_id, now + Duration::from_secs(1)));
        let log = log.lock().unwrap();
        assert_eq!(log.saved_texts.len(), 1);
        assert_eq!(log.saved_texts[0].1, "tetris.html");
        assert!(log.saved_texts[0].0.contains("<!DOCTYPE html>"));
    }

    #[test]
    fn test_save_attachment_without_attachment_is_rejected() {
        let (mut session, _log) = test_session("gemini");
        let preset = session.catalog_mut().create("Помощник", "");
        session.select_preset(preset.id);
        let now = start();
        session.set_input("привет");
        session.submit(now);
        let reply_id = session.tick(now + Duration::from_secs(1)).remove(0);

        assert!(!session.save_attachment(&reply_id, now));
    }

    #[test]
    fn test_message_ids_are_unique_and_increasing() {
        let (mut session, _log) = test_session("gemini");
        let now = start();
        for i in 0..5 {
            session.set_input(format!("сообщение {}", i));
            session.submit(now);
        }
        session.tick(now + Duration::from_secs(2));

        let ids: Vec<i64> = session
            .messages()
            .iter()
            .map(|m| m.id.parse().unwrap())
            .collect();
        let mut sorted = ids.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(sorted.len(), ids.len());
        assert_eq!(sorted, ids);
    }

    #[test]
    fn test_active_preset_falls_back_when_selection_unknown() {
        let (mut session, _log) = test_session("gemini");
        session.select_preset("vanished");
        assert_eq!(session.active_preset().id, "dall-e-3");
    }

    #[test]
    fn test_unknown_selection_dispatches_as_first_builtin() {
        let (mut session, _log) = test_session("gemini");
        session.select_preset("vanished");
        assert_eq!(session.active_preset().id, "dall-e-3");

        let now = start();
        session.set_input("кот в сапогах");
        session.submit(now);
        session.tick(now + Duration::from_secs(1));

        // The reply must match what active_preset showed, not the dangling id
        let reply = &session.messages()[1];
        assert!(reply.content.contains("Вот изображение"));
        assert_eq!(reply.attachments[0].kind, AttachmentKind::Image);
    }

    #[test]
    fn test_created_preset_can_be_selected() {
        let (mut session, _log) = test_session("gemini");
        let preset = session.catalog_mut().create("Помощник", "");
        session.select_preset(preset.id.clone());
        assert_eq!(session.active_preset().id, preset.id);

        let now = start();
        session.set_input("привет");
        session.submit(now);
        session.tick(now + Duration::from_secs(1));
        let reply = &session.messages()[1];
        assert!(reply.content.contains("персонализированная нейросеть"));
        assert!(reply.attachments.is_empty());
    }
}
