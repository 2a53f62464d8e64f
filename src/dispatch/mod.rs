//! Response dispatcher for Neurosim
//!
//! The dispatcher is the pure core of the demo: given the selected preset
//! id and the submitted prompt it produces a canned reply (a template with
//! the prompt interpolated) and an optional placeholder attachment. It has
//! no side effects and no hidden state; the only nondeterminism is the
//! injected random source used for attachment and fallback-template
//! selection, so a seeded generator makes it fully deterministic.

pub mod assets;
pub mod games;

use rand::RngCore;
use serde::{Deserialize, Serialize};

/// Kind of simulated generated content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttachmentKind {
    /// Placeholder image reference
    Image,
    /// Placeholder video reference
    Video,
    /// Inline playable game source
    Game,
}

/// A piece of simulated generated content attached to an assistant message
///
/// Image and video attachments carry a URL; game attachments carry the full
/// inline HTML source instead. Owned exclusively by its parent message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Attachment {
    /// Content kind
    pub kind: AttachmentKind,
    /// Asset URL (image/video)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Alternative text for the asset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alt_text: Option<String>,
    /// File name to suggest when saving
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggested_file_name: Option<String>,
    /// Full text payload (game source)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inline_content: Option<String>,
}

impl Attachment {
    /// Creates an image attachment pointing at a demo asset URL
    pub fn image(url: impl Into<String>) -> Self {
        let url = url.into();
        let file_name = assets::image_file_name(&url);
        Self {
            kind: AttachmentKind::Image,
            url: Some(url),
            alt_text: Some("Сгенерированное изображение".to_string()),
            suggested_file_name: Some(file_name),
            inline_content: None,
        }
    }

    /// Creates a video attachment pointing at a demo asset URL
    pub fn video(url: impl Into<String>) -> Self {
        let url = url.into();
        let file_name = assets::file_name_from_url(&url, "video.mp4");
        Self {
            kind: AttachmentKind::Video,
            url: Some(url),
            alt_text: Some("Сгенерированное видео".to_string()),
            suggested_file_name: Some(file_name),
            inline_content: None,
        }
    }

    /// Creates a game attachment carrying an inline HTML document
    pub fn game(template: &games::GameTemplate) -> Self {
        Self {
            kind: AttachmentKind::Game,
            url: None,
            alt_text: Some(template.title.to_string()),
            suggested_file_name: Some(template.file_name()),
            inline_content: Some(template.source.to_string()),
        }
    }
}

/// Result of a dispatch: reply text plus an optional attachment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DispatchOutcome {
    /// Canned reply with the prompt interpolated
    pub reply: String,
    /// Placeholder attachment, when the category carries one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attachment: Option<Attachment>,
}

/// Response category resolved from the preset id
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Category {
    Image,
    Video,
    Game,
    Custom,
    Fallback,
}

/// Ordered category rules: substrings of the lowercased preset id,
/// evaluated top-to-bottom, first match wins
const CATEGORY_RULES: &[(&[&str], Category)] = &[
    (&["dall", "midjourney"], Category::Image),
    (&["sora"], Category::Video),
    (&["gemini"], Category::Game),
    (&["custom"], Category::Custom),
];

fn resolve_category(preset_id: &str) -> Category {
    let lowered = preset_id.to_lowercase();
    CATEGORY_RULES
        .iter()
        .find(|(needles, _)| needles.iter().any(|needle| lowered.contains(needle)))
        .map(|(_, category)| *category)
        .unwrap_or(Category::Fallback)
}

/// Dispatches a prompt against a preset
///
/// Pure lookup: the preset id selects the response category, the category
/// selects the reply template and the attachment pool. Total over its input
/// domain — there is no error path. Empty prompts are the caller's problem
/// (the session rejects them before dispatch).
///
/// # Arguments
///
/// * `preset_id` - Selected preset id (matched by substring)
/// * `prompt` - The user's prompt, interpolated into the reply verbatim
/// * `rng` - Random source for asset and fallback-template selection
///
/// # Examples
///
/// ```
/// use neurosim::dispatch::{dispatch, AttachmentKind};
/// use rand::{rngs::StdRng, SeedableRng};
///
/// let mut rng = StdRng::seed_from_u64(0);
/// let outcome = dispatch("dall-e-3", "кот в сапогах", &mut rng);
/// assert_eq!(outcome.attachment.unwrap().kind, AttachmentKind::Image);
/// ```
pub fn dispatch(preset_id: &str, prompt: &str, rng: &mut dyn RngCore) -> DispatchOutcome {
    match resolve_category(preset_id) {
        Category::Image => DispatchOutcome {
            reply: format!(
                "Вот изображение по запросу \"{}\". Вы можете сохранить его, нажав на кнопку загрузки.",
                prompt
            ),
            attachment: Some(Attachment::image(assets::random_image_url(rng))),
        },
        Category::Video => DispatchOutcome {
            reply: format!(
                "Видео по запросу \"{}\" готово. Вы можете просмотреть и сохранить его.",
                prompt
            ),
            attachment: Some(Attachment::video(assets::random_video_url(rng))),
        },
        Category::Game => DispatchOutcome {
            reply: format!(
                "Я создал код игры по вашему запросу \"{}\". Вы можете скопировать код и запустить его.",
                prompt
            ),
            attachment: Some(Attachment::game(games::select_template(prompt, rng))),
        },
        Category::Custom => DispatchOutcome {
            reply: format!(
                "Как ваша персонализированная нейросеть, я готов помочь с запросом \"{}\". Что бы вы хотели создать сегодня?",
                prompt
            ),
            attachment: None,
        },
        Category::Fallback => DispatchOutcome {
            reply: format!("Я обработал ваш запрос \"{}\". Чем еще могу помочь?", prompt),
            attachment: None,
        },
    }
}
