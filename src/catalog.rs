//! Preset catalog for Neurosim
//!
//! The catalog holds the fixed built-in model presets plus any presets the
//! user registers during the process lifetime. It is an owned value handed
//! to whoever needs it (session, command handlers) rather than a process
//! global, so tests can run with independent catalogs.

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Default description substituted when a created preset has none
pub const DEFAULT_CUSTOM_DESCRIPTION: &str = "Пользовательская нейросеть";

/// Category of content a preset simulates
///
/// Drives the glyph shown next to the preset in terminal output and mirrors
/// the kind of attachment its responses carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PresetCategory {
    /// Image generation presets
    Image,
    /// Video generation presets
    Video,
    /// Game/code generation presets
    Code,
    /// User-created presets
    Custom,
}

impl PresetCategory {
    /// Glyph used when rendering the preset in the terminal
    pub fn glyph(&self) -> &'static str {
        match self {
            Self::Image => "🖼",
            Self::Video => "🎬",
            Self::Code => "🎮",
            Self::Custom => "🧠",
        }
    }
}

impl std::fmt::Display for PresetCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Image => write!(f, "image"),
            Self::Video => write!(f, "video"),
            Self::Code => write!(f, "code"),
            Self::Custom => write!(f, "custom"),
        }
    }
}

/// A selectable simulated generative model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Preset {
    /// Unique, stable identity
    pub id: String,
    /// Display name
    pub name: String,
    /// Short description shown in listings and the empty-chat banner
    pub description: String,
    /// Content category
    pub category: PresetCategory,
    /// Whether this preset is one of the fixed built-ins
    pub builtin: bool,
}

/// Catalog of built-in and user-created presets
///
/// Built-ins are fixed at construction; user-created presets are appended
/// for the process lifetime. There is no deletion or editing — the catalog
/// only grows.
#[derive(Debug, Clone)]
pub struct PresetCatalog {
    builtins: Vec<Preset>,
    custom: Vec<Preset>,
}

impl PresetCatalog {
    /// Creates a catalog seeded with the four built-in presets
    ///
    /// # Examples
    ///
    /// ```
    /// use neurosim::catalog::PresetCatalog;
    ///
    /// let catalog = PresetCatalog::new();
    /// assert_eq!(catalog.list().count(), 4);
    /// ```
    pub fn new() -> Self {
        let builtins = vec![
            Preset {
                id: "dall-e-3".to_string(),
                name: "DALL-E 3".to_string(),
                description: "Генерация изображений высокого качества".to_string(),
                category: PresetCategory::Image,
                builtin: true,
            },
            Preset {
                id: "midjourney".to_string(),
                name: "Midjourney".to_string(),
                description: "Художественные изображения в разных стилях".to_string(),
                category: PresetCategory::Image,
                builtin: true,
            },
            Preset {
                id: "sora".to_string(),
                name: "Sora".to_string(),
                description: "Генерация реалистичных видеороликов".to_string(),
                category: PresetCategory::Video,
                builtin: true,
            },
            Preset {
                id: "gemini".to_string(),
                name: "Gemini".to_string(),
                description: "Создание игр и написание кода".to_string(),
                category: PresetCategory::Code,
                builtin: true,
            },
        ];

        Self {
            builtins,
            custom: Vec::new(),
        }
    }

    /// Iterates over all presets: built-ins first, then custom presets in
    /// creation order
    pub fn list(&self) -> impl Iterator<Item = &Preset> {
        self.builtins.iter().chain(self.custom.iter())
    }

    /// Resolves a preset id to a preset
    ///
    /// Falls back to the first built-in preset when the id does not match
    /// anything. Never fails.
    ///
    /// # Examples
    ///
    /// ```
    /// use neurosim::catalog::PresetCatalog;
    ///
    /// let catalog = PresetCatalog::new();
    /// assert_eq!(catalog.resolve("sora").id, "sora");
    /// assert_eq!(catalog.resolve("nope").id, "dall-e-3");
    /// ```
    pub fn resolve(&self, selected_id: &str) -> &Preset {
        self.list()
            .find(|preset| preset.id == selected_id)
            .unwrap_or(&self.builtins[0])
    }

    /// Returns true if the given id matches a preset in the catalog
    pub fn contains(&self, id: &str) -> bool {
        self.list().any(|preset| preset.id == id)
    }

    /// Creates a user preset and appends it to the catalog
    ///
    /// The id is derived from the creation timestamp (`custom-<millis>`),
    /// bumped until unique. An empty or whitespace-only description is
    /// replaced with [`DEFAULT_CUSTOM_DESCRIPTION`]. Making the new preset
    /// the selected one is the caller's responsibility.
    ///
    /// # Arguments
    ///
    /// * `name` - Display name for the preset
    /// * `description` - Description; may be empty
    ///
    /// # Examples
    ///
    /// ```
    /// use neurosim::catalog::{PresetCatalog, DEFAULT_CUSTOM_DESCRIPTION};
    ///
    /// let mut catalog = PresetCatalog::new();
    /// let preset = catalog.create("Помощник", "");
    /// assert!(preset.id.starts_with("custom-"));
    /// assert_eq!(preset.description, DEFAULT_CUSTOM_DESCRIPTION);
    /// ```
    pub fn create(&mut self, name: impl Into<String>, description: impl Into<String>) -> Preset {
        let description = description.into();
        let description = if description.trim().is_empty() {
            DEFAULT_CUSTOM_DESCRIPTION.to_string()
        } else {
            description
        };

        let mut millis = Utc::now().timestamp_millis();
        while self.contains(&format!("custom-{}", millis)) {
            millis += 1;
        }

        let preset = Preset {
            id: format!("custom-{}", millis),
            name: name.into(),
            description,
            category: PresetCategory::Custom,
            builtin: false,
        };

        self.custom.push(preset.clone());
        preset
    }

    /// Number of presets in the catalog
    pub fn len(&self) -> usize {
        self.builtins.len() + self.custom.len()
    }

    /// Always false: the built-ins are fixed at construction
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for PresetCatalog {
    fn default() -> Self {
        Self::new()
    }
}
