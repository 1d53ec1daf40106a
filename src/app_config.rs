use anyhow::{anyhow, Context, Result};
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::filter::{FilterEngine, FilterGroupKind};
use crate::translation::TranslationScope;

/// Application configuration module
/// This module handles the configuration consumed by the chat pipeline:
/// translation scopes and policy, filter toggles and custom rule tables.
/// Values are read-only from the pipeline's point of view; a running
/// pipeline works on an immutable snapshot of a validated `Config`.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Config {
    /// Translation settings
    #[serde(default)]
    pub translation: TranslationConfig,

    /// Message filter settings
    #[serde(default)]
    pub filter: FilterConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Translation service selector
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum TranslationServiceKind {
    // @service: Public Google Translate web endpoint
    #[default]
    GoogleApi,
    // @service: Offline pig latin, handy for testing
    PigLatin,
}

impl TranslationServiceKind {
    // @returns: Human readable service name
    pub fn display_name(&self) -> &str {
        match self {
            Self::GoogleApi => "Google API",
            Self::PigLatin => "Pig Latin",
        }
    }

    // @returns: Config identifier
    pub fn to_lowercase_string(&self) -> String {
        match self {
            Self::GoogleApi => "google_api".to_string(),
            Self::PigLatin => "pig_latin".to_string(),
        }
    }
}

impl std::fmt::Display for TranslationServiceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_lowercase_string())
    }
}

impl std::str::FromStr for TranslationServiceKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "google_api" | "googleapi" | "google" => Ok(Self::GoogleApi),
            "pig_latin" | "piglatin" => Ok(Self::PigLatin),
            _ => Err(anyhow!("Invalid translation service: {}", s)),
        }
    }
}

/// Translation feature configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TranslationConfig {
    /// Whether the translation feature is switched on at all
    #[serde(default)]
    pub enabled: bool,

    /// Target language, as an ISO 639 code or English name
    #[serde(default = "default_language_name")]
    pub language_name: String,

    /// Translate the tracked quest description
    #[serde(default = "default_true")]
    pub translate_tracked_quest: bool,

    /// Translate NPC dialogue
    #[serde(default = "default_true")]
    pub translate_npc: bool,

    /// Translate server info lines
    #[serde(default = "default_true")]
    pub translate_info: bool,

    /// Translate chat written by players
    #[serde(default)]
    pub translate_player_chat: bool,

    /// Keep showing the original next to the translation.
    /// When off, the original is hidden and only the translation is shown.
    #[serde(default = "default_true")]
    pub keep_original: bool,

    /// Service used for translation
    #[serde(default)]
    pub translation_service: TranslationServiceKind,

    /// Cache translations in memory
    #[serde(default = "default_true")]
    pub cache_translations: bool,

    /// Most lines kept in the translation cache before the oldest are evicted
    #[serde(default = "default_cache_max_entries")]
    pub cache_max_entries: usize,

    /// Request timeout in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            language_name: default_language_name(),
            translate_tracked_quest: true,
            translate_npc: true,
            translate_info: true,
            translate_player_chat: false,
            keep_original: true,
            translation_service: TranslationServiceKind::default(),
            cache_translations: true,
            cache_max_entries: default_cache_max_entries(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl TranslationConfig {
    /// Whether lines of this scope should be translated
    pub fn scope_enabled(&self, scope: TranslationScope) -> bool {
        if !self.enabled {
            return false;
        }
        match scope {
            TranslationScope::TrackedQuest => self.translate_tracked_quest,
            TranslationScope::NpcDialogue => self.translate_npc,
            TranslationScope::Info => self.translate_info,
            TranslationScope::PlayerChat => self.translate_player_chat,
        }
    }
}

/// A user supplied rule category appended to one of the builtin groups
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CustomRuleConfig {
    /// Group the category belongs to
    pub group: FilterGroupKind,

    /// Category name, used in logs and errors
    pub name: String,

    /// Pattern for foreground lines
    #[serde(default)]
    pub foreground: Option<String>,

    /// Pattern for background lines
    #[serde(default)]
    pub background: Option<String>,
}

/// Message filter configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct FilterConfig {
    /// Hide the join/welcome banner
    #[serde(default)]
    pub hide_welcome: bool,

    /// Hide `[Info]` system lines
    #[serde(default = "default_true")]
    pub hide_system_info: bool,

    /// Hide level-up announcements
    #[serde(default)]
    pub hide_level_up: bool,

    /// Hide party finder adverts
    #[serde(default)]
    pub hide_party_finder: bool,

    /// Extra categories appended to the builtin groups
    #[serde(default)]
    pub custom_rules: Vec<CustomRuleConfig>,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            hide_welcome: false,
            hide_system_info: true,
            hide_level_up: false,
            hide_party_finder: false,
            custom_rules: Vec::new(),
        }
    }
}

impl FilterConfig {
    /// Toggle for a group
    pub fn is_enabled(&self, kind: FilterGroupKind) -> bool {
        match kind {
            FilterGroupKind::Welcome => self.hide_welcome,
            FilterGroupKind::SystemInfo => self.hide_system_info,
            FilterGroupKind::LevelUp => self.hide_level_up,
            FilterGroupKind::PartyFinder => self.hide_party_finder,
        }
    }

    /// Everything switched off
    pub fn disabled() -> Self {
        Self {
            hide_system_info: false,
            ..Self::default()
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_level_filter(self) -> LevelFilter {
        match self {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_language_name() -> String {
    "en".to_string()
}

fn default_cache_max_entries() -> usize {
    crate::translation::cache::DEFAULT_MAX_ENTRIES
}

fn default_request_timeout_secs() -> u64 {
    10
}

impl Config {
    /// Load a configuration file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("Failed to open config file: {}", path.display()))?;
        let reader = BufReader::new(file);
        let config: Config = serde_json::from_reader(reader)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        Ok(config)
    }

    /// Write the configuration as pretty JSON
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)
            .context("Failed to serialize config to JSON")?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;
        Ok(())
    }

    /// Validate the configuration for consistency and required values.
    ///
    /// Returns the filter engine compiled along the way, so callers need not
    /// compile the rule tables a second time.
    pub fn validate(&self) -> Result<FilterEngine> {
        // Validate the target language
        crate::language_utils::resolve_language_code(&self.translation.language_name)?;

        if self.translation.request_timeout_secs == 0 {
            return Err(anyhow!("Request timeout must be greater than zero"));
        }

        // Compiling the filter rejects empty categories and broken patterns
        Ok(FilterEngine::from_config(&self.filter)?)
    }
}
