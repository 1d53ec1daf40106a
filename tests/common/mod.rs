/*!
 * Common test utilities for the chatrelay test suite
 */

use std::path::{Path, PathBuf};
use std::fs;
use std::sync::Arc;
use anyhow::Result;
use tempfile::TempDir;

use chatrelay::app_config::{Config, TranslationConfig, TranslationServiceKind};
use chatrelay::providers::mock::MockTranslator;
use chatrelay::providers::{Translator, TranslatorRegistry};
use chatrelay::translation::{MainThreadQueue, MainThreadReceiver, TranslationCoordinator};

/// Route library logs to the test output
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Translation settings with the feature on and every scope enabled
pub fn translation_config(keep_original: bool) -> TranslationConfig {
    TranslationConfig {
        enabled: true,
        language_name: "fr".to_string(),
        translate_tracked_quest: true,
        translate_npc: true,
        translate_info: true,
        translate_player_chat: true,
        keep_original,
        translation_service: TranslationServiceKind::GoogleApi,
        cache_translations: false,
        cache_max_entries: 16,
        request_timeout_secs: 5,
    }
}

/// A full config with translation on and default filter toggles
pub fn enabled_config(keep_original: bool) -> Config {
    Config {
        translation: translation_config(keep_original),
        ..Config::default()
    }
}

/// Registry serving `translator` for the Google selector
pub fn registry_with(translator: MockTranslator) -> TranslatorRegistry {
    let translator: Arc<dyn Translator> = Arc::new(translator);
    TranslatorRegistry::new().with(TranslationServiceKind::GoogleApi, translator)
}

/// Coordinator on the current runtime backed by a mock translator
pub fn coordinator_with(translator: MockTranslator) -> (TranslationCoordinator, MainThreadReceiver) {
    let (queue, receiver) = MainThreadQueue::new();
    let coordinator = TranslationCoordinator::new(
        registry_with(translator),
        Arc::new(queue),
        tokio::runtime::Handle::current(),
    );
    (coordinator, receiver)
}
