/*!
 * Translation services the chat pipeline can dispatch to.
 *
 * This module contains the `Translator` capability and its implementations:
 * - `google`: public Google Translate web endpoint
 * - `pig_latin`: offline pig latin, useful for checking the pipeline end to end
 * - `mock`: configurable mock for tests
 */

use async_trait::async_trait;
use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::Arc;
use std::time::Duration;

use crate::app_config::TranslationServiceKind;
use crate::errors::ProviderError;
use crate::translation::cache::CachingTranslator;

/// Common trait for all translation services
///
/// A call translates an ordered batch of lines. On success the result has
/// the same length and order as the input.
#[async_trait]
pub trait Translator: Send + Sync + Debug {
    /// Name used in logs
    fn name(&self) -> &str;

    /// Translate `lines` into `target_language`
    ///
    /// # Arguments
    /// * `lines` - The lines to translate, in display order
    /// * `target_language` - Target language as configured by the user
    ///
    /// # Returns
    /// * `Result<Vec<String>, ProviderError>` - One translated line per input line, or an error
    async fn translate(&self, lines: &[String], target_language: &str) -> Result<Vec<String>, ProviderError>;
}

/// Translation services by selector
#[derive(Debug, Clone, Default)]
pub struct TranslatorRegistry {
    translators: HashMap<TranslationServiceKind, Arc<dyn Translator>>,
}

impl TranslatorRegistry {
    /// An empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every builtin service.
    ///
    /// With `cache_max_entries` set, Google results are cached up to that many lines.
    pub fn with_defaults(cache_max_entries: Option<usize>, timeout: Duration) -> Self {
        let google: Arc<dyn Translator> = Arc::new(google::GoogleTranslator::new(timeout));
        let google = if let Some(max_entries) = cache_max_entries {
            Arc::new(CachingTranslator::with_max_entries(google, max_entries)) as Arc<dyn Translator>
        } else {
            google
        };

        Self::new()
            .with(TranslationServiceKind::GoogleApi, google)
            .with(TranslationServiceKind::PigLatin, Arc::new(pig_latin::PigLatinTranslator))
    }

    /// Register or replace the translator for `kind`
    pub fn with(mut self, kind: TranslationServiceKind, translator: Arc<dyn Translator>) -> Self {
        self.translators.insert(kind, translator);
        self
    }

    pub fn get(&self, kind: TranslationServiceKind) -> Option<Arc<dyn Translator>> {
        self.translators.get(&kind).cloned()
    }
}

pub mod google;
pub mod mock;
pub mod pig_latin;
