/*!
 * Translation caching.
 *
 * Chat repeats itself: the same server broadcast or NPC line shows up again
 * and again. Caching per line avoids sending it to the service every time.
 */

use async_trait::async_trait;
use log::debug;
use parking_lot::RwLock;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::errors::ProviderError;
use crate::providers::Translator;

/// Cache key combining the protected line and the target language
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    text: String,
    target_language: String,
}

impl CacheKey {
    fn new(text: &str, target_language: &str) -> Self {
        Self {
            text: text.to_string(),
            target_language: target_language.to_string(),
        }
    }
}

/// Number of lines kept when no limit is configured
pub const DEFAULT_MAX_ENTRIES: usize = 4096;

/// Entries plus their insertion order, oldest first
#[derive(Debug, Default)]
struct CacheEntries {
    map: HashMap<CacheKey, String>,
    order: VecDeque<CacheKey>,
}

/// In-memory store of translated lines.
///
/// Holds at most `max_entries` lines; once full, the oldest line is evicted.
#[derive(Debug)]
pub struct TranslationCache {
    entries: RwLock<CacheEntries>,
    max_entries: usize,
    hits: AtomicUsize,
    misses: AtomicUsize,
}

impl Default for TranslationCache {
    fn default() -> Self {
        Self::with_max_entries(DEFAULT_MAX_ENTRIES)
    }
}

impl TranslationCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// A cache bounded to `max_entries` lines. Zero disables storing.
    pub fn with_max_entries(max_entries: usize) -> Self {
        Self {
            entries: RwLock::new(CacheEntries::default()),
            max_entries,
            hits: AtomicUsize::new(0),
            misses: AtomicUsize::new(0),
        }
    }

    pub fn max_entries(&self) -> usize {
        self.max_entries
    }

    /// Get a translation from the cache
    pub fn get(&self, text: &str, target_language: &str) -> Option<String> {
        let key = CacheKey::new(text, target_language);
        let found = self.entries.read().map.get(&key).cloned();

        if found.is_some() {
            self.hits.fetch_add(1, Ordering::Relaxed);
            debug!("Cache hit for '{}' ({})", truncate_text(text, 30), target_language);
        } else {
            self.misses.fetch_add(1, Ordering::Relaxed);
        }
        found
    }

    /// Store a translation in the cache, evicting the oldest lines when full
    pub fn store(&self, text: &str, target_language: &str, translation: &str) {
        if self.max_entries == 0 {
            return;
        }

        let key = CacheKey::new(text, target_language);
        let mut entries = self.entries.write();

        if let Some(existing) = entries.map.get_mut(&key) {
            *existing = translation.to_string();
            return;
        }

        while entries.map.len() >= self.max_entries {
            let Some(oldest) = entries.order.pop_front() else {
                break;
            };
            entries.map.remove(&oldest);
        }

        entries.order.push_back(key.clone());
        entries.map.insert(key, translation.to_string());
    }

    /// (hits, misses, hit rate in percent)
    pub fn stats(&self) -> (usize, usize, f64) {
        let hits = self.hits.load(Ordering::Relaxed);
        let misses = self.misses.load(Ordering::Relaxed);
        let total = hits + misses;
        let rate = if total > 0 { hits as f64 / total as f64 * 100.0 } else { 0.0 };
        (hits, misses, rate)
    }

    pub fn len(&self) -> usize {
        self.entries.read().map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().map.is_empty()
    }

    pub fn clear(&self) {
        let mut entries = self.entries.write();
        entries.map.clear();
        entries.order.clear();
    }
}

/// Truncate text for log output
fn truncate_text(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let truncated: String = text.chars().take(max_chars).collect();
        format!("{}...", truncated)
    }
}

/// Wraps a translator, only sending lines it has not seen before
#[derive(Debug)]
pub struct CachingTranslator {
    inner: Arc<dyn Translator>,
    cache: Arc<TranslationCache>,
}

impl CachingTranslator {
    pub fn new(inner: Arc<dyn Translator>) -> Self {
        Self::with_cache(inner, Arc::new(TranslationCache::new()))
    }

    /// Wrap `inner` with a cache holding at most `max_entries` lines
    pub fn with_max_entries(inner: Arc<dyn Translator>, max_entries: usize) -> Self {
        Self::with_cache(inner, Arc::new(TranslationCache::with_max_entries(max_entries)))
    }

    pub fn with_cache(inner: Arc<dyn Translator>, cache: Arc<TranslationCache>) -> Self {
        Self { inner, cache }
    }

    pub fn cache(&self) -> &Arc<TranslationCache> {
        &self.cache
    }
}

#[async_trait]
impl Translator for CachingTranslator {
    fn name(&self) -> &str {
        self.inner.name()
    }

    async fn translate(&self, lines: &[String], target_language: &str) -> Result<Vec<String>, ProviderError> {
        let mut results: Vec<Option<String>> = lines
            .iter()
            .map(|line| self.cache.get(line, target_language))
            .collect();

        let missing: Vec<usize> = results
            .iter()
            .enumerate()
            .filter(|(_, cached)| cached.is_none())
            .map(|(idx, _)| idx)
            .collect();

        if !missing.is_empty() {
            let batch: Vec<String> = missing.iter().map(|&idx| lines[idx].clone()).collect();
            let translated = self.inner.translate(&batch, target_language).await?;

            if translated.len() != batch.len() {
                return Err(ProviderError::ParseError(format!(
                    "{} returned {} line(s) for {}",
                    self.inner.name(),
                    translated.len(),
                    batch.len()
                )));
            }

            for (idx, translation) in missing.into_iter().zip(translated) {
                self.cache.store(&lines[idx], target_language, &translation);
                results[idx] = Some(translation);
            }
        }

        Ok(results.into_iter().flatten().collect())
    }
}
