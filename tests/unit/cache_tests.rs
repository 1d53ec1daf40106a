/*!
 * Tests for translation caching
 */

use anyhow::Result;
use std::sync::Arc;

use chatrelay::providers::mock::MockTranslator;
use chatrelay::providers::Translator;
use chatrelay::translation::{CachingTranslator, TranslationCache};

fn lines(texts: &[&str]) -> Vec<String> {
    texts.iter().map(|t| t.to_string()).collect()
}

#[test]
fn test_cache_storeAndGet_shouldTrackStats() {
    let cache = TranslationCache::new();
    assert!(cache.get("Hello", "fr").is_none());

    cache.store("Hello", "fr", "Bonjour");
    assert_eq!(cache.get("Hello", "fr").as_deref(), Some("Bonjour"));
    assert!(cache.get("Hello", "de").is_none());

    let (hits, misses, rate) = cache.stats();
    assert_eq!(hits, 1);
    assert_eq!(misses, 2);
    assert!((rate - 33.33).abs() < 0.1);
    assert_eq!(cache.len(), 1);

    cache.clear();
    assert!(cache.is_empty());
}

#[tokio::test]
async fn test_cachingTranslator_shouldOnlySendMisses() -> Result<()> {
    let mock = MockTranslator::working();
    let translator = CachingTranslator::new(Arc::new(mock.clone()));

    let first = translator.translate(&lines(&["a", "b"]), "fr").await?;
    assert_eq!(first, lines(&["[fr] a", "[fr] b"]));

    let second = translator.translate(&lines(&["b", "c", "a"]), "fr").await?;
    assert_eq!(second, lines(&["[fr] b", "[fr] c", "[fr] a"]));

    assert_eq!(mock.call_count(), 2);
    assert_eq!(mock.last_request(), Some(lines(&["c"])));
    Ok(())
}

#[tokio::test]
async fn test_cachingTranslator_withAllCached_shouldNotCallService() -> Result<()> {
    let mock = MockTranslator::working();
    let cache = Arc::new(TranslationCache::new());
    cache.store("x", "de", "[de] x");
    let translator = CachingTranslator::with_cache(Arc::new(mock.clone()), cache.clone());

    let result = translator.translate(&lines(&["x"]), "de").await?;
    assert_eq!(result, lines(&["[de] x"]));
    assert_eq!(mock.call_count(), 0);
    Ok(())
}

#[tokio::test]
async fn test_cachingTranslator_withFailure_shouldNotCache() {
    let translator = CachingTranslator::new(Arc::new(MockTranslator::failing()));
    assert!(translator.translate(&lines(&["a"]), "fr").await.is_err());
    assert!(translator.cache().is_empty());

    let short = CachingTranslator::new(Arc::new(MockTranslator::wrong_length()));
    assert!(short.translate(&lines(&["a", "b"]), "fr").await.is_err());
    assert!(short.cache().is_empty());
}

#[test]
fn test_cache_withMaxEntries_shouldEvictOldestFirst() {
    let cache = TranslationCache::with_max_entries(2);
    cache.store("a", "fr", "[fr] a");
    cache.store("b", "fr", "[fr] b");
    cache.store("a", "fr", "[fr] a2");
    cache.store("c", "fr", "[fr] c");

    assert_eq!(cache.len(), 2);
    assert!(cache.get("a", "fr").is_none());
    assert_eq!(cache.get("b", "fr").as_deref(), Some("[fr] b"));
    assert_eq!(cache.get("c", "fr").as_deref(), Some("[fr] c"));
}

#[test]
fn test_cache_withZeroMaxEntries_shouldStoreNothing() {
    let cache = TranslationCache::with_max_entries(0);
    cache.store("a", "fr", "[fr] a");
    assert!(cache.is_empty());
}

#[tokio::test]
async fn test_cachingTranslator_withManyUniqueLines_shouldStayBounded() -> Result<()> {
    let translator = CachingTranslator::with_max_entries(Arc::new(MockTranslator::identity()), 100);

    for chunk in 0..50 {
        let batch: Vec<String> = (0..100).map(|i| format!("line {}-{}", chunk, i)).collect();
        let result = translator.translate(&batch, "fr").await?;
        assert_eq!(result, batch);
        assert!(translator.cache().len() <= 100);
    }

    assert_eq!(translator.cache().len(), 100);
    assert_eq!(translator.cache().max_entries(), 100);
    // Oversized batches are still returned whole
    let big: Vec<String> = (0..250).map(|i| format!("big {}", i)).collect();
    assert_eq!(translator.translate(&big, "fr").await?, big);
    assert_eq!(translator.cache().len(), 100);
    Ok(())
}
