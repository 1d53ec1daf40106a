/*!
 * Mock translator for testing.
 *
 * This module provides a mock translator that simulates different behaviors:
 * - `MockTranslator::working()` - Always succeeds, prefixing every line
 * - `MockTranslator::failing()` - Always fails with an error
 * - `MockTranslator::empty()` - Succeeds with an empty list
 * - `MockTranslator::spacing_tokens()` - Inserts spaces inside protected tokens
 */

use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::errors::ProviderError;

use super::Translator;

/// Behavior mode for the mock translator
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MockBehavior {
    /// Prefix every line with `[<lang>] `
    Working,
    /// Return every line unchanged
    Identity,
    /// Always fail with an error
    Failing,
    /// Succeed with an empty result
    Empty,
    /// Succeed but drop the last line
    WrongLength,
    /// Rewrite `{§X}` tokens as `{ § X }`, the way real services mangle them
    SpacingTokens,
    /// Working, after a delay
    Slow { delay_ms: u64 },
}

/// Mock translator for testing the pipeline
#[derive(Debug)]
pub struct MockTranslator {
    /// Behavior mode
    behavior: MockBehavior,
    /// Number of translate calls
    call_count: Arc<AtomicUsize>,
    /// Lines received by the latest call
    last_request: Arc<Mutex<Option<Vec<String>>>>,
}

impl MockTranslator {
    /// Create a new mock translator with the specified behavior
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            call_count: Arc::new(AtomicUsize::new(0)),
            last_request: Arc::new(Mutex::new(None)),
        }
    }

    pub fn working() -> Self {
        Self::new(MockBehavior::Working)
    }

    pub fn identity() -> Self {
        Self::new(MockBehavior::Identity)
    }

    pub fn failing() -> Self {
        Self::new(MockBehavior::Failing)
    }

    pub fn empty() -> Self {
        Self::new(MockBehavior::Empty)
    }

    pub fn wrong_length() -> Self {
        Self::new(MockBehavior::WrongLength)
    }

    pub fn spacing_tokens() -> Self {
        Self::new(MockBehavior::SpacingTokens)
    }

    pub fn slow(delay_ms: u64) -> Self {
        Self::new(MockBehavior::Slow { delay_ms })
    }

    /// Number of translate calls so far
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    /// Lines passed to the most recent call
    pub fn last_request(&self) -> Option<Vec<String>> {
        self.last_request.lock().clone()
    }

    fn prefixed(lines: &[String], target_language: &str) -> Vec<String> {
        lines
            .iter()
            .map(|line| format!("[{}] {}", target_language, line))
            .collect()
    }
}

impl Clone for MockTranslator {
    fn clone(&self) -> Self {
        Self {
            behavior: self.behavior,
            call_count: Arc::clone(&self.call_count),
            last_request: Arc::clone(&self.last_request),
        }
    }
}

#[async_trait]
impl Translator for MockTranslator {
    fn name(&self) -> &str {
        "mock"
    }

    async fn translate(&self, lines: &[String], target_language: &str) -> Result<Vec<String>, ProviderError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        *self.last_request.lock() = Some(lines.to_vec());

        match self.behavior {
            MockBehavior::Working => Ok(Self::prefixed(lines, target_language)),

            MockBehavior::Identity => Ok(lines.to_vec()),

            MockBehavior::Failing => Err(ProviderError::ApiError {
                status_code: 500,
                message: "Simulated translator failure".to_string(),
            }),

            MockBehavior::Empty => Ok(Vec::new()),

            MockBehavior::WrongLength => {
                let mut translated = Self::prefixed(lines, target_language);
                translated.pop();
                Ok(translated)
            }

            MockBehavior::SpacingTokens => Ok(lines
                .iter()
                .map(|line| line.replace("{§", "{ § ").replace('}', " }"))
                .collect()),

            MockBehavior::Slow { delay_ms } => {
                tokio::time::sleep(tokio::time::Duration::from_millis(delay_ms)).await;
                Ok(Self::prefixed(lines, target_language))
            }
        }
    }
}
