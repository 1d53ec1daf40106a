/*!
 * Translation requests and their outcomes.
 */

use log::{debug, warn};
use std::fmt;

use crate::errors::ProviderError;
use crate::providers::Translator;

/// Which kind of game text a request came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TranslationScope {
    TrackedQuest,
    NpcDialogue,
    Info,
    PlayerChat,
}

impl fmt::Display for TranslationScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TranslationScope::TrackedQuest => "tracked quest",
            TranslationScope::NpcDialogue => "npc dialogue",
            TranslationScope::Info => "info",
            TranslationScope::PlayerChat => "player chat",
        };
        f.write_str(name)
    }
}

/// One batch of protected lines bound for a translation service
#[derive(Debug, Clone, PartialEq)]
pub struct TranslationRequest {
    /// Lines with formatting codes already protected, in display order
    pub lines: Vec<String>,
    /// Target language as configured
    pub target_language: String,
    /// Origin of the lines
    pub scope: TranslationScope,
}

impl TranslationRequest {
    pub fn new(lines: Vec<String>, target_language: impl Into<String>, scope: TranslationScope) -> Self {
        Self {
            lines,
            target_language: target_language.into(),
            scope,
        }
    }
}

/// Result of a request. Failure is data, never an error.
#[derive(Debug, Clone, PartialEq)]
pub enum TranslationOutcome {
    /// One translated line per requested line, same order
    Translated(Vec<String>),
    /// Nothing usable came back
    Failed,
}

impl TranslationOutcome {
    /// Collapse a service response into an outcome.
    ///
    /// Errors, empty lists and lists of the wrong length all become `Failed`.
    pub fn from_response(expected_len: usize, response: Result<Vec<String>, ProviderError>) -> Self {
        match response {
            Ok(lines) if !lines.is_empty() && lines.len() == expected_len => Self::Translated(lines),
            Ok(lines) => {
                if !lines.is_empty() {
                    warn!("Translation returned {} line(s), expected {}", lines.len(), expected_len);
                }
                Self::Failed
            }
            Err(e) => {
                warn!("Translation failed: {}", e);
                Self::Failed
            }
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed)
    }

    /// Translated lines, empty on failure
    pub fn into_lines(self) -> Vec<String> {
        match self {
            Self::Translated(lines) => lines,
            Self::Failed => Vec::new(),
        }
    }
}

/// Send a request to a translation service and wait for its outcome
pub async fn dispatch(translator: &dyn Translator, request: TranslationRequest) -> TranslationOutcome {
    if request.lines.is_empty() {
        return TranslationOutcome::Failed;
    }

    debug!(
        "Dispatching {} {} line(s) to {} ({})",
        request.lines.len(),
        request.scope,
        translator.name(),
        request.target_language
    );

    let response = translator.translate(&request.lines, &request.target_language).await;
    TranslationOutcome::from_response(request.lines.len(), response)
}
