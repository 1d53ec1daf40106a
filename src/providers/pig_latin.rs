use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::errors::ProviderError;

use super::Translator;

/// Protected tokens, bare codes, or words. Only words are rewritten.
static WORD_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\{\s*§\s*[0-9a-fklmnor]\s*\}|§[0-9a-fklmnor]|[A-Za-z]+").unwrap()
});

/// Offline translator that turns English into pig latin.
///
/// Ignores the target language. Never fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct PigLatinTranslator;

impl PigLatinTranslator {
    /// Translate one line, leaving formatting codes and tokens alone
    pub fn translate_line(line: &str) -> String {
        WORD_REGEX
            .replace_all(line, |caps: &Captures| {
                let matched = &caps[0];
                if matched.starts_with('{') || matched.starts_with('§') {
                    matched.to_string()
                } else {
                    pig_latin_word(matched)
                }
            })
            .into_owned()
    }
}

fn is_vowel(c: char) -> bool {
    matches!(c.to_ascii_lowercase(), 'a' | 'e' | 'i' | 'o' | 'u')
}

fn pig_latin_word(word: &str) -> String {
    let capitalized = word.chars().next().is_some_and(|c| c.is_ascii_uppercase());
    let lower = word.to_ascii_lowercase();

    let rewritten = match lower.find(is_vowel) {
        Some(0) => format!("{}way", lower),
        Some(split) => format!("{}{}ay", &lower[split..], &lower[..split]),
        None => format!("{}ay", lower),
    };

    if capitalized {
        let mut chars = rewritten.chars();
        match chars.next() {
            Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
            None => rewritten,
        }
    } else {
        rewritten
    }
}

#[async_trait]
impl Translator for PigLatinTranslator {
    fn name(&self) -> &str {
        "pig_latin"
    }

    async fn translate(&self, lines: &[String], _target_language: &str) -> Result<Vec<String>, ProviderError> {
        Ok(lines.iter().map(|line| Self::translate_line(line)).collect())
    }
}
