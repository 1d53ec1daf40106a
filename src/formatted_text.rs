/*!
 * Chat text carrying inline formatting codes.
 *
 * A formatting code is the `§` marker followed by one character from
 * [`CODE_ALPHABET`]. Translation services treat `§7` as ordinary text and
 * happily split, reorder or drop it, so before a line leaves the process
 * every code is wrapped in a `{§7}` token, and the tokens are turned back into
 * codes when the translated text comes home.
 */

use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

/// Marker character that starts a formatting code
pub const CODE_MARKER: char = '§';

/// Characters that may follow [`CODE_MARKER`]: colors `0-9a-f`, styles `k-o`, reset `r`
pub const CODE_ALPHABET: &str = "0123456789abcdefklmnor";

/// A single well-formed formatting code
static CODE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"§([0-9a-fklmnor])").expect("formatting code pattern is valid")
});

/// A protected token, tolerating whitespace a translator may have inserted
static TOKEN_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\{\s*§\s*([0-9a-fklmnor])\s*\}").expect("protected token pattern is valid")
});

/// Immutable chat text that may contain formatting codes
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct FormattedText {
    raw: String,
}

impl FormattedText {
    /// Wrap raw text, codes included
    pub fn new(raw: impl Into<String>) -> Self {
        Self { raw: raw.into() }
    }

    /// The raw text, codes included
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn into_string(self) -> String {
        self.raw
    }

    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Whether the text contains at least one formatting code
    pub fn has_codes(&self) -> bool {
        CODE_REGEX.is_match(&self.raw)
    }

    /// The code characters in order of appearance
    pub fn codes(&self) -> impl Iterator<Item = char> + '_ {
        CODE_REGEX
            .captures_iter(&self.raw)
            .filter_map(|cap| cap.get(1).and_then(|m| m.as_str().chars().next()))
    }

    /// Replace every formatting code with a `{§X}` token
    pub fn protect(&self) -> String {
        protect(&self.raw)
    }

    /// Rebuild formatted text from the output of a translation service
    pub fn restore(protected: &str) -> Self {
        Self::new(restore(protected))
    }

    /// The text with every formatting code removed
    pub fn strip_formatting(&self) -> String {
        CODE_REGEX.replace_all(&self.raw, "").into_owned()
    }
}

impl fmt::Display for FormattedText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl From<&str> for FormattedText {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<String> for FormattedText {
    fn from(raw: String) -> Self {
        Self::new(raw)
    }
}

/// Replace every formatting code in `text` with a `{§X}` token
pub fn protect(text: &str) -> String {
    CODE_REGEX.replace_all(text, "{§${1}}").into_owned()
}

/// Turn `{§X}` tokens (with optional inner whitespace) back into `§X` codes.
///
/// Tokens damaged beyond that are left in place as literal text.
pub fn restore(text: &str) -> String {
    TOKEN_REGEX.replace_all(text, "§${1}").into_owned()
}
