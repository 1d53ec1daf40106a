/*!
 * Rule categories and the builtin suppression tables.
 */

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::ConfigError;

/// Channel a chat line arrived through
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageOrigin {
    /// Normal rendered chat
    Foreground,
    /// Narration/accessibility duplicate of a chat line
    Background,
}

/// A named suppression rule with up to one pattern per origin
#[derive(Debug, Clone)]
pub struct RuleCategory {
    name: String,
    foreground: Option<Regex>,
    background: Option<Regex>,
}

impl RuleCategory {
    /// Compile a category from pattern sources.
    ///
    /// Fails when both slots are absent or a pattern does not compile.
    pub fn new(
        name: impl Into<String>,
        foreground: Option<&str>,
        background: Option<&str>,
    ) -> Result<Self, ConfigError> {
        let name = name.into();
        let compile = |source: Option<&str>| -> Result<Option<Regex>, ConfigError> {
            source
                .map(|pattern| {
                    Regex::new(pattern).map_err(|source| ConfigError::InvalidPattern {
                        name: name.clone(),
                        source,
                    })
                })
                .transpose()
        };
        let foreground = compile(foreground)?;
        let background = compile(background)?;
        Self::from_regexes(name, foreground, background)
    }

    /// Build a category from already compiled patterns
    pub fn from_regexes(
        name: impl Into<String>,
        foreground: Option<Regex>,
        background: Option<Regex>,
    ) -> Result<Self, ConfigError> {
        let name = name.into();
        if foreground.is_none() && background.is_none() {
            return Err(ConfigError::EmptyCategory { name });
        }
        Ok(Self { name, foreground, background })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The pattern for exactly this origin.
    ///
    /// An absent slot means the category never matches lines of that origin;
    /// the other origin's pattern is not consulted.
    pub fn pattern_for(&self, origin: MessageOrigin) -> Option<&Regex> {
        match origin {
            MessageOrigin::Foreground => self.foreground.as_ref(),
            MessageOrigin::Background => self.background.as_ref(),
        }
    }

    /// Whether `text` from `origin` matches this category
    pub fn matches(&self, text: &str, origin: MessageOrigin) -> bool {
        self.pattern_for(origin)
            .is_some_and(|pattern| pattern.is_match(text))
    }
}

/// Independently toggled rule groups, in the order they are consulted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterGroupKind {
    Welcome,
    SystemInfo,
    LevelUp,
    PartyFinder,
}

impl FilterGroupKind {
    /// All groups in priority order
    pub const PRIORITY: [FilterGroupKind; 4] = [
        FilterGroupKind::Welcome,
        FilterGroupKind::SystemInfo,
        FilterGroupKind::LevelUp,
        FilterGroupKind::PartyFinder,
    ];

    /// Builtin `(name, foreground, background)` table for this group
    pub fn builtin_table(self) -> &'static [(&'static str, Option<&'static str>, Option<&'static str>)] {
        match self {
            FilterGroupKind::Welcome => &[
                ("resource_pack_loading", Some(r"^§7Loading Resource Pack\.\.\.$"), None),
                ("resource_pack_thanks", Some(r"^§6Thank you for using the WynnPack\. Enjoy the game!$"), None),
                (
                    "character_select",
                    Some(r"^§cSelect a character! Each character is saved individually across all servers, you can come back at any time with /class and select another character!$"),
                    None,
                ),
                ("welcome_banner", Some(r"^ +§6§lWelcome to Wynncraft!$"), None),
                ("server_address", Some(r"^ +§fplay\.wynncraft\.com §7-/-§f wynncraft\.com$"), None),
            ],
            FilterGroupKind::SystemInfo => &[(
                "info",
                Some(r"^(§r)?§.\[Info\] .*$"),
                Some(r"^(§r§8)?\[Info\] .*$"),
            )],
            FilterGroupKind::LevelUp => &[
                (
                    "level_up",
                    Some(r"^§6.* is now (?:combat )?level .*(?: in §.*)?$"),
                    Some(r"^(?:§r§8)?.* is now (?:combat )?level .*(?: in §.*)?$"),
                ),
                (
                    "level_up_broadcast",
                    Some(r"^§8\[§r§7!§r§8\] §r§7Congratulations to §r.* for reaching (combat )?§r§flevel .*!$"),
                    Some(r"^(§r§8)?\[!\] Congratulations to §r.* for reaching (combat )?§r§7level .*!$"),
                ),
            ],
            FilterGroupKind::PartyFinder => &[(
                "party_finder_invite",
                Some(r"^§5Party Finder:§r§d Hey [a-zA-Z0-9_]{2,16}, over here! Join the (?:[a-zA-Z'§ ]+) queue and match up with §r§e\d+ other players§r§d!$"),
                None,
            )],
        }
    }
}

impl fmt::Display for FilterGroupKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FilterGroupKind::Welcome => "welcome",
            FilterGroupKind::SystemInfo => "system_info",
            FilterGroupKind::LevelUp => "level_up",
            FilterGroupKind::PartyFinder => "party_finder",
        };
        f.write_str(name)
    }
}

/// An ordered set of categories toggled as one unit
#[derive(Debug, Clone)]
pub struct RuleGroup {
    kind: FilterGroupKind,
    categories: Vec<RuleCategory>,
}

impl RuleGroup {
    pub fn new(kind: FilterGroupKind, categories: Vec<RuleCategory>) -> Self {
        Self { kind, categories }
    }

    /// Compile the builtin table for `kind`
    pub fn builtin(kind: FilterGroupKind) -> Result<Self, ConfigError> {
        let categories = kind
            .builtin_table()
            .iter()
            .map(|(name, foreground, background)| RuleCategory::new(*name, *foreground, *background))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(kind, categories))
    }

    pub fn kind(&self) -> FilterGroupKind {
        self.kind
    }

    pub fn categories(&self) -> &[RuleCategory] {
        &self.categories
    }

    pub fn push(&mut self, category: RuleCategory) {
        self.categories.push(category);
    }

    /// First category in declaration order matching the line
    pub fn first_match(&self, text: &str, origin: MessageOrigin) -> Option<&RuleCategory> {
        self.categories.iter().find(|category| category.matches(text, origin))
    }
}
