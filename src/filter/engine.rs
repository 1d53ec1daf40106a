/*!
 * Suppression decisions for incoming chat lines.
 */

use log::debug;

use crate::app_config::FilterConfig;
use crate::errors::ConfigError;
use crate::formatted_text::FormattedText;

use super::rules::{FilterGroupKind, MessageOrigin, RuleCategory, RuleGroup};

/// Compiled, validated rule tables together with their toggles
#[derive(Debug, Clone)]
pub struct FilterEngine {
    /// Groups in priority order, paired with their enabled flag
    groups: Vec<(RuleGroup, bool)>,
}

impl FilterEngine {
    /// Builtin tables with the default toggles
    pub fn builtin() -> Result<Self, ConfigError> {
        Self::from_config(&FilterConfig::default())
    }

    /// Compile every group once, appending configured custom categories.
    ///
    /// Any invalid category rejects the whole configuration.
    pub fn from_config(config: &FilterConfig) -> Result<Self, ConfigError> {
        let mut groups = Vec::with_capacity(FilterGroupKind::PRIORITY.len());

        for kind in FilterGroupKind::PRIORITY {
            let mut group = RuleGroup::builtin(kind)?;
            for rule in config.custom_rules.iter().filter(|rule| rule.group == kind) {
                group.push(RuleCategory::new(
                    rule.name.clone(),
                    rule.foreground.as_deref(),
                    rule.background.as_deref(),
                )?);
            }
            groups.push((group, config.is_enabled(kind)));
        }

        Ok(Self { groups })
    }

    /// Whether the group of this kind is switched on
    pub fn is_enabled(&self, kind: FilterGroupKind) -> bool {
        self.groups
            .iter()
            .any(|(group, enabled)| group.kind() == kind && *enabled)
    }

    pub fn groups(&self) -> impl Iterator<Item = &RuleGroup> {
        self.groups.iter().map(|(group, _)| group)
    }

    /// Decide whether a line should be hidden
    pub fn should_suppress(&self, text: &FormattedText, origin: MessageOrigin) -> bool {
        let toggled: Vec<(&RuleGroup, bool)> = self
            .groups
            .iter()
            .map(|(group, enabled)| (group, *enabled))
            .collect();
        evaluate_groups(text, origin, &toggled)
    }
}

/// Test a line against the first enabled group only.
///
/// Later groups are never consulted, even when enabled. Within the group the
/// first matching category (declaration order) suppresses the line.
pub fn evaluate_groups(text: &FormattedText, origin: MessageOrigin, groups: &[(&RuleGroup, bool)]) -> bool {
    let Some((group, _)) = groups.iter().find(|(_, enabled)| *enabled) else {
        return false;
    };

    match group.first_match(text.as_str(), origin) {
        Some(category) => {
            debug!("Suppressing {:?} line via {}/{}", origin, group.kind(), category.name());
            true
        }
        None => false,
    }
}
