/*!
 * Rule-based suppression of chat lines.
 *
 * - `rules`: message origins, rule categories and the builtin tables
 * - `engine`: the compiled engine and group evaluation
 */

pub use self::engine::{evaluate_groups, FilterEngine};
pub use self::rules::{FilterGroupKind, MessageOrigin, RuleCategory, RuleGroup};

pub mod engine;
pub mod rules;
