/*!
 * # chatrelay - chat filtering and translation for a game client
 *
 * A Rust library that decides which incoming game chat lines to hide and
 * translates the rest without destroying their inline formatting codes.
 *
 * ## Features
 *
 * - Regex rule tables per message origin (foreground chat vs. narration)
 * - Priority-ordered, independently toggled filter groups
 * - Protection of `§` formatting codes across an opaque translation service
 * - Async, fire-and-forget translation with results handed back to the
 *   host's main context
 * - Batched NPC dialogue translation and tracked quest translation
 * - Google Translate and offline pig latin services, with an in-memory cache
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `formatted_text`: Formatting code protection and restoration
 * - `filter`: Rule categories and the suppression engine
 * - `translation`: Requests, host events and the translation coordinator:
 *   - `translation::coordinator`: wrap → dispatch → unwrap → publish
 *   - `translation::events`: host events and the main-context hand-off
 *   - `translation::cache`: Caching of translated lines
 * - `providers`: Translation service implementations
 * - `pipeline`: Host-facing glue over one configuration snapshot
 * - `language_utils`: ISO language code utilities
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod errors;
pub mod filter;
pub mod formatted_text;
pub mod language_utils;
pub mod pipeline;
pub mod providers;
pub mod translation;

// Re-export main types for easier usage
pub use app_config::{Config, TranslationServiceKind};
pub use errors::{AppError, ConfigError, ProviderError};
pub use filter::{FilterEngine, MessageOrigin, RuleCategory};
pub use formatted_text::FormattedText;
pub use pipeline::{ChatPipeline, ChatVerdict};
pub use translation::{TranslationCoordinator, TranslationOutcome, TranslationRequest};
