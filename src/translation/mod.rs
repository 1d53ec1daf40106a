/*!
 * Translation of chat text with formatting codes kept intact.
 *
 * It is split into several submodules:
 *
 * - `request`: Requests, scopes and outcomes, plus dispatch to a service
 * - `events`: Host events, host effects and the main-context hand-off
 * - `coordinator`: The wrap → dispatch → unwrap → publish state machine
 * - `cache`: Caching mechanisms for translations
 */

// Re-export main types for easier usage
pub use self::cache::{CachingTranslator, TranslationCache};
pub use self::coordinator::{Dispatch, TranslationCoordinator};
pub use self::events::{
    ChatLineEvent, DialogueEvent, DialogueKind, HostEffect, MainContext, MainThreadQueue,
    MainThreadReceiver, RecipientType, TrackedQuestEvent,
};
pub use self::request::{TranslationOutcome, TranslationRequest, TranslationScope};

// Submodules
pub mod cache;
pub mod coordinator;
pub mod events;
pub mod request;
