/*!
 * Wrap, dispatch, unwrap and publish.
 *
 * Every eligible chat line, dialogue or tracked quest becomes one
 * `TranslationRequest`. The request runs as a detached task on the tokio
 * runtime; when it completes the restored text is handed to the host's
 * main context. The coordinator never waits for a translation and never
 * touches host state except through [`MainContext`].
 */

use log::{debug, warn};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

use crate::app_config::TranslationConfig;
use crate::formatted_text::FormattedText;
use crate::providers::{Translator, TranslatorRegistry};

use super::events::{ChatLineEvent, DialogueEvent, HostEffect, MainContext, TrackedQuestEvent};
use super::request::{dispatch, TranslationOutcome, TranslationRequest, TranslationScope};

/// What the host should do with the inbound event right now
#[derive(Debug)]
pub struct Dispatch {
    /// Cancel the normal display of the inbound event
    pub cancel_original: bool,
    task: Option<JoinHandle<()>>,
}

impl Dispatch {
    /// The event was not eligible; leave it alone
    pub fn skipped() -> Self {
        Self {
            cancel_original: false,
            task: None,
        }
    }

    fn immediate(cancel_original: bool) -> Self {
        Self {
            cancel_original,
            task: None,
        }
    }

    fn spawned(cancel_original: bool, task: JoinHandle<()>) -> Self {
        Self {
            cancel_original,
            task: Some(task),
        }
    }

    /// Whether a translation is in flight for this event
    pub fn is_pending(&self) -> bool {
        self.task.is_some()
    }

    /// Wait until the translation has been published (or dropped).
    ///
    /// Hosts normally just drop the `Dispatch`; the task keeps running.
    pub async fn completion(self) {
        if let Some(task) = self.task {
            if let Err(e) = task.await {
                warn!("Translation task ended abnormally: {}", e);
            }
        }
    }
}

/// Schedules effects on the main context while the feature is live
#[derive(Clone)]
struct Publisher {
    main_context: Arc<dyn MainContext>,
    live: Arc<AtomicBool>,
}

impl Publisher {
    fn publish(&self, effect: HostEffect) {
        if !self.live.load(Ordering::SeqCst) {
            debug!("Translation feature disabled, dropping late result");
            return;
        }
        self.main_context.run_on_main(effect);
    }
}

/// Turns eligible game text into translation requests and publishes the results
pub struct TranslationCoordinator {
    registry: TranslatorRegistry,
    publisher: Publisher,
    runtime: Handle,
}

impl TranslationCoordinator {
    /// Create a coordinator that spawns its requests on `runtime`
    pub fn new(registry: TranslatorRegistry, main_context: Arc<dyn MainContext>, runtime: Handle) -> Self {
        Self {
            registry,
            publisher: Publisher {
                main_context,
                live: Arc::new(AtomicBool::new(true)),
            },
            runtime,
        }
    }

    /// Switch publishing on or off. Results of requests already in flight are
    /// dropped while publishing is off.
    pub fn set_enabled(&self, enabled: bool) {
        self.publisher.live.store(enabled, Ordering::SeqCst);
    }

    pub fn is_enabled(&self) -> bool {
        self.publisher.live.load(Ordering::SeqCst)
    }

    /// Handle a chat line that survived filtering
    pub fn on_chat_line(&self, event: &ChatLineEvent, config: &TranslationConfig) -> Dispatch {
        let scope = event.recipient.scope();
        if !config.scope_enabled(scope) {
            return Dispatch::skipped();
        }
        let Some(translator) = self.translator_for(config) else {
            return Dispatch::skipped();
        };

        let request = TranslationRequest::new(vec![event.text.protect()], config.language_name.clone(), scope);
        let original = event.text.clone();
        let keep_original = config.keep_original;

        let task = self.spawn_translation(translator, request, move |outcome| {
            resolve_chat_outcome(&original, outcome, keep_original).map(HostEffect::DisplayMessage)
        });

        // Without keep-original the line stays hidden until the translation lands
        Dispatch::spawned(!keep_original, task)
    }

    /// Handle an NPC dialogue event
    pub fn on_dialogue(&self, event: &DialogueEvent, config: &TranslationConfig) -> Dispatch {
        if !config.scope_enabled(TranslationScope::NpcDialogue) {
            return Dispatch::skipped();
        }
        if event.translated {
            return Dispatch::skipped();
        }

        let keep_original = config.keep_original;

        if event.is_clear() {
            // Clearing must not wait on a translation round trip
            self.publisher
                .publish(HostEffect::PostDialogue(DialogueEvent::translated_from(event, Vec::new())));
            return Dispatch::immediate(!keep_original);
        }

        let Some(translator) = self.translator_for(config) else {
            return Dispatch::skipped();
        };

        let lines = event.lines.iter().map(FormattedText::protect).collect();
        let request = TranslationRequest::new(lines, config.language_name.clone(), TranslationScope::NpcDialogue);
        let source = event.clone();

        let task = self.spawn_translation(translator, request, move |outcome| {
            resolve_dialogue_outcome(&source, outcome, keep_original).map(HostEffect::PostDialogue)
        });

        Dispatch::spawned(!keep_original, task)
    }

    /// Handle a change of the tracked quest description
    pub fn on_tracked_quest(&self, event: &TrackedQuestEvent, config: &TranslationConfig) -> Dispatch {
        if !config.scope_enabled(TranslationScope::TrackedQuest) || event.lines.is_empty() {
            return Dispatch::skipped();
        }
        let Some(translator) = self.translator_for(config) else {
            return Dispatch::skipped();
        };

        let lines = event.lines.iter().map(FormattedText::protect).collect();
        let request = TranslationRequest::new(lines, config.language_name.clone(), TranslationScope::TrackedQuest);
        let source = event.clone();
        let keep_original = config.keep_original;

        let task = self.spawn_translation(translator, request, move |outcome| {
            resolve_quest_outcome(&source, outcome, keep_original)
        });

        Dispatch::spawned(!keep_original, task)
    }

    fn translator_for(&self, config: &TranslationConfig) -> Option<Arc<dyn Translator>> {
        let translator = self.registry.get(config.translation_service);
        if translator.is_none() {
            warn!("No translator registered for {}", config.translation_service.display_name());
        }
        translator
    }

    /// Run the request in the background and publish whatever `finish` makes of it
    fn spawn_translation<F>(
        &self,
        translator: Arc<dyn Translator>,
        request: TranslationRequest,
        finish: F,
    ) -> JoinHandle<()>
    where
        F: FnOnce(TranslationOutcome) -> Option<HostEffect> + Send + 'static,
    {
        let publisher = self.publisher.clone();
        self.runtime.spawn(async move {
            let outcome = dispatch(translator.as_ref(), request).await;
            if let Some(effect) = finish(outcome) {
                publisher.publish(effect);
            }
        })
    }
}

/// Final text for a translated chat line, if any should be shown.
///
/// On failure with keep-original the original is already on screen, so
/// nothing is shown; without it the original is shown so it is not lost.
pub fn resolve_chat_outcome(
    original: &FormattedText,
    outcome: TranslationOutcome,
    keep_original: bool,
) -> Option<FormattedText> {
    match outcome {
        TranslationOutcome::Translated(lines) => lines.first().map(|line| FormattedText::restore(line)),
        TranslationOutcome::Failed if keep_original => None,
        TranslationOutcome::Failed => Some(original.clone()),
    }
}

/// Dialogue to re-publish for a translated dialogue batch.
///
/// Translated lines lose their formatting: codes are restored and then
/// stripped, since the rebuilt dialogue carries plain text only.
pub fn resolve_dialogue_outcome(
    source: &DialogueEvent,
    outcome: TranslationOutcome,
    keep_original: bool,
) -> Option<DialogueEvent> {
    match outcome {
        TranslationOutcome::Translated(lines) => {
            let plain = lines
                .iter()
                .map(|line| FormattedText::new(FormattedText::restore(line).strip_formatting()))
                .collect();
            Some(DialogueEvent::translated_from(source, plain))
        }
        TranslationOutcome::Failed if keep_original => None,
        TranslationOutcome::Failed => Some(DialogueEvent::translated_from(source, source.lines.clone())),
    }
}

/// Tracked quest replacement for a translated quest description
pub fn resolve_quest_outcome(
    source: &TrackedQuestEvent,
    outcome: TranslationOutcome,
    keep_original: bool,
) -> Option<HostEffect> {
    let lines = match outcome {
        TranslationOutcome::Translated(lines) => lines.iter().map(|line| FormattedText::restore(line)).collect(),
        TranslationOutcome::Failed if keep_original => return None,
        TranslationOutcome::Failed => source.lines.clone(),
    };
    Some(HostEffect::TrackedQuestTranslated {
        quest: source.quest.clone(),
        lines,
    })
}
