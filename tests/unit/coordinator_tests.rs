/*!
 * Tests for the translation coordinator
 */

use chatrelay::filter::MessageOrigin;
use chatrelay::formatted_text::FormattedText;
use chatrelay::providers::mock::MockTranslator;
use chatrelay::translation::coordinator::{resolve_chat_outcome, resolve_dialogue_outcome};
use chatrelay::translation::{
    ChatLineEvent, DialogueEvent, DialogueKind, HostEffect, RecipientType, TrackedQuestEvent, TranslationOutcome,
};

use crate::common;

fn info_line(text: &str) -> ChatLineEvent {
    ChatLineEvent::new(text, MessageOrigin::Foreground, RecipientType::Info)
}

fn dialogue(lines: &[&str]) -> DialogueEvent {
    DialogueEvent::new(
        lines.iter().map(|l| FormattedText::new(*l)).collect(),
        DialogueKind::Normal,
        true,
    )
}

#[test]
fn test_resolveChatOutcome_withFailureAndKeepOriginal_shouldEmitNothing() {
    let original = FormattedText::new("§7Hello");
    assert_eq!(resolve_chat_outcome(&original, TranslationOutcome::Failed, true), None);
}

#[test]
fn test_resolveChatOutcome_withFailureAndNoKeepOriginal_shouldEmitOriginal() {
    let original = FormattedText::new("§7Hello");
    assert_eq!(
        resolve_chat_outcome(&original, TranslationOutcome::Failed, false),
        Some(original.clone())
    );
}

#[test]
fn test_resolveDialogueOutcome_withSuccess_shouldStripFormatting() {
    let source = dialogue(&["§6Guard: §fHalt!"]);
    let outcome = TranslationOutcome::Translated(vec!["{§6}Garde: { §f }Halte!".to_string()]);

    let translated = resolve_dialogue_outcome(&source, outcome, true).unwrap();
    assert_eq!(translated.lines, vec![FormattedText::new("Garde: Halte!")]);
    assert!(translated.translated);
    assert_eq!(translated.kind, DialogueKind::Normal);
    assert!(translated.protected);
}

#[tokio::test]
async fn test_onChatLine_withWorkingTranslator_shouldPublishRestoredText() {
    common::init_logging();
    let mock = MockTranslator::working();
    let (coordinator, mut receiver) = common::coordinator_with(mock.clone());
    let config = common::translation_config(true);

    let dispatch = coordinator.on_chat_line(&info_line("Hello §7world"), &config);
    assert!(!dispatch.cancel_original);
    assert!(dispatch.is_pending());
    dispatch.completion().await;

    assert_eq!(mock.last_request(), Some(vec!["Hello {§7}world".to_string()]));
    assert_eq!(
        receiver.drain(),
        vec![HostEffect::DisplayMessage(FormattedText::new("[fr] Hello §7world"))]
    );
}

#[tokio::test]
async fn test_onChatLine_withDamagedTokens_shouldStillRestoreCodes() {
    let (coordinator, mut receiver) = common::coordinator_with(MockTranslator::spacing_tokens());
    let dispatch = coordinator.on_chat_line(&info_line("§a§lBig §rnews"), &common::translation_config(true));
    dispatch.completion().await;

    assert_eq!(
        receiver.drain(),
        vec![HostEffect::DisplayMessage(FormattedText::new("§a§lBig §rnews"))]
    );
}

#[tokio::test]
async fn test_onChatLine_withFailureAndKeepOriginal_shouldEmitNothing() {
    let (coordinator, mut receiver) = common::coordinator_with(MockTranslator::failing());
    let dispatch = coordinator.on_chat_line(&info_line("§7Hello"), &common::translation_config(true));
    assert!(!dispatch.cancel_original);
    dispatch.completion().await;

    assert!(receiver.drain().is_empty());
}

#[tokio::test]
async fn test_onChatLine_withFailureAndNoKeepOriginal_shouldEmitOriginal() {
    for translator in [MockTranslator::failing(), MockTranslator::empty(), MockTranslator::wrong_length()] {
        let (coordinator, mut receiver) = common::coordinator_with(translator);
        let dispatch = coordinator.on_chat_line(&info_line("§7Hello §lthere"), &common::translation_config(false));
        assert!(dispatch.cancel_original);
        dispatch.completion().await;

        assert_eq!(
            receiver.drain(),
            vec![HostEffect::DisplayMessage(FormattedText::new("§7Hello §lthere"))]
        );
    }
}

/// Without keep-original the line is hidden until the translation arrives
#[tokio::test]
async fn test_onChatLine_withoutKeepOriginal_shouldCancelBeforeTranslationLands() {
    let (coordinator, mut receiver) = common::coordinator_with(MockTranslator::slow(50));
    let dispatch = coordinator.on_chat_line(&info_line("Hello"), &common::translation_config(false));

    assert!(dispatch.cancel_original);
    assert!(receiver.drain().is_empty());

    dispatch.completion().await;
    assert_eq!(receiver.drain(), vec![HostEffect::DisplayMessage(FormattedText::new("[fr] Hello"))]);
}

#[tokio::test]
async fn test_onChatLine_withScopeDisabled_shouldNotDispatch() {
    let mock = MockTranslator::working();
    let (coordinator, mut receiver) = common::coordinator_with(mock.clone());
    let mut config = common::translation_config(false);
    config.translate_player_chat = false;

    let event = ChatLineEvent::new("hi all", MessageOrigin::Foreground, RecipientType::Party);
    let dispatch = coordinator.on_chat_line(&event, &config);
    assert!(!dispatch.cancel_original);
    assert!(!dispatch.is_pending());

    config.translate_player_chat = true;
    config.translate_info = false;
    let dispatch = coordinator.on_chat_line(&info_line("[Info] hi"), &config);
    assert!(!dispatch.is_pending());

    assert_eq!(mock.call_count(), 0);
    assert!(receiver.drain().is_empty());
}

/// Settings are captured at dispatch time
#[tokio::test]
async fn test_onChatLine_shouldUseSnapshotTakenAtDispatch() {
    let (coordinator, mut receiver) = common::coordinator_with(MockTranslator::slow(30));
    let mut config = common::translation_config(true);
    let dispatch = coordinator.on_chat_line(&info_line("Hi"), &config);

    config.language_name = "de".to_string();
    config.keep_original = false;
    dispatch.completion().await;

    assert_eq!(receiver.drain(), vec![HostEffect::DisplayMessage(FormattedText::new("[fr] Hi"))]);
}

#[tokio::test]
async fn test_lateResult_afterFeatureDisabled_shouldBeDropped() {
    let (coordinator, mut receiver) = common::coordinator_with(MockTranslator::slow(30));
    let dispatch = coordinator.on_chat_line(&info_line("Hi"), &common::translation_config(true));

    coordinator.set_enabled(false);
    dispatch.completion().await;

    assert!(!coordinator.is_enabled());
    assert!(receiver.drain().is_empty());
}

#[tokio::test]
async fn test_onDialogue_shouldTranslateWholeBatchInOrder() {
    let mock = MockTranslator::working();
    let (coordinator, mut receiver) = common::coordinator_with(mock.clone());
    let event = dialogue(&["§7[1/2] §2Guard: §aWelcome", "§7[2/2] §2Guard: §aMove along"]);

    let dispatch = coordinator.on_dialogue(&event, &common::translation_config(true));
    dispatch.completion().await;

    assert_eq!(mock.call_count(), 1);
    assert_eq!(
        mock.last_request(),
        Some(vec![
            "{§7}[1/2] {§2}Guard: {§a}Welcome".to_string(),
            "{§7}[2/2] {§2}Guard: {§a}Move along".to_string(),
        ])
    );

    let effects = receiver.drain();
    assert_eq!(effects.len(), 1);
    let HostEffect::PostDialogue(posted) = &effects[0] else {
        panic!("expected a dialogue, got {:?}", effects[0]);
    };
    assert!(posted.translated);
    assert_eq!(
        posted.lines,
        vec![
            FormattedText::new("[fr] [1/2] Guard: Welcome"),
            FormattedText::new("[fr] [2/2] Guard: Move along"),
        ]
    );
}

#[tokio::test]
async fn test_onDialogue_withEmptyDialogue_shouldRepublishImmediately() {
    let mock = MockTranslator::working();
    let (coordinator, mut receiver) = common::coordinator_with(mock.clone());
    let event = dialogue(&[]);

    let dispatch = coordinator.on_dialogue(&event, &common::translation_config(false));
    assert!(!dispatch.is_pending());
    assert!(dispatch.cancel_original);

    let effects = receiver.drain();
    assert_eq!(effects, vec![HostEffect::PostDialogue(DialogueEvent::translated_from(&event, Vec::new()))]);
    assert_eq!(mock.call_count(), 0);
}

/// The clear signal is dropped at the gate when NPC translation is off
#[tokio::test]
async fn test_onDialogue_withEmptyDialogueAndNpcDisabled_shouldNotRepublish() {
    let (coordinator, mut receiver) = common::coordinator_with(MockTranslator::working());
    let mut config = common::translation_config(false);
    config.translate_npc = false;

    let dispatch = coordinator.on_dialogue(&dialogue(&[]), &config);
    assert!(!dispatch.cancel_original);
    assert!(receiver.drain().is_empty());
}

#[tokio::test]
async fn test_onDialogue_withTranslatedEvent_shouldIgnoreIt() {
    let mock = MockTranslator::working();
    let (coordinator, mut receiver) = common::coordinator_with(mock.clone());
    let source = dialogue(&["Hello"]);
    let own_output = DialogueEvent::translated_from(&source, vec![FormattedText::new("[fr] Hello")]);

    let dispatch = coordinator.on_dialogue(&own_output, &common::translation_config(false));
    assert!(!dispatch.is_pending());
    assert!(!dispatch.cancel_original);
    assert_eq!(mock.call_count(), 0);
    assert!(receiver.drain().is_empty());
}

#[tokio::test]
async fn test_onDialogue_withFailure_shouldFollowKeepOriginalPolicy() {
    let event = dialogue(&["§aHi", "§bBye"]);

    let (coordinator, mut receiver) = common::coordinator_with(MockTranslator::failing());
    coordinator.on_dialogue(&event, &common::translation_config(true)).completion().await;
    assert!(receiver.drain().is_empty());

    let (coordinator, mut receiver) = common::coordinator_with(MockTranslator::failing());
    coordinator.on_dialogue(&event, &common::translation_config(false)).completion().await;
    assert_eq!(
        receiver.drain(),
        vec![HostEffect::PostDialogue(DialogueEvent::translated_from(&event, event.lines.clone()))]
    );
}

#[tokio::test]
async fn test_onTrackedQuest_shouldPublishRestoredLines() {
    let (coordinator, mut receiver) = common::coordinator_with(MockTranslator::working());
    let event = TrackedQuestEvent {
        quest: "King's Recruit".to_string(),
        lines: vec![FormattedText::new("Talk to §bCaptain Ragon")],
    };

    coordinator.on_tracked_quest(&event, &common::translation_config(true)).completion().await;

    assert_eq!(
        receiver.drain(),
        vec![HostEffect::TrackedQuestTranslated {
            quest: "King's Recruit".to_string(),
            lines: vec![FormattedText::new("[fr] Talk to §bCaptain Ragon")],
        }]
    );
}

#[tokio::test]
async fn test_onTrackedQuest_withScopeDisabled_shouldSkip() {
    let mock = MockTranslator::working();
    let (coordinator, _receiver) = common::coordinator_with(mock.clone());
    let mut config = common::translation_config(true);
    config.translate_tracked_quest = false;

    let event = TrackedQuestEvent {
        quest: "Quest".to_string(),
        lines: vec![FormattedText::new("Go north")],
    };
    assert!(!coordinator.on_tracked_quest(&event, &config).is_pending());
    assert_eq!(mock.call_count(), 0);
}
