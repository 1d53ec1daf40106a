/*!
 * Events exchanged with the host and the main-context hand-off.
 *
 * The host owns all UI and game state on a single main context. Inbound
 * events are plain values handed to the pipeline; everything the pipeline
 * wants the host to do comes back as a [`HostEffect`] scheduled through
 * [`MainContext`], which is the only way the pipeline touches host state.
 */

use log::debug;
use tokio::sync::mpsc::{self, error::TryRecvError, UnboundedReceiver, UnboundedSender};

use crate::filter::MessageOrigin;
use crate::formatted_text::FormattedText;

use super::request::TranslationScope;

/// Who a chat line is addressed from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecipientType {
    /// Server information and system lines
    Info,
    Client,
    Npc,
    Global,
    Local,
    Party,
    Guild,
    Private,
    Shout,
}

impl RecipientType {
    /// Translation scope of lines sent to this recipient
    pub fn scope(self) -> TranslationScope {
        match self {
            RecipientType::Info => TranslationScope::Info,
            _ => TranslationScope::PlayerChat,
        }
    }
}

/// A chat line as received by the host
#[derive(Debug, Clone, PartialEq)]
pub struct ChatLineEvent {
    pub text: FormattedText,
    pub origin: MessageOrigin,
    pub recipient: RecipientType,
}

impl ChatLineEvent {
    pub fn new(text: impl Into<FormattedText>, origin: MessageOrigin, recipient: RecipientType) -> Self {
        Self {
            text: text.into(),
            origin,
            recipient,
        }
    }
}

/// How a dialogue is presented
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DialogueKind {
    None,
    Normal,
    Selection,
    Confirmationless,
}

/// A full NPC dialogue screen. An empty line list clears the current dialogue.
#[derive(Debug, Clone, PartialEq)]
pub struct DialogueEvent {
    pub lines: Vec<FormattedText>,
    pub kind: DialogueKind,
    pub protected: bool,
    /// Set on dialogues re-published by the coordinator so they are not translated again
    pub translated: bool,
}

impl DialogueEvent {
    /// A dialogue as received from the game
    pub fn new(lines: Vec<FormattedText>, kind: DialogueKind, protected: bool) -> Self {
        Self {
            lines,
            kind,
            protected,
            translated: false,
        }
    }

    /// A re-published dialogue carrying `lines`, keeping kind and protection
    pub fn translated_from(source: &DialogueEvent, lines: Vec<FormattedText>) -> Self {
        Self {
            lines,
            kind: source.kind,
            protected: source.protected,
            translated: true,
        }
    }

    /// Whether this is the "clear current dialogue" signal
    pub fn is_clear(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Description of the quest currently tracked by the player
#[derive(Debug, Clone, PartialEq)]
pub struct TrackedQuestEvent {
    pub quest: String,
    pub lines: Vec<FormattedText>,
}

/// Work the host performs on its main context
#[derive(Debug, Clone, PartialEq)]
pub enum HostEffect {
    /// Show a line in chat
    DisplayMessage(FormattedText),
    /// Post a dialogue event to the host's dialogue handlers
    PostDialogue(DialogueEvent),
    /// Replace the tracked quest description
    TrackedQuestTranslated { quest: String, lines: Vec<FormattedText> },
}

/// Hand-off primitive supplied by the host: run this on the main context
pub trait MainContext: Send + Sync {
    fn run_on_main(&self, effect: HostEffect);
}

/// Channel-backed [`MainContext`]; the host drains the receiver on its main loop
#[derive(Debug, Clone)]
pub struct MainThreadQueue {
    sender: UnboundedSender<HostEffect>,
}

impl MainThreadQueue {
    pub fn new() -> (Self, MainThreadReceiver) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, MainThreadReceiver { receiver })
    }
}

impl MainContext for MainThreadQueue {
    fn run_on_main(&self, effect: HostEffect) {
        if self.sender.send(effect).is_err() {
            debug!("Main context is gone, dropping host effect");
        }
    }
}

/// Host side of a [`MainThreadQueue`]
#[derive(Debug)]
pub struct MainThreadReceiver {
    receiver: UnboundedReceiver<HostEffect>,
}

impl MainThreadReceiver {
    /// Take every effect scheduled so far without waiting
    pub fn drain(&mut self) -> Vec<HostEffect> {
        let mut effects = Vec::new();
        loop {
            match self.receiver.try_recv() {
                Ok(effect) => effects.push(effect),
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        effects
    }

    /// Wait for the next effect; `None` once every sender is dropped
    pub async fn recv(&mut self) -> Option<HostEffect> {
        self.receiver.recv().await
    }
}
