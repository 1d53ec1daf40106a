/*!
 * Host-facing entry point tying the filter and the translation coordinator
 * to one configuration snapshot.
 */

use anyhow::{Context, Result};
use log::info;
use parking_lot::RwLock;
use std::sync::Arc;

use crate::app_config::Config;
use crate::filter::FilterEngine;
use crate::translation::{ChatLineEvent, DialogueEvent, Dispatch, TrackedQuestEvent, TranslationCoordinator};

/// A validated configuration together with its compiled filter
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub config: Config,
    pub filter: FilterEngine,
}

impl RuntimeConfig {
    /// Validate `config` and compile its rule tables
    pub fn compile(config: Config) -> Result<Self> {
        let filter = config.validate().context("Configuration validation failed")?;
        Ok(Self { config, filter })
    }
}

/// Atomically swappable configuration snapshot
#[derive(Debug)]
pub struct ConfigStore {
    current: RwLock<Arc<RuntimeConfig>>,
}

impl ConfigStore {
    pub fn new(runtime: RuntimeConfig) -> Self {
        Self {
            current: RwLock::new(Arc::new(runtime)),
        }
    }

    /// The snapshot in effect right now
    pub fn snapshot(&self) -> Arc<RuntimeConfig> {
        Arc::clone(&self.current.read())
    }

    pub fn replace(&self, runtime: RuntimeConfig) {
        *self.current.write() = Arc::new(runtime);
    }
}

/// Result of handling an inbound chat line
#[derive(Debug)]
pub struct ChatVerdict {
    /// A filter rule matched
    pub suppressed: bool,
    /// Translation state for the line
    pub dispatch: Dispatch,
}

impl ChatVerdict {
    /// Whether the host must cancel the line's normal display
    pub fn cancel_original(&self) -> bool {
        self.suppressed || self.dispatch.cancel_original
    }
}

/// Filter plus translation, driven by the host's event handlers
pub struct ChatPipeline {
    store: ConfigStore,
    coordinator: TranslationCoordinator,
}

impl ChatPipeline {
    pub fn new(config: Config, coordinator: TranslationCoordinator) -> Result<Self> {
        let runtime = RuntimeConfig::compile(config)?;
        coordinator.set_enabled(runtime.config.translation.enabled);
        Ok(Self {
            store: ConfigStore::new(runtime),
            coordinator,
        })
    }

    /// Swap in a new configuration. An invalid one leaves the current snapshot untouched.
    pub fn reload(&self, config: Config) -> Result<()> {
        let runtime = RuntimeConfig::compile(config)?;
        self.coordinator.set_enabled(runtime.config.translation.enabled);
        self.store.replace(runtime);
        info!("Configuration reloaded");
        Ok(())
    }

    pub fn snapshot(&self) -> Arc<RuntimeConfig> {
        self.store.snapshot()
    }

    pub fn coordinator(&self) -> &TranslationCoordinator {
        &self.coordinator
    }

    /// Filter a chat line and translate it if it is shown
    pub fn on_chat_line(&self, event: &ChatLineEvent) -> ChatVerdict {
        let snapshot = self.store.snapshot();

        if snapshot.filter.should_suppress(&event.text, event.origin) {
            return ChatVerdict {
                suppressed: true,
                dispatch: Dispatch::skipped(),
            };
        }

        ChatVerdict {
            suppressed: false,
            dispatch: self.coordinator.on_chat_line(event, &snapshot.config.translation),
        }
    }

    pub fn on_dialogue(&self, event: &DialogueEvent) -> Dispatch {
        let snapshot = self.store.snapshot();
        self.coordinator.on_dialogue(event, &snapshot.config.translation)
    }

    pub fn on_tracked_quest(&self, event: &TrackedQuestEvent) -> Dispatch {
        let snapshot = self.store.snapshot();
        self.coordinator.on_tracked_quest(event, &snapshot.config.translation)
    }
}
