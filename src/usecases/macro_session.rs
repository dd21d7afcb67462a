//! Macro session: one user's form state, from first action to generated link.
//!
//! - Owns the trigger and the `ActionList`; no process-wide state
//! - Forwards every model event to observers, in order
//! - `create_macro` validates, encodes, notifies, then discards the list

use crate::domain::{
    ActionEntry, ActionId, ActionKind, ActionList, BotLink, CascadePolicy, DomainError,
    MacroLink, ModelEvent, Placeholder, TopSelection, encode, sanitize_trigger, validate,
};
use crate::ports::ModelObserver;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub struct MacroSession {
    trigger: String,
    actions: ActionList,
    bot: BotLink,
    observers: Vec<Arc<dyn ModelObserver>>,
}

impl MacroSession {
    /// Empty session: no trigger, no actions.
    pub fn new(bot: BotLink, policy: CascadePolicy) -> Self {
        Self {
            trigger: String::new(),
            actions: ActionList::new(policy),
            bot,
            observers: Vec::new(),
        }
    }

    pub fn with_observer(mut self, observer: Arc<dyn ModelObserver>) -> Self {
        self.observers.push(observer);
        self
    }

    pub fn trigger(&self) -> &str {
        &self.trigger
    }

    pub fn actions(&self) -> &[ActionEntry] {
        self.actions.entries()
    }

    pub fn action(&self, id: ActionId) -> Option<&ActionEntry> {
        self.actions.get(id)
    }

    pub fn position(&self, id: ActionId) -> Option<usize> {
        self.actions.position(id)
    }

    pub fn is_full(&self) -> bool {
        self.actions.is_full()
    }

    pub fn bot(&self) -> &BotLink {
        &self.bot
    }

    /// Stores the trigger with disallowed characters stripped. Returns what was kept.
    pub fn set_trigger(&mut self, raw: &str) -> &str {
        let clean = sanitize_trigger(raw);
        let stripped = clean.chars().count() != raw.chars().count();
        if stripped {
            debug!(raw, kept = %clean, "trigger input sanitized");
        }
        self.trigger = clean;
        self.emit(ModelEvent::TriggerChanged {
            trigger: self.trigger.clone(),
            stripped,
        });
        &self.trigger
    }

    pub fn add_action(&mut self) -> Option<ActionId> {
        let id = self.actions.add();
        match id {
            Some(id) => debug!(%id, count = self.actions.len(), "action added"),
            None => warn!(count = self.actions.len(), "action limit reached"),
        }
        self.flush();
        id
    }

    pub fn remove_action(&mut self, id: ActionId) -> Result<(), DomainError> {
        let result = self.actions.remove(id);
        if result.is_ok() {
            debug!(%id, count = self.actions.len(), "action removed");
        }
        self.flush();
        result
    }

    pub fn set_action_type(
        &mut self,
        id: ActionId,
        kind: Option<ActionKind>,
    ) -> Result<(), DomainError> {
        let result = self.actions.set_type(id, kind);
        self.flush();
        result
    }

    pub fn set_action_value(&mut self, id: ActionId, text: &str) -> Result<(), DomainError> {
        let result = self.actions.set_value(id, text);
        self.flush();
        result
    }

    pub fn available_placeholder(&self, id: ActionId) -> Option<Placeholder> {
        self.actions.available_placeholder(id)
    }

    pub fn insert_placeholder(
        &mut self,
        id: ActionId,
        placeholder: Placeholder,
    ) -> Result<(), DomainError> {
        let result = self.actions.insert_placeholder(id, placeholder);
        self.flush();
        result
    }

    pub fn set_top_selection(
        &mut self,
        id: ActionId,
        selection: TopSelection,
    ) -> Result<(), DomainError> {
        let result = self.actions.set_top_selection(id, selection);
        self.flush();
        result
    }

    /// Validate → encode → link. On success the form is reset for the next macro.
    pub fn create_macro(&mut self) -> Result<MacroLink, DomainError> {
        if let Err(e) = validate(&self.trigger, self.actions.entries()) {
            info!(error = %e, "macro rejected");
            self.emit(ModelEvent::ValidationFailed(e.clone()));
            return Err(e.into());
        }

        let encoded = encode(&self.trigger, self.actions.entries())?;
        let link = MacroLink {
            url: self.bot.macro_url(&encoded.payload),
            payload: encoded.payload,
            trigger: self.trigger.clone(),
            action_count: self.actions.len(),
        };
        info!(
            trigger = %link.trigger,
            actions = link.action_count,
            payload_len = link.payload.len(),
            "macro created"
        );
        self.emit(ModelEvent::MacroCreated(link.clone()));
        self.reset();
        Ok(link)
    }

    /// Clears trigger and actions, then seeds one empty action like a fresh form.
    pub fn reset(&mut self) {
        self.trigger.clear();
        self.actions.reset();
        self.actions.add();
        self.flush();
    }

    fn flush(&mut self) {
        for event in self.actions.drain_events() {
            self.emit(event);
        }
    }

    fn emit(&self, event: ModelEvent) {
        for observer in &self.observers {
            observer.notify(&event);
        }
    }
}
