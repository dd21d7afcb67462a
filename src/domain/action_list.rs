//! Ordered, bounded list of macro steps.
//!
//! - At most [`MAX_ACTIONS`] entries; `add` past that records `CapacityReached`
//! - Ids come from a per-list counter and are never reused
//! - Placeholders enter only through `insert_placeholder`, which checks for an enabling top query
//! - Removing a top query clears placeholders that lost their source (see [`CascadePolicy`])
//!
//! Every mutation records a [`ModelEvent`]; the owner drains them with `drain_events`.

use crate::domain::entities::{
    ActionEntry, ActionId, ActionKind, ActionValue, Placeholder, TopSelection,
};
use crate::domain::errors::DomainError;
use crate::domain::events::ModelEvent;
use serde::Deserialize;
use std::str::FromStr;

/// Maximum number of steps in one macro.
pub const MAX_ACTIONS: usize = 3;

/// How placeholders are re-checked after their top query goes away.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub enum CascadePolicy {
    /// Clear only when no top query is left anywhere in the list.
    /// A surviving top query placed after the dependent step still keeps it.
    #[default]
    AnyEnabler,
    /// Keep a placeholder only while a matching top query sits before it.
    /// Also applies when a top query is re-typed or stops being a balance top.
    PositionAware,
}

impl FromStr for CascadePolicy {
    type Err = String;

    /// Accepts the config names and the CLI spellings (`any`, `position-aware`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "any_enabler" | "any" => Ok(CascadePolicy::AnyEnabler),
            "position_aware" | "position-aware" => Ok(CascadePolicy::PositionAware),
            other => Err(format!(
                "unknown cascade policy `{}` (expected any_enabler or position_aware)",
                other
            )),
        }
    }
}

impl TryFrom<String> for CascadePolicy {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

#[derive(Debug, Default)]
pub struct ActionList {
    entries: Vec<ActionEntry>,
    next_id: u64,
    policy: CascadePolicy,
    events: Vec<ModelEvent>,
}

impl ActionList {
    pub fn new(policy: CascadePolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    pub fn policy(&self) -> CascadePolicy {
        self.policy
    }

    pub fn entries(&self) -> &[ActionEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.entries.len() >= MAX_ACTIONS
    }

    pub fn get(&self, id: ActionId) -> Option<&ActionEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn position(&self, id: ActionId) -> Option<usize> {
        self.entries.iter().position(|e| e.id == id)
    }

    /// Takes the events recorded since the last call.
    pub fn drain_events(&mut self) -> Vec<ModelEvent> {
        std::mem::take(&mut self.events)
    }

    /// Appends an empty entry. Returns `None` when the list is full.
    pub fn add(&mut self) -> Option<ActionId> {
        if self.is_full() {
            self.events
                .push(ModelEvent::CapacityReached { max: MAX_ACTIONS });
            return None;
        }
        self.next_id += 1;
        let id = ActionId(self.next_id);
        self.entries.push(ActionEntry::empty(id));
        self.events.push(ModelEvent::EntryAdded {
            id,
            position: self.entries.len() - 1,
        });
        Some(id)
    }

    pub fn remove(&mut self, id: ActionId) -> Result<(), DomainError> {
        let index = self.index_of(id)?;
        let removed = self.entries.remove(index);
        self.events.push(ModelEvent::EntryRemoved {
            id,
            position: index,
        });
        // Entries originally after `index` now start at `index`.
        if removed.is_top_query() {
            self.cascade(index);
        }
        Ok(())
    }

    /// Changes the kind and clears the value, including any top selection.
    pub fn set_type(&mut self, id: ActionId, kind: Option<ActionKind>) -> Result<(), DomainError> {
        let index = self.index_of(id)?;
        let entry = &mut self.entries[index];
        let was_top_query = entry.is_top_query();
        entry.kind = kind;
        entry.value = ActionValue::Empty;
        self.events.push(ModelEvent::TypeChanged { id, kind });
        if was_top_query && self.policy == CascadePolicy::PositionAware {
            self.cascade(index + 1);
        }
        Ok(())
    }

    pub fn set_value(&mut self, id: ActionId, text: &str) -> Result<(), DomainError> {
        let index = self.index_of(id)?;
        let entry = &mut self.entries[index];
        let kind = match entry.kind {
            None => return Err(DomainError::ActionTypeNotSet(id)),
            Some(ActionKind::GetTopPosition) => return Err(DomainError::TopSelectionRequired(id)),
            Some(kind) => kind,
        };
        // Sentinels are reserved only on their host kind; elsewhere they are plain text.
        if let Some(placeholder) = Placeholder::from_literal(text) {
            if Placeholder::for_kind(kind) == Some(placeholder) {
                return Err(DomainError::ReservedPlaceholder { id, placeholder });
            }
        }
        entry.value = if text.is_empty() {
            ActionValue::Empty
        } else {
            ActionValue::Text(text.to_string())
        };
        self.events.push(ModelEvent::ValueChanged { id });
        Ok(())
    }

    /// The placeholder a view may offer for this entry right now, if any.
    pub fn available_placeholder(&self, id: ActionId) -> Option<Placeholder> {
        let index = self.position(id)?;
        let placeholder = Placeholder::for_kind(self.entries[index].kind?)?;
        self.enabled_before(index, placeholder).then_some(placeholder)
    }

    pub fn insert_placeholder(
        &mut self,
        id: ActionId,
        placeholder: Placeholder,
    ) -> Result<(), DomainError> {
        let index = self.index_of(id)?;
        if self.entries[index].kind != Some(placeholder.host_kind()) {
            return Err(DomainError::PlaceholderNotAllowed { id, placeholder });
        }
        if !self.enabled_before(index, placeholder) {
            return Err(DomainError::PlaceholderUnavailable { id, placeholder });
        }
        self.entries[index].value = ActionValue::Placeholder(placeholder);
        self.events.push(ModelEvent::ValueChanged { id });
        Ok(())
    }

    pub fn set_top_selection(
        &mut self,
        id: ActionId,
        selection: TopSelection,
    ) -> Result<(), DomainError> {
        let index = self.index_of(id)?;
        let entry = &mut self.entries[index];
        if !entry.is_top_query() {
            return Err(DomainError::NotTopQuery(id));
        }
        let was_balance = entry.enables(Placeholder::TopResultId);
        entry.value = ActionValue::Top(selection.normalized());
        let lost_balance = was_balance && !entry.enables(Placeholder::TopResultId);
        self.events.push(ModelEvent::ValueChanged { id });
        if lost_balance && self.policy == CascadePolicy::PositionAware {
            self.cascade(index + 1);
        }
        Ok(())
    }

    /// Drops every entry. Ids keep counting up.
    pub fn reset(&mut self) {
        self.entries.clear();
        self.events.push(ModelEvent::Reset);
    }

    fn index_of(&self, id: ActionId) -> Result<usize, DomainError> {
        self.position(id).ok_or(DomainError::UnknownAction(id))
    }

    fn enabled_before(&self, index: usize, placeholder: Placeholder) -> bool {
        self.entries[..index].iter().any(|e| e.enables(placeholder))
    }

    /// Clears placeholders at `from..` that lost their enabling top query.
    fn cascade(&mut self, from: usize) {
        if self.policy == CascadePolicy::AnyEnabler && self.entries.iter().any(|e| e.is_top_query())
        {
            return;
        }
        for index in from..self.entries.len() {
            let Some(placeholder) = self.entries[index].value.placeholder() else {
                continue;
            };
            let keep = match self.policy {
                CascadePolicy::AnyEnabler => false,
                CascadePolicy::PositionAware => self.enabled_before(index, placeholder),
            };
            if keep {
                continue;
            }
            let entry = &mut self.entries[index];
            entry.value = ActionValue::Empty;
            self.events.push(ModelEvent::ValueCleared {
                id: entry.id,
                placeholder,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{TopPosition, TopType};

    fn balance_me() -> TopSelection {
        TopSelection::new(TopType::Balance, None, TopPosition::Me)
    }

    fn top_query(list: &mut ActionList, selection: TopSelection) -> ActionId {
        let id = list.add().unwrap();
        list.set_type(id, Some(ActionKind::GetTopPosition)).unwrap();
        list.set_top_selection(id, selection).unwrap();
        id
    }

    fn with_placeholder(list: &mut ActionList, placeholder: Placeholder) -> ActionId {
        let id = list.add().unwrap();
        list.set_type(id, Some(placeholder.host_kind())).unwrap();
        list.insert_placeholder(id, placeholder).unwrap();
        id
    }

    #[test]
    fn test_add_stops_at_capacity() {
        let mut list = ActionList::default();
        for _ in 0..MAX_ACTIONS {
            assert!(list.add().is_some());
        }
        list.drain_events();

        assert!(list.add().is_none());
        assert_eq!(list.len(), MAX_ACTIONS);
        assert_eq!(
            list.drain_events(),
            vec![ModelEvent::CapacityReached { max: MAX_ACTIONS }]
        );
    }

    #[test]
    fn test_ids_unique_after_remove_and_reset() {
        let mut list = ActionList::default();
        let a = list.add().unwrap();
        list.remove(a).unwrap();
        let b = list.add().unwrap();
        list.reset();
        let c = list.add().unwrap();
        assert_ne!(a, b);
        assert_ne!(b, c);
        assert_ne!(a, c);
    }

    #[test]
    fn test_remove_shifts_positions() {
        let mut list = ActionList::default();
        let a = list.add().unwrap();
        let b = list.add().unwrap();
        let c = list.add().unwrap();
        list.remove(a).unwrap();
        assert_eq!(list.position(b), Some(0));
        assert_eq!(list.position(c), Some(1));
        assert!(matches!(
            list.remove(a),
            Err(DomainError::UnknownAction(id)) if id == a
        ));
    }

    #[test]
    fn test_set_type_resets_value() {
        let mut list = ActionList::default();
        let id = list.add().unwrap();
        list.set_type(id, Some(ActionKind::SendMessage)).unwrap();
        list.set_value(id, "hi").unwrap();
        list.set_type(id, Some(ActionKind::WarnUser)).unwrap();
        assert_eq!(list.get(id).unwrap().value, ActionValue::Empty);

        let top = top_query(&mut list, balance_me());
        list.set_type(top, Some(ActionKind::SendPhoto)).unwrap();
        assert_eq!(list.get(top).unwrap().value, ActionValue::Empty);
    }

    #[test]
    fn test_set_value_rules() {
        let mut list = ActionList::default();
        let id = list.add().unwrap();
        assert!(matches!(
            list.set_value(id, "x"),
            Err(DomainError::ActionTypeNotSet(_))
        ));

        list.set_type(id, Some(ActionKind::SendMessage)).unwrap();
        assert!(matches!(
            list.set_value(id, "{topresult}"),
            Err(DomainError::ReservedPlaceholder { .. })
        ));
        list.set_value(id, "rank: {topresult}").unwrap();
        assert_eq!(
            list.get(id).unwrap().value,
            ActionValue::Text("rank: {topresult}".into())
        );
        list.set_value(id, "").unwrap();
        assert_eq!(list.get(id).unwrap().value, ActionValue::Empty);

        let top = top_query(&mut list, balance_me());
        assert!(matches!(
            list.set_value(top, "5"),
            Err(DomainError::TopSelectionRequired(_))
        ));
    }

    #[test]
    fn test_sentinel_text_is_plain_outside_host_kind() {
        let mut list = ActionList::default();
        let warn = list.add().unwrap();
        list.set_type(warn, Some(ActionKind::WarnUser)).unwrap();
        list.set_value(warn, "{topresult}").unwrap();
        assert_eq!(
            list.get(warn).unwrap().value,
            ActionValue::Text("{topresult}".into())
        );

        let msg = list.add().unwrap();
        list.set_type(msg, Some(ActionKind::SendMessage)).unwrap();
        list.set_value(msg, "{topresultID}").unwrap();
        assert_eq!(
            list.get(msg).unwrap().value,
            ActionValue::Text("{topresultID}".into())
        );

        let rob = list.add().unwrap();
        list.set_type(rob, Some(ActionKind::Robbery)).unwrap();
        assert!(matches!(
            list.set_value(rob, "{topresultID}"),
            Err(DomainError::ReservedPlaceholder {
                placeholder: Placeholder::TopResultId,
                ..
            })
        ));
        list.set_value(rob, "{topresult}").unwrap();
    }

    #[test]
    fn test_placeholder_needs_earlier_top_query() {
        let mut list = ActionList::default();
        let msg = list.add().unwrap();
        list.set_type(msg, Some(ActionKind::SendMessage)).unwrap();
        assert_eq!(list.available_placeholder(msg), None);

        // A top query after the message does not enable it.
        top_query(&mut list, balance_me());
        assert!(matches!(
            list.insert_placeholder(msg, Placeholder::TopResult),
            Err(DomainError::PlaceholderUnavailable { .. })
        ));

        let later = list.add().unwrap();
        list.set_type(later, Some(ActionKind::SendMessage)).unwrap();
        assert_eq!(
            list.available_placeholder(later),
            Some(Placeholder::TopResult)
        );
        list.insert_placeholder(later, Placeholder::TopResult).unwrap();
        assert_eq!(
            list.get(later).unwrap().value,
            ActionValue::Placeholder(Placeholder::TopResult)
        );
    }

    #[test]
    fn test_placeholder_host_kind_enforced() {
        let mut list = ActionList::default();
        top_query(&mut list, balance_me());
        let id = list.add().unwrap();
        list.set_type(id, Some(ActionKind::SendMessage)).unwrap();
        assert!(matches!(
            list.insert_placeholder(id, Placeholder::TopResultId),
            Err(DomainError::PlaceholderNotAllowed { .. })
        ));
    }

    #[test]
    fn test_robbery_placeholder_requires_balance_top() {
        let mut list = ActionList::default();
        let top = top_query(
            &mut list,
            TopSelection::new(TopType::Level, None, TopPosition::Me),
        );
        let rob = list.add().unwrap();
        list.set_type(rob, Some(ActionKind::Robbery)).unwrap();
        assert_eq!(list.available_placeholder(rob), None);
        assert!(list
            .insert_placeholder(rob, Placeholder::TopResultId)
            .is_err());

        list.set_top_selection(top, balance_me()).unwrap();
        list.insert_placeholder(rob, Placeholder::TopResultId).unwrap();
    }

    #[test]
    fn test_set_top_selection_only_on_top_query() {
        let mut list = ActionList::default();
        let id = list.add().unwrap();
        list.set_type(id, Some(ActionKind::SendDice)).unwrap();
        assert!(matches!(
            list.set_top_selection(id, balance_me()),
            Err(DomainError::NotTopQuery(_))
        ));
    }

    #[test]
    fn test_removing_only_top_query_clears_placeholders() {
        let mut list = ActionList::default();
        let top = top_query(&mut list, balance_me());
        let rob = with_placeholder(&mut list, Placeholder::TopResultId);
        let msg = with_placeholder(&mut list, Placeholder::TopResult);
        list.drain_events();

        list.remove(top).unwrap();

        assert_eq!(list.get(rob).unwrap().value, ActionValue::Empty);
        assert_eq!(list.get(msg).unwrap().value, ActionValue::Empty);
        assert_eq!(
            list.drain_events(),
            vec![
                ModelEvent::EntryRemoved {
                    id: top,
                    position: 0
                },
                ModelEvent::ValueCleared {
                    id: rob,
                    placeholder: Placeholder::TopResultId
                },
                ModelEvent::ValueCleared {
                    id: msg,
                    placeholder: Placeholder::TopResult
                },
            ]
        );
    }

    #[test]
    fn test_removing_one_of_two_top_queries_keeps_placeholders() {
        let mut list = ActionList::default();
        let first = top_query(&mut list, balance_me());
        top_query(&mut list, balance_me());
        let rob = with_placeholder(&mut list, Placeholder::TopResultId);

        list.remove(first).unwrap();

        assert_eq!(
            list.get(rob).unwrap().value,
            ActionValue::Placeholder(Placeholder::TopResultId)
        );
    }

    #[test]
    fn test_any_enabler_keeps_placeholder_when_survivor_is_after() {
        let mut list = ActionList::new(CascadePolicy::AnyEnabler);
        let top = top_query(&mut list, balance_me());
        let msg = with_placeholder(&mut list, Placeholder::TopResult);
        let late_top = list.add().unwrap();
        list.set_type(late_top, Some(ActionKind::GetTopPosition))
            .unwrap();

        list.remove(top).unwrap();

        assert_eq!(
            list.get(msg).unwrap().value,
            ActionValue::Placeholder(Placeholder::TopResult)
        );
    }

    #[test]
    fn test_position_aware_clears_when_survivor_is_after() {
        let mut list = ActionList::new(CascadePolicy::PositionAware);
        let top = top_query(&mut list, balance_me());
        let msg = with_placeholder(&mut list, Placeholder::TopResult);
        let late_top = list.add().unwrap();
        list.set_type(late_top, Some(ActionKind::GetTopPosition))
            .unwrap();

        list.remove(top).unwrap();

        assert_eq!(list.get(msg).unwrap().value, ActionValue::Empty);
    }

    #[test]
    fn test_position_aware_retype_and_top_change_cascade() {
        let mut list = ActionList::new(CascadePolicy::PositionAware);
        let top = top_query(&mut list, balance_me());
        let rob = with_placeholder(&mut list, Placeholder::TopResultId);

        list.set_top_selection(top, TopSelection::new(TopType::Charity, None, TopPosition::Me))
            .unwrap();
        assert_eq!(list.get(rob).unwrap().value, ActionValue::Empty);

        list.set_top_selection(top, balance_me()).unwrap();
        let msg = with_placeholder(&mut list, Placeholder::TopResult);
        list.set_type(top, Some(ActionKind::KickUser)).unwrap();
        assert_eq!(list.get(msg).unwrap().value, ActionValue::Empty);
    }

    #[test]
    fn test_any_enabler_retype_leaves_placeholder() {
        let mut list = ActionList::new(CascadePolicy::AnyEnabler);
        let top = top_query(&mut list, balance_me());
        let msg = with_placeholder(&mut list, Placeholder::TopResult);
        list.set_type(top, Some(ActionKind::KickUser)).unwrap();
        assert_eq!(
            list.get(msg).unwrap().value,
            ActionValue::Placeholder(Placeholder::TopResult)
        );
    }

    #[test]
    fn test_cascade_skips_entries_before_removed_top_query() {
        let mut list = ActionList::new(CascadePolicy::AnyEnabler);
        let first = top_query(&mut list, balance_me());
        let msg = with_placeholder(&mut list, Placeholder::TopResult);
        let last = top_query(&mut list, balance_me());
        // `msg` now dangles: its only earlier enabler is gone.
        list.set_type(first, Some(ActionKind::KickUser)).unwrap();
        list.drain_events();

        list.remove(last).unwrap();

        assert_eq!(
            list.get(msg).unwrap().value,
            ActionValue::Placeholder(Placeholder::TopResult)
        );
        assert_eq!(
            list.drain_events(),
            vec![ModelEvent::EntryRemoved {
                id: last,
                position: 2
            }]
        );
    }
}
