//! Fail-fast validation of a macro before encoding.
//!
//! Order: trigger, action count, then each entry in list order. Only the first
//! violation is reported.

use crate::domain::action_list::MAX_ACTIONS;
use crate::domain::entities::{ActionEntry, ActionKind, ActionValue, TopSelection};
use crate::domain::errors::ValidationError;
use crate::domain::trigger::{MIN_TRIGGER_LEN, is_trigger_char};

pub fn validate(trigger: &str, actions: &[ActionEntry]) -> Result<(), ValidationError> {
    validate_trigger(trigger)?;

    if actions.is_empty() {
        return Err(ValidationError::NoActions);
    }
    if actions.len() > MAX_ACTIONS {
        return Err(ValidationError::TooManyActions(actions.len()));
    }

    for (index, entry) in actions.iter().enumerate() {
        validate_entry(index, entry, &actions[..index])?;
    }
    Ok(())
}

pub fn validate_trigger(trigger: &str) -> Result<(), ValidationError> {
    if trigger.trim().is_empty() {
        return Err(ValidationError::EmptyTrigger);
    }
    if trigger.chars().any(char::is_whitespace) {
        return Err(ValidationError::TriggerHasSpace);
    }
    if trigger.chars().count() < MIN_TRIGGER_LEN {
        return Err(ValidationError::TriggerTooShort);
    }
    if let Some(c) = trigger.chars().find(|&c| !is_trigger_char(c)) {
        return Err(ValidationError::InvalidTriggerChar(c));
    }
    Ok(())
}

fn validate_entry(
    index: usize,
    entry: &ActionEntry,
    earlier: &[ActionEntry],
) -> Result<(), ValidationError> {
    let kind = entry.kind.ok_or(ValidationError::MissingType(index))?;

    if kind == ActionKind::GetTopPosition {
        let selection = entry
            .value
            .top_selection()
            .copied()
            .unwrap_or_default();
        return validate_top_selection(index, &selection);
    }

    if kind.requires_value() && entry.value.is_empty() {
        return Err(ValidationError::MissingValue(index));
    }

    if let ActionValue::Placeholder(placeholder) = entry.value {
        if !earlier.iter().any(|e| e.enables(placeholder)) {
            return Err(ValidationError::UnresolvedPlaceholder { index, placeholder });
        }
    }
    Ok(())
}

fn validate_top_selection(index: usize, selection: &TopSelection) -> Result<(), ValidationError> {
    let top_type = selection
        .top_type
        .ok_or(ValidationError::MissingTopType(index))?;
    if top_type.has_scope() && selection.sub_type.is_none() {
        return Err(ValidationError::MissingSubType(index));
    }
    if selection.position.is_none() {
        return Err(ValidationError::MissingPosition(index));
    }
    Ok(())
}
