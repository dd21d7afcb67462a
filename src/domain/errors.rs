//! Domain errors. Used by ports and use cases.
//!
//! Adapters map infrastructure errors into these.

use crate::domain::entities::{ActionId, Placeholder};
use thiserror::Error;

/// User-input problems found by the validator. Indices are 0-based; messages are 1-based.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("trigger command is empty")]
    EmptyTrigger,

    #[error("trigger must be a single word without spaces")]
    TriggerHasSpace,

    #[error("trigger must be at least 2 characters long")]
    TriggerTooShort,

    #[error("trigger contains a disallowed character {0:?}")]
    InvalidTriggerChar(char),

    #[error("add at least one action")]
    NoActions,

    #[error("a macro holds at most 3 actions, got {0}")]
    TooManyActions(usize),

    #[error("choose a type for action {}", .0 + 1)]
    MissingType(usize),

    #[error("choose a top for action {}", .0 + 1)]
    MissingTopType(usize),

    #[error("choose local or global messages top for action {}", .0 + 1)]
    MissingSubType(usize),

    #[error("set a position for action {}", .0 + 1)]
    MissingPosition(usize),

    #[error("set a parameter for action {}", .0 + 1)]
    MissingValue(usize),

    #[error("action {} uses {placeholder} without an earlier top query that provides it", .index + 1)]
    UnresolvedPlaceholder {
        index: usize,
        placeholder: Placeholder,
    },
}

impl ValidationError {
    /// Entry index for per-action errors.
    pub fn index(&self) -> Option<usize> {
        match self {
            ValidationError::MissingType(i)
            | ValidationError::MissingTopType(i)
            | ValidationError::MissingSubType(i)
            | ValidationError::MissingPosition(i)
            | ValidationError::MissingValue(i)
            | ValidationError::UnresolvedPlaceholder { index: i, .. } => Some(*i),
            _ => None,
        }
    }

    pub fn is_trigger_error(&self) -> bool {
        matches!(
            self,
            ValidationError::EmptyTrigger
                | ValidationError::TriggerHasSpace
                | ValidationError::TriggerTooShort
                | ValidationError::InvalidTriggerChar(_)
        )
    }
}

#[derive(Error, Debug)]
pub enum DomainError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("no action with id {0}")]
    UnknownAction(ActionId),

    #[error("action {0} has no type yet")]
    ActionTypeNotSet(ActionId),

    #[error("action {0} is a top query; set its top selection instead")]
    TopSelectionRequired(ActionId),

    #[error("action {0} is not a top query")]
    NotTopQuery(ActionId),

    #[error("{placeholder} on action {id} is a placeholder, not text; choose it from the placeholder option")]
    ReservedPlaceholder {
        id: ActionId,
        placeholder: Placeholder,
    },

    #[error("action {id} cannot hold {placeholder}")]
    PlaceholderNotAllowed {
        id: ActionId,
        placeholder: Placeholder,
    },

    #[error("{placeholder} needs an earlier matching top query before action {id}")]
    PlaceholderUnavailable {
        id: ActionId,
        placeholder: Placeholder,
    },

    #[error("invalid top position: {0}")]
    InvalidPosition(String),

    #[error("invalid bot URL: {0}")]
    InvalidBotUrl(String),

    #[error("payload encoding failed: {0}")]
    Encoding(String),

    #[error("draft error: {0}")]
    Draft(String),

    #[error("UI error: {0}")]
    Ui(String),
}
