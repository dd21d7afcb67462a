//! Change notifications for the rendering collaborator.
//!
//! Events carry model identifiers only; mapping them to widgets is the view's job.

use crate::domain::entities::{ActionId, ActionKind, Placeholder};
use crate::domain::errors::ValidationError;
use crate::domain::link::MacroLink;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelEvent {
    EntryAdded { id: ActionId, position: usize },
    EntryRemoved { id: ActionId, position: usize },
    TypeChanged { id: ActionId, kind: Option<ActionKind> },
    ValueChanged { id: ActionId },
    /// A placeholder lost its enabling top query; the input goes back to text mode.
    ValueCleared { id: ActionId, placeholder: Placeholder },
    CapacityReached { max: usize },
    /// `stripped` is true when input characters were rejected.
    TriggerChanged { trigger: String, stripped: bool },
    ValidationFailed(ValidationError),
    MacroCreated(MacroLink),
    Reset,
}
