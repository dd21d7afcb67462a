//! Core domain layer. No UI or file I/O.
//!
//! The macro model, its validation rules and the transport encoding live here.

pub mod action_list;
pub mod entities;
pub mod errors;
pub mod events;
pub mod link;
pub mod payload;
pub mod trigger;
pub mod validation;

pub use action_list::{ActionList, CascadePolicy, MAX_ACTIONS};
pub use entities::{
    ActionEntry, ActionId, ActionKind, ActionValue, Placeholder, TopPosition, TopScope,
    TopSelection, TopType,
};
pub use errors::{DomainError, ValidationError};
pub use events::ModelEvent;
pub use link::{BotLink, DEFAULT_BOT_URL, MacroLink};
pub use payload::{EncodedPayload, encode};
pub use trigger::sanitize_trigger;
pub use validation::validate;
