//! Draft adapter. Reads macro drafts for the non-interactive `build` command.

pub mod json_draft;

pub use json_draft::MacroDraft;
