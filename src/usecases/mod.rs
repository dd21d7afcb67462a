//! Application use cases. Orchestrate domain logic via ports.

pub mod macro_session;

pub use macro_session::MacroSession;
